//! Upstream rate table abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Trimmed cell texts of one data row of the rate table, in column order.
pub type TableRow = Vec<String>;

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Downloads the rate table and returns its data rows, header excluded.
    async fn fetch_table(&self) -> Result<Vec<TableRow>>;
}

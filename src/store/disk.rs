use crate::core::RateSnapshot;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SNAPSHOT_FILE: &str = "fx_rates.json";

/// The single on-disk rate snapshot. Every write replaces the previous file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes `snapshot` with 4-space indentation into a sibling temp file
    /// and renames it over the artifact, so readers see the old or the new
    /// file and never a partial one.
    pub async fn write(&self, snapshot: &RateSnapshot) -> Result<()> {
        let bytes = to_json_bytes(snapshot)?;
        let tmp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, &bytes)
            .await
            .with_context(|| format!("Failed to write snapshot to {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace snapshot at {}", self.path.display()))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Snapshot written");
        Ok(())
    }

    /// Returns the artifact bytes as stored, or `None` if no fetch has written it yet.
    pub async fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read snapshot at {}", self.path.display())),
        }
    }

    pub async fn read(&self) -> Result<Option<RateSnapshot>> {
        let Some(bytes) = self.read_raw().await? else {
            return Ok(None);
        };
        let snapshot = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse snapshot at {}", self.path.display()))?;
        Ok(Some(snapshot))
    }
}

fn to_json_bytes(snapshot: &RateSnapshot) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    snapshot
        .serialize(&mut serializer)
        .context("Failed to serialize snapshot")?;
    Ok(buf)
}

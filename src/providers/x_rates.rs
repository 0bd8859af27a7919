use crate::core::snapshot::BASE_CURRENCY;
use crate::core::{RateSource, TableRow};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

/// Scrapes the x-rates.com "rates table" for the SGD base currency.
pub struct XRatesProvider {
    base_url: String,
}

impl XRatesProvider {
    pub fn new(base_url: &str) -> Self {
        XRatesProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RateSource for XRatesProvider {
    #[instrument(name = "XRatesFetch", skip(self), fields(base = BASE_CURRENCY))]
    async fn fetch_table(&self) -> Result<Vec<TableRow>> {
        let url = format!("{}/table/?from={}&amount=1", self.base_url, BASE_CURRENCY);
        debug!("Requesting rate table from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("moneygrab/1.0")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for {}", response.status(), url));
        }

        let html = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text from {url}"))?;

        let rows = parse_rate_table(&html)?;
        debug!("Parsed {} rows from rate table", rows.len());
        Ok(rows)
    }
}

/// Extracts the data rows of the first `table.tablesorter.ratesTable` in
/// `html`. The first row is the header and is skipped; cells are `td` texts
/// with surrounding whitespace trimmed.
pub fn parse_rate_table(html: &str) -> Result<Vec<TableRow>> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table.tablesorter.ratesTable")
        .map_err(|e| anyhow!("Invalid table selector: {e:?}"))?;
    let row_selector = Selector::parse("tr").map_err(|e| anyhow!("Invalid row selector: {e:?}"))?;
    let cell_selector = Selector::parse("td").map_err(|e| anyhow!("Invalid cell selector: {e:?}"))?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| anyhow!("Rate table not found in page"))?;

    let rows = table
        .select(&row_selector)
        .skip(1)
        .map(|row| {
            row.select(&cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect()
        })
        .collect();

    Ok(rows)
}

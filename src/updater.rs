//! Background work: the periodic rate fetch and the keep-alive ping.

use crate::core::snapshot::normalize_rows;
use crate::core::{RateFormat, RateSnapshot, RateSource};
use crate::store::SnapshotStore;
use anyhow::{Context, Result, anyhow};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(600);

/// Scrapes the rate table once and replaces the stored snapshot with the result.
///
/// Any failure leaves the previously stored snapshot in place.
pub async fn fetch_fx_rates(
    source: &dyn RateSource,
    store: &SnapshotStore,
    format: RateFormat,
) -> Result<RateSnapshot> {
    let rows = source.fetch_table().await?;
    let rates = normalize_rows(&rows, format);
    debug!(
        "Kept {} of {} table rows as {} entries",
        rates.len(),
        rows.len(),
        format
    );

    let snapshot = RateSnapshot::new(rates);
    store.write(&snapshot).await?;

    info!("FX rates updated at {}", snapshot.timestamp);
    Ok(snapshot)
}

/// Runs [`fetch_fx_rates`] forever, sleeping `interval` after every attempt
/// whether it succeeded or not.
pub async fn auto_update(
    source: &dyn RateSource,
    store: &SnapshotStore,
    format: RateFormat,
    interval: Duration,
) {
    loop {
        if let Err(e) = fetch_fx_rates(source, store, format).await {
            error!("Error during scraping: {e:#}");
        }
        tokio::time::sleep(interval).await;
    }
}

/// Issues one GET to `url`; any non-success status counts as a failure.
pub async fn ping(client: &reqwest::Client, url: &str) -> Result<()> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to ping {url}"))?;
    if !response.status().is_success() {
        return Err(anyhow!("HTTP error: {} for {}", response.status(), url));
    }
    Ok(())
}

/// Requests the service's own public URL every `interval` so an idle-suspending
/// host keeps the process awake. Failures are logged and otherwise ignored.
pub async fn self_ping(url: &str, interval: Duration) {
    let client = match reqwest::Client::builder()
        .user_agent("moneygrab/1.0")
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Falling back to default HTTP client for keep-alive");
            reqwest::Client::new()
        }
    };

    loop {
        match ping(&client, url).await {
            Ok(()) => info!("Pinged self to stay awake."),
            Err(e) => warn!("Ping failed: {e:#}"),
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RateEntry, TableRow};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Replays a scripted sequence of fetch outcomes.
    struct ScriptedSource {
        outcomes: Mutex<Vec<Result<Vec<TableRow>, String>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(mut outcomes: Vec<Result<Vec<TableRow>, String>>) -> Self {
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RateSource for ScriptedSource {
        async fn fetch_table(&self) -> Result<Vec<TableRow>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.outcomes.lock().unwrap().pop();
            match next {
                Some(Ok(rows)) => Ok(rows),
                Some(Err(e)) => Err(anyhow!(e)),
                None => Err(anyhow!("No more scripted outcomes")),
            }
        }
    }

    fn row(cells: &[&str]) -> TableRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fetch_writes_snapshot() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let source = ScriptedSource::new(vec![Ok(vec![
            row(&["US Dollar", "0.771234", "1.2000"]),
            row(&["Klingon Darsek", "9.0", "0.1"]),
            row(&["Euro", "N/A", "N/A"]),
        ])]);

        let snapshot = fetch_fx_rates(&source, &store, RateFormat::Spread)
            .await
            .unwrap();

        assert_eq!(snapshot.base_currency, "SGD");
        assert_eq!(
            snapshot.rates,
            vec![RateEntry::Spread {
                code: "USD".to_string(),
                bid: 1.19988,
                ask: 1.20012
            }]
        );
        assert_eq!(store.read().await.unwrap(), Some(snapshot));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_snapshot() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let source = ScriptedSource::new(vec![
            Ok(vec![row(&["Euro", "0.68", "1.47"])]),
            Err("connection reset".to_string()),
        ]);

        fetch_fx_rates(&source, &store, RateFormat::Spread)
            .await
            .unwrap();
        let before = store.read_raw().await.unwrap();

        let err = fetch_fx_rates(&source, &store, RateFormat::Spread)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(store.read_raw().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_empty_table_still_replaces_snapshot() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let source = ScriptedSource::new(vec![
            Ok(vec![row(&["Euro", "0.68", "1.47"])]),
            Ok(vec![]),
        ]);

        fetch_fx_rates(&source, &store, RateFormat::Spread)
            .await
            .unwrap();
        fetch_fx_rates(&source, &store, RateFormat::Spread)
            .await
            .unwrap();

        let stored = store.read().await.unwrap().unwrap();
        assert!(stored.rates.is_empty());
    }

    #[tokio::test]
    async fn test_auto_update_keeps_running_after_errors() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let source = Arc::new(ScriptedSource::new(vec![
            Err("timeout".to_string()),
            Err("bad gateway".to_string()),
            Ok(vec![row(&["US Dollar", "1.2000"])]),
        ]));

        let task = {
            let source = Arc::clone(&source);
            let store = store.clone();
            tokio::spawn(async move {
                auto_update(&*source, &store, RateFormat::Raw, Duration::from_millis(10)).await
            })
        };

        // Two failed ticks then a successful one
        let mut stored = None;
        for _ in 0..500 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            stored = store.read().await.unwrap();
            if stored.is_some() {
                break;
            }
        }
        task.abort();

        assert!(source.calls.load(Ordering::SeqCst) >= 3);
        assert_eq!(
            stored.expect("auto_update never wrote a snapshot").rates,
            vec![RateEntry::Raw {
                currency: "US Dollar".to_string(),
                rate: 1.2
            }]
        );
    }

    #[tokio::test]
    async fn test_ping_reports_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;
        let client = reqwest::Client::new();

        assert!(ping(&client, &format!("{}/", mock_server.uri())).await.is_ok());
        let err = ping(&client, &format!("{}/down", mock_server.uri()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP error: 502"));
    }
}

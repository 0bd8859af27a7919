use crate::core::config::AppConfig;
use crate::providers::XRatesProvider;
use crate::server;
use crate::store::SnapshotStore;
use crate::updater::{self, DEFAULT_UPDATE_INTERVAL, KEEP_ALIVE_INTERVAL};
use anyhow::Result;
use tracing::info;

/// Starts the background loops, then serves HTTP until the process is stopped.
/// The server does not wait for the first fetch.
pub async fn run(config: &AppConfig) -> Result<()> {
    let data_dir = config.data_dir();
    let store = SnapshotStore::new(&data_dir);
    let source = XRatesProvider::new(config.x_rates_base_url());
    let format = config.format;

    tokio::spawn(async move {
        updater::auto_update(&source, &store, format, DEFAULT_UPDATE_INTERVAL).await
    });

    match config.self_url.clone() {
        Some(url) => {
            info!("Keep-alive enabled for {}", url);
            tokio::spawn(async move { updater::self_ping(&url, KEEP_ALIVE_INTERVAL).await });
        }
        None => info!("Keep-alive disabled, no self_url configured"),
    }

    info!("moneygrab ({} format) is starting", format);
    server::run_server(&data_dir, config.listen_port()).await
}

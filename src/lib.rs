pub mod cli;
pub mod core;
pub mod providers;
pub mod server;
pub mod store;
pub mod updater;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Fetch in the background and serve the snapshot over HTTP
    Serve,
    /// Fetch once, write the snapshot and print it
    Fetch,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Serve => cli::serve::run(&config).await,
        AppCommand::Fetch => {
            let store = store::SnapshotStore::new(&config.data_dir());
            let source = providers::XRatesProvider::new(config.x_rates_base_url());
            cli::fetch::run(&source, &store, config.format).await
        }
    }
}

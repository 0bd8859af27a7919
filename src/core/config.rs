use crate::core::snapshot::RateFormat;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_X_RATES_URL: &str = "https://www.x-rates.com";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct XRatesProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub x_rates: Option<XRatesProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            x_rates: Some(XRatesProviderConfig {
                base_url: DEFAULT_X_RATES_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    /// Listening port; the `PORT` environment variable takes precedence.
    #[serde(default)]
    pub port: Option<u16>,
    /// Directory holding `index.html` and the `fx_rates.json` artifact.
    #[serde(default)]
    pub data_path: Option<String>,
    #[serde(default)]
    pub format: RateFormat,
    /// Public URL of this service. The keep-alive pinger runs only when set.
    #[serde(default)]
    pub self_url: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the config from the default location, or defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "moneygrab", "moneygrab")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_path
            .as_ref()
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
    }

    pub fn x_rates_base_url(&self) -> &str {
        self.providers
            .x_rates
            .as_ref()
            .map_or(DEFAULT_X_RATES_URL, |p| &p.base_url)
    }

    /// Resolves the listening port from the `PORT` environment variable.
    pub fn listen_port(&self) -> u16 {
        self.resolve_port(std::env::var("PORT").ok().as_deref())
    }

    fn resolve_port(&self, env_port: Option<&str>) -> u16 {
        env_port
            .and_then(|p| p.trim().parse::<u16>().ok())
            .or(self.port)
            .unwrap_or(DEFAULT_PORT)
    }
}

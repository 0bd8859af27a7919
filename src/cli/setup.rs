use crate::core::config::AppConfig;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example config to the per-user config directory.
pub fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;
    write_example_config(&path)?;
    Ok(())
}

/// Writes the example config to `path`, creating missing parent directories.
/// Never overwrites an existing file.
pub fn write_example_config(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create config directory {}", dir.display()))?;
    }
    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Cannot write example config to {}", path.display()))?;

    tracing::info!(path = %path.display(), "Wrote example configuration");
    Ok(path.to_path_buf())
}

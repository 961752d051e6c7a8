//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod issuers;
pub mod output;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use cardstmt_core::ParserConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardstmt")
        .join("config.json")
}

/// Load the configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ParserConfig> {
    if let Some(path) = config_path {
        return Ok(ParserConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(ParserConfig::from_file(&default_path)?)
    } else {
        Ok(ParserConfig::default())
    }
}

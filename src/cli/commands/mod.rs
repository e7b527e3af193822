pub mod config;
pub mod lookup;
pub mod suggest;

use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::core::config::{load_or_default, Config};
use crate::core::paths::default_config_path;
use crate::SpeciesLibrary;

/// Config file selected by `--config`, or the default location
pub fn config_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(default_config_path)
}

pub fn load_settings(global: &GlobalArgs) -> anyhow::Result<Config> {
    let path = config_path(global);
    let config = load_or_default(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    debug!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Open the reference library named by `--db`, SPECIESINFO_DB or the config
pub fn open_library(global: &GlobalArgs, config: &Config) -> anyhow::Result<SpeciesLibrary> {
    let path = global
        .db
        .clone()
        .unwrap_or_else(|| config.database_path());
    let library = SpeciesLibrary::open(&path, config.lookup.clone())
        .with_context(|| format!("Failed to open reference library {}", path.display()))?;
    Ok(library)
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::enrich::gbif::MapOptions;
use crate::storage::HabitatRule;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub lookup: LookupConfig,
    pub network: NetworkConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Reference library file (defaults to ~/.speciesinfo/genotree_master_library.db)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// How accession numbers are compared against the library
    pub accession_case: AccessionCase,
    /// How habitat columns become habitat flags
    pub habitat_rule: HabitatRule,
}

/// Accession number comparison mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessionCase {
    /// Upper-case the query before matching
    #[default]
    Upper,
    /// Compare the raw query
    Exact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Endpoint probed before any enrichment is attempted
    pub probe_url: String,
    pub probe_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub gbif_api: String,
    pub gbif_map_api: String,
    pub wikipedia_api: String,
    pub ncbi_api: String,
    /// Occurrence map rendering, `[network.map]`
    pub map: MapOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format (text, json)
    pub format: String,
    /// Maximum number of suggestions listed
    pub suggestion_limit: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            accession_case: AccessionCase::Upper,
            habitat_rule: HabitatRule::CellPresent,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_url: "https://api.gbif.org/".to_string(),
            probe_timeout_secs: 5,
            request_timeout_secs: 30,
            user_agent: format!("SpeciesInfo/{}", env!("CARGO_PKG_VERSION")),
            gbif_api: "https://api.gbif.org/v1".to_string(),
            gbif_map_api: "https://api.gbif.org/v2/map/occurrence".to_string(),
            wikipedia_api: "https://en.wikipedia.org/api/rest_v1".to_string(),
            ncbi_api: "https://api.ncbi.nlm.nih.gov/datasets/v2".to_string(),
            map: MapOptions::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            suggestion_limit: 20,
        }
    }
}

impl Config {
    /// Library path: `SPECIESINFO_DB`, then the config file, then the default
    pub fn database_path(&self) -> PathBuf {
        if let Ok(path) = std::env::var("SPECIESINFO_DB") {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }
        self.database
            .path
            .clone()
            .unwrap_or_else(super::paths::default_database_path)
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::SpeciesInfoError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::SpeciesInfoError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

/// Load the config file if it exists, defaults otherwise
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, crate::SpeciesInfoError> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        Ok(default_config())
    }
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::SpeciesInfoError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::SpeciesInfoError::Config(format!("Failed to serialize config: {}", e)))?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

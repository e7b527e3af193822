use std::path::PathBuf;

/// File name of the bundled reference library
pub const DATABASE_FILE_NAME: &str = "genotree_master_library.db";

/// Get the SpeciesInfo home directory
/// Checks SPECIESINFO_HOME environment variable, falls back to ~/.speciesinfo
pub fn speciesinfo_home() -> PathBuf {
    if let Ok(path) = std::env::var("SPECIESINFO_HOME") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".speciesinfo")
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    speciesinfo_home().join("config.toml")
}

/// Default reference library location
pub fn default_database_path() -> PathBuf {
    speciesinfo_home().join(DATABASE_FILE_NAME)
}

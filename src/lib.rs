pub mod bio;
pub mod cli;
pub mod core;
pub mod enrich;
pub mod report;
pub mod storage;
pub mod suggest;

pub use crate::core::library::SpeciesLibrary;
pub use crate::core::resolver::{KeyKind, RowHandle, SearchMode};
pub use crate::storage::SpeciesStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeciesInfoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SpeciesInfoError {
    fn from(err: reqwest::Error) -> Self {
        SpeciesInfoError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SpeciesInfoError {
    fn from(err: serde_json::Error) -> Self {
        SpeciesInfoError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SpeciesInfoError>;

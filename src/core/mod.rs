pub mod aggregator;
pub mod assembler;
pub mod config;
pub mod library;
pub mod paths;
pub mod pipeline;
pub mod resolver;

pub use config::Config;
pub use library::SpeciesLibrary;
pub use pipeline::{run_search, SearchReport, SearchRequest};

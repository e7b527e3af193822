pub mod commands;
pub mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "speciesinfo",
    version,
    about = "Species information from a local genome reference library",
    long_about = "SpeciesInfo looks up species in a genome reference library by accession number, \
                  genome index, scientific name or taxon group, and can enrich the answer with the \
                  GBIF backbone, Wikipedia summaries and NCBI genome reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Reference library (overrides SPECIESINFO_DB and the config file)
    #[arg(long, value_name = "FILE", global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.speciesinfo/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a species or taxon group
    Lookup(commands::lookup::LookupArgs),

    /// List completions for a partial query
    Suggest(commands::suggest::SuggestArgs),

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

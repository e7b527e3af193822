use clap::Parser;
use colored::*;
use speciesinfo::cli::{Cli, Commands};
use speciesinfo::SpeciesInfoError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // SPECIESINFO_LOG sets the level unless RUST_LOG gives a full filter; -v raises it
    let log_level = match cli.global.verbose {
        0 => std::env::var("SPECIESINFO_LOG").unwrap_or_else(|_| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<SpeciesInfoError>() {
            Some(SpeciesInfoError::Config(_)) => 2,
            Some(SpeciesInfoError::Io(_)) => 3,
            Some(SpeciesInfoError::Database(_)) | Some(SpeciesInfoError::Schema(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Lookup(args) => speciesinfo::cli::commands::lookup::run(args, &global),
        Commands::Suggest(args) => speciesinfo::cli::commands::suggest::run(args, &global),
        Commands::Config(args) => speciesinfo::cli::commands::config::run(args, &global),
    }
}

use clap::{Args, Subcommand};

use crate::cli::output::{section_header, success, warning};
use crate::cli::GlobalArgs;
use crate::core::config::{default_config, save_config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file location
    Path,
}

pub fn run(args: ConfigArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let path = super::config_path(global);

    match args.command {
        ConfigCommands::Show => {
            let config = super::load_settings(global)?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| crate::SpeciesInfoError::Config(e.to_string()))?;
            section_header(&format!("Configuration ({})", path.display()));
            println!("{}", rendered);
            println!("# reference library: {}", config.database_path().display());
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                warning(&format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                ));
                return Ok(());
            }
            save_config(&path, &default_config())?;
            success(&format!("Wrote default configuration to {}", path.display()));
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}

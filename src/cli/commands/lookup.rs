use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

use crate::cli::GlobalArgs;
use crate::core::pipeline::{run_search, SearchRequest};
use crate::core::resolver::SearchMode;
use crate::enrich::gbif::{MapBin, MapOptions};
use crate::enrich::EnrichmentClients;
use crate::report::{render, ReportFormat};

#[derive(Args)]
pub struct LookupArgs {
    /// Accession number, genome index, scientific name or taxon
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// What the query is (accession, index, name, taxon)
    #[arg(short, long, default_value = "name")]
    pub by: SearchMode,

    /// Add the GBIF backbone classification
    #[arg(long)]
    pub gbif: bool,

    /// Add the Wikipedia page summary
    #[arg(long)]
    pub wikipedia: bool,

    /// Add the NCBI genome report
    #[arg(long)]
    pub ncbi: bool,

    /// Enable every online source
    #[arg(long)]
    pub all: bool,

    /// Skip the reference library section
    #[arg(long)]
    pub no_table: bool,

    /// Output format (text, json); defaults to the config value
    #[arg(long)]
    pub format: Option<String>,

    /// GBIF map style, e.g. classic.point
    #[arg(long)]
    pub map_style: Option<String>,

    /// GBIF map binning (hex, square)
    #[arg(long)]
    pub map_bin: Option<MapBin>,

    /// Hexagons per tile or square size for the GBIF map
    #[arg(long)]
    pub map_bin_size: Option<u32>,

    /// Restrict the GBIF map to a year or a range such as 1990,2020
    #[arg(long)]
    pub map_year: Option<String>,
}

impl LookupArgs {
    /// Build the search, with map flags overriding the configured map
    pub fn request(&self, configured_map: &MapOptions) -> SearchRequest {
        let mut map = configured_map.clone();
        if let Some(style) = &self.map_style {
            map.style = style.clone();
        }
        if let Some(bin) = self.map_bin {
            if bin != map.bin {
                map.bin_size = None;
            }
            map.bin = bin;
        }
        if let Some(size) = self.map_bin_size {
            map.bin_size = Some(size);
        }
        if let Some(year) = &self.map_year {
            map.year = Some(year.clone());
        }

        SearchRequest {
            mode: self.by,
            query: self.query.clone(),
            table: !self.no_table,
            gbif: self.gbif || self.all,
            wikipedia: self.wikipedia || self.all,
            ncbi: self.ncbi || self.all,
            map,
        }
    }
}

pub fn run(args: LookupArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = super::load_settings(global)?;
    let format: ReportFormat = args
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse::<ReportFormat>()
        .map_err(crate::SpeciesInfoError::Config)?;

    let library = super::open_library(global, &config)?;
    let clients = EnrichmentClients::from_config(&config.network)?;
    let request = args.request(&config.network.map);

    info!("Looking up {} '{}'", request.mode, request.query);

    let report = if request.sources().is_empty() {
        run_search(&library, &clients, &request)
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        spinner.set_message("Querying online sources...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let report = run_search(&library, &clients, &request);
        spinner.finish_and_clear();
        report
    };

    print!("{}", render(&report, format)?);
    if format == ReportFormat::Json {
        println!();
    }
    Ok(())
}

//! Optional enrichment from external biodiversity services
//!
//! Every client sits behind a trait so the search pipeline can be exercised
//! without network access. Calls are blocking; a single connectivity probe
//! gates all of them.
pub mod connectivity;
pub mod gbif;
pub mod ncbi;
pub mod wikipedia;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::core::config::NetworkConfig;
use crate::Result;

pub use connectivity::{Connectivity, HttpProbe};
pub use gbif::{Backbone, GbifClient, MapBin, MapOptions};
pub use ncbi::{GenomeQuery, GenomeReport, NcbiClient};
pub use wikipedia::{PageSummary, WikipediaClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentSource {
    Gbif,
    Wikipedia,
    Ncbi,
}

impl EnrichmentSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gbif => "GBIF",
            Self::Wikipedia => "Wikipedia",
            Self::Ncbi => "NCBI",
        }
    }

    /// Fixed message shown instead of a section when the probe failed
    pub fn offline_advisory(&self) -> String {
        format!(
            "No internet connection available, {} search impossible.",
            self.label()
        )
    }
}

impl fmt::Display for EnrichmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait ConnectivityProbe {
    fn probe(&self) -> Connectivity;
}

/// Taxonomic backbone classification for a scientific name
#[cfg_attr(test, mockall::automock)]
pub trait BackboneLookup {
    fn backbone(&self, name: &str) -> Result<Backbone>;

    /// Density map tile for a backbone usage key
    fn occurrence_map_url(&self, usage_key: u64, options: &MapOptions) -> Result<String>;
}

/// Encyclopedia summary for a page title
#[cfg_attr(test, mockall::automock)]
pub trait SummaryLookup {
    fn summary(&self, title: &str) -> Result<PageSummary>;
}

/// Genome metadata by accession number or taxon name
#[cfg_attr(test, mockall::automock)]
pub trait GenomeLookup {
    fn genome_report(&self, query: &GenomeQuery) -> Result<Option<GenomeReport>>;
}

/// The set of clients a search pipeline may call
pub struct EnrichmentClients {
    pub probe: Box<dyn ConnectivityProbe>,
    pub gbif: Box<dyn BackboneLookup>,
    pub wikipedia: Box<dyn SummaryLookup>,
    pub ncbi: Box<dyn GenomeLookup>,
}

impl EnrichmentClients {
    /// HTTP-backed clients sharing one connection pool
    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        let client = http_client(config)?;

        Ok(Self {
            probe: Box::new(HttpProbe::new(
                &config.probe_url,
                Duration::from_secs(config.probe_timeout_secs),
                client.clone(),
            )),
            gbif: Box::new(GbifClient::new(&config.gbif_api, &config.gbif_map_api, client.clone())),
            wikipedia: Box::new(WikipediaClient::new(&config.wikipedia_api, client.clone())),
            ncbi: Box::new(NcbiClient::new(&config.ncbi_api, client)),
        })
    }
}

/// Blocking client with the configured user agent and request timeout
pub fn http_client(config: &NetworkConfig) -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Append path segments to a base URL, percent-encoding each one
///
/// Segments are pushed whole, so a `/`, `?` or `#` inside a user-supplied
/// name stays part of that segment.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> anyhow::Result<reqwest::Url> {
    let mut url = reqwest::Url::parse(base)
        .with_context(|| format!("Invalid service base URL: {}", base))?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Service base URL cannot take a path: {}", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

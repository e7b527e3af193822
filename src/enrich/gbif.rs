//! GBIF backbone client (https://www.gbif.org/developer/species)
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::{endpoint, BackboneLookup};
use crate::bio::taxonomy::TaxonomicRank;
use crate::{Result, SpeciesInfoError};

/// The fields of a backbone match this tool reads; any subset may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backbone {
    pub usage_key: Option<u64>,
    pub scientific_name: Option<String>,
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub match_type: Option<String>,
}

impl Backbone {
    pub fn rank(&self, rank: TaxonomicRank) -> Option<&str> {
        match rank {
            TaxonomicRank::Kingdom => self.kingdom.as_deref(),
            TaxonomicRank::Phylum => self.phylum.as_deref(),
            TaxonomicRank::Class => self.class.as_deref(),
            TaxonomicRank::Order => self.order.as_deref(),
            TaxonomicRank::Family => self.family.as_deref(),
            TaxonomicRank::Genus => self.genus.as_deref(),
            TaxonomicRank::TaxonGroup => None,
        }
    }

    /// Present ranks, kingdom first, as (label, value)
    pub fn present_ranks(&self) -> Vec<(&'static str, &str)> {
        TaxonomicRank::PATH
            .iter()
            .filter_map(|rank| self.rank(*rank).map(|value| (rank.label(), value)))
            .collect()
    }

    /// Three-line summary: full name, rank guide, rank values
    ///
    /// Without a kingdom the classification is reported as not available.
    pub fn summary(&self) -> String {
        let name = self.scientific_name.as_deref().unwrap_or("not available.");

        let (guide, path) = if self.kingdom.is_some() {
            let ranks = self.present_ranks();
            let labels = ranks.iter().map(|(label, _)| *label).collect::<Vec<_>>();
            let values = ranks.iter().map(|(_, value)| *value).collect::<Vec<_>>();
            (format!("as {}", labels.join(" > ")), values.join(" > "))
        } else {
            ("not available.".to_string(), String::new())
        };

        format!("Full name {}\nTaxonomic path {}\n{}", name, guide, path)
    }
}

/// Occurrence binning of the density map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapBin {
    #[default]
    Hex,
    Square,
}

impl MapBin {
    /// Tile parameter that sizes the bins, with its default value
    fn size_param(&self) -> (&'static str, u32) {
        match self {
            MapBin::Hex => ("hexPerTile", 200),
            MapBin::Square => ("squareSize", 16),
        }
    }
}

impl FromStr for MapBin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(MapBin::Hex),
            "square" => Ok(MapBin::Square),
            _ => Err(format!("Unknown map bin '{}' (expected hex or square)", s)),
        }
    }
}

impl fmt::Display for MapBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapBin::Hex => write!(f, "hex"),
            MapBin::Square => write!(f, "square"),
        }
    }
}

/// Rendering options for the occurrence density map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub style: String,
    pub bin: MapBin,
    /// Hexagons per tile or square size in pixels; the bin's default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_size: Option<u32>,
    /// A single year or an inclusive range such as `1990,2020`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            style: "purpleYellow-noborder.poly".to_string(),
            bin: MapBin::Hex,
            bin_size: None,
            year: None,
        }
    }
}

pub struct GbifClient {
    base_url: String,
    map_base_url: String,
    client: reqwest::blocking::Client,
}

impl GbifClient {
    pub fn new(base_url: &str, map_base_url: &str, client: reqwest::blocking::Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            map_base_url: map_base_url.to_string(),
            client,
        }
    }

    /// World tile at zoom 0 for one usage key
    pub fn map_url(&self, usage_key: u64, options: &MapOptions) -> anyhow::Result<reqwest::Url> {
        let mut url = endpoint(&self.map_base_url, &["density", "0", "0", "0@1x.png"])?;
        let (size_param, default_size) = options.bin.size_param();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("taxonKey", &usage_key.to_string())
                .append_pair("bin", &options.bin.to_string())
                .append_pair(size_param, &options.bin_size.unwrap_or(default_size).to_string())
                .append_pair("style", &options.style)
                .append_pair("srs", "EPSG:3857");
            if let Some(year) = options.year.as_deref().filter(|y| !y.trim().is_empty()) {
                query.append_pair("year", year.trim());
            }
        }
        Ok(url)
    }

    fn fetch_backbone(&self, name: &str) -> anyhow::Result<Backbone> {
        let url = endpoint(&self.base_url, &["species", "match"])?;
        let response = self
            .client
            .get(url)
            .query(&[("name", name)])
            .send()
            .with_context(|| format!("Failed to query GBIF backbone for {}", name))?;

        if !response.status().is_success() {
            anyhow::bail!("GBIF API returned status: {}", response.status());
        }

        let backbone: Backbone = response.json().context("Failed to decode GBIF response")?;
        debug!("GBIF match for {}: {:?}", name, backbone.match_type);
        Ok(backbone)
    }
}

impl BackboneLookup for GbifClient {
    fn backbone(&self, name: &str) -> Result<Backbone> {
        self.fetch_backbone(name)
            .map_err(|e| SpeciesInfoError::Network(format!("{:#}", e)))
    }

    fn occurrence_map_url(&self, usage_key: u64, options: &MapOptions) -> Result<String> {
        self.map_url(usage_key, options)
            .map(String::from)
            .map_err(|e| SpeciesInfoError::Config(format!("{:#}", e)))
    }
}

//! NCBI Datasets genome reports (https://www.ncbi.nlm.nih.gov/datasets/docs/v2/api/rest-api/)
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{endpoint, GenomeLookup};
use crate::{Result, SpeciesInfoError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum GenomeQuery {
    Accession(String),
    Taxon(String),
}

impl GenomeQuery {
    pub fn value(&self) -> &str {
        match self {
            GenomeQuery::Accession(v) | GenomeQuery::Taxon(v) => v,
        }
    }

    fn segments(&self) -> [&str; 4] {
        match self {
            GenomeQuery::Accession(acc) => ["genome", "accession", acc.as_str(), "dataset_report"],
            GenomeQuery::Taxon(name) => ["genome", "taxon", name.as_str(), "dataset_report"],
        }
    }
}

/// Organism fields and biosample attributes of the first dataset report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeReport {
    pub organism: Vec<(String, String)>,
    pub biosample_attributes: Vec<(String, String)>,
}

impl GenomeReport {
    /// Extract what is present from a `dataset_report` payload
    ///
    /// Returns `None` only when the payload has neither organism fields nor
    /// biosample attributes.
    pub fn from_json(payload: &Value) -> Option<Self> {
        let report = payload.get("reports")?.as_array()?.first()?;

        let organism = report
            .get("organism")
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), plain_text(value)))
                    .collect()
            })
            .unwrap_or_default();

        let biosample_attributes = report
            .pointer("/assembly_info/biosample/attributes")
            .and_then(Value::as_array)
            .map(|attributes| {
                attributes
                    .iter()
                    .filter_map(|attr| {
                        let name = attr.get("name")?.as_str()?;
                        let value = attr.get("value").map(plain_text).unwrap_or_default();
                        Some((name.to_string(), value))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let report = GenomeReport {
            organism,
            biosample_attributes,
        };
        if report.organism.is_empty() && report.biosample_attributes.is_empty() {
            None
        } else {
            Some(report)
        }
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub struct NcbiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl NcbiClient {
    pub fn new(base_url: &str, client: reqwest::blocking::Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    pub fn report_url(&self, query: &GenomeQuery) -> anyhow::Result<reqwest::Url> {
        endpoint(&self.base_url, &query.segments())
    }

    fn fetch_report(&self, query: &GenomeQuery) -> anyhow::Result<Option<GenomeReport>> {
        let url = self.report_url(query)?;
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch NCBI dataset report for {}", query.value()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("NCBI API returned status: {}", response.status());
        }

        let payload: Value = response.json().context("Failed to decode NCBI response")?;
        let report = GenomeReport::from_json(&payload);
        debug!("NCBI report for {:?} present: {}", query, report.is_some());
        Ok(report)
    }
}

impl GenomeLookup for NcbiClient {
    fn genome_report(&self, query: &GenomeQuery) -> Result<Option<GenomeReport>> {
        self.fetch_report(query)
            .map_err(|e| SpeciesInfoError::Network(format!("{:#}", e)))
    }
}

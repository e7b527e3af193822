//! Wikipedia page summaries through the REST API
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{endpoint, SummaryLookup};
use crate::{Result, SpeciesInfoError};

pub const MISSING_PAGE: &str = "Wikipedia page does not exist.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageSummary {
    Found { title: String, extract: String },
    Missing,
}

impl PageSummary {
    /// Summary text, or the missing-page sentinel
    pub fn text(&self) -> &str {
        match self {
            PageSummary::Found { extract, .. } => extract,
            PageSummary::Missing => MISSING_PAGE,
        }
    }

    /// Read a REST summary payload; no extract means no usable page
    pub fn from_json(payload: &Value, fallback_title: &str) -> Self {
        let extract = payload
            .get("extract")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();

        if extract.is_empty() {
            return PageSummary::Missing;
        }

        let title = payload
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(fallback_title)
            .to_string();

        PageSummary::Found {
            title,
            extract: extract.to_string(),
        }
    }
}

pub struct WikipediaClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl WikipediaClient {
    pub fn new(base_url: &str, client: reqwest::blocking::Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    /// Summary endpoint for a title, spaces written as underscores
    pub fn summary_url(&self, title: &str) -> anyhow::Result<reqwest::Url> {
        let page = title.trim().replace(' ', "_");
        endpoint(&self.base_url, &["page", "summary", &page])
    }

    fn fetch_summary(&self, title: &str) -> anyhow::Result<PageSummary> {
        let url = self.summary_url(title)?;

        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch Wikipedia summary for {}", title))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(PageSummary::Missing);
        }
        if !response.status().is_success() {
            anyhow::bail!("Wikipedia API returned status: {}", response.status());
        }

        let payload: Value = response.json().context("Failed to decode Wikipedia response")?;
        Ok(PageSummary::from_json(&payload, title))
    }
}

impl SummaryLookup for WikipediaClient {
    fn summary(&self, title: &str) -> Result<PageSummary> {
        self.fetch_summary(title)
            .map_err(|e| SpeciesInfoError::Network(format!("{:#}", e)))
    }
}

use anyhow::Result;
use std::str::FromStr;

use crate::core::pipeline::SearchReport;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

pub fn render(report: &SearchReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => text::generate_text_report(report),
        ReportFormat::Json => json::generate_json_report(report),
    }
}

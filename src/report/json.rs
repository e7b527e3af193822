use crate::core::pipeline::SearchReport;
use anyhow::Result;

pub fn generate_json_report(report: &SearchReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

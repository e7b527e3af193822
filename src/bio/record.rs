//! The assembled answer to a species lookup
use serde::{Deserialize, Serialize};

use super::taxonomy::{HabitatFlags, TaxonomicPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// Row identifier of the first resolved row
    pub index: i64,
    /// Every row identifier in the resolved set, first-seen order
    pub indices: Vec<i64>,
    pub accession_numbers: Vec<String>,
    pub scientific_name: Option<String>,
    pub authority: Option<String>,
    pub taxonomic_path: TaxonomicPath,
    pub taxon_group: Option<String>,
    pub vernacular_english: Option<String>,
    pub vernacular_german: Option<String>,
    pub habitats: HabitatFlags,
}

impl SpeciesRecord {
    /// Scientific name or `unknown`
    pub fn display_name(&self) -> &str {
        self.scientific_name.as_deref().unwrap_or("unknown")
    }

    /// Name followed by its authority citation when one is recorded
    pub fn full_name(&self) -> String {
        match &self.authority {
            Some(authority) => format!("{} {}", self.display_name(), authority),
            None => self.display_name().to_string(),
        }
    }
}

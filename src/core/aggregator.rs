//! Taxon-group aggregation: every species under a rank value
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::bio::taxonomy::{capitalize, TaxonomicRank};
use crate::storage::SpeciesStore;

/// Columns checked, in order. When several columns contain the value the
/// last one in this order names the match.
pub const TAXON_SCAN_ORDER: [TaxonomicRank; 7] = [
    TaxonomicRank::TaxonGroup,
    TaxonomicRank::Kingdom,
    TaxonomicRank::Phylum,
    TaxonomicRank::Class,
    TaxonomicRank::Order,
    TaxonomicRank::Family,
    TaxonomicRank::Genus,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonGroupMatch {
    /// Scientific names under the value, de-duplicated and sorted
    pub species: Vec<String>,
    pub matched_rank: Option<TaxonomicRank>,
}

impl TaxonGroupMatch {
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Label of the matched rank, empty when nothing matched
    pub fn matched_rank_label(&self) -> &'static str {
        self.matched_rank.map(|rank| rank.label()).unwrap_or("")
    }
}

pub fn aggregate_by_taxon(store: &SpeciesStore, value: &str) -> TaxonGroupMatch {
    let query = capitalize(value.trim());
    let mut species = BTreeSet::new();
    let mut matched_rank = None;

    for rank in TAXON_SCAN_ORDER {
        let mut hit = false;
        for row in store.rows() {
            if row.rank_value(rank) == Some(query.as_str()) {
                hit = true;
                if let Some(name) = &row.scientific_name {
                    species.insert(name.clone());
                }
            }
        }
        if hit {
            matched_rank = Some(rank);
        }
    }

    debug!(
        "Taxon '{}' matched {} species at {:?}",
        query,
        species.len(),
        matched_rank
    );

    TaxonGroupMatch {
        species: species.into_iter().collect(),
        matched_rank,
    }
}

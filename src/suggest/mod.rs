//! Autocomplete suggestions for each search mode
pub mod trie;

pub use trie::Trie;

use crate::bio::taxonomy::TaxonomicRank;
use crate::core::aggregator::TAXON_SCAN_ORDER;
use crate::core::resolver::SearchMode;
use crate::storage::SpeciesStore;

/// Vocabulary of a search mode, with holes for absent cells
pub fn vocabulary(store: &SpeciesStore, mode: SearchMode) -> Vec<Option<String>> {
    let rows = store.rows();
    match mode {
        SearchMode::AccessionNumber => rows.iter().map(|r| r.accession_number.clone()).collect(),
        SearchMode::GenomeIndex => rows.iter().map(|r| Some(r.index.to_string())).collect(),
        SearchMode::ScientificName => rows.iter().map(|r| r.scientific_name.clone()).collect(),
        SearchMode::TaxonGroup => rows
            .iter()
            .flat_map(|r| {
                TAXON_SCAN_ORDER
                    .into_iter()
                    .map(move |rank: TaxonomicRank| r.rank_value(rank).map(str::to_string))
            })
            .collect(),
    }
}

/// Build a fresh trie for one search mode
pub fn build_trie(store: &SpeciesStore, mode: SearchMode) -> Trie {
    Trie::build(vocabulary(store, mode))
}

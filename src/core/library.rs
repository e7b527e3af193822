use std::path::Path;

use crate::bio::SpeciesRecord;
use crate::core::aggregator::{aggregate_by_taxon, TaxonGroupMatch};
use crate::core::assembler::assemble;
use crate::core::config::LookupConfig;
use crate::core::resolver::{self, KeyKind, RowHandle, SearchMode};
use crate::enrich::GenomeQuery;
use crate::storage::{open_sqlite, SpeciesStore};
use crate::suggest::{build_trie, Trie};
use crate::Result;

/// Read-only facade over one loaded reference library
///
/// Owns the store and the lookup settings; every query goes through here so
/// that no component reaches for a global connection.
pub struct SpeciesLibrary {
    store: SpeciesStore,
    settings: LookupConfig,
}

impl SpeciesLibrary {
    pub fn new(store: SpeciesStore, settings: LookupConfig) -> Self {
        Self { store, settings }
    }

    /// Open and validate a SQLite reference library
    pub fn open<P: AsRef<Path>>(path: P, settings: LookupConfig) -> Result<Self> {
        let store = open_sqlite(path)?;
        Ok(Self::new(store, settings))
    }

    pub fn store(&self) -> &SpeciesStore {
        &self.store
    }

    pub fn settings(&self) -> &LookupConfig {
        &self.settings
    }

    pub fn resolve(&self, kind: KeyKind, value: &str) -> Result<Vec<RowHandle>> {
        resolver::resolve(&self.store, kind, value, self.settings.accession_case)
    }

    /// Resolve and assemble; `Ok(None)` when nothing matches
    pub fn lookup(&self, kind: KeyKind, value: &str) -> Result<Option<SpeciesRecord>> {
        let rows = self.resolve(kind, value)?;
        Ok(assemble(&self.store, &rows, self.settings.habitat_rule))
    }

    pub fn taxon_group(&self, value: &str) -> TaxonGroupMatch {
        aggregate_by_taxon(&self.store, value)
    }

    /// Suggestion index for one search mode, rebuilt on each call
    pub fn suggestions(&self, mode: SearchMode) -> Trie {
        build_trie(&self.store, mode)
    }

    /// Name handed to name-based services (GBIF, Wikipedia)
    pub fn scientific_name_for(&self, mode: SearchMode, value: &str) -> Option<String> {
        scientific_name_from(mode, value, self.record_for(mode, value).as_ref())
    }

    /// Genome report query for a search
    pub fn genome_query_for(&self, mode: SearchMode, value: &str) -> Option<GenomeQuery> {
        genome_query_from(mode, value, self.record_for(mode, value).as_ref())
    }

    fn record_for(&self, mode: SearchMode, value: &str) -> Option<SpeciesRecord> {
        let kind = mode.key_kind()?;
        self.lookup(kind, value).ok().flatten()
    }
}

/// Service name from an already resolved record
///
/// A record yields its own scientific name. Without one only the free-text
/// modes fall back to the query itself.
pub fn scientific_name_from(
    mode: SearchMode,
    value: &str,
    record: Option<&SpeciesRecord>,
) -> Option<String> {
    if let Some(name) = record.and_then(|r| r.scientific_name.as_ref()) {
        return Some(name.clone());
    }

    match mode {
        SearchMode::ScientificName | SearchMode::TaxonGroup => Some(value.trim().to_string()),
        SearchMode::AccessionNumber | SearchMode::GenomeIndex => None,
    }
}

/// Genome report query from an already resolved record
///
/// Library hits are looked up by their first accession number. Misses
/// query by accession in accession mode and by taxon name in the free-text
/// modes; an unknown genome index has nothing to ask for.
pub fn genome_query_from(
    mode: SearchMode,
    value: &str,
    record: Option<&SpeciesRecord>,
) -> Option<GenomeQuery> {
    if let Some(accession) = record.and_then(|r| r.accession_numbers.first()) {
        return Some(GenomeQuery::Accession(accession.clone()));
    }

    let query = value.trim();
    if query.is_empty() {
        return None;
    }
    match mode {
        SearchMode::AccessionNumber => Some(GenomeQuery::Accession(query.to_string())),
        SearchMode::GenomeIndex => None,
        SearchMode::ScientificName | SearchMode::TaxonGroup => {
            Some(GenomeQuery::Taxon(query.to_string()))
        }
    }
}

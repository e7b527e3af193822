//! Key resolution against the reference library
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::bio::taxonomy::capitalize;
use crate::core::config::AccessionCase;
use crate::storage::SpeciesStore;
use crate::{Result, SpeciesInfoError};

/// Keys that resolve to individual library rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    AccessionNumber,
    GenomeIndex,
    ScientificName,
}

/// What the user searches by; taxon groups go through the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    AccessionNumber,
    GenomeIndex,
    ScientificName,
    TaxonGroup,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        Self::AccessionNumber,
        Self::GenomeIndex,
        Self::ScientificName,
        Self::TaxonGroup,
    ];

    pub fn key_kind(&self) -> Option<KeyKind> {
        match self {
            Self::AccessionNumber => Some(KeyKind::AccessionNumber),
            Self::GenomeIndex => Some(KeyKind::GenomeIndex),
            Self::ScientificName => Some(KeyKind::ScientificName),
            Self::TaxonGroup => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AccessionNumber => "Accession Number",
            Self::GenomeIndex => "Genome Index",
            Self::ScientificName => "Scientific Name",
            Self::TaxonGroup => "Taxon Group",
        }
    }
}

impl From<KeyKind> for SearchMode {
    fn from(kind: KeyKind) -> Self {
        match kind {
            KeyKind::AccessionNumber => Self::AccessionNumber,
            KeyKind::GenomeIndex => Self::GenomeIndex,
            KeyKind::ScientificName => Self::ScientificName,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "accession" | "accession-number" | "acc" => Ok(Self::AccessionNumber),
            "index" | "genome-index" | "idx" => Ok(Self::GenomeIndex),
            "name" | "scientific-name" | "species" => Ok(Self::ScientificName),
            "taxon" | "taxon-group" | "group" => Ok(Self::TaxonGroup),
            _ => Err(format!("Unknown search mode: {}", s)),
        }
    }
}

/// Position of a row in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(pub usize);

/// A query normalised the way the library stores keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedKey {
    Accession(String),
    Index(i64),
    Name(String),
}

/// Normalise a raw query for the given key kind
///
/// Genome indices must parse as integers; anything else is `InvalidKey`.
pub fn normalize_key(kind: KeyKind, value: &str, case: AccessionCase) -> Result<NormalizedKey> {
    let trimmed = value.trim();
    match kind {
        KeyKind::AccessionNumber => Ok(NormalizedKey::Accession(match case {
            AccessionCase::Upper => trimmed.to_uppercase(),
            AccessionCase::Exact => trimmed.to_string(),
        })),
        KeyKind::GenomeIndex => trimmed.parse::<i64>().map(NormalizedKey::Index).map_err(|_| {
            SpeciesInfoError::InvalidKey(format!("genome index '{}' is not an integer", trimmed))
        }),
        KeyKind::ScientificName => Ok(NormalizedKey::Name(capitalize(trimmed))),
    }
}

/// Find every row matching the key; an empty list means "not found"
pub fn resolve(
    store: &SpeciesStore,
    kind: KeyKind,
    value: &str,
    case: AccessionCase,
) -> Result<Vec<RowHandle>> {
    let key = normalize_key(kind, value, case)?;

    let handles: Vec<RowHandle> = store
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| match &key {
            NormalizedKey::Accession(acc) => row.accession_number.as_deref() == Some(acc.as_str()),
            NormalizedKey::Index(idx) => row.index == *idx,
            NormalizedKey::Name(name) => row.scientific_name.as_deref() == Some(name.as_str()),
        })
        .map(|(position, _)| RowHandle(position))
        .collect();

    debug!("Resolved {:?} '{}' to {} rows", kind, value, handles.len());
    Ok(handles)
}

//! Reference library storage
//!
//! The library is read once into typed rows (one row per genome) and then
//! treated as immutable. Absence is normalised here: SQL NULL, empty strings
//! and the spreadsheet placeholder `nan` all become `None`/`Cell::Null`, so
//! nothing downstream has to know about sentinels.
pub mod sqlite;

use serde::{Deserialize, Serialize};

use crate::bio::taxonomy::{Habitat, HabitatFlags, TaxonomicPath, TaxonomicRank};

pub use sqlite::{open_sqlite, REQUIRED_COLUMNS};

/// A raw cell from a habitat column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    /// Build a text cell, folding the absence placeholders into `Null`
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if is_placeholder(&value) {
            Cell::Null
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Cell::Null)
    }

    /// Boolean reading of the cell: non-zero numbers and yes-like text
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Null => false,
            Cell::Integer(v) => *v != 0,
            Cell::Real(v) => *v != 0.0,
            Cell::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "y" | "x"
            ),
        }
    }
}

/// How habitat columns turn into flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HabitatRule {
    /// Any non-null cell sets the flag, whatever its value
    #[default]
    CellPresent,
    /// Only a truthy cell sets the flag
    ValueTrue,
}

/// The four habitat columns of one row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitatCells {
    pub marine: Cell,
    pub brackish: Cell,
    pub freshwater: Cell,
    pub terrestrial: Cell,
}

impl Default for HabitatCells {
    fn default() -> Self {
        Self {
            marine: Cell::Null,
            brackish: Cell::Null,
            freshwater: Cell::Null,
            terrestrial: Cell::Null,
        }
    }
}

impl HabitatCells {
    pub fn cell(&self, habitat: Habitat) -> &Cell {
        match habitat {
            Habitat::Marine => &self.marine,
            Habitat::Brackish => &self.brackish,
            Habitat::Freshwater => &self.freshwater,
            Habitat::Terrestrial => &self.terrestrial,
        }
    }

    pub fn flags(&self, rule: HabitatRule) -> HabitatFlags {
        Habitat::ALL
            .into_iter()
            .filter(|habitat| {
                let cell = self.cell(*habitat);
                match rule {
                    HabitatRule::CellPresent => cell.is_present(),
                    HabitatRule::ValueTrue => cell.is_truthy(),
                }
            })
            .collect()
    }
}

/// One genome row of the reference library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRow {
    pub index: i64,
    pub accession_number: Option<String>,
    pub scientific_name: Option<String>,
    pub authority: Option<String>,
    pub taxonomic_path: TaxonomicPath,
    pub taxon_group: Option<String>,
    pub vernacular_english: Option<String>,
    pub vernacular_german: Option<String>,
    pub habitat: HabitatCells,
}

impl SpeciesRow {
    pub fn new(index: i64) -> Self {
        Self {
            index,
            accession_number: None,
            scientific_name: None,
            authority: None,
            taxonomic_path: TaxonomicPath::default(),
            taxon_group: None,
            vernacular_english: None,
            vernacular_german: None,
            habitat: HabitatCells::default(),
        }
    }

    /// Value of a searchable rank column, including the taxon group label
    pub fn rank_value(&self, rank: TaxonomicRank) -> Option<&str> {
        match rank {
            TaxonomicRank::TaxonGroup => self.taxon_group.as_deref(),
            other => self.taxonomic_path.get(other),
        }
    }
}

/// Immutable in-memory view of the reference library
#[derive(Debug, Clone, Default)]
pub struct SpeciesStore {
    rows: Vec<SpeciesRow>,
}

impl SpeciesStore {
    /// Build a store from rows already in memory (fixtures, tests)
    pub fn from_rows(rows: Vec<SpeciesRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SpeciesRow] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&SpeciesRow> {
        self.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct scientific names in the library
    pub fn species_count(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.scientific_name.as_deref())
            .collect::<std::collections::HashSet<_>>()
            .len()
    }
}

/// Normalise an optional text value: trim, and treat placeholders as absent
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if is_placeholder(trimmed) {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

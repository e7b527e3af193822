//! SQLite adapter for the reference library
//!
//! Expected layout, one row per genome in `ids`, joined on `IDX`:
//!
//! ```text
//! ids(IDX, AccessionNumber)
//! taxonomy(IDX, Kingdom, Phylum, Class, taxOrder, Family, Genus,
//!          ScientificName, Authority, Vernacular_Eng, Vernacular_Ger, TaxonGroup)
//! traits(IDX, isMarine, isBrackish, isFresh, isTerrestrial)
//! ```
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{normalize_text, Cell, HabitatCells, SpeciesRow, SpeciesStore};
use crate::bio::taxonomy::TaxonomicPath;
use crate::{Result, SpeciesInfoError};

/// Tables and the columns each must carry
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("ids", &["IDX", "AccessionNumber"]),
    (
        "taxonomy",
        &[
            "IDX",
            "Kingdom",
            "Phylum",
            "Class",
            "taxOrder",
            "Family",
            "Genus",
            "ScientificName",
            "Authority",
            "Vernacular_Eng",
            "Vernacular_Ger",
            "TaxonGroup",
        ],
    ),
    (
        "traits",
        &["IDX", "isMarine", "isBrackish", "isFresh", "isTerrestrial"],
    ),
];

const LOAD_QUERY: &str = "SELECT ids.IDX, ids.AccessionNumber, \
     t.Kingdom, t.Phylum, t.Class, t.taxOrder, t.Family, t.Genus, \
     t.ScientificName, t.Authority, t.Vernacular_Eng, t.Vernacular_Ger, t.TaxonGroup, \
     tr.isMarine, tr.isBrackish, tr.isFresh, tr.isTerrestrial \
     FROM ids \
     LEFT JOIN taxonomy t ON t.IDX = ids.IDX \
     LEFT JOIN traits tr ON tr.IDX = ids.IDX \
     ORDER BY ids.IDX, ids.rowid";

/// Open the library read-only, validate its schema and load every row
pub fn open_sqlite<P: AsRef<Path>>(path: P) -> Result<SpeciesStore> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SpeciesInfoError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("reference library not found at {}", path.display()),
        )));
    }

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let store = load_store(&conn)?;
    info!(
        "Loaded {} rows ({} species) from {}",
        store.len(),
        store.species_count(),
        path.display()
    );
    Ok(store)
}

/// Validate and load from an already open connection
pub fn load_store(conn: &Connection) -> Result<SpeciesStore> {
    validate_schema(conn)?;

    let mut stmt = conn.prepare(LOAD_QUERY)?;
    let mut rows = stmt.query([])?;
    let mut loaded = Vec::new();

    while let Some(row) = rows.next()? {
        let index = match integer_value(row.get_ref(0)?) {
            Some(index) => index,
            None => {
                warn!("Skipping ids row without a usable IDX");
                continue;
            }
        };

        let text = |i: usize| -> Result<Option<String>> { Ok(text_value(row.get_ref(i)?)) };
        let cell = |i: usize| -> Result<Cell> { Ok(cell_value(row.get_ref(i)?)) };

        loaded.push(SpeciesRow {
            index,
            accession_number: text(1)?,
            taxonomic_path: TaxonomicPath {
                kingdom: text(2)?,
                phylum: text(3)?,
                class: text(4)?,
                order: text(5)?,
                family: text(6)?,
                genus: text(7)?,
            },
            scientific_name: text(8)?,
            authority: text(9)?,
            vernacular_english: text(10)?,
            vernacular_german: text(11)?,
            taxon_group: text(12)?,
            habitat: HabitatCells {
                marine: cell(13)?,
                brackish: cell(14)?,
                freshwater: cell(15)?,
                terrestrial: cell(16)?,
            },
        });
    }

    debug!("Read {} genome rows", loaded.len());
    Ok(SpeciesStore::from_rows(loaded))
}

/// Fail fast when a table or column the adapter reads is missing
pub fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, columns) in REQUIRED_COLUMNS {
        let present = table_columns(conn, table)?;
        if present.is_empty() {
            return Err(SpeciesInfoError::Schema(format!(
                "reference library has no '{}' table",
                table
            )));
        }

        for column in columns.iter() {
            if !present.contains(&column.to_ascii_lowercase()) {
                return Err(SpeciesInfoError::Schema(format!(
                    "table '{}' is missing column '{}'",
                    table, column
                )));
            }
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names.into_iter().map(|n| n.to_ascii_lowercase()).collect())
}

fn integer_value(value: ValueRef<'_>) -> Option<i64> {
    match value {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) if f.fract() == 0.0 => Some(f as i64),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
        _ => None,
    }
}

fn text_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) => normalize_text(Some(String::from_utf8_lossy(bytes).into_owned())),
    }
}

fn cell_value(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Cell::Null,
        ValueRef::Integer(i) => Cell::Integer(i),
        ValueRef::Real(f) if f.is_nan() => Cell::Null,
        ValueRef::Real(f) => Cell::Real(f),
        ValueRef::Text(bytes) => Cell::text(String::from_utf8_lossy(bytes).into_owned()),
    }
}

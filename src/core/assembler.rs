//! Record assembly from a resolved row set
use crate::bio::SpeciesRecord;
use crate::core::resolver::RowHandle;
use crate::storage::{HabitatRule, SpeciesStore};

/// Join the resolved rows into one record
///
/// Scalar fields always come from the first row; accession numbers and row
/// indices are collected over the whole set. Returns `None` when nothing was
/// resolved.
pub fn assemble(store: &SpeciesStore, rows: &[RowHandle], rule: HabitatRule) -> Option<SpeciesRecord> {
    let resolved: Vec<_> = rows.iter().filter_map(|h| store.row(h.0)).collect();
    let first = *resolved.first()?;

    let mut accession_numbers: Vec<String> = Vec::new();
    let mut indices: Vec<i64> = Vec::new();
    for row in &resolved {
        if let Some(acc) = &row.accession_number {
            if !accession_numbers.contains(acc) {
                accession_numbers.push(acc.clone());
            }
        }
        if !indices.contains(&row.index) {
            indices.push(row.index);
        }
    }

    Some(SpeciesRecord {
        index: first.index,
        indices,
        accession_numbers,
        scientific_name: first.scientific_name.clone(),
        authority: first.authority.clone(),
        taxonomic_path: first.taxonomic_path.clone(),
        taxon_group: first.taxon_group.clone(),
        vernacular_english: first.vernacular_english.clone(),
        vernacular_german: first.vernacular_german.clone(),
        habitats: first.habitat.flags(rule),
    })
}

use anyhow::Result;
use std::fmt::Write;

use crate::bio::taxonomy::capitalize;
use crate::bio::SpeciesRecord;
use crate::core::aggregator::TaxonGroupMatch;
use crate::core::pipeline::{EnrichmentOutcome, EnrichmentSection, SearchReport, TableSection};
use crate::core::resolver::SearchMode;
use crate::enrich::{EnrichmentSource, GenomeReport};

const SEPARATOR_WIDTH: usize = 61;

pub fn generate_text_report(report: &SearchReport) -> Result<String> {
    let mut output = String::new();

    if report.is_empty_query() {
        writeln!(&mut output)?;
        writeln!(&mut output, "Please enter something.")?;
        write_footer(&mut output)?;
        return Ok(output);
    }

    let mode = report.mode.label().to_lowercase();

    writeln!(&mut output)?;
    writeln!(&mut output, "=== Info for {} {} ===", mode, report.query)?;

    if let Some(table) = &report.table {
        match table {
            TableSection::Species(record) => {
                write_species(&mut output, record, report.mode)?;
            }
            TableSection::TaxonGroup(matched) => {
                write_taxon_group(&mut output, matched, &report.query)?;
            }
            TableSection::NotFound => {
                writeln!(&mut output)?;
                writeln!(
                    &mut output,
                    "No information on {} {} available from reference table.",
                    mode, report.query
                )?;
            }
            TableSection::InvalidKey(reason) => {
                writeln!(&mut output)?;
                writeln!(&mut output, "Invalid {} {}: {}", mode, report.query, reason)?;
            }
        }
    }

    for section in &report.enrichments {
        write_enrichment(&mut output, section, &report.query)?;
    }

    write_footer(&mut output)?;
    Ok(output)
}

fn write_footer(output: &mut String) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    Ok(())
}

/// Sentence about the English and German common names
pub fn vernacular_sentence(english: Option<&str>, german: Option<&str>) -> String {
    match (english, german) {
        (None, None) => "There are no vernaculars available.".to_string(),
        (None, Some(ger)) => format!(
            "There is no english vernacular available, but the german vernacular is {}.",
            ger
        ),
        (Some(eng), None) => format!(
            "The english vernacular is {}. There is no german vernacular available.",
            eng
        ),
        (Some(eng), Some(ger)) => format!(
            "The english vernacular is {}, the german vernacular is {}.",
            eng, ger
        ),
    }
}

/// Accession paragraph; worded by what the user searched with
fn accession_text(record: &SpeciesRecord, mode: SearchMode) -> String {
    let accessions = &record.accession_numbers;
    match mode {
        SearchMode::AccessionNumber => String::new(),
        _ if accessions.is_empty() => "No Accession Number available.\n\n".to_string(),
        SearchMode::GenomeIndex => {
            format!("Accession Number for this index is {}\n\n", accessions[0])
        }
        _ if accessions.len() == 1 => format!(
            "One available Accession Number, {} with Index {}\n\n",
            accessions[0], record.index
        ),
        _ => {
            let indices = record
                .indices
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Available Accession Number are {}\nAvailable Indices are {}\n",
                accessions.join(", "),
                indices
            )
        }
    }
}

fn write_species(output: &mut String, record: &SpeciesRecord, mode: SearchMode) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "--- Information from the core library ---")?;
    writeln!(output)?;
    writeln!(output, "Species {} found.", record.full_name())?;
    writeln!(
        output,
        "{}",
        vernacular_sentence(
            record.vernacular_english.as_deref(),
            record.vernacular_german.as_deref()
        )
    )?;
    writeln!(output)?;
    writeln!(
        output,
        "The Species is known to live in {} habitats.",
        record.habitats
    )?;
    writeln!(output)?;
    write!(output, "{}", accession_text(record, mode))?;
    writeln!(
        output,
        "Taxonomic Path as kingdom > phylum > class > order > family > genus:"
    )?;
    writeln!(output, "{}", record.taxonomic_path)?;
    Ok(())
}

fn write_taxon_group(output: &mut String, matched: &TaxonGroupMatch, query: &str) -> Result<()> {
    writeln!(output)?;
    writeln!(
        output,
        "{} species found in table belonging to {} {}:",
        matched.species.len(),
        matched.matched_rank_label().to_lowercase(),
        capitalize(query)
    )?;
    writeln!(output, "{}", matched.species.join(", "))?;
    Ok(())
}

fn write_enrichment(output: &mut String, section: &EnrichmentSection, query: &str) -> Result<()> {
    writeln!(output)?;
    match &section.outcome {
        EnrichmentOutcome::Offline => {
            writeln!(output, "!! {} !!", section.source.offline_advisory())?;
        }
        EnrichmentOutcome::Unavailable { reason } => match section.source {
            EnrichmentSource::Ncbi => {
                writeln!(output, "No NCBI information found for biosample {}", query)?;
            }
            source => {
                writeln!(output, "No {} information found for {} ({})", source, query, reason)?;
            }
        },
        EnrichmentOutcome::Backbone { backbone, map_url } => {
            writeln!(output, "--- Information from GBIF backbone ---")?;
            writeln!(output, "{}", backbone.summary())?;
            if let Some(url) = map_url {
                writeln!(output, "Occurrence map: {}", url)?;
            }
        }
        EnrichmentOutcome::Summary { summary } => {
            writeln!(output, "--- Information from Wikipedia page ---")?;
            writeln!(output, "{}", summary.text())?;
        }
        EnrichmentOutcome::Genome { report, .. } => match report {
            Some(report) => write_genome_report(output, report)?,
            None => {
                writeln!(output, "No NCBI information found for biosample {}", query)?;
            }
        },
    }
    Ok(())
}

fn write_genome_report(output: &mut String, report: &GenomeReport) -> Result<()> {
    writeln!(output, "--- NCBI Organism Report ---")?;
    for (key, value) in &report.organism {
        writeln!(output, "{}: {}", capitalize(key), value)?;
    }
    writeln!(output)?;
    writeln!(output, "--- Available information on NCBI for this biosample ---")?;
    for (name, value) in &report.biosample_attributes {
        writeln!(output, "{}: {}", capitalize(name), value)?;
    }
    Ok(())
}

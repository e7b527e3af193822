//! One search, end to end: library table plus requested enrichments
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bio::SpeciesRecord;
use crate::core::aggregator::TaxonGroupMatch;
use crate::core::library::{genome_query_from, scientific_name_from, SpeciesLibrary};
use crate::core::resolver::SearchMode;
use crate::enrich::gbif::MapOptions;
use crate::enrich::{
    Backbone, Connectivity, EnrichmentClients, EnrichmentSource, GenomeQuery, GenomeReport,
    PageSummary,
};
use crate::SpeciesInfoError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub mode: SearchMode,
    pub query: String,
    /// Include the reference library section
    pub table: bool,
    pub gbif: bool,
    pub wikipedia: bool,
    pub ncbi: bool,
    /// Rendering of the GBIF occurrence map
    pub map: MapOptions,
}

impl SearchRequest {
    /// Table-only search
    pub fn new(mode: SearchMode, query: impl Into<String>) -> Self {
        Self {
            mode,
            query: query.into(),
            table: true,
            gbif: false,
            wikipedia: false,
            ncbi: false,
            map: MapOptions::default(),
        }
    }

    /// Requested sources in report order
    pub fn sources(&self) -> Vec<EnrichmentSource> {
        let mut sources = Vec::new();
        if self.gbif {
            sources.push(EnrichmentSource::Gbif);
        }
        if self.wikipedia {
            sources.push(EnrichmentSource::Wikipedia);
        }
        if self.ncbi {
            sources.push(EnrichmentSource::Ncbi);
        }
        sources
    }
}

/// What the reference library says about the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum TableSection {
    Species(SpeciesRecord),
    TaxonGroup(TaxonGroupMatch),
    NotFound,
    InvalidKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EnrichmentOutcome {
    /// The connectivity probe failed
    Offline,
    /// The service could not be asked or did not answer
    Unavailable { reason: String },
    Backbone {
        backbone: Backbone,
        map_url: Option<String>,
    },
    Summary { summary: PageSummary },
    Genome {
        query: GenomeQuery,
        report: Option<GenomeReport>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentSection {
    pub source: EnrichmentSource,
    #[serde(flatten)]
    pub outcome: EnrichmentOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub mode: SearchMode,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<Connectivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableSection>,
    pub enrichments: Vec<EnrichmentSection>,
}

impl SearchReport {
    pub fn is_empty_query(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// Run a search against the library and the requested services
///
/// Never fails as a whole: invalid keys, misses and upstream errors each
/// land in their own section. The connectivity probe runs at most once, and
/// only when an enrichment was requested.
pub fn run_search(
    library: &SpeciesLibrary,
    clients: &EnrichmentClients,
    request: &SearchRequest,
) -> SearchReport {
    let mut report = SearchReport {
        mode: request.mode,
        query: request.query.trim().to_string(),
        connectivity: None,
        table: None,
        enrichments: Vec::new(),
    };

    if report.is_empty_query() {
        debug!("Empty query, nothing to search");
        return report;
    }

    let sources = request.sources();
    if !request.table && sources.is_empty() {
        return report;
    }

    // resolved once; the table and every enrichment read the same answer
    let resolved = request
        .mode
        .key_kind()
        .map(|kind| library.lookup(kind, &report.query));

    if request.table {
        report.table = Some(table_section(library, &report.query, resolved.as_ref()));
    }

    if sources.is_empty() {
        return report;
    }

    let record = match &resolved {
        Some(Ok(Some(record))) => Some(record),
        _ => None,
    };
    let connectivity = clients.probe.probe();
    for source in sources {
        let outcome = if connectivity.is_online() {
            enrich(clients, source, request, &report.query, record)
        } else {
            EnrichmentOutcome::Offline
        };
        report.enrichments.push(EnrichmentSection { source, outcome });
    }
    report.connectivity = Some(connectivity);

    report
}

/// `resolved` is `None` for taxon searches, which aggregate instead
fn table_section(
    library: &SpeciesLibrary,
    query: &str,
    resolved: Option<&crate::Result<Option<SpeciesRecord>>>,
) -> TableSection {
    let Some(resolved) = resolved else {
        let matched = library.taxon_group(query);
        return if matched.is_empty() {
            TableSection::NotFound
        } else {
            TableSection::TaxonGroup(matched)
        };
    };

    match resolved {
        Ok(Some(record)) => TableSection::Species(record.clone()),
        Ok(None) => TableSection::NotFound,
        Err(SpeciesInfoError::InvalidKey(reason)) => TableSection::InvalidKey(reason.clone()),
        Err(e) => {
            warn!("Lookup of '{}' failed: {}", query, e);
            TableSection::NotFound
        }
    }
}

fn enrich(
    clients: &EnrichmentClients,
    source: EnrichmentSource,
    request: &SearchRequest,
    query: &str,
    record: Option<&SpeciesRecord>,
) -> EnrichmentOutcome {
    let mode = request.mode;
    let outcome = match source {
        EnrichmentSource::Gbif => match scientific_name_from(mode, query, record) {
            Some(name) => clients.gbif.backbone(&name).map(|backbone| {
                let map_url = backbone
                    .usage_key
                    .and_then(|key| occurrence_map(clients, key, &request.map));
                EnrichmentOutcome::Backbone { backbone, map_url }
            }),
            None => Ok(no_input(source, query)),
        },
        EnrichmentSource::Wikipedia => match scientific_name_from(mode, query, record) {
            Some(name) => clients
                .wikipedia
                .summary(&name)
                .map(|summary| EnrichmentOutcome::Summary { summary }),
            None => Ok(no_input(source, query)),
        },
        EnrichmentSource::Ncbi => match genome_query_from(mode, query, record) {
            Some(genome_query) => clients
                .ncbi
                .genome_report(&genome_query)
                .map(|report| EnrichmentOutcome::Genome {
                    query: genome_query,
                    report,
                }),
            None => Ok(no_input(source, query)),
        },
    };

    outcome.unwrap_or_else(|e| {
        warn!("{} enrichment for '{}' failed: {}", source, query, e);
        EnrichmentOutcome::Unavailable {
            reason: e.to_string(),
        }
    })
}

/// A map that cannot be built is left out; the backbone still stands
fn occurrence_map(
    clients: &EnrichmentClients,
    usage_key: u64,
    options: &MapOptions,
) -> Option<String> {
    clients
        .gbif
        .occurrence_map_url(usage_key, options)
        .map_err(|e| warn!("No occurrence map for usage key {}: {}", usage_key, e))
        .ok()
}

fn no_input(source: EnrichmentSource, query: &str) -> EnrichmentOutcome {
    debug!("No {} input can be derived from '{}'", source, query);
    EnrichmentOutcome::Unavailable {
        reason: format!("nothing to search for {}", query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LookupConfig;
    use crate::enrich::{
        MockBackboneLookup, MockConnectivityProbe, MockGenomeLookup, MockSummaryLookup,
    };
    use crate::storage::{SpeciesRow, SpeciesStore};
    use pretty_assertions::assert_eq;

    fn library() -> SpeciesLibrary {
        let mut row = SpeciesRow::new(7);
        row.accession_number = Some("GCA_001".to_string());
        row.scientific_name = Some("Calidris alpina".to_string());
        row.taxonomic_path.genus = Some("Calidris".to_string());
        SpeciesLibrary::new(SpeciesStore::from_rows(vec![row]), LookupConfig::default())
    }

    /// Clients whose every call fails the test
    fn untouchable(connectivity: Connectivity) -> EnrichmentClients {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_probe().times(1).return_const(connectivity);

        let mut gbif = MockBackboneLookup::new();
        gbif.expect_backbone().never();
        let mut wikipedia = MockSummaryLookup::new();
        wikipedia.expect_summary().never();
        let mut ncbi = MockGenomeLookup::new();
        ncbi.expect_genome_report().never();

        EnrichmentClients {
            probe: Box::new(probe),
            gbif: Box::new(gbif),
            wikipedia: Box::new(wikipedia),
            ncbi: Box::new(ncbi),
        }
    }

    fn everything(mode: SearchMode, query: &str) -> SearchRequest {
        SearchRequest {
            mode,
            query: query.to_string(),
            table: true,
            gbif: true,
            wikipedia: true,
            ncbi: true,
            map: MapOptions::default(),
        }
    }

    #[test]
    fn test_offline_replaces_every_enrichment() {
        let clients = untouchable(Connectivity::Offline("refused".to_string()));
        let report = run_search(
            &library(),
            &clients,
            &everything(SearchMode::ScientificName, "Calidris alpina"),
        );

        assert!(matches!(report.table, Some(TableSection::Species(_))));
        assert_eq!(report.enrichments.len(), 3);
        assert!(report
            .enrichments
            .iter()
            .all(|section| section.outcome == EnrichmentOutcome::Offline));
    }

    #[test]
    fn test_probe_skipped_without_enrichment() {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_probe().never();
        let clients = EnrichmentClients {
            probe: Box::new(probe),
            gbif: Box::new(MockBackboneLookup::new()),
            wikipedia: Box::new(MockSummaryLookup::new()),
            ncbi: Box::new(MockGenomeLookup::new()),
        };

        let request = SearchRequest::new(SearchMode::TaxonGroup, "calidris");
        let report = run_search(&library(), &clients, &request);
        assert_eq!(report.connectivity, None);
        match report.table {
            Some(TableSection::TaxonGroup(matched)) => {
                assert_eq!(matched.species, vec!["Calidris alpina"])
            }
            other => panic!("unexpected table section: {:?}", other),
        }
    }

    #[test]
    fn test_empty_query_searches_nothing() {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_probe().never();
        let clients = EnrichmentClients {
            probe: Box::new(probe),
            gbif: Box::new(MockBackboneLookup::new()),
            wikipedia: Box::new(MockSummaryLookup::new()),
            ncbi: Box::new(MockGenomeLookup::new()),
        };

        let report = run_search(&library(), &clients, &everything(SearchMode::GenomeIndex, "  "));
        assert!(report.is_empty_query());
        assert_eq!(report.table, None);
        assert!(report.enrichments.is_empty());
    }

    #[test]
    fn test_invalid_index_is_a_section() {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_probe().never();
        let clients = EnrichmentClients {
            probe: Box::new(probe),
            gbif: Box::new(MockBackboneLookup::new()),
            wikipedia: Box::new(MockSummaryLookup::new()),
            ncbi: Box::new(MockGenomeLookup::new()),
        };

        let request = SearchRequest::new(SearchMode::GenomeIndex, "abc");
        let report = run_search(&library(), &clients, &request);
        assert!(matches!(report.table, Some(TableSection::InvalidKey(_))));
    }

    #[test]
    fn test_upstream_failure_degrades_one_section() {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_probe().times(1).return_const(Connectivity::Online);

        let mut gbif = MockBackboneLookup::new();
        gbif.expect_backbone()
            .withf(|name| name == "Calidris alpina")
            .times(1)
            .returning(|_| Err(SpeciesInfoError::Network("timed out".to_string())));

        let mut wikipedia = MockSummaryLookup::new();
        wikipedia.expect_summary().times(1).returning(|title| {
            Ok(PageSummary::Found {
                title: title.to_string(),
                extract: "A small wader.".to_string(),
            })
        });

        let mut ncbi = MockGenomeLookup::new();
        ncbi.expect_genome_report()
            .withf(|query| *query == GenomeQuery::Accession("GCA_001".to_string()))
            .times(1)
            .returning(|_| Ok(None));

        let clients = EnrichmentClients {
            probe: Box::new(probe),
            gbif: Box::new(gbif),
            wikipedia: Box::new(wikipedia),
            ncbi: Box::new(ncbi),
        };

        let report = run_search(
            &library(),
            &clients,
            &everything(SearchMode::AccessionNumber, "gca_001"),
        );

        assert_eq!(report.connectivity, Some(Connectivity::Online));
        assert!(matches!(
            report.enrichments[0].outcome,
            EnrichmentOutcome::Unavailable { .. }
        ));
        assert!(matches!(
            report.enrichments[1].outcome,
            EnrichmentOutcome::Summary { .. }
        ));
        assert_eq!(
            report.enrichments[2].outcome,
            EnrichmentOutcome::Genome {
                query: GenomeQuery::Accession("GCA_001".to_string()),
                report: None
            }
        );
    }

    #[test]
    fn test_backbone_with_usage_key_gets_map() {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_probe().return_const(Connectivity::Online);

        let mut gbif = MockBackboneLookup::new();
        gbif.expect_backbone().returning(|_| {
            Ok(Backbone {
                usage_key: Some(42),
                ..Backbone::default()
            })
        });
        gbif.expect_occurrence_map_url()
            .withf(|_, options| options.year.as_deref() == Some("2001"))
            .times(1)
            .returning(|key, _| Ok(format!("map/{}", key)));

        let clients = EnrichmentClients {
            probe: Box::new(probe),
            gbif: Box::new(gbif),
            wikipedia: Box::new(MockSummaryLookup::new()),
            ncbi: Box::new(MockGenomeLookup::new()),
        };

        let mut request = SearchRequest::new(SearchMode::ScientificName, "Turdus merula");
        request.table = false;
        request.gbif = true;
        request.map.year = Some("2001".to_string());

        let report = run_search(&library(), &clients, &request);
        assert_eq!(report.table, None);
        match &report.enrichments[0].outcome {
            EnrichmentOutcome::Backbone { map_url, .. } => {
                assert_eq!(map_url.as_deref(), Some("map/42"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_unbuildable_map_keeps_backbone() {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_probe().return_const(Connectivity::Online);

        let mut gbif = MockBackboneLookup::new();
        gbif.expect_backbone().returning(|_| {
            Ok(Backbone {
                usage_key: Some(42),
                kingdom: Some("Animalia".to_string()),
                ..Backbone::default()
            })
        });
        gbif.expect_occurrence_map_url()
            .returning(|_, _| Err(SpeciesInfoError::Config("bad map base".to_string())));

        let clients = EnrichmentClients {
            probe: Box::new(probe),
            gbif: Box::new(gbif),
            wikipedia: Box::new(MockSummaryLookup::new()),
            ncbi: Box::new(MockGenomeLookup::new()),
        };

        let mut request = SearchRequest::new(SearchMode::ScientificName, "Calidris alpina");
        request.gbif = true;

        let report = run_search(&library(), &clients, &request);
        match &report.enrichments[0].outcome {
            EnrichmentOutcome::Backbone { backbone, map_url } => {
                assert_eq!(backbone.kingdom.as_deref(), Some("Animalia"));
                assert_eq!(map_url, &None);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_index_hit_feeds_record_to_every_source() {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_probe().times(1).return_const(Connectivity::Online);

        let mut gbif = MockBackboneLookup::new();
        gbif.expect_backbone()
            .withf(|name| name == "Calidris alpina")
            .times(1)
            .returning(|_| Ok(Backbone::default()));
        let mut wikipedia = MockSummaryLookup::new();
        wikipedia
            .expect_summary()
            .withf(|title| title == "Calidris alpina")
            .times(1)
            .returning(|_| Ok(PageSummary::Missing));
        let mut ncbi = MockGenomeLookup::new();
        ncbi.expect_genome_report()
            .withf(|query| *query == GenomeQuery::Accession("GCA_001".to_string()))
            .times(1)
            .returning(|_| Ok(None));

        let clients = EnrichmentClients {
            probe: Box::new(probe),
            gbif: Box::new(gbif),
            wikipedia: Box::new(wikipedia),
            ncbi: Box::new(ncbi),
        };

        let report = run_search(&library(), &clients, &everything(SearchMode::GenomeIndex, "7"));
        match &report.table {
            Some(TableSection::Species(record)) => assert_eq!(record.indices, vec![7]),
            other => panic!("unexpected table section: {:?}", other),
        }
        assert_eq!(report.enrichments.len(), 3);
    }
}

mod common;

use pretty_assertions::assert_eq;
use rstest::rstest;
use speciesinfo::bio::{Habitat, TaxonomicRank};
use speciesinfo::core::config::{AccessionCase, LookupConfig};
use speciesinfo::storage::HabitatRule;
use speciesinfo::{KeyKind, SearchMode, SpeciesInfoError, SpeciesLibrary};

fn open(fixture: &common::FixtureLibrary) -> SpeciesLibrary {
    SpeciesLibrary::open(&fixture.path, LookupConfig::default()).unwrap()
}

#[test]
fn test_every_accession_resolves_to_its_record() {
    let fixture = common::fixture_library();
    let library = open(&fixture);

    for row in library.store().rows() {
        let accession = row.accession_number.clone().unwrap();
        let record = library
            .lookup(KeyKind::AccessionNumber, &accession)
            .unwrap()
            .unwrap();
        assert!(record.accession_numbers.contains(&accession));
        assert_eq!(record.index, row.index);
    }
}

#[test]
fn test_name_and_accession_lookups_agree() {
    let fixture = common::fixture_library();
    let library = open(&fixture);

    let by_name = library
        .lookup(KeyKind::ScientificName, "calidris ALPINA")
        .unwrap()
        .unwrap();
    let by_accession = library
        .lookup(KeyKind::AccessionNumber, "gca_002")
        .unwrap()
        .unwrap();

    assert_eq!(by_name.scientific_name, by_accession.scientific_name);
    assert_eq!(by_name.taxonomic_path, by_accession.taxonomic_path);
    assert_eq!(by_name.habitats, by_accession.habitats);
    assert_eq!(by_name.accession_numbers, vec!["GCA_001", "GCA_002"]);
    assert_eq!(by_name.indices, vec![0, 1]);
    assert_eq!(by_accession.accession_numbers, vec!["GCA_002"]);
}

#[test]
fn test_record_fields() {
    let fixture = common::fixture_library();
    let library = open(&fixture);

    let record = library.lookup(KeyKind::GenomeIndex, "2").unwrap().unwrap();
    assert_eq!(record.full_name(), "Calidris canutus (Linnaeus, 1758)");
    assert_eq!(record.vernacular_english, None);
    assert_eq!(record.vernacular_german, None);
    assert_eq!(record.taxon_group.as_deref(), Some("Birds"));
    assert_eq!(
        record.taxonomic_path.to_string(),
        "Animalia > Chordata > Aves > Charadriiformes > Scolopacidae > Calidris"
    );
}

#[rstest]
#[case(KeyKind::AccessionNumber, "GCA_999")]
#[case(KeyKind::GenomeIndex, "99")]
#[case(KeyKind::ScientificName, "Turdus merula")]
fn test_absent_keys_are_not_found(#[case] kind: KeyKind, #[case] value: &str) {
    let fixture = common::fixture_library();
    let library = open(&fixture);
    assert_eq!(library.lookup(kind, value).unwrap(), None);
    assert!(library.resolve(kind, value).unwrap().is_empty());
}

#[test]
fn test_non_integer_index_is_invalid() {
    let fixture = common::fixture_library();
    let library = open(&fixture);
    assert!(matches!(
        library.lookup(KeyKind::GenomeIndex, "abc"),
        Err(SpeciesInfoError::InvalidKey(_))
    ));
}

#[test]
fn test_exact_accession_case() {
    let fixture = common::fixture_library();
    let settings = LookupConfig {
        accession_case: AccessionCase::Exact,
        ..LookupConfig::default()
    };
    let library = SpeciesLibrary::open(&fixture.path, settings).unwrap();
    assert_eq!(library.lookup(KeyKind::AccessionNumber, "gca_001").unwrap(), None);
    assert!(library.lookup(KeyKind::AccessionNumber, "GCA_001").unwrap().is_some());
}

#[test]
fn test_habitat_rules() {
    let fixture = common::fixture_library();

    let present = open(&fixture)
        .lookup(KeyKind::AccessionNumber, "GCA_001")
        .unwrap()
        .unwrap();
    assert!(present.habitats.contains(Habitat::Marine));
    assert!(present.habitats.contains(Habitat::Freshwater));
    assert!(!present.habitats.contains(Habitat::Brackish));

    let settings = LookupConfig {
        habitat_rule: HabitatRule::ValueTrue,
        ..LookupConfig::default()
    };
    let valued = SpeciesLibrary::open(&fixture.path, settings)
        .unwrap()
        .lookup(KeyKind::AccessionNumber, "GCA_001")
        .unwrap()
        .unwrap();
    assert_eq!(valued.habitats.iter().collect::<Vec<_>>(), vec![Habitat::Marine]);
}

#[rstest]
#[case("aves", TaxonomicRank::Class, vec!["Calidris alpina", "Calidris canutus"])]
#[case("birds", TaxonomicRank::TaxonGroup, vec!["Calidris alpina", "Calidris canutus"])]
#[case("Salmonidae", TaxonomicRank::Family, vec!["Salmo trutta"])]
#[case("hydra", TaxonomicRank::Genus, vec!["Hydra vulgaris"])]
#[case("animalia", TaxonomicRank::Kingdom, vec!["Calidris alpina", "Calidris canutus", "Hydra vulgaris", "Salmo trutta"])]
fn test_taxon_group_aggregation(
    #[case] value: &str,
    #[case] rank: TaxonomicRank,
    #[case] species: Vec<&str>,
) {
    let fixture = common::fixture_library();
    let matched = open(&fixture).taxon_group(value);
    assert_eq!(matched.species, species);
    assert_eq!(matched.matched_rank, Some(rank));
}

#[test]
fn test_absent_taxon_is_empty() {
    let fixture = common::fixture_library();
    let matched = open(&fixture).taxon_group("Plantae");
    assert!(matched.is_empty());
    assert_eq!(matched.matched_rank_label(), "");
}

#[test]
fn test_suggestions() {
    let fixture = common::fixture_library();
    let library = open(&fixture);

    let names = library.suggestions(SearchMode::ScientificName);
    assert_eq!(names.search("Cal"), vec!["Calidris alpina", "Calidris canutus"]);
    assert!(names.search("").is_empty());
    assert!(names.search("Turdus").is_empty());

    let taxa = library.suggestions(SearchMode::TaxonGroup);
    let hits = taxa.search("S");
    assert!(hits.iter().all(|word| word.starts_with('S')));
    assert!(hits.contains(&"Salmonidae".to_string()));
    assert!(hits.contains(&"Scolopacidae".to_string()));

    let accessions = library.suggestions(SearchMode::AccessionNumber);
    assert_eq!(accessions.search_limited("GCA_", 2), vec!["GCA_001", "GCA_002"]);
}

#[test]
fn test_missing_column_fails_at_open() {
    let fixture = common::fixture_library();
    let broken = common::library_missing_column(fixture.dir());
    match SpeciesLibrary::open(&broken, LookupConfig::default()) {
        Err(SpeciesInfoError::Schema(message)) => assert!(message.contains("isTerrestrial")),
        other => panic!("expected schema error, got {:?}", other.err()),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let fixture = common::fixture_library();
    let missing = fixture.dir().join("nothing.db");
    assert!(matches!(
        SpeciesLibrary::open(&missing, LookupConfig::default()),
        Err(SpeciesInfoError::Io(_))
    ));
}

//! Shared fixtures for the integration tests
//!
//! Builds a small reference library on disk with the same three-table layout
//! as the real one.
#![allow(dead_code)]

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCHEMA: &str = "
    CREATE TABLE ids (IDX INTEGER, AccessionNumber TEXT);
    CREATE TABLE taxonomy (IDX INTEGER, Kingdom TEXT, Phylum TEXT, Class TEXT,
        taxOrder TEXT, Family TEXT, Genus TEXT, ScientificName TEXT, Authority TEXT,
        Vernacular_Eng TEXT, Vernacular_Ger TEXT, TaxonGroup TEXT);
    CREATE TABLE traits (IDX INTEGER, isMarine INTEGER, isBrackish INTEGER,
        isFresh INTEGER, isTerrestrial INTEGER);
";

const ROWS: &str = "
    INSERT INTO ids VALUES
        (0, 'GCA_001'), (1, 'GCA_002'), (2, 'GCA_003'), (3, 'GCA_004'), (4, 'GCA_005');
    INSERT INTO taxonomy VALUES
        (0, 'Animalia', 'Chordata', 'Aves', 'Charadriiformes', 'Scolopacidae', 'Calidris',
         'Calidris alpina', '(Linnaeus, 1758)', 'Dunlin', 'Alpenstrandläufer', 'Birds'),
        (1, 'Animalia', 'Chordata', 'Aves', 'Charadriiformes', 'Scolopacidae', 'Calidris',
         'Calidris alpina', '(Linnaeus, 1758)', 'Dunlin', 'Alpenstrandläufer', 'Birds'),
        (2, 'Animalia', 'Chordata', 'Aves', 'Charadriiformes', 'Scolopacidae', 'Calidris',
         'Calidris canutus', '(Linnaeus, 1758)', 'nan', NULL, 'Birds'),
        (3, 'Animalia', 'Chordata', 'Actinopterygii', 'Salmoniformes', 'Salmonidae', 'Salmo',
         'Salmo trutta', 'Linnaeus, 1758', 'Brown trout', 'Bachforelle', 'Fish'),
        (4, 'Animalia', 'Cnidaria', 'Hydrozoa', 'Anthoathecata', 'Hydridae', 'Hydra',
         'Hydra vulgaris', 'Pallas, 1766', NULL, NULL, 'Hydra');
    INSERT INTO traits VALUES
        (0, 1, NULL, 0, NULL),
        (1, 1, NULL, 0, NULL),
        (2, 1, NULL, NULL, NULL),
        (3, 1, 1, 1, NULL),
        (4, NULL, NULL, 1, NULL);
";

/// A reference library file that lives as long as this value
pub struct FixtureLibrary {
    dir: TempDir,
    pub path: PathBuf,
}

impl FixtureLibrary {
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a config file next to the library (not created)
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Write a config whose connectivity probe can never succeed
    pub fn write_offline_config(&self) -> PathBuf {
        let path = self.config_path();
        std::fs::write(
            &path,
            "[network]\nprobe_url = \"http://127.0.0.1:9/\"\nprobe_timeout_secs = 1\n",
        )
        .expect("Failed to write config");
        path
    }
}

pub fn fixture_library() -> FixtureLibrary {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("genotree_master_library.db");

    let conn = Connection::open(&path).expect("Failed to create fixture database");
    conn.execute_batch(SCHEMA).expect("Failed to create schema");
    conn.execute_batch(ROWS).expect("Failed to insert rows");

    FixtureLibrary { dir, path }
}

/// A library whose traits table lacks `isTerrestrial`
pub fn library_missing_column(dir: &Path) -> PathBuf {
    let path = dir.join("broken.db");
    let conn = Connection::open(&path).expect("Failed to create broken database");
    conn.execute_batch(
        "CREATE TABLE ids (IDX INTEGER, AccessionNumber TEXT);
         CREATE TABLE taxonomy (IDX INTEGER, Kingdom TEXT, Phylum TEXT, Class TEXT,
             taxOrder TEXT, Family TEXT, Genus TEXT, ScientificName TEXT, Authority TEXT,
             Vernacular_Eng TEXT, Vernacular_Ger TEXT, TaxonGroup TEXT);
         CREATE TABLE traits (IDX INTEGER, isMarine INTEGER, isBrackish INTEGER, isFresh INTEGER);",
    )
    .expect("Failed to create schema");
    path
}

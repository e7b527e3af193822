pub mod record;
pub mod taxonomy;

pub use record::SpeciesRecord;
pub use taxonomy::{Habitat, HabitatFlags, TaxonomicPath, TaxonomicRank};

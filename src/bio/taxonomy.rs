//! Taxonomy and habitat types shared by the store, the resolver and the reports
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Ranks of the reference library's classification columns
///
/// `TaxonGroup` is the coarse single-column label that sits outside the
/// six-rank path but is searchable like a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomicRank {
    TaxonGroup,
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
}

impl TaxonomicRank {
    /// The six ranks of a taxonomic path, kingdom first
    pub const PATH: [TaxonomicRank; 6] = [
        Self::Kingdom,
        Self::Phylum,
        Self::Class,
        Self::Order,
        Self::Family,
        Self::Genus,
    ];

    /// Display label, as used in report sentences
    pub fn label(&self) -> &'static str {
        match self {
            Self::TaxonGroup => "Taxon Group",
            Self::Kingdom => "Kingdom",
            Self::Phylum => "Phylum",
            Self::Class => "Class",
            Self::Order => "Order",
            Self::Family => "Family",
            Self::Genus => "Genus",
        }
    }
}

impl fmt::Display for TaxonomicRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kingdom-to-genus classification of one species; any rank may be unknown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomicPath {
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
}

impl TaxonomicPath {
    pub fn get(&self, rank: TaxonomicRank) -> Option<&str> {
        match rank {
            TaxonomicRank::Kingdom => self.kingdom.as_deref(),
            TaxonomicRank::Phylum => self.phylum.as_deref(),
            TaxonomicRank::Class => self.class.as_deref(),
            TaxonomicRank::Order => self.order.as_deref(),
            TaxonomicRank::Family => self.family.as_deref(),
            TaxonomicRank::Genus => self.genus.as_deref(),
            TaxonomicRank::TaxonGroup => None,
        }
    }

    /// Rank values in path order, `None` for unknown ranks
    pub fn ranks(&self) -> [Option<&str>; 6] {
        TaxonomicRank::PATH.map(|rank| self.get(rank))
    }

    pub fn is_empty(&self) -> bool {
        self.ranks().iter().all(Option::is_none)
    }
}

impl fmt::Display for TaxonomicPath {
    /// `Animalia > Chordata > ...`, unknown ranks shown as `unknown`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .ranks()
            .iter()
            .map(|rank| rank.unwrap_or("unknown"))
            .collect::<Vec<_>>()
            .join(" > ");
        f.write_str(&joined)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Habitat {
    Marine,
    Brackish,
    Freshwater,
    Terrestrial,
}

impl Habitat {
    pub const ALL: [Habitat; 4] = [
        Self::Marine,
        Self::Brackish,
        Self::Freshwater,
        Self::Terrestrial,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Marine => "marine",
            Self::Brackish => "brackish",
            Self::Freshwater => "freshwater",
            Self::Terrestrial => "terrestrial",
        }
    }
}

/// Set of habitats a species is recorded in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitatFlags(BTreeSet<Habitat>);

impl HabitatFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, habitat: Habitat) {
        self.0.insert(habitat);
    }

    pub fn contains(&self, habitat: Habitat) -> bool {
        self.0.contains(&habitat)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Habitat> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Habitat> for HabitatFlags {
    fn from_iter<I: IntoIterator<Item = Habitat>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for HabitatFlags {
    /// Comma separated habitat names, or `unknown` for the empty set
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("unknown");
        }
        let names = self.iter().map(|h| h.name()).collect::<Vec<_>>().join(", ");
        f.write_str(&names)
    }
}

/// Capitalise the way the library's names are stored: first character upper
/// case, the rest lower case
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

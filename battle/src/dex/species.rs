//! Species catalog entries in Pokemon Showdown's `pokedex.json` shape

use serde::Deserialize;

use crate::types::{BaseStats, Type};

/// Immutable catalog data for one species or forme
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub base_stats: BaseStats,
}

impl SpeciesData {
    /// Natural types, skipping names the tracker does not know
    pub fn types(&self) -> Vec<Type> {
        self.types
            .iter()
            .filter_map(|t| Type::from_protocol(t))
            .collect()
    }
}

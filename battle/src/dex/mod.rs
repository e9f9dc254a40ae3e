//! Static reference data: the move catalog and the species catalog.
//!
//! A [`Dex`] is loaded once and shared read-only between matches behind an
//! `Arc`. Both catalogs are keyed by Showdown ids (`to_id` of the name) and
//! accept the JSON exports of Showdown's `moves.ts` / `pokedex.ts`.

mod moves;
mod species;

pub use moves::{
    Accuracy, Category, MoveData, MoveTarget, Secondary, SelfEffect, ZMoveData,
};
pub use species::SpeciesData;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use duelist_protocol::to_id;
use thiserror::Error;

const BUILTIN_MOVES: &str = include_str!("../../data/moves.json");
const BUILTIN_POKEDEX: &str = include_str!("../../data/pokedex.json");

#[derive(Error, Debug)]
pub enum DexError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {catalog} data: {source}")]
    Json {
        catalog: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Move and species catalogs
#[derive(Debug, Clone, Default)]
pub struct Dex {
    moves: HashMap<String, Arc<MoveData>>,
    species: HashMap<String, SpeciesData>,
}

impl Dex {
    /// The small catalog compiled into the crate
    pub fn builtin() -> Result<Self, DexError> {
        Self::from_json_strs(BUILTIN_MOVES, BUILTIN_POKEDEX)
    }

    /// Load both catalogs from JSON text
    pub fn from_json_strs(moves: &str, pokedex: &str) -> Result<Self, DexError> {
        let moves: HashMap<String, MoveData> =
            serde_json::from_str(moves).map_err(|source| DexError::Json {
                catalog: "moves",
                source,
            })?;
        let species: HashMap<String, SpeciesData> =
            serde_json::from_str(pokedex).map_err(|source| DexError::Json {
                catalog: "pokedex",
                source,
            })?;

        Ok(Self {
            moves: moves
                .into_iter()
                .map(|(id, data)| (to_id(&id), Arc::new(data)))
                .collect(),
            species: species
                .into_iter()
                .map(|(id, data)| (to_id(&id), data))
                .collect(),
        })
    }

    /// Load both catalogs from JSON files
    pub fn from_paths(
        moves: impl AsRef<Path>,
        pokedex: impl AsRef<Path>,
    ) -> Result<Self, DexError> {
        let moves = read(moves.as_ref())?;
        let pokedex = read(pokedex.as_ref())?;
        Self::from_json_strs(&moves, &pokedex)
    }

    /// Catalog entry for a move id
    pub fn move_data(&self, id: &str) -> Option<&Arc<MoveData>> {
        self.moves.get(id)
    }

    pub fn has_move(&self, id: &str) -> bool {
        self.moves.contains_key(id)
    }

    /// Catalog entry for a species or forme, by name or id
    pub fn species(&self, name: &str) -> Option<&SpeciesData> {
        self.species.get(&to_id(name))
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

fn read(path: &Path) -> Result<String, DexError> {
    std::fs::read_to_string(path).map_err(|source| DexError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads() {
        let dex = Dex::builtin().unwrap();
        assert!(dex.move_count() > 0);
        assert!(dex.species_count() > 0);

        let thunderbolt = dex.move_data("thunderbolt").unwrap();
        assert_eq!(thunderbolt.base_power, 90);

        let pikachu = dex.species("Pikachu").unwrap();
        assert_eq!(pikachu.base_stats.spe, 90);
    }

    #[test]
    fn test_keys_are_normalized() {
        let dex = Dex::from_json_strs(
            r#"{"Quick Attack": {"name": "Quick Attack", "priority": 1}}"#,
            r#"{"Mr. Mime": {"name": "Mr. Mime", "types": ["Psychic", "Fairy"]}}"#,
        )
        .unwrap();

        assert!(dex.has_move("quickattack"));
        assert!(dex.species("Mr. Mime").is_some());
    }

    #[test]
    fn test_bad_json() {
        let err = Dex::from_json_strs("[]", "{}").unwrap_err();
        assert!(matches!(err, DexError::Json { catalog: "moves", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Dex::from_paths("/nonexistent/moves.json", "/nonexistent/dex.json")
            .unwrap_err();
        assert!(matches!(err, DexError::Io { .. }));
    }
}

//! Agent configuration (JSON)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use duelist_battle::Dex;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Name the local participant plays under
    pub username: String,
    /// Showdown `moves.json` export replacing the built-in move catalog
    pub moves_path: Option<PathBuf>,
    /// Showdown `pokedex.json` export replacing the built-in species catalog
    pub pokedex_path: Option<PathBuf>,
    /// Capacity of the outgoing command channel
    pub command_buffer: usize,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            username: "duelist".to_string(),
            moves_path: None,
            pokedex_path: None,
            command_buffer: 32,
            log_filter: "info".to_string(),
        }
    }
}

impl AgentConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid agent config")?;
        if config.command_buffer == 0 {
            bail!("command_buffer must be at least 1");
        }
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Load the catalogs the config points at, or the built-in ones
    pub fn load_dex(&self) -> Result<Arc<Dex>> {
        let dex = match (&self.moves_path, &self.pokedex_path) {
            (Some(moves), Some(pokedex)) => Dex::from_paths(moves, pokedex)?,
            (None, None) => Dex::builtin()?,
            _ => bail!("moves_path and pokedex_path must be set together"),
        };
        tracing::info!(
            moves = dex.move_count(),
            species = dex.species_count(),
            "Catalog loaded"
        );
        Ok(Arc::new(dex))
    }
}

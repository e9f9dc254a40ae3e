//! Battle request types
//!
//! These types represent the JSON structure of |request| messages. Every field
//! is optional or defaulted: a payload missing sections decodes to a request
//! that simply offers no actions.

use super::battle::{HpStatus, Player};
use serde::Deserialize;

/// A battle request asking the player to make a decision
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    /// Request ID for synchronization
    #[serde(default)]
    pub rqid: Option<u64>,

    /// Active pokemon and their available moves
    #[serde(default)]
    pub active: Vec<ActivePokemon>,

    /// Information about the player's side/team
    #[serde(default)]
    pub side: Option<SideInfo>,

    /// Which slots need to switch
    #[serde(default)]
    pub force_switch: Vec<bool>,

    /// Whether this is team preview
    #[serde(default)]
    pub team_preview: bool,

    /// Whether we're waiting for opponent
    #[serde(default)]
    pub wait: bool,
}

impl BattleRequest {
    /// Decode a request from its JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Decode a request from an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Check if this is a force switch request
    pub fn is_force_switch(&self) -> bool {
        self.force_switch.iter().any(|&b| b)
    }

    /// The first active slot, the only one in singles
    pub fn first_active(&self) -> Option<&ActivePokemon> {
        self.active.first()
    }
}

/// Information about an active pokemon in battle
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePokemon {
    /// Available moves
    #[serde(default)]
    pub moves: Vec<MoveSlot>,

    /// Whether the pokemon is trapped
    #[serde(default)]
    pub trapped: bool,

    /// Whether mega evolution is available
    #[serde(default)]
    pub can_mega_evo: bool,

    /// Z-move availability per move slot (null entries mean no z-move)
    #[serde(default)]
    pub can_z_move: Option<serde_json::Value>,

    /// Terastallization type (if available)
    #[serde(default)]
    pub can_terastallize: Option<String>,
}

impl ActivePokemon {
    /// Whether any slot offers a z-move
    pub fn has_z_move(&self) -> bool {
        match &self.can_z_move {
            Some(serde_json::Value::Array(slots)) => slots.iter().any(|s| !s.is_null()),
            Some(serde_json::Value::Bool(b)) => *b,
            _ => false,
        }
    }
}

/// A move slot on an active pokemon
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSlot {
    /// Move ID (lowercase, no spaces)
    #[serde(default)]
    pub id: String,

    /// Display name of the move
    #[serde(default, rename = "move")]
    pub name: Option<String>,

    /// Current PP
    #[serde(default)]
    pub pp: Option<u32>,

    /// Maximum PP
    #[serde(default, rename = "maxpp")]
    pub max_pp: Option<u32>,

    /// Base power, when the server includes it
    #[serde(default)]
    pub base_power: Option<u32>,

    /// Target type (normal, self, allySide, etc.)
    #[serde(default)]
    pub target: Option<String>,

    /// Whether the move is disabled
    #[serde(default, deserialize_with = "disabled_flag")]
    pub disabled: bool,
}

/// The server writes `disabled` either as a bool or as the disabling source.
fn disabled_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Null => false,
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

/// Information about the player's side
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideInfo {
    /// Player's display name
    #[serde(default)]
    pub name: String,

    /// Player ID (p1, p2)
    #[serde(default)]
    pub id: String,

    /// Pokemon on this side, in team order
    #[serde(default)]
    pub pokemon: Vec<SidePokemon>,
}

impl SideInfo {
    /// Get the player enum
    pub fn player(&self) -> Option<Player> {
        Player::parse(&self.id)
    }
}

/// A pokemon on the player's side
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePokemon {
    /// Pokemon identifier (e.g., "p1: Pikachu")
    #[serde(default)]
    pub ident: String,

    /// Details string (species, level, gender, shiny)
    #[serde(default)]
    pub details: String,

    /// Current condition (HP/MaxHP status)
    #[serde(default)]
    pub condition: String,

    /// Whether this pokemon is currently active
    #[serde(default)]
    pub active: bool,

    /// Stats (atk, def, spa, spd, spe)
    #[serde(default)]
    pub stats: Option<SidePokemonStats>,

    /// Known move ids
    #[serde(default)]
    pub moves: Vec<String>,

    /// Base ability
    #[serde(default)]
    pub base_ability: Option<String>,

    /// Held item
    #[serde(default)]
    pub item: Option<String>,
}

impl SidePokemon {
    /// Check if the pokemon is fainted
    pub fn is_fainted(&self) -> bool {
        HpStatus::parse(&self.condition)
            .map(|hp| hp.is_fainted())
            .unwrap_or(false)
    }
}

/// Pokemon stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct SidePokemonStats {
    #[serde(default)]
    pub atk: u32,
    #[serde(default)]
    pub def: u32,
    #[serde(default)]
    pub spa: u32,
    #[serde(default)]
    pub spd: u32,
    #[serde(default)]
    pub spe: u32,
}

//! Move catalog entries in Pokemon Showdown's `moves.json` shape

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::types::{FlagKey, Type};

/// Damage category of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Category {
    #[default]
    Physical,
    Special,
    Status,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Physical, Category::Special, Category::Status];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Physical => "Physical",
            Category::Special => "Special",
            Category::Status => "Status",
        }
    }
}

impl FlagKey for Category {
    const ALL: &'static [Self] = &Category::ALL;

    fn key(&self) -> &'static str {
        self.as_str()
    }
}

/// Target shape of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveTarget {
    Any,
    All,
    RandomNormal,
    AllAdjacent,
    AllyTeam,
    #[default]
    Normal,
    #[serde(rename = "self")]
    User,
    AllAdjacentFoes,
    AllySide,
    FoeSide,
    Scripted,
    AdjacentAlly,
    AdjacentAllyOrSelf,
    AdjacentFoe,
    Allies,
}

impl MoveTarget {
    pub const ALL: [MoveTarget; 15] = [
        MoveTarget::Any,
        MoveTarget::All,
        MoveTarget::RandomNormal,
        MoveTarget::AllAdjacent,
        MoveTarget::AllyTeam,
        MoveTarget::Normal,
        MoveTarget::User,
        MoveTarget::AllAdjacentFoes,
        MoveTarget::AllySide,
        MoveTarget::FoeSide,
        MoveTarget::Scripted,
        MoveTarget::AdjacentAlly,
        MoveTarget::AdjacentAllyOrSelf,
        MoveTarget::AdjacentFoe,
        MoveTarget::Allies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveTarget::Any => "any",
            MoveTarget::All => "all",
            MoveTarget::RandomNormal => "randomNormal",
            MoveTarget::AllAdjacent => "allAdjacent",
            MoveTarget::AllyTeam => "allyTeam",
            MoveTarget::Normal => "normal",
            MoveTarget::User => "self",
            MoveTarget::AllAdjacentFoes => "allAdjacentFoes",
            MoveTarget::AllySide => "allySide",
            MoveTarget::FoeSide => "foeSide",
            MoveTarget::Scripted => "scripted",
            MoveTarget::AdjacentAlly => "adjacentAlly",
            MoveTarget::AdjacentAllyOrSelf => "adjacentAllyOrSelf",
            MoveTarget::AdjacentFoe => "adjacentFoe",
            MoveTarget::Allies => "allies",
        }
    }
}

impl FlagKey for MoveTarget {
    const ALL: &'static [Self] = &MoveTarget::ALL;

    fn key(&self) -> &'static str {
        self.as_str()
    }
}

/// Accuracy: a percentage, or `true` for moves that never miss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Accuracy {
    AlwaysHits(bool),
    Percent(u32),
}

impl Default for Accuracy {
    fn default() -> Self {
        Accuracy::Percent(100)
    }
}

impl Accuracy {
    /// Percentage to hit; moves that bypass accuracy report 100
    pub fn percent(&self) -> u32 {
        match self {
            Accuracy::AlwaysHits(_) => 100,
            Accuracy::Percent(p) => *p,
        }
    }
}

/// Boosts applied to the user as part of a secondary effect
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SelfEffect {
    #[serde(default)]
    pub boosts: HashMap<String, i32>,
}

/// One entry of `secondary` / `secondaries`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secondary {
    #[serde(default)]
    pub chance: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub volatile_status: Option<String>,
    #[serde(default)]
    pub boosts: Option<HashMap<String, i32>>,
    #[serde(default, rename = "self")]
    pub user: Option<SelfEffect>,
}

/// Z-move data in the current `zMove` object form
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZMoveData {
    #[serde(default)]
    pub base_power: Option<u32>,
    #[serde(default)]
    pub boost: Option<HashMap<String, i32>>,
    #[serde(default)]
    pub effect: Option<String>,
}

/// Immutable catalog data for one move
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveData {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_type", rename = "type")]
    pub move_type: String,
    #[serde(default, deserialize_with = "lenient")]
    pub target: MoveTarget,
    #[serde(default)]
    pub base_power: u32,
    #[serde(default)]
    pub accuracy: Accuracy,
    #[serde(default)]
    pub pp: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Category,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, deserialize_with = "lenient")]
    pub secondary: Option<Secondary>,
    #[serde(default, deserialize_with = "lenient")]
    pub secondaries: Option<Vec<Secondary>>,
    #[serde(default)]
    pub z_move: Option<ZMoveData>,
    /// Older data files spell the z-move fields out flat
    #[serde(default)]
    pub z_move_boost: Option<HashMap<String, i32>>,
    #[serde(default)]
    pub z_move_power: Option<u32>,
    #[serde(default)]
    pub z_move_effect: Option<String>,
    /// Set on z-moves themselves (the value names the crystal)
    #[serde(default)]
    pub is_z: Option<String>,
}

fn default_type() -> String {
    "Normal".to_string()
}

/// Decode a field that data files sometimes fill with `false` or an
/// unexpected shape; anything unreadable becomes the default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl MoveData {
    /// Conservative stand-in for a move missing from the catalog
    pub fn synthesized(id: &str) -> Self {
        Self {
            name: id.to_string(),
            move_type: default_type(),
            target: MoveTarget::Normal,
            base_power: 80,
            accuracy: Accuracy::Percent(100),
            pp: 15,
            category: Category::Physical,
            priority: 0,
            secondary: None,
            secondaries: None,
            z_move: None,
            z_move_boost: None,
            z_move_power: None,
            z_move_effect: None,
            is_z: None,
        }
    }

    /// The move's type, when it names one of the 18
    pub fn type_(&self) -> Option<Type> {
        Type::from_protocol(&self.move_type)
    }

    /// Whether this entry is itself a z-move
    pub fn is_z_move(&self) -> bool {
        self.is_z.is_some()
    }

    /// Every secondary effect, from either spelling
    pub fn all_secondaries(&self) -> impl Iterator<Item = &Secondary> {
        self.secondary
            .iter()
            .chain(self.secondaries.iter().flatten())
    }

    /// Z-move base power, from either spelling
    pub fn z_power(&self) -> u32 {
        self.z_move
            .as_ref()
            .and_then(|z| z.base_power)
            .or(self.z_move_power)
            .unwrap_or(0)
    }

    /// Z-move stat boosts, from either spelling
    pub fn z_boosts(&self) -> Option<&HashMap<String, i32>> {
        self.z_move
            .as_ref()
            .and_then(|z| z.boost.as_ref())
            .or(self.z_move_boost.as_ref())
    }

    /// Whether the z-move version carries a special effect
    pub fn has_z_effect(&self) -> bool {
        self.z_move.as_ref().is_some_and(|z| z.effect.is_some()) || self.z_move_effect.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_showdown_entry() {
        let json = r#"{
            "num": 85, "accuracy": 100, "basePower": 90, "category": "Special",
            "name": "Thunderbolt", "pp": 15, "priority": 0, "flags": {"protect": 1},
            "secondary": {"chance": 10, "status": "par"},
            "target": "normal", "type": "Electric", "zMove": {"basePower": 175}
        }"#;
        let data: MoveData = serde_json::from_str(json).unwrap();

        assert_eq!(data.base_power, 90);
        assert_eq!(data.category, Category::Special);
        assert_eq!(data.type_(), Some(Type::Electric));
        assert_eq!(data.z_power(), 175);
        assert_eq!(data.all_secondaries().count(), 1);
    }

    #[test]
    fn test_always_hits_and_self_target() {
        let json = r#"{"accuracy": true, "category": "Status", "name": "Swords Dance",
            "pp": 20, "target": "self", "type": "Normal", "secondary": null,
            "zMove": {"effect": "clearnegativeboost"}}"#;
        let data: MoveData = serde_json::from_str(json).unwrap();

        assert_eq!(data.accuracy.percent(), 100);
        assert_eq!(data.target, MoveTarget::User);
        assert!(data.secondary.is_none());
        assert!(data.has_z_effect());
    }

    #[test]
    fn test_lenient_fields() {
        let json = r#"{"name": "Odd", "secondary": false, "target": "somethingNew"}"#;
        let data: MoveData = serde_json::from_str(json).unwrap();

        assert!(data.secondary.is_none());
        assert_eq!(data.target, MoveTarget::Normal);
        assert_eq!(data.move_type, "Normal");
    }

    #[test]
    fn test_synthesized_defaults() {
        let data = MoveData::synthesized("newmove");
        assert_eq!(data.base_power, 80);
        assert_eq!(data.accuracy.percent(), 100);
        assert_eq!(data.pp, 15);
        assert_eq!(data.category, Category::Physical);
        assert_eq!(data.type_(), Some(Type::Normal));
    }
}

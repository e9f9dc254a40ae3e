//! Move instances bound to a combatant's moveset

use std::collections::HashMap;
use std::sync::Arc;

use duelist_protocol::{MoveSlot, Stat};
use serde::Serialize;

use super::stats::StatStages;
use super::status::Status;
use crate::dex::MoveData;

/// Most moves a combatant can know; struggle is implicit and never stored
pub const MAX_MOVES: usize = 4;

/// Result of trying to add a move to a moveset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnOutcome {
    Learned,
    AlreadyKnown,
    /// Pseudo-moves (struggle, transform) and z-moves are never learned
    Rejected,
    /// The moveset already holds four other moves; nothing changed
    CapacityExceeded,
}

/// Percent chance of each ailment a move's secondaries may inflict.
///
/// Toxic chances count toward `psn`. Later secondaries for the same key
/// overwrite earlier ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SecondaryChances {
    pub par: u32,
    pub brn: u32,
    pub frz: u32,
    pub psn: u32,
    pub slp: u32,
    pub flinch: u32,
    pub confusion: u32,
}

impl SecondaryChances {
    pub const ZERO: Self = Self {
        par: 0,
        brn: 0,
        frz: 0,
        psn: 0,
        slp: 0,
        flinch: 0,
        confusion: 0,
    };

    fn record_status(&mut self, status: Status, chance: u32) {
        let slot = match status {
            Status::Paralysis => &mut self.par,
            Status::Burn => &mut self.brn,
            Status::Freeze => &mut self.frz,
            Status::Poison | Status::BadPoison => &mut self.psn,
            Status::Sleep => &mut self.slp,
            Status::Fainted => return,
        };
        *slot = chance;
    }

    fn record_volatile(&mut self, volatile: &str, chance: u32) {
        match volatile {
            "flinch" => self.flinch = chance,
            "confusion" => self.confusion = chance,
            _ => {}
        }
    }
}

/// Secondary-effect bookkeeping derived from the catalog entry.
///
/// Kept per instance so that a combatant-scoped override can replace it
/// without touching the shared catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveEffects {
    /// Ailments a secondary may inflict, with their percent chance
    pub secondaries: SecondaryChances,
    /// Stage changes a secondary applies to the target
    pub target_boosts: StatStages,
    /// Stage changes a secondary applies to the user
    pub self_boosts: StatStages,
    pub z_boost: StatStages,
    pub z_power: u32,
    pub z_effect: bool,
}

impl MoveEffects {
    /// Derive the effect tables of a catalog entry
    pub fn from_data(data: &MoveData) -> Self {
        let mut effects = Self {
            z_power: data.z_power(),
            z_effect: data.has_z_effect(),
            z_boost: data.z_boosts().map(stages_from).unwrap_or_default(),
            ..Default::default()
        };

        for secondary in data.all_secondaries() {
            let chance = secondary.chance.unwrap_or(100);
            if let Some(status) = secondary.status.as_deref().and_then(Status::from_protocol) {
                effects.secondaries.record_status(status, chance);
            }
            if let Some(volatile) = secondary.volatile_status.as_deref() {
                effects.secondaries.record_volatile(volatile, chance);
            }
            if let Some(boosts) = &secondary.boosts {
                accumulate(&mut effects.target_boosts, boosts);
            }
            if let Some(user) = &secondary.user {
                accumulate(&mut effects.self_boosts, &user.boosts);
            }
        }

        effects
    }
}

fn accumulate(stages: &mut StatStages, boosts: &HashMap<String, i32>) {
    for (stat, amount) in boosts {
        if let Some(stat) = Stat::parse(stat) {
            stages.boost(stat, *amount);
        }
    }
}

fn stages_from(boosts: &HashMap<String, i32>) -> StatStages {
    let mut stages = StatStages::new();
    accumulate(&mut stages, boosts);
    stages
}

/// A move in one combatant's moveset
#[derive(Debug, Clone, PartialEq)]
pub struct MoveInstance {
    /// Normalized move id
    pub id: String,
    /// Shared catalog entry
    pub data: Arc<MoveData>,
    pub pp: u32,
    pub max_pp: u32,
    pub disabled: bool,
    /// Key of the combatant this move last targeted
    pub last_target: Option<String>,
    /// Base power reported by the server, when it differs from the catalog
    pub base_power_override: Option<u32>,
    pub effects: MoveEffects,
}

impl MoveInstance {
    pub fn new(id: impl Into<String>, data: Arc<MoveData>) -> Self {
        let effects = MoveEffects::from_data(&data);
        Self {
            id: id.into(),
            pp: data.pp,
            max_pp: data.pp,
            disabled: false,
            last_target: None,
            base_power_override: None,
            effects,
            data,
        }
    }

    /// Effective base power
    pub fn base_power(&self) -> u32 {
        self.base_power_override.unwrap_or(self.data.base_power)
    }

    /// Record one use of the move
    pub fn use_once(&mut self, target: Option<String>) {
        self.pp = self.pp.saturating_sub(1);
        if target.is_some() {
            self.last_target = target;
        }
    }

    /// Refresh the mutable fields from a request's move slot
    pub fn refresh(&mut self, slot: &MoveSlot) {
        if let Some(pp) = slot.pp {
            self.pp = pp;
        }
        if let Some(max_pp) = slot.max_pp {
            self.max_pp = max_pp;
        }
        self.disabled = slot.disabled;
        self.base_power_override = slot
            .base_power
            .filter(|power| *power != self.data.base_power);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::Dex;

    fn instance(id: &str) -> MoveInstance {
        let dex = Dex::builtin().unwrap();
        MoveInstance::new(id, Arc::clone(dex.move_data(id).unwrap()))
    }

    #[test]
    fn test_effects_from_catalog() {
        let thunderbolt = instance("thunderbolt");
        assert_eq!(thunderbolt.effects.secondaries.par, 10);
        assert_eq!(thunderbolt.effects.secondaries.flinch, 0);
        assert_eq!(thunderbolt.effects.z_power, 175);

        let slash = instance("airslash");
        assert_eq!(
            slash.effects.secondaries,
            SecondaryChances {
                flinch: 30,
                ..SecondaryChances::ZERO
            }
        );
        assert_eq!(instance("dynamicpunch").effects.secondaries.confusion, 100);
        // a primary volatile is not a secondary
        assert_eq!(instance("confuseray").effects.secondaries.confusion, 0);

        let punch = instance("poweruppunch");
        assert_eq!(punch.effects.self_boosts.atk, 1);
        assert!(punch.effects.target_boosts.is_clear());

        let rock = instance("stealthrock");
        assert_eq!(rock.effects.z_boost.def, 1);
        assert!(!rock.effects.z_effect);
    }

    #[test]
    fn test_use_once() {
        let mut tackle = instance("quickattack");
        assert_eq!(tackle.pp, 30);

        tackle.use_once(Some("garchomp".to_string()));
        tackle.use_once(None);
        assert_eq!(tackle.pp, 28);
        assert_eq!(tackle.last_target.as_deref(), Some("garchomp"));

        tackle.pp = 0;
        tackle.use_once(None);
        assert_eq!(tackle.pp, 0);
    }

    #[test]
    fn test_refresh_from_request() {
        let mut hp = instance("hiddenpower");
        let slot = MoveSlot {
            id: "hiddenpowerfire60".to_string(),
            pp: Some(20),
            max_pp: Some(24),
            base_power: Some(60),
            disabled: true,
            ..Default::default()
        };

        hp.refresh(&slot);
        assert_eq!(hp.pp, 20);
        assert_eq!(hp.max_pp, 24);
        assert!(hp.disabled);
        assert_eq!(hp.base_power_override, None);

        let boosted = MoveSlot {
            base_power: Some(70),
            ..slot
        };
        hp.refresh(&boosted);
        assert_eq!(hp.base_power(), 70);
    }
}

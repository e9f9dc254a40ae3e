//! Fixed-shape snapshot of a match for feature extraction.
//!
//! Every snapshot has the same shape: one active and five bench slots per
//! side, each padded with an `EMPTY` placeholder, and every flag set
//! serialized over its full key list. Field order is part of the contract.

use duelist_protocol::Gender;
use serde::Serialize;

use super::battle::MatchState;
use crate::dex::{Category, MoveTarget};
use crate::types::{
    BaseStats, Combatant, Flags, MAX_MOVES, MoveInstance, Roster, SecondaryChances,
    SideConditions, StatStages, Stats, StatusSet, Type, Weather,
};

/// Bench slots per side
pub const BENCH_SLOTS: usize = 5;

/// One move slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveSnapshot {
    pub accuracy: u32,
    /// Stage changes the move may apply to its user
    pub auto_boosts: StatStages,
    pub base_power: u32,
    /// Stage changes the move may apply to its target
    pub boosts: StatStages,
    pub category: Flags<Category>,
    pub exists: bool,
    pub max_pp: u32,
    pub priority: i32,
    pub target: Flags<MoveTarget>,
    #[serde(rename = "type")]
    pub move_type: Flags<Type>,
    /// Percent chance of each secondary ailment
    pub secondaries: SecondaryChances,
    pub z_boost: StatStages,
    pub z_power: u32,
    pub z_effect: bool,
}

impl MoveSnapshot {
    pub const EMPTY: Self = Self {
        accuracy: 0,
        auto_boosts: StatStages::ZERO,
        base_power: 0,
        boosts: StatStages::ZERO,
        category: Flags::EMPTY,
        exists: false,
        max_pp: 0,
        priority: 0,
        target: Flags::EMPTY,
        move_type: Flags::EMPTY,
        secondaries: SecondaryChances::ZERO,
        z_boost: StatStages::ZERO,
        z_power: 0,
        z_effect: false,
    };

    pub fn of(instance: &MoveInstance) -> Self {
        let data = &instance.data;
        let effects = &instance.effects;
        Self {
            accuracy: data.accuracy.percent(),
            auto_boosts: effects.self_boosts,
            base_power: instance.base_power(),
            boosts: effects.target_boosts,
            category: Flags::only(data.category),
            exists: true,
            max_pp: instance.max_pp,
            priority: data.priority,
            target: Flags::only(data.target),
            move_type: data.type_().map(Flags::only).unwrap_or_default(),
            secondaries: effects.secondaries,
            z_boost: effects.z_boost,
            z_power: effects.z_power,
            z_effect: effects.z_effect,
        }
    }
}

/// One combatant slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombatantSnapshot {
    pub active: bool,
    pub attracted: bool,
    pub base_stats: BaseStats,
    pub boosts: StatStages,
    pub confused: bool,
    /// 0 while unknown
    pub current_hp: u32,
    pub encored: bool,
    pub exists: bool,
    pub focused: bool,
    pub infested: bool,
    pub level: u8,
    pub leech_seeding: bool,
    pub max_hp: u32,
    pub mega: bool,
    pub moves: [MoveSnapshot; MAX_MOVES],
    pub perish_count: u8,
    pub primal: bool,
    pub sex: Flags<Gender>,
    pub stats: Stats,
    pub status: StatusSet,
    pub substitute: bool,
    pub taunted: bool,
    #[serde(rename = "type")]
    pub types: Flags<Type>,
    pub yawned: bool,
}

impl CombatantSnapshot {
    pub const EMPTY: Self = Self {
        active: false,
        attracted: false,
        base_stats: BaseStats::ZERO,
        boosts: StatStages::ZERO,
        confused: false,
        current_hp: 0,
        encored: false,
        exists: false,
        focused: false,
        infested: false,
        level: 100,
        leech_seeding: false,
        max_hp: 0,
        mega: false,
        moves: [MoveSnapshot::EMPTY; MAX_MOVES],
        perish_count: 4,
        primal: false,
        sex: Flags::EMPTY,
        stats: Stats::ZERO,
        status: Flags::EMPTY,
        substitute: false,
        taunted: false,
        types: Flags::EMPTY,
        yawned: false,
    };

    pub fn of(combatant: &Combatant) -> Self {
        let mut moves = [MoveSnapshot::EMPTY; MAX_MOVES];
        for (slot, instance) in moves.iter_mut().zip(combatant.moves()) {
            *slot = MoveSnapshot::of(instance);
        }

        let volatiles = &combatant.volatiles;
        Self {
            active: combatant.active,
            attracted: volatiles.attracted,
            base_stats: combatant.base_stats,
            boosts: combatant.boosts,
            confused: volatiles.confused,
            current_hp: combatant.current_hp.unwrap_or(0),
            encored: volatiles.encored,
            exists: true,
            focused: volatiles.focused,
            infested: volatiles.infested,
            level: combatant.level,
            leech_seeding: volatiles.leech_seeded,
            max_hp: combatant.max_hp.unwrap_or(0),
            mega: combatant.mega,
            moves,
            perish_count: volatiles.perish_count,
            primal: combatant.primal,
            sex: Flags::only(combatant.gender),
            stats: combatant.stats,
            status: combatant.status,
            substitute: volatiles.substitute,
            taunted: volatiles.taunted,
            types: combatant.types(),
            yawned: volatiles.yawned,
        }
    }

    fn of_option(combatant: Option<&Combatant>) -> Self {
        combatant.map_or(Self::EMPTY, Self::of)
    }
}

/// The whole match, from the local participant's side
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub active: CombatantSnapshot,
    pub opponent_active: CombatantSnapshot,
    pub back: [CombatantSnapshot; BENCH_SLOTS],
    pub opponent_back: [CombatantSnapshot; BENCH_SLOTS],
    pub weather: Flags<Weather>,
    pub field: SideConditions,
    pub opponent_field: SideConditions,
}

/// Non-active combatants in insertion order, padded or cut to five slots
fn bench(roster: &Roster) -> [CombatantSnapshot; BENCH_SLOTS] {
    let mut back = [CombatantSnapshot::EMPTY; BENCH_SLOTS];
    for (slot, combatant) in back.iter_mut().zip(roster.bench()) {
        *slot = CombatantSnapshot::of(combatant);
    }
    back
}

impl MatchState {
    /// Flatten the current state into the fixed snapshot shape
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            active: CombatantSnapshot::of_option(self.active()),
            opponent_active: CombatantSnapshot::of_option(self.opponent_active()),
            back: bench(self.own_roster()),
            opponent_back: bench(self.opponent_roster()),
            weather: Flags::only(self.weather()),
            field: self.own_side_conditions(),
            opponent_field: self.opponent_side_conditions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dex::Dex;
    use crate::types::{SideCondition, Status};

    fn new_match() -> MatchState {
        MatchState::new("battle-gen7ou-3", "bot_a", Arc::new(Dex::builtin().unwrap()))
    }

    #[test]
    fn test_empty_match_snapshot() {
        let snapshot = new_match().snapshot();
        assert_eq!(snapshot.active, CombatantSnapshot::EMPTY);
        assert_eq!(snapshot.back.len(), BENCH_SLOTS);
        assert!(snapshot.opponent_back.iter().all(|c| !c.exists));
        assert!(snapshot.weather.contains(Weather::None));
    }

    #[test]
    fn test_empty_placeholder() {
        let empty = CombatantSnapshot::EMPTY;
        assert_eq!(empty.level, 100);
        assert_eq!(empty.perish_count, 4);
        assert!(!empty.exists);
        assert!(empty.moves.iter().all(|m| !m.exists));
    }

    #[test]
    fn test_snapshot_contents() {
        let mut state = new_match();
        for line in [
            "|player|p1|bot_a|",
            "|switch|p1a: Pikachu|Pikachu, L50, M|100/120",
            "|switch|p2a: Tyranitar|Tyranitar, F|100/100",
            "|move|p1a: Pikachu|Thunderbolt|p2a: Tyranitar",
            "|-status|p2a: Tyranitar|par",
            "|-weather|Sandstorm|[from] ability: Sand Stream|[of] p2a: Tyranitar",
            "|-sidestart|p1: bot_a|move: Stealth Rock",
        ] {
            state.apply_line(line).unwrap();
        }

        let snapshot = state.snapshot();
        let active = snapshot.active;
        assert!(active.exists);
        assert!(active.active);
        assert_eq!(active.current_hp, 100);
        assert_eq!(active.max_hp, 120);
        assert!(active.sex.contains(Gender::Male));
        assert!(active.types.contains(Type::Electric));

        let thunderbolt = active.moves[0];
        assert!(thunderbolt.exists);
        assert_eq!(thunderbolt.base_power, 90);
        assert_eq!(thunderbolt.accuracy, 100);
        assert!(thunderbolt.category.contains(Category::Special));
        assert_eq!(thunderbolt.secondaries.par, 10);
        assert_eq!(thunderbolt.secondaries.flinch, 0);
        assert!(!active.moves[1].exists);

        assert!(snapshot.opponent_active.status.contains(Status::Paralysis));
        assert!(snapshot.weather.contains(Weather::Sandstorm));
        assert!(!snapshot.weather.contains(Weather::None));
        assert!(snapshot.field.contains(SideCondition::StealthRock));
        assert!(snapshot.opponent_field.is_empty());
    }

    #[test]
    fn test_bench_is_capped() {
        let mut state = new_match();
        state.apply_line("|player|p1|bot_a|").unwrap();
        for name in [
            "Pikachu", "Raichu", "Snorlax", "Gengar", "Garchomp", "Ditto", "Alakazam",
        ] {
            state
                .apply_line(&format!("|switch|p2a: {name}|{name}|100/100"))
                .unwrap();
        }

        let snapshot = state.snapshot();
        assert!(snapshot.opponent_active.exists);
        assert!(snapshot.opponent_back.iter().all(|c| c.exists));
        assert_eq!(snapshot.opponent_back.len(), BENCH_SLOTS);
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(new_match().snapshot()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 7);

        let back = value["back"].as_array().unwrap();
        assert_eq!(back.len(), BENCH_SLOTS);
        assert_eq!(back[0]["moves"].as_array().unwrap().len(), MAX_MOVES);
        assert_eq!(back[0]["type"].as_object().unwrap().len(), 18);
        assert_eq!(value["weather"].as_object().unwrap().len(), 9);
        assert_eq!(value["field"].as_object().unwrap().len(), 9);

        let secondaries = back[0]["moves"][0]["secondaries"].as_object().unwrap();
        assert_eq!(secondaries.len(), 7);
        for key in ["par", "brn", "frz", "psn", "slp", "flinch", "confusion"] {
            assert_eq!(secondaries[key], 0);
        }
    }

    #[test]
    fn test_flinch_chance_in_snapshot() {
        let mut state = new_match();
        for line in [
            "|player|p2|bot_a|",
            "|switch|p2a: Charizard|Charizard, M|100/100",
            "|switch|p1a: Garchomp|Garchomp, F|100/100",
            "|move|p2a: Charizard|Air Slash|p1a: Garchomp",
        ] {
            state.apply_line(line).unwrap();
        }

        let slash = state.snapshot().active.moves[0];
        assert!(slash.exists);
        assert_eq!(slash.secondaries.flinch, 30);
        assert_eq!(slash.secondaries.par, 0);
        assert!(slash.move_type.contains(Type::Flying));
    }
}

//! Stat stages and stat blocks

use duelist_protocol::{SidePokemonStats, Stat};
use serde::{Deserialize, Serialize};

/// Stat stages for the eight tracked stats.
///
/// Stages accumulate without a clamp; limiting them to -6..+6 is left to
/// whoever consumes the state. Arithmetic saturates at the `i32` bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatStages {
    pub atk: i32,
    pub def: i32,
    pub spa: i32,
    pub spd: i32,
    pub spe: i32,
    /// Generation 1 unified special
    pub spc: i32,
    pub accuracy: i32,
    pub evasion: i32,
}

impl StatStages {
    pub const ZERO: Self = Self {
        atk: 0,
        def: 0,
        spa: 0,
        spd: 0,
        spe: 0,
        spc: 0,
        accuracy: 0,
        evasion: 0,
    };

    /// Create new stat stages (all at 0)
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Atk => &mut self.atk,
            Stat::Def => &mut self.def,
            Stat::Spa => &mut self.spa,
            Stat::Spd => &mut self.spd,
            Stat::Spe => &mut self.spe,
            Stat::Spc => &mut self.spc,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
        }
    }

    /// Get stage for a stat
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Spc => self.spc,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    /// Set stage for a stat
    pub fn set(&mut self, stat: Stat, value: i32) {
        *self.slot(stat) = value;
    }

    /// Add to a stat's stage
    pub fn boost(&mut self, stat: Stat, amount: i32) {
        let stage = self.slot(stat);
        *stage = stage.saturating_add(amount);
    }

    /// Subtract from a stat's stage
    pub fn unboost(&mut self, stat: Stat, amount: i32) {
        let stage = self.slot(stat);
        *stage = stage.saturating_sub(amount);
    }

    /// Reset all stages to 0
    pub fn clear(&mut self) {
        *self = Self::ZERO;
    }

    /// Reset only positive stages to 0
    pub fn clear_positive(&mut self) {
        for stat in Stat::ALL {
            let stage = self.slot(stat);
            *stage = (*stage).min(0);
        }
    }

    /// Reset only negative stages to 0
    pub fn clear_negative(&mut self) {
        for stat in Stat::ALL {
            let stage = self.slot(stat);
            *stage = (*stage).max(0);
        }
    }

    /// Invert all stages (Topsy-Turvy)
    pub fn invert(&mut self) {
        for stat in Stat::ALL {
            let stage = self.slot(stat);
            *stage = stage.saturating_neg();
        }
    }

    /// Copy boosts from another StatStages (Psych Up)
    pub fn copy_from(&mut self, other: &StatStages) {
        *self = *other;
    }

    /// Check if all stats are at 0
    pub fn is_clear(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Species base stats, including HP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(default)]
    pub hp: u32,
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

impl BaseStats {
    pub const ZERO: Self = Self {
        hp: 0,
        atk: 0,
        def: 0,
        spa: 0,
        spd: 0,
        spe: 0,
    };
}

/// Computed battle stats as reported by the server (HP is tracked separately)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

impl Stats {
    pub const ZERO: Self = Self {
        atk: 0,
        def: 0,
        spa: 0,
        spd: 0,
        spe: 0,
    };
}

impl From<SidePokemonStats> for Stats {
    fn from(stats: SidePokemonStats) -> Self {
        Self {
            atk: stats.atk,
            def: stats.def,
            spa: stats.spa,
            spd: stats.spd,
            spe: stats.spe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stages_are_zero() {
        let stages = StatStages::new();
        assert_eq!(stages, StatStages::ZERO);
        assert!(stages.is_clear());
    }

    #[test]
    fn test_boost_is_unclamped() {
        let mut stages = StatStages::new();
        stages.boost(Stat::Atk, 4);
        stages.boost(Stat::Atk, 4);
        assert_eq!(stages.atk, 8);

        stages.unboost(Stat::Spc, 7);
        assert_eq!(stages.get(Stat::Spc), -7);
    }

    #[test]
    fn test_extreme_stages_saturate() {
        let mut stages = StatStages::new();
        stages.boost(Stat::Atk, i32::MAX);
        stages.boost(Stat::Atk, i32::MAX);
        assert_eq!(stages.atk, i32::MAX);

        stages.unboost(Stat::Def, i32::MAX);
        stages.unboost(Stat::Def, i32::MAX);
        assert_eq!(stages.def, i32::MIN);

        stages.set(Stat::Spe, i32::MIN);
        stages.invert();
        assert_eq!(stages.spe, i32::MAX);
        assert_eq!(stages.atk, -i32::MAX);
        assert_eq!(stages.def, i32::MAX);
    }

    #[test]
    fn test_clear_positive_and_negative() {
        let mut stages = StatStages {
            atk: 3,
            def: -2,
            accuracy: 1,
            evasion: -1,
            ..Default::default()
        };

        let mut positive = stages;
        positive.clear_positive();
        assert_eq!(positive.atk, 0);
        assert_eq!(positive.def, -2);
        assert_eq!(positive.accuracy, 0);

        stages.clear_negative();
        assert_eq!(stages.atk, 3);
        assert_eq!(stages.def, 0);
        assert_eq!(stages.evasion, 0);
    }

    #[test]
    fn test_invert() {
        let mut stages = StatStages {
            atk: 3,
            spe: -6,
            ..Default::default()
        };

        stages.invert();
        assert_eq!(stages.atk, -3);
        assert_eq!(stages.spe, 6);
        assert_eq!(stages.def, 0);
    }

    #[test]
    fn test_copy_from() {
        let source = StatStages {
            atk: 2,
            evasion: -1,
            ..Default::default()
        };

        let mut target = StatStages::new();
        target.copy_from(&source);
        assert_eq!(target, source);
    }
}

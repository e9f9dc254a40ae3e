//! Field state: weather plus per-side conditions

use duelist_protocol::Player;

use super::conditions::{SideCondition, Weather};
use super::flags::Flags;

/// Field conditions of one side
pub type SideConditions = Flags<SideCondition>;

/// Global field state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// Current weather condition
    pub weather: Weather,

    /// Side conditions indexed by [`Player::index`]
    sides: [SideConditions; 2],
}

impl FieldState {
    /// Create a new empty field state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a -weather message; upkeep reminders change nothing
    pub fn apply_weather(&mut self, weather: &str, upkeep: bool) {
        if !upkeep {
            self.weather = Weather::from_protocol(weather);
        }
    }

    /// Conditions on one player's side
    pub fn side(&self, player: Player) -> SideConditions {
        self.sides[player.index()]
    }

    /// Apply a -sidestart; returns false when the condition is not tracked
    pub fn apply_side_start(&mut self, player: Player, condition: &str) -> bool {
        match SideCondition::from_protocol(condition) {
            Some(cond) => {
                self.sides[player.index()].insert(cond);
                true
            }
            None => false,
        }
    }

    /// Apply a -sideend; returns false when the condition is not tracked
    pub fn apply_side_end(&mut self, player: Player, condition: &str) -> bool {
        match SideCondition::from_protocol(condition) {
            Some(cond) => {
                self.sides[player.index()].remove(cond);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_upkeep_is_noop() {
        let mut field = FieldState::new();
        field.apply_weather("RainDance", false);
        assert_eq!(field.weather, Weather::RainDance);

        field.apply_weather("Sandstorm", true);
        assert_eq!(field.weather, Weather::RainDance);

        field.apply_weather("none", false);
        assert_eq!(field.weather, Weather::None);
    }

    #[test]
    fn test_side_conditions_are_per_player() {
        let mut field = FieldState::new();
        assert!(field.apply_side_start(Player::P1, "move: Stealth Rock"));
        assert!(field.side(Player::P1).contains(SideCondition::StealthRock));
        assert!(!field.side(Player::P2).contains(SideCondition::StealthRock));

        assert!(field.apply_side_end(Player::P1, "move: Stealth Rock"));
        assert!(field.side(Player::P1).is_empty());

        assert!(!field.apply_side_start(Player::P2, "Mist"));
    }
}

//! Status conditions (volatile and non-volatile)

use super::flags::{FlagKey, Flags};
use super::pokemon_type::Type;

/// Non-volatile status conditions (persist through switching)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    BadPoison, // Toxic
    Poison,
    Sleep,
    Paralysis,
    Burn,
    Freeze,
    Fainted,
}

impl Status {
    pub const ALL: [Status; 7] = [
        Status::BadPoison,
        Status::Poison,
        Status::Sleep,
        Status::Paralysis,
        Status::Burn,
        Status::Freeze,
        Status::Fainted,
    ];

    /// Parse from protocol string ("tox", "psn", "slp", "par", "brn", "frz", "fnt")
    pub fn from_protocol(s: &str) -> Option<Self> {
        match s.trim() {
            "tox" => Some(Status::BadPoison),
            "psn" => Some(Status::Poison),
            "slp" => Some(Status::Sleep),
            "par" => Some(Status::Paralysis),
            "brn" => Some(Status::Burn),
            "frz" => Some(Status::Freeze),
            "fnt" => Some(Status::Fainted),
            _ => None,
        }
    }

    /// Convert to protocol format
    pub fn to_protocol(&self) -> &'static str {
        match self {
            Status::BadPoison => "tox",
            Status::Poison => "psn",
            Status::Sleep => "slp",
            Status::Paralysis => "par",
            Status::Burn => "brn",
            Status::Freeze => "frz",
            Status::Fainted => "fnt",
        }
    }
}

impl FlagKey for Status {
    const ALL: &'static [Self] = &Status::ALL;

    fn key(&self) -> &'static str {
        self.to_protocol()
    }
}

/// Status set of one combatant. Fainted, once set, is never removed.
pub type StatusSet = Flags<Status>;

/// Volatile effects the tracker follows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Volatile {
    Confusion,
    Attract,
    Taunt,
    Encore,
    Infestation,
    LeechSeed,
    Substitute,
    FocusEnergy,
    Yawn,
    /// perish3 .. perish0
    Perish(u8),
    TypeChange,
    Disable,
}

impl Volatile {
    /// Parse from protocol string; effects the tracker ignores yield None
    pub fn from_protocol(s: &str) -> Option<Self> {
        let clean = s
            .strip_prefix("move: ")
            .or_else(|| s.strip_prefix("ability: "))
            .unwrap_or(s);

        // Normalize: lowercase and remove spaces, dashes, apostrophes
        let normalized = clean.to_lowercase().replace([' ', '-', '\''], "");

        match normalized.as_str() {
            "confusion" | "confused" => Some(Volatile::Confusion),
            "attract" | "infatuation" => Some(Volatile::Attract),
            "taunt" => Some(Volatile::Taunt),
            "encore" => Some(Volatile::Encore),
            "infestation" => Some(Volatile::Infestation),
            "leechseed" => Some(Volatile::LeechSeed),
            "substitute" => Some(Volatile::Substitute),
            "focusenergy" => Some(Volatile::FocusEnergy),
            "yawn" => Some(Volatile::Yawn),
            "typechange" => Some(Volatile::TypeChange),
            "disable" => Some(Volatile::Disable),
            other => other
                .strip_prefix("perish")
                .and_then(|n| n.parse().ok())
                .map(Volatile::Perish),
        }
    }
}

/// Volatile flags of one combatant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volatiles {
    pub confused: bool,
    pub attracted: bool,
    pub taunted: bool,
    pub encored: bool,
    pub infested: bool,
    pub leech_seeded: bool,
    pub substitute: bool,
    pub focused: bool,
    pub yawned: bool,
    pub perish_count: u8,
    /// Single type replacing the natural types while a type change is active
    pub type_override: Option<Type>,
}

impl Default for Volatiles {
    fn default() -> Self {
        Self {
            confused: false,
            attracted: false,
            taunted: false,
            encored: false,
            infested: false,
            leech_seeded: false,
            substitute: false,
            focused: false,
            yawned: false,
            perish_count: 4,
            type_override: None,
        }
    }
}

impl Volatiles {
    /// Clear what a switch-in clears. Leech seed, focus energy and yawn are
    /// left as they were.
    pub fn reset_on_switch(&mut self) {
        self.confused = false;
        self.attracted = false;
        self.encored = false;
        self.infested = false;
        self.taunted = false;
        self.substitute = false;
        self.type_override = None;
        self.perish_count = 4;
    }

    /// Apply a -start for a tracked volatile. `detail` carries the new type
    /// of a type change.
    pub fn start(&mut self, volatile: &Volatile, detail: Option<&str>) {
        match volatile {
            Volatile::Confusion => self.confused = true,
            Volatile::Attract => self.attracted = true,
            Volatile::Taunt => self.taunted = true,
            Volatile::Encore => self.encored = true,
            Volatile::Infestation => self.infested = true,
            Volatile::LeechSeed => self.leech_seeded = true,
            Volatile::Substitute => self.substitute = true,
            Volatile::FocusEnergy => self.focused = true,
            Volatile::Yawn => self.yawned = true,
            Volatile::Perish(count) => self.perish_count = *count,
            Volatile::TypeChange => {
                // "Fire/Water" keeps the first type only
                self.type_override = detail
                    .and_then(|d| d.split('/').next())
                    .and_then(Type::from_protocol);
            }
            Volatile::Disable => {}
        }
    }

    /// Apply an -end for a tracked volatile
    pub fn end(&mut self, volatile: &Volatile) {
        match volatile {
            Volatile::Confusion => self.confused = false,
            Volatile::Attract => self.attracted = false,
            Volatile::Taunt => self.taunted = false,
            Volatile::Encore => self.encored = false,
            Volatile::Infestation => self.infested = false,
            Volatile::LeechSeed => self.leech_seeded = false,
            Volatile::Substitute => self.substitute = false,
            Volatile::FocusEnergy => self.focused = false,
            Volatile::Yawn => self.yawned = false,
            Volatile::Perish(_) => self.perish_count = 4,
            Volatile::TypeChange => self.type_override = None,
            Volatile::Disable => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_protocol() {
        assert_eq!(Status::from_protocol("tox"), Some(Status::BadPoison));
        assert_eq!(Status::from_protocol("fnt"), Some(Status::Fainted));
        assert_eq!(Status::from_protocol("xyz"), None);
    }

    #[test]
    fn test_volatile_from_protocol() {
        assert_eq!(
            Volatile::from_protocol("move: Leech Seed"),
            Some(Volatile::LeechSeed)
        );
        assert_eq!(Volatile::from_protocol("confusion"), Some(Volatile::Confusion));
        assert_eq!(Volatile::from_protocol("perish2"), Some(Volatile::Perish(2)));
        assert_eq!(Volatile::from_protocol("ability: Flash Fire"), None);
    }

    #[test]
    fn test_start_and_end() {
        let mut volatiles = Volatiles::default();
        volatiles.start(&Volatile::Taunt, None);
        volatiles.start(&Volatile::Perish(1), None);
        volatiles.start(&Volatile::TypeChange, Some("Water/Ground"));
        assert!(volatiles.taunted);
        assert_eq!(volatiles.perish_count, 1);
        assert_eq!(volatiles.type_override, Some(Type::Water));

        volatiles.end(&Volatile::Taunt);
        assert!(!volatiles.taunted);
    }

    #[test]
    fn test_reset_on_switch() {
        let mut volatiles = Volatiles {
            confused: true,
            substitute: true,
            leech_seeded: true,
            perish_count: 2,
            type_override: Some(Type::Fire),
            ..Default::default()
        };

        volatiles.reset_on_switch();
        assert!(!volatiles.confused);
        assert!(!volatiles.substitute);
        assert!(volatiles.leech_seeded);
        assert_eq!(volatiles.perish_count, 4);
        assert_eq!(volatiles.type_override, None);
    }
}

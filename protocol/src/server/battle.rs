//! Shared types for battle protocol messages

use crate::ParseError;

/// Player slot in a two-sided battle (p1, p2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            _ => None,
        }
    }

    /// Parse the leading player tag of a reference like "p2a: Pikachu" or "p1: Alice"
    pub fn from_prefix(s: &str) -> Option<Self> {
        s.get(..2).and_then(Self::parse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }
}

/// Normalize a display name into a Showdown-style id ("King's Shield" -> "kingsshield")
pub fn to_id(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Creature reference in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonRef {
    /// Player tag written on the reference, if recognizable
    pub player: Option<Player>,
    /// Position letter (a, b, c for active slots, or None if inactive)
    pub position: Option<char>,
    /// Pokemon's name/nickname as written by the server
    pub name: String,
}

impl PokemonRef {
    /// Parse a reference string like "p1a: Pikachu" or "p1: Pikachu"
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = s.split_once(": ")?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(PokemonRef {
            player: Player::from_prefix(pos_part),
            position: pos_part.chars().nth(2),
            name: name.to_string(),
        })
    }

    /// Stable roster key: the lowercased name part of the reference
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Gender marker from a details string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    Female,
    Male,
    #[default]
    Neutral,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
            Gender::Neutral => "N",
        }
    }
}

/// Pokemon details string (species, level, gender, shiny, tera)
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonDetails {
    pub species: String,
    pub level: u8,
    pub gender: Gender,
    pub shiny: bool,
    pub tera_type: Option<String>,
}

impl Default for PokemonDetails {
    fn default() -> Self {
        Self {
            species: String::new(),
            level: 100,
            gender: Gender::Neutral,
            shiny: false,
            tera_type: None,
        }
    }
}

impl PokemonDetails {
    /// Parse a details string like "Pikachu, L50, M, shiny".
    ///
    /// A missing level means level 100 and a missing gender means genderless,
    /// which is how the server abbreviates them.
    pub fn parse(s: &str) -> Self {
        let mut details = PokemonDetails::default();
        let mut parts = s.split(", ");

        if let Some(species) = parts.next() {
            details.species = species.trim().to_string();
        }

        for part in parts {
            let part = part.trim();
            if let Some(level_str) = part.strip_prefix('L') {
                details.level = level_str.parse().unwrap_or(100);
            } else if part == "M" {
                details.gender = Gender::Male;
            } else if part == "F" {
                details.gender = Gender::Female;
            } else if part == "shiny" {
                details.shiny = true;
            } else if let Some(tera) = part.strip_prefix("tera:") {
                details.tera_type = Some(tera.to_string());
            }
        }

        details
    }
}

/// HP and status condition (e.g., "100/100", "50/100 slp", "0 fnt")
#[derive(Debug, Clone, PartialEq)]
pub struct HpStatus {
    pub current: u32,
    /// Max HP (absent on "0 fnt" and on bare percentages)
    pub max: Option<u32>,
    /// Trailing status tag (slp, par, brn, psn, tox, frz, fnt)
    pub status: Option<String>,
}

impl HpStatus {
    /// Parse a condition string like "100/100", "50/100 slp", or "0 fnt".
    ///
    /// Trailing annotations such as "[from] item: Leftovers" are dropped first.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let cleaned = s.split('[').next().unwrap_or("").trim();
        if cleaned.is_empty() {
            return Err(ParseError::InvalidFormat(format!("empty condition: {s:?}")));
        }

        let (hp_part, status) = match cleaned.rsplit_once(' ') {
            Some((hp, tag)) if tag.chars().all(|c| c.is_ascii_alphabetic()) => {
                (hp.trim(), Some(tag.to_string()))
            }
            Some(_) => {
                return Err(ParseError::InvalidFormat(format!("bad condition: {s:?}")));
            }
            None => (cleaned, None),
        };

        let invalid = || ParseError::InvalidFormat(format!("bad condition: {s:?}"));
        if let Some((current_str, max_str)) = hp_part.split_once('/') {
            Ok(HpStatus {
                current: current_str.trim().parse().map_err(|_| invalid())?,
                max: Some(max_str.trim().parse().map_err(|_| invalid())?),
                status,
            })
        } else {
            Ok(HpStatus {
                current: hp_part.parse().map_err(|_| invalid())?,
                max: None,
                status,
            })
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.status.as_deref() == Some("fnt")
    }
}

/// Stat abbreviation used by boost messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    /// Generation 1 unified special
    Spc,
    Accuracy,
    Evasion,
}

impl Stat {
    pub const ALL: [Stat; 8] = [
        Stat::Atk,
        Stat::Def,
        Stat::Spa,
        Stat::Spd,
        Stat::Spe,
        Stat::Spc,
        Stat::Accuracy,
        Stat::Evasion,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "spc" => Some(Stat::Spc),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
            Stat::Spc => "spc",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasion",
        }
    }
}

/// Helper to require a minimum token count for a message kind
pub fn require(parts: &[&str], expected: usize) -> Result<(), ParseError> {
    if parts.len() < expected {
        return Err(ParseError::TooShort {
            kind: parts.get(1).unwrap_or(&"").to_string(),
            expected,
            got: parts.len(),
        });
    }
    Ok(())
}

/// Helper to parse a PokemonRef from message parts
pub fn parse_pokemon(parts: &[&str], index: usize) -> Result<PokemonRef, ParseError> {
    let raw = parts
        .get(index)
        .ok_or_else(|| ParseError::MissingField("pokemon".to_string()))?;
    PokemonRef::parse(raw)
        .ok_or_else(|| ParseError::InvalidFormat(format!("bad pokemon reference: {raw:?}")))
}

/// Helper to parse a Player from message parts
pub fn parse_player(parts: &[&str], index: usize) -> Result<Player, ParseError> {
    parts
        .get(index)
        .and_then(|s| Player::from_prefix(s))
        .ok_or_else(|| ParseError::MissingField("player".to_string()))
}

/// Helper to parse PokemonDetails from message parts
pub fn parse_details(parts: &[&str], index: usize) -> PokemonDetails {
    parts
        .get(index)
        .map(|s| PokemonDetails::parse(s))
        .unwrap_or_default()
}

/// Helper to fetch an owned text field, empty when absent
pub fn text(parts: &[&str], index: usize) -> String {
    parts.get(index).unwrap_or(&"").to_string()
}

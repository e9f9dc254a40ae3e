//! Pokemon types

use super::flags::FlagKey;

/// Pokemon types (18 types as of Gen 6+), declared in alphabetical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Bug,
    Dark,
    Dragon,
    Electric,
    Fairy,
    Fighting,
    Fire,
    Flying,
    Ghost,
    Grass,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Steel,
    Water,
}

impl Type {
    /// All 18 Pokemon types, alphabetically
    pub const ALL: [Type; 18] = [
        Type::Bug,
        Type::Dark,
        Type::Dragon,
        Type::Electric,
        Type::Fairy,
        Type::Fighting,
        Type::Fire,
        Type::Flying,
        Type::Ghost,
        Type::Grass,
        Type::Ground,
        Type::Ice,
        Type::Normal,
        Type::Poison,
        Type::Psychic,
        Type::Rock,
        Type::Steel,
        Type::Water,
    ];

    /// Parse from protocol string (case-insensitive)
    pub fn from_protocol(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bug" => Some(Type::Bug),
            "dark" => Some(Type::Dark),
            "dragon" => Some(Type::Dragon),
            "electric" => Some(Type::Electric),
            "fairy" => Some(Type::Fairy),
            "fighting" => Some(Type::Fighting),
            "fire" => Some(Type::Fire),
            "flying" => Some(Type::Flying),
            "ghost" => Some(Type::Ghost),
            "grass" => Some(Type::Grass),
            "ground" => Some(Type::Ground),
            "ice" => Some(Type::Ice),
            "normal" => Some(Type::Normal),
            "poison" => Some(Type::Poison),
            "psychic" => Some(Type::Psychic),
            "rock" => Some(Type::Rock),
            "steel" => Some(Type::Steel),
            "water" => Some(Type::Water),
            _ => None,
        }
    }

    /// Convert to the lowercase key used in snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Bug => "bug",
            Type::Dark => "dark",
            Type::Dragon => "dragon",
            Type::Electric => "electric",
            Type::Fairy => "fairy",
            Type::Fighting => "fighting",
            Type::Fire => "fire",
            Type::Flying => "flying",
            Type::Ghost => "ghost",
            Type::Grass => "grass",
            Type::Ground => "ground",
            Type::Ice => "ice",
            Type::Normal => "normal",
            Type::Poison => "poison",
            Type::Psychic => "psychic",
            Type::Rock => "rock",
            Type::Steel => "steel",
            Type::Water => "water",
        }
    }
}

impl FlagKey for Type {
    const ALL: &'static [Self] = &Type::ALL;

    fn key(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

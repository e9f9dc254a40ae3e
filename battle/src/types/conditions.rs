//! Field and side conditions

use super::flags::FlagKey;

/// Global weather; exactly one value is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weather {
    #[default]
    None,
    DesolateLand,
    Hail,
    PrimordialSea,
    RainDance,
    Sandstorm,
    SunnyDay,
    Snow,
    DeltaStream,
}

impl Weather {
    pub const ALL: [Weather; 9] = [
        Weather::None,
        Weather::DesolateLand,
        Weather::Hail,
        Weather::PrimordialSea,
        Weather::RainDance,
        Weather::Sandstorm,
        Weather::SunnyDay,
        Weather::Snow,
        Weather::DeltaStream,
    ];

    /// Parse from protocol string; unrecognized names clear the weather
    pub fn from_protocol(s: &str) -> Self {
        // Normalize: lowercase and remove spaces
        let normalized = s.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "desolateland" => Weather::DesolateLand,
            "hail" => Weather::Hail,
            "primordialsea" => Weather::PrimordialSea,
            "raindance" => Weather::RainDance,
            "sandstorm" => Weather::Sandstorm,
            "sunnyday" => Weather::SunnyDay,
            "snow" | "snowscape" => Weather::Snow,
            "deltastream" => Weather::DeltaStream,
            _ => Weather::None,
        }
    }

    /// Protocol name of the weather
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::None => "none",
            Weather::DesolateLand => "DesolateLand",
            Weather::Hail => "Hail",
            Weather::PrimordialSea => "PrimordialSea",
            Weather::RainDance => "RainDance",
            Weather::Sandstorm => "Sandstorm",
            Weather::SunnyDay => "SunnyDay",
            Weather::Snow => "Snow",
            Weather::DeltaStream => "DeltaStream",
        }
    }
}

impl FlagKey for Weather {
    const ALL: &'static [Self] = &Weather::ALL;

    fn key(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side conditions (hazards, screens, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideCondition {
    AuroraVeil,
    LightScreen,
    Reflect,
    Safeguard,
    Spikes,
    StealthRock,
    StickyWeb,
    Tailwind,
    ToxicSpikes,
}

impl SideCondition {
    pub const ALL: [SideCondition; 9] = [
        SideCondition::AuroraVeil,
        SideCondition::LightScreen,
        SideCondition::Reflect,
        SideCondition::Safeguard,
        SideCondition::Spikes,
        SideCondition::StealthRock,
        SideCondition::StickyWeb,
        SideCondition::Tailwind,
        SideCondition::ToxicSpikes,
    ];

    /// Parse from protocol string
    pub fn from_protocol(s: &str) -> Option<Self> {
        // Strip common prefixes
        let clean = s.strip_prefix("move: ").unwrap_or(s);

        // Normalize
        let normalized = clean.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "auroraveil" => Some(SideCondition::AuroraVeil),
            "lightscreen" => Some(SideCondition::LightScreen),
            "reflect" => Some(SideCondition::Reflect),
            "safeguard" => Some(SideCondition::Safeguard),
            "spikes" => Some(SideCondition::Spikes),
            "stealthrock" => Some(SideCondition::StealthRock),
            "stickyweb" => Some(SideCondition::StickyWeb),
            "tailwind" => Some(SideCondition::Tailwind),
            "toxicspikes" => Some(SideCondition::ToxicSpikes),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            SideCondition::AuroraVeil => "Aurora Veil",
            SideCondition::LightScreen => "Light Screen",
            SideCondition::Reflect => "Reflect",
            SideCondition::Safeguard => "Safeguard",
            SideCondition::Spikes => "Spikes",
            SideCondition::StealthRock => "Stealth Rock",
            SideCondition::StickyWeb => "Sticky Web",
            SideCondition::Tailwind => "Tailwind",
            SideCondition::ToxicSpikes => "Toxic Spikes",
        }
    }
}

impl FlagKey for SideCondition {
    const ALL: &'static [Self] = &SideCondition::ALL;

    fn key(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for SideCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

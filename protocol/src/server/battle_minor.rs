//! Minor battle action message parsers
//!
//! These are secondary effects in battle: damage, stat changes, status, etc.
//! In the official client, they're usually displayed in smaller font.

use super::BattleEvent;
use super::battle::{PokemonRef, Stat, parse_player, parse_pokemon, require, text};
use crate::ParseError;

/// Parse |-damage|POKEMON|HP STATUS
pub fn parse_damage(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::Damage {
        pokemon: parse_pokemon(parts, 2)?,
        condition: text(parts, 3),
    })
}

/// Parse |-heal|POKEMON|HP STATUS
pub fn parse_heal(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::Heal {
        pokemon: parse_pokemon(parts, 2)?,
        condition: text(parts, 3),
    })
}

/// Parse |-sethp|POKEMON|HP
pub fn parse_sethp(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::SetHp {
        pokemon: parse_pokemon(parts, 2)?,
        condition: text(parts, 3),
    })
}

/// Parse |-status|POKEMON|STATUS
pub fn parse_status(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::Status {
        pokemon: parse_pokemon(parts, 2)?,
        status: text(parts, 3),
    })
}

/// Parse |-curestatus|POKEMON|STATUS
pub fn parse_curestatus(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::CureStatus {
        pokemon: parse_pokemon(parts, 2)?,
        status: text(parts, 3),
    })
}

/// Parse |-cureteam|POKEMON
pub fn parse_cureteam(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::CureTeam(parse_pokemon(parts, 2)?))
}

fn stat_and_amount(parts: &[&str]) -> Result<(PokemonRef, Stat, i32), ParseError> {
    require(parts, 5)?;
    let pokemon = parse_pokemon(parts, 2)?;
    let stat = Stat::parse(parts[3])
        .ok_or_else(|| ParseError::InvalidFormat(format!("unknown stat: {:?}", parts[3])))?;
    let amount = parts[4]
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("bad boost amount: {:?}", parts[4])))?;
    Ok((pokemon, stat, amount))
}

/// Parse |-boost|POKEMON|STAT|AMOUNT
pub fn parse_boost(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    let (pokemon, stat, amount) = stat_and_amount(parts)?;
    Ok(BattleEvent::Boost {
        pokemon,
        stat,
        amount,
    })
}

/// Parse |-unboost|POKEMON|STAT|AMOUNT
pub fn parse_unboost(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    let (pokemon, stat, amount) = stat_and_amount(parts)?;
    Ok(BattleEvent::Unboost {
        pokemon,
        stat,
        amount,
    })
}

/// Parse |-setboost|POKEMON|STAT|AMOUNT
pub fn parse_setboost(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    let (pokemon, stat, amount) = stat_and_amount(parts)?;
    Ok(BattleEvent::SetBoost {
        pokemon,
        stat,
        amount,
    })
}

/// Parse |-clearboost|POKEMON
pub fn parse_clearboost(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::ClearBoost(parse_pokemon(parts, 2)?))
}

/// Parse |-clearpositiveboost|TARGET|POKEMON|EFFECT
pub fn parse_clearpositiveboost(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::ClearPositiveBoost(parse_pokemon(parts, 2)?))
}

/// Parse |-clearnegativeboost|POKEMON
pub fn parse_clearnegativeboost(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::ClearNegativeBoost(parse_pokemon(parts, 2)?))
}

/// Parse |-invertboost|POKEMON
pub fn parse_invertboost(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::InvertBoost(parse_pokemon(parts, 2)?))
}

/// Parse |-copyboost|SOURCE|TARGET
pub fn parse_copyboost(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::CopyBoost {
        source: parse_pokemon(parts, 2)?,
        target: parse_pokemon(parts, 3)?,
    })
}

/// Parse |-weather|WEATHER with optional [upkeep]
pub fn parse_weather(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::Weather {
        weather: text(parts, 2),
        upkeep: parts.iter().skip(3).any(|p| *p == "[upkeep]"),
    })
}

/// Parse |-sidestart|SIDE|CONDITION
pub fn parse_sidestart(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::SideStart {
        side: parse_player(parts, 2)?,
        condition: text(parts, 3),
    })
}

/// Parse |-sideend|SIDE|CONDITION
pub fn parse_sideend(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::SideEnd {
        side: parse_player(parts, 2)?,
        condition: text(parts, 3),
    })
}

/// Parse |-start|POKEMON|EFFECT|DETAIL
///
/// DETAIL carries e.g. the new type for "typechange" or the move for "Disable".
pub fn parse_start(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::VolatileStart {
        pokemon: parse_pokemon(parts, 2)?,
        effect: text(parts, 3),
        detail: parts
            .get(4)
            .filter(|s| !s.is_empty() && !s.starts_with('['))
            .map(|s| s.to_string()),
    })
}

/// Parse |-end|POKEMON|EFFECT
pub fn parse_end(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::VolatileEnd {
        pokemon: parse_pokemon(parts, 2)?,
        effect: text(parts, 3),
    })
}

/// Parse |-ability|POKEMON|ABILITY
pub fn parse_ability(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::Ability {
        pokemon: parse_pokemon(parts, 2)?,
        ability: text(parts, 3),
    })
}

/// Parse |-item|POKEMON|ITEM
pub fn parse_item(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::Item {
        pokemon: parse_pokemon(parts, 2)?,
        item: text(parts, 3),
    })
}

/// Parse |-enditem|POKEMON|ITEM
pub fn parse_enditem(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::EndItem {
        pokemon: parse_pokemon(parts, 2)?,
        item: text(parts, 3),
    })
}

/// Parse |-mega|POKEMON|SPECIES|MEGASTONE
pub fn parse_mega(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::Mega {
        pokemon: parse_pokemon(parts, 2)?,
        megastone: parts.get(4).or(parts.get(3)).map(|s| s.to_string()),
    })
}

/// Parse |-primal|POKEMON
pub fn parse_primal(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::Primal(parse_pokemon(parts, 2)?))
}

/// Parse |-transform|POKEMON|SPECIES
pub fn parse_transform(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::Transform {
        pokemon: parse_pokemon(parts, 2)?,
        into: parts.get(3).and_then(|s| PokemonRef::parse(s)),
    })
}

/// Parse |-terastallize|POKEMON|TYPE
pub fn parse_terastallize(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::Terastallize {
        pokemon: parse_pokemon(parts, 2)?,
        tera_type: text(parts, 3),
    })
}

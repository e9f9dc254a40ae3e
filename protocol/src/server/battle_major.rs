//! Major battle action message parsers
//!
//! These are the primary actions in battle: moves, switches, faints, etc.

use super::BattleEvent;
use super::battle::{PokemonRef, parse_details, parse_pokemon, require, text};
use crate::ParseError;

/// Parse |move|POKEMON|MOVE|TARGET with optional tags
pub fn parse_move(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    let pokemon = parse_pokemon(parts, 2)?;
    let move_name = text(parts, 3);
    if move_name.trim().is_empty() {
        return Err(ParseError::MissingField("move name".to_string()));
    }
    let target = parts.get(4).and_then(|s| PokemonRef::parse(s));

    Ok(BattleEvent::Move {
        pokemon,
        move_name,
        target,
    })
}

/// Parse |switch|POKEMON|DETAILS|HP STATUS
pub fn parse_switch(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 5)?;
    Ok(BattleEvent::Switch {
        pokemon: parse_pokemon(parts, 2)?,
        details: parse_details(parts, 3),
        condition: text(parts, 4),
    })
}

/// Parse |drag|POKEMON|DETAILS|HP STATUS
pub fn parse_drag(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 5)?;
    Ok(BattleEvent::Drag {
        pokemon: parse_pokemon(parts, 2)?,
        details: parse_details(parts, 3),
        condition: text(parts, 4),
    })
}

/// Parse |detailschange|POKEMON|DETAILS|HP STATUS
pub fn parse_detailschange(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::DetailsChange {
        pokemon: parse_pokemon(parts, 2)?,
        details: parse_details(parts, 3),
        condition: parts.get(4).map(|s| s.to_string()),
    })
}

/// Parse |-formechange|POKEMON|SPECIES|HP STATUS
pub fn parse_formechange(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    Ok(BattleEvent::FormeChange {
        pokemon: parse_pokemon(parts, 2)?,
        species: text(parts, 3),
        condition: parts
            .get(4)
            .filter(|s| !s.starts_with('['))
            .map(|s| s.to_string()),
    })
}

/// Parse |faint|POKEMON
pub fn parse_faint(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::Faint(parse_pokemon(parts, 2)?))
}

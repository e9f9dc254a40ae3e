//! Battle initialization message parsers
//!
//! These messages are sent at the start of a battle to set up the game state.

use super::BattleEvent;
use super::battle::{parse_player as player_at, require, text};
use crate::ParseError;

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
///
/// The server also sends a bare `|player|p1|` when a player leaves; the
/// username is then empty.
pub fn parse_player(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    let player = player_at(parts, 2)?;

    Ok(BattleEvent::Player {
        player,
        username: text(parts, 3),
    })
}

/// Parse |teamsize|PLAYER|NUMBER
pub fn parse_teamsize(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 4)?;
    let player = player_at(parts, 2)?;
    let size = parts[3]
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("bad team size: {:?}", parts[3])))?;

    Ok(BattleEvent::TeamSize { player, size })
}

/// Parse |gametype|GAMETYPE
pub fn parse_gametype(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::GameType(text(parts, 2)))
}

/// Parse |gen|GENNUM
pub fn parse_gen(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    let generation = parts[2]
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("bad generation: {:?}", parts[2])))?;

    Ok(BattleEvent::Gen(generation))
}

/// Parse |tier|FORMATNAME
pub fn parse_tier(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::Tier(text(parts, 2)))
}

//! Battle progress message parsers
//!
//! These messages track the flow and outcome of a battle.

use super::BattleEvent;
use super::battle::{require, text};
use crate::ParseError;

/// Parse |request|REQUEST (JSON)
///
/// The payload is handed on undecoded; request ingestion owns the schema.
pub fn parse_request(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::Request(parts[2..].join("|")))
}

/// Parse |turn|NUMBER
pub fn parse_turn(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    let turn = parts[2]
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("bad turn number: {:?}", parts[2])))?;

    Ok(BattleEvent::Turn(turn))
}

/// Parse |win|USER
pub fn parse_win(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 3)?;
    Ok(BattleEvent::Win(text(parts, 2)))
}

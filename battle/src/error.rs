//! Recoverable problems reported by the state engine

use duelist_protocol::{ParseError, Player};
use thiserror::Error;

/// Why a single event could not be applied in full.
///
/// Every variant is recoverable: the event is dropped or partially applied
/// and the stream continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventWarning {
    #[error("malformed event: {0}")]
    Malformed(#[from] ParseError),

    #[error("unreadable condition {condition:?} for {key}")]
    BadCondition { key: String, condition: String },

    #[error("{key} already knows four moves, ignoring {move_id}")]
    CapacityExceeded { key: String, move_id: String },

    #[error("role already assigned as {assigned:?}, ignoring {announced:?}")]
    RoleConflict { assigned: Player, announced: Player },

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Why a request payload could not be ingested
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("invalid request JSON: {0}")]
    InvalidJson(String),

    #[error("request is for {got:?} but this match is tracked as {expected:?}")]
    SideMismatch { expected: Player, got: Player },
}

use thiserror::Error;

pub mod client;
pub mod server;

pub use client::{Choice, ClientCommand, ClientMessage};
pub use server::{
    ActivePokemon, BattleEvent, BattleRequest, Gender, HpStatus, MoveSlot, Player, PokemonDetails,
    PokemonRef, ServerFrame, SideInfo, SidePokemon, SidePokemonStats, Stat, parse_battle_event,
    parse_battle_line, parse_server_frame, split_line, to_id,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Message |{kind}| needs {expected} fields, got {got}")]
    TooShort {
        kind: String,
        expected: usize,
        got: usize,
    },

    #[error("Empty message")]
    EmptyMessage,
}

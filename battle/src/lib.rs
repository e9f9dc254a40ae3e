//! Match state tracking and domain types for Pokemon Showdown singles.
//!
//! This crate turns the server's event stream and request payloads into a
//! per-match model that a decision policy can query.
//!
//! # Overview
//!
//! `duelist-battle` sits between `duelist-protocol` (wire format) and the
//! agent runtime:
//!
//! ```text
//! duelist-protocol (wire format)
//!        │
//!        ▼
//! duelist-battle (domain types + tracking) ← THIS CRATE
//!        │
//!        └─> duelist-agent (routing frames, choosing actions)
//! ```
//!
//! # Main Types
//!
//! ## Reference Data
//! - [`Dex`] - Move and species catalogs, shared behind an `Arc`
//!
//! ## Domain Types
//! - [`Combatant`] - One combatant and everything revealed about it
//! - [`MoveInstance`] - A known move with its own PP and power override
//! - [`Roster`] - One side's combatants, keyed by name
//! - [`Status`], [`Volatiles`] - Status conditions and volatile flags
//! - [`StatStages`] - Stat stage counters
//! - [`Weather`], [`SideCondition`] - Field conditions
//!
//! ## State Tracking
//! - [`MatchState`] - Main entry point: feed it lines, query the result
//! - [`MatchSnapshot`] - Fixed-shape view for feature extraction
//!
//! # Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use duelist_battle::{Dex, MatchState};
//!
//! let dex = Arc::new(Dex::builtin()?);
//! let mut state = MatchState::new("battle-gen7ou-1", "bot_a", dex);
//!
//! for line in frame.lines() {
//!     if let Err(e) = state.apply_line(line) {
//!         tracing::warn!(error = %e, "Skipping line");
//!     }
//! }
//!
//! if state.is_ready() {
//!     let first = &state.legal_moves()[0];
//!     println!("move {}", first.index);
//! }
//! ```

pub mod dex;
pub mod error;
pub mod tracking;
pub mod types;

// Re-export main types at crate root for convenience
pub use dex::{Dex, DexError};
pub use error::{EventWarning, RequestError};
pub use tracking::{
    BENCH_SLOTS, CombatantSnapshot, LegalMove, LegalSwitch, MatchSnapshot, MatchState,
    MoveSnapshot,
};
pub use types::{
    BaseStats, Combatant, FieldState, Flags, LearnOutcome, MAX_MOVES, MoveInstance, Roster,
    SecondaryChances, SideCondition, StatStages, Stats, Status, Type, Volatiles, Weather,
};

// Re-export commonly used protocol types
pub use duelist_protocol::{Player, Stat};

//! Match state tracking from server messages

mod battle;
mod request;
mod snapshot;
mod updater;

pub use battle::MatchState;
pub use request::{LegalMove, LegalSwitch};
pub use snapshot::{BENCH_SLOTS, CombatantSnapshot, MatchSnapshot, MoveSnapshot};

//! Domain types for match state tracking

mod conditions;
mod field;
mod flags;
mod moves;
mod pokemon;
mod pokemon_type;
mod side;
mod stats;
mod status;

pub use conditions::{SideCondition, Weather};
pub use field::{FieldState, SideConditions};
pub use flags::{FlagKey, Flags};
pub use moves::{LearnOutcome, MAX_MOVES, MoveEffects, MoveInstance, SecondaryChances};
pub use pokemon::{Combatant, normalize_move_id};
pub use pokemon_type::Type;
pub use side::Roster;
pub use stats::{BaseStats, StatStages, Stats};
pub use status::{Status, StatusSet, Volatile, Volatiles};

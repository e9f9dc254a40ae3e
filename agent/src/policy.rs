//! Decision makers: turn a ready match into a `/choose` choice

use duelist_battle::MatchState;
use duelist_protocol::Choice;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Picks one action for a match whose readiness predicate holds.
///
/// Returning `None` sends nothing for this request.
pub trait DecisionMaker: Send {
    fn decide(&mut self, state: &MatchState) -> Option<Choice>;
}

/// Always the first legal move, or the first legal switch when no move is
/// allowed (or a switch is forced)
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegalPolicy;

impl DecisionMaker for FirstLegalPolicy {
    fn decide(&mut self, state: &MatchState) -> Option<Choice> {
        let first_switch = || {
            state
                .legal_switches()
                .first()
                .map(|s| Choice::Switch { slot: s.slot })
        };

        if state.is_force_switch() {
            return first_switch();
        }
        state
            .legal_moves()
            .first()
            .map(|m| Choice::move_slot(m.slot))
            .or_else(first_switch)
    }
}

/// Uniformly random legal move; switches only when forced or out of moves
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible choices
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick_switch(&mut self, state: &MatchState) -> Option<Choice> {
        state
            .legal_switches()
            .choose(&mut self.rng)
            .map(|s| Choice::Switch { slot: s.slot })
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionMaker for RandomPolicy {
    fn decide(&mut self, state: &MatchState) -> Option<Choice> {
        if state.is_force_switch() {
            return self.pick_switch(state);
        }
        match state.legal_moves().choose(&mut self.rng) {
            Some(m) => Some(Choice::move_slot(m.slot)),
            None => self.pick_switch(state),
        }
    }
}

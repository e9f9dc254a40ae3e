//! MatchState - the state of one match from one participant's perspective

use std::sync::Arc;

use duelist_protocol::{Player, PokemonRef, to_id};

use super::request::{LegalMove, LegalSwitch};
use crate::dex::Dex;
use crate::error::EventWarning;
use crate::types::{Combatant, FieldState, Roster, SideConditions, Type, Weather};

/// A match being tracked from server messages.
///
/// The state is reconstructed from the event stream and the request payloads
/// the server sends the local participant. It keeps the full own roster and
/// whatever the protocol has revealed about the opponent's.
#[derive(Debug, Clone)]
pub struct MatchState {
    // === Identity ===
    tag: String,
    name: String,
    dex: Arc<Dex>,
    role: Option<Player>,

    // === Metadata ===
    pub(crate) game_type: Option<String>,
    pub(crate) generation: Option<u8>,
    pub(crate) tier: Option<String>,
    /// Turn announced by |turn|
    pub(crate) server_turn: u32,
    /// Request-driven turn counter
    pub(crate) turn: u32,

    // === State ===
    pub(crate) field: FieldState,
    pub(crate) own: Roster,
    pub(crate) opponent: Roster,

    // === Outcome ===
    pub(crate) ended: bool,
    pub(crate) winner: Option<String>,
    pub(crate) tie: bool,

    // === Latest request ===
    pub(crate) legal_moves: Vec<LegalMove>,
    pub(crate) legal_switches: Vec<LegalSwitch>,
    pub(crate) wait: bool,
    pub(crate) trapped: bool,
    pub(crate) force_switch: bool,
    pub(crate) can_mega_evo: bool,
    pub(crate) can_z_move: bool,
    pub(crate) can_terastallize: Option<Type>,
}

impl MatchState {
    /// Track a new match for the participant called `name`
    pub fn new(tag: impl Into<String>, name: impl Into<String>, dex: Arc<Dex>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            dex,
            role: None,
            game_type: None,
            generation: None,
            tier: None,
            server_turn: 0,
            turn: 0,
            field: FieldState::new(),
            own: Roster::new(),
            opponent: Roster::new(),
            ended: false,
            winner: None,
            tie: false,
            legal_moves: Vec::new(),
            legal_switches: Vec::new(),
            wait: false,
            trapped: false,
            force_switch: false,
            can_mega_evo: false,
            can_z_move: false,
            can_terastallize: None,
        }
    }

    // === Identity ===

    /// Match identifier (the room id)
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The local participant's name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dex(&self) -> &Arc<Dex> {
        &self.dex
    }

    /// Which side the local participant plays, once known
    pub fn role(&self) -> Option<Player> {
        self.role
    }

    /// Assign the role. It never changes once set.
    pub(crate) fn assign_role(&mut self, player: Player) -> Result<(), EventWarning> {
        match self.role {
            None => {
                self.role = Some(player);
                Ok(())
            }
            Some(assigned) if assigned == player => Ok(()),
            Some(assigned) => Err(EventWarning::RoleConflict {
                assigned,
                announced: player,
            }),
        }
    }

    /// Whether a player tag belongs to the own roster.
    ///
    /// Before the role is known every reference counts as own.
    pub(crate) fn is_own(&self, player: Option<Player>) -> bool {
        match (self.role, player) {
            (None, _) => true,
            (Some(role), Some(player)) => role == player,
            (Some(_), None) => false,
        }
    }

    pub(crate) fn roster_mut(&mut self, player: Option<Player>) -> &mut Roster {
        if self.is_own(player) {
            &mut self.own
        } else {
            &mut self.opponent
        }
    }

    /// The combatant a reference names, created on first sight
    pub(crate) fn combatant_mut(&mut self, pokemon: &PokemonRef) -> &mut Combatant {
        self.roster_mut(pokemon.player).get_or_insert(pokemon)
    }

    // === Metadata ===

    pub fn game_type(&self) -> Option<&str> {
        self.game_type.as_deref()
    }

    pub fn generation(&self) -> Option<u8> {
        self.generation
    }

    pub fn tier(&self) -> Option<&str> {
        self.tier.as_deref()
    }

    /// Request-driven turn counter; one per ingested request
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Turn number the server last announced
    pub fn server_turn(&self) -> u32 {
        self.server_turn
    }

    /// Request sequence number as seen by the server
    pub fn turn_sent(&self) -> u32 {
        self.turn * 2 + u32::from(self.role == Some(Player::P2))
    }

    // === Rosters ===

    pub fn own_roster(&self) -> &Roster {
        &self.own
    }

    pub fn opponent_roster(&self) -> &Roster {
        &self.opponent
    }

    /// The local participant's active combatant
    pub fn active(&self) -> Option<&Combatant> {
        self.own.active()
    }

    pub fn opponent_active(&self) -> Option<&Combatant> {
        self.opponent.active()
    }

    // === Field ===

    pub fn weather(&self) -> Weather {
        self.field.weather
    }

    pub fn field(&self) -> &FieldState {
        &self.field
    }

    /// Conditions on the own side (p2's side while the role is unknown)
    pub fn own_side_conditions(&self) -> SideConditions {
        self.field.side(self.own_side())
    }

    pub fn opponent_side_conditions(&self) -> SideConditions {
        self.field.side(self.own_side().opponent())
    }

    fn own_side(&self) -> Player {
        match self.role {
            Some(Player::P1) => Player::P1,
            _ => Player::P2,
        }
    }

    // === Outcome ===

    /// Whether the match has ended (win or tie)
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn is_tie(&self) -> bool {
        self.tie
    }

    /// Whether the local participant won
    pub fn won(&self) -> bool {
        self.ended
            && self
                .winner
                .as_deref()
                .is_some_and(|winner| to_id(winner) == to_id(&self.name))
    }

    // === Legal actions ===

    /// Moves the latest request allows, 1-indexed
    pub fn legal_moves(&self) -> &[LegalMove] {
        &self.legal_moves
    }

    /// Switches the latest request allows, 1-indexed
    pub fn legal_switches(&self) -> &[LegalSwitch] {
        &self.legal_switches
    }

    /// Whether the server told us to wait
    pub fn is_waiting(&self) -> bool {
        self.wait
    }

    pub fn is_trapped(&self) -> bool {
        self.trapped
    }

    pub fn is_force_switch(&self) -> bool {
        self.force_switch
    }

    pub fn can_mega_evo(&self) -> bool {
        self.can_mega_evo
    }

    pub fn can_z_move(&self) -> bool {
        self.can_z_move
    }

    /// Tera type on offer, if terastallizing is allowed this turn
    pub fn can_terastallize(&self) -> Option<Type> {
        self.can_terastallize
    }

    /// Whether a decision can be made now
    pub fn is_ready(&self) -> bool {
        self.role.is_some()
            && self.active().is_some()
            && !(self.legal_moves.is_empty() && self.legal_switches.is_empty())
            && !self.wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SideCondition;

    fn new_match() -> MatchState {
        MatchState::new("battle-gen9randombattle-1", "bot_b", Arc::new(Dex::default()))
    }

    #[test]
    fn test_new_match() {
        let state = new_match();
        assert_eq!(state.tag(), "battle-gen9randombattle-1");
        assert_eq!(state.turn(), 0);
        assert!(state.role().is_none());
        assert!(!state.is_ended());
        assert!(!state.is_ready());
        assert!(state.active().is_none());
    }

    #[test]
    fn test_role_is_assigned_once() {
        let mut state = new_match();
        state.assign_role(Player::P2).unwrap();
        state.assign_role(Player::P2).unwrap();

        let err = state.assign_role(Player::P1).unwrap_err();
        assert!(matches!(err, EventWarning::RoleConflict { .. }));
        assert_eq!(state.role(), Some(Player::P2));
    }

    #[test]
    fn test_routing_before_and_after_role() {
        let mut state = new_match();
        assert!(state.is_own(Some(Player::P1)));
        assert!(state.is_own(Some(Player::P2)));

        state.assign_role(Player::P2).unwrap();
        assert!(!state.is_own(Some(Player::P1)));
        assert!(state.is_own(Some(Player::P2)));
        assert!(!state.is_own(None));
    }

    #[test]
    fn test_turn_sent() {
        let mut state = new_match();
        state.turn = 3;
        assert_eq!(state.turn_sent(), 6);

        state.assign_role(Player::P2).unwrap();
        assert_eq!(state.turn_sent(), 7);
    }

    #[test]
    fn test_won() {
        let mut state = new_match();
        state.ended = true;
        state.winner = Some("Bot_B".to_string());
        assert!(state.won());

        state.winner = Some("someone else".to_string());
        assert!(!state.won());
    }

    #[test]
    fn test_side_conditions_follow_role() {
        let mut state = new_match();
        state.apply_line("|-sidestart|p2: bot_b|Reflect").unwrap();
        state.apply_line("|-sidestart|p1: rival|Spikes").unwrap();
        assert!(state.own_side_conditions().contains(SideCondition::Reflect));
        assert!(state.opponent_side_conditions().contains(SideCondition::Spikes));

        state.apply_line("|player|p1|bot_b|").unwrap();
        assert!(state.own_side_conditions().contains(SideCondition::Spikes));
        assert!(state.opponent_side_conditions().contains(SideCondition::Reflect));
    }
}

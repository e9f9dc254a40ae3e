//! Request ingestion: rebuilds the legal actions from a |request| payload

use std::sync::Arc;

use duelist_protocol::{BattleRequest, PokemonRef, SideInfo};

use super::battle::MatchState;
use crate::error::{EventWarning, RequestError};
use crate::types::{LearnOutcome, Type, normalize_move_id};

/// A move the latest request allows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMove {
    /// 1-based position in the legal-move list
    pub index: usize,
    /// 1-based move slot the server expects in `/choose move`
    pub slot: usize,
    pub id: String,
    pub name: String,
    pub pp: Option<u32>,
    pub max_pp: Option<u32>,
    pub base_power: u32,
    pub target: Option<String>,
}

/// A switch the latest request allows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalSwitch {
    /// 1-based position in the legal-switch list
    pub index: usize,
    /// 1-based team position the server expects in `/choose switch`
    pub slot: usize,
    /// Roster key of the combatant
    pub key: String,
}

impl MatchState {
    /// Ingest a request payload given as JSON text.
    ///
    /// Unreadable JSON leaves no legal actions behind. An empty payload (sent
    /// when the match is over) changes nothing.
    pub fn apply_request_json(&mut self, json: &str) -> Result<(), RequestError> {
        if json.trim().is_empty() {
            return Ok(());
        }
        match BattleRequest::from_json(json) {
            Ok(request) => self.apply_request(&request),
            Err(e) => {
                self.clear_request_state();
                Err(RequestError::InvalidJson(e.to_string()))
            }
        }
    }

    /// Ingest a decoded request payload.
    ///
    /// The legal actions are rebuilt from scratch and the request-driven turn
    /// counter advances by one. A request for the other side is refused
    /// before anything changes.
    pub fn apply_request(&mut self, request: &BattleRequest) -> Result<(), RequestError> {
        if let Some(got) = request.side.as_ref().and_then(SideInfo::player)
            && let Err(EventWarning::RoleConflict { assigned, announced }) = self.assign_role(got)
        {
            return Err(RequestError::SideMismatch {
                expected: assigned,
                got: announced,
            });
        }

        self.wait = request.wait;
        self.clear_request_state();

        let active = request.first_active();
        self.trapped = active.is_some_and(|a| a.trapped);

        let dex = Arc::clone(self.dex());
        let tag = self.tag().to_string();

        if let Some(side) = &request.side {
            if side.pokemon.iter().any(|p| p.active) {
                self.own.clear_active();
            }

            for (i, entry) in side.pokemon.iter().enumerate() {
                let Some(reference) = PokemonRef::parse(&entry.ident) else {
                    tracing::warn!(
                        match_id = %tag,
                        ident = %entry.ident,
                        "Skipping request entry with bad ident"
                    );
                    continue;
                };

                let poke = self.own.get_or_insert(&reference);
                if let Err(e) = poke.apply_request_entry(entry, &dex) {
                    tracing::warn!(
                        match_id = %tag,
                        key = %poke.key,
                        error = %e,
                        "Unreadable condition in request"
                    );
                }

                if poke.can_switch_in() && !self.trapped {
                    self.legal_switches.push(LegalSwitch {
                        index: self.legal_switches.len() + 1,
                        slot: i + 1,
                        key: poke.key.clone(),
                    });
                }
            }
        }

        if let Some(active) = active {
            let mut own_active = self.own.active_mut();

            for (i, slot) in active.moves.iter().enumerate() {
                let mut base_power = slot.base_power;

                if let Some(poke) = own_active.as_deref_mut() {
                    if poke.learn_move(&slot.id, &dex) == LearnOutcome::CapacityExceeded {
                        tracing::warn!(
                            match_id = %tag,
                            key = %poke.key,
                            move_id = %slot.id,
                            "Request lists a fifth move"
                        );
                    }
                    if let Some(id) = normalize_move_id(&slot.id, &dex)
                        && let Some(instance) = poke.move_instance_mut(&id)
                    {
                        instance.refresh(slot);
                        base_power = base_power.or(Some(instance.base_power()));
                    }
                }

                if slot.disabled {
                    continue;
                }

                let base_power = base_power
                    .or_else(|| dex.move_data(&slot.id).map(|data| data.base_power))
                    .unwrap_or(0);

                self.legal_moves.push(LegalMove {
                    index: self.legal_moves.len() + 1,
                    slot: i + 1,
                    id: slot.id.clone(),
                    name: slot.name.clone().unwrap_or_else(|| slot.id.clone()),
                    pp: slot.pp,
                    max_pp: slot.max_pp,
                    base_power,
                    target: slot.target.clone(),
                });
            }

            self.can_mega_evo = active.can_mega_evo;
            self.can_z_move = active.has_z_move();
            self.can_terastallize = active
                .can_terastallize
                .as_deref()
                .and_then(Type::from_protocol);
        }

        self.force_switch = request.is_force_switch();
        self.turn += 1;

        tracing::debug!(
            match_id = %tag,
            turn = self.turn,
            moves = self.legal_moves.len(),
            switches = self.legal_switches.len(),
            wait = self.wait,
            "Request ingested"
        );
        Ok(())
    }

    fn clear_request_state(&mut self) {
        self.legal_moves.clear();
        self.legal_switches.clear();
        self.trapped = false;
        self.force_switch = false;
        self.can_mega_evo = false;
        self.can_z_move = false;
        self.can_terastallize = None;
    }
}

//! Event dispatcher: applies protocol lines to a MatchState

use std::sync::Arc;

use duelist_protocol::{
    BattleEvent, PokemonDetails, PokemonRef, parse_battle_event, split_line, to_id,
};

use super::battle::MatchState;
use crate::error::EventWarning;
use crate::types::{LearnOutcome, Type};

impl MatchState {
    /// Apply one raw protocol line.
    ///
    /// Blank lines and plain text lines (no leading `|`) carry no state.
    pub fn apply_line(&mut self, line: &str) -> Result<(), EventWarning> {
        if line.trim().is_empty() || !line.starts_with('|') {
            return Ok(());
        }
        self.apply_event(&split_line(line))
    }

    /// Apply one pre-split protocol line.
    ///
    /// Problems are logged and returned; state already applied by earlier
    /// events is never rolled back.
    pub fn apply_event(&mut self, parts: &[&str]) -> Result<(), EventWarning> {
        let kind = parts.get(1).copied().unwrap_or("");
        let result = match parse_battle_event(parts) {
            Ok(event) => self.apply(&event),
            Err(e) => Err(e.into()),
        };

        if let Err(e) = &result {
            tracing::warn!(
                match_id = %self.tag(),
                kind,
                line = %parts.join("|"),
                error = %e,
                "Event not fully applied"
            );
        }
        result
    }

    /// Apply a parsed event
    pub fn apply(&mut self, event: &BattleEvent) -> Result<(), EventWarning> {
        match event {
            // === Initialization ===
            BattleEvent::Player { player, username } => {
                if to_id(username) == to_id(self.name()) {
                    self.assign_role(*player)?;
                }
            }

            BattleEvent::TeamSize { player, size } => {
                self.roster_mut(Some(*player)).team_size = Some(*size);
            }

            BattleEvent::GameType(game_type) => {
                self.game_type = Some(game_type.clone());
            }

            BattleEvent::Gen(generation) => {
                self.generation = Some(*generation);
            }

            BattleEvent::Tier(tier) => {
                self.tier = Some(tier.clone());
            }

            // === Progress ===
            BattleEvent::Turn(turn) => {
                self.server_turn = *turn;
            }

            BattleEvent::Win(winner) => {
                self.ended = true;
                self.winner = Some(winner.clone());
            }

            BattleEvent::Tie => {
                self.ended = true;
                self.tie = true;
            }

            BattleEvent::Request(json) => {
                self.apply_request_json(json)?;
            }

            // === Major actions ===
            BattleEvent::Switch {
                pokemon,
                details,
                condition,
            }
            | BattleEvent::Drag {
                pokemon,
                details,
                condition,
            } => {
                self.handle_switch(pokemon, details, condition)?;
            }

            BattleEvent::DetailsChange {
                pokemon,
                details,
                condition,
            } => {
                let dex = Arc::clone(self.dex());
                self.combatant_mut(pokemon).apply_details(details, &dex);
                if let Some(condition) = condition {
                    self.handle_condition(pokemon, condition)?;
                }
            }

            BattleEvent::FormeChange {
                pokemon,
                species,
                condition,
            } => {
                let dex = Arc::clone(self.dex());
                self.combatant_mut(pokemon).set_species(species, &dex);
                if let Some(condition) = condition {
                    self.handle_condition(pokemon, condition)?;
                }
            }

            BattleEvent::Move {
                pokemon,
                move_name,
                target,
            } => {
                self.handle_move(pokemon, move_name, target.as_ref())?;
            }

            BattleEvent::Faint(pokemon) => {
                self.combatant_mut(pokemon).faint();
            }

            // === HP ===
            BattleEvent::Damage { pokemon, condition }
            | BattleEvent::Heal { pokemon, condition }
            | BattleEvent::SetHp { pokemon, condition } => {
                self.handle_condition(pokemon, condition)?;
            }

            // === Status ===
            BattleEvent::Status { pokemon, status } => {
                self.combatant_mut(pokemon).set_status(status);
            }

            BattleEvent::CureStatus { pokemon, status } => {
                self.combatant_mut(pokemon).cure_status(status);
            }

            BattleEvent::CureTeam(pokemon) => {
                for poke in self.roster_mut(pokemon.player).iter_mut() {
                    poke.cure_all();
                }
            }

            // === Boosts ===
            BattleEvent::Boost {
                pokemon,
                stat,
                amount,
            } => {
                self.combatant_mut(pokemon).boosts.boost(*stat, *amount);
            }

            BattleEvent::Unboost {
                pokemon,
                stat,
                amount,
            } => {
                self.combatant_mut(pokemon).boosts.unboost(*stat, *amount);
            }

            BattleEvent::SetBoost {
                pokemon,
                stat,
                amount,
            } => {
                self.combatant_mut(pokemon).boosts.set(*stat, *amount);
            }

            BattleEvent::ClearBoost(pokemon) => {
                self.combatant_mut(pokemon).boosts.clear();
            }

            BattleEvent::ClearAllBoost => {
                for poke in self.own.iter_mut().chain(self.opponent.iter_mut()) {
                    poke.boosts.clear();
                }
            }

            BattleEvent::ClearPositiveBoost(pokemon) => {
                self.combatant_mut(pokemon).boosts.clear_positive();
            }

            BattleEvent::ClearNegativeBoost(pokemon) => {
                self.combatant_mut(pokemon).boosts.clear_negative();
            }

            BattleEvent::InvertBoost(pokemon) => {
                self.combatant_mut(pokemon).boosts.invert();
            }

            // The source takes on the target's stages
            BattleEvent::CopyBoost { source, target } => {
                let boosts = self.combatant_mut(target).boosts;
                self.combatant_mut(source).boosts.copy_from(&boosts);
            }

            // === Field ===
            BattleEvent::Weather { weather, upkeep } => {
                self.field.apply_weather(weather, *upkeep);
            }

            BattleEvent::SideStart { side, condition } => {
                if !self.field.apply_side_start(*side, condition) {
                    tracing::debug!(
                        match_id = %self.tag(),
                        condition = %condition,
                        "Untracked side condition"
                    );
                }
            }

            BattleEvent::SideEnd { side, condition } => {
                self.field.apply_side_end(*side, condition);
            }

            // === Volatiles ===
            BattleEvent::VolatileStart {
                pokemon,
                effect,
                detail,
            } => {
                if !self
                    .combatant_mut(pokemon)
                    .start_volatile(effect, detail.as_deref())
                {
                    tracing::debug!(match_id = %self.tag(), effect = %effect, "Untracked volatile");
                }
            }

            BattleEvent::VolatileEnd { pokemon, effect } => {
                self.combatant_mut(pokemon).end_volatile(effect);
            }

            // === Revealed information ===
            BattleEvent::Ability { pokemon, ability } => {
                self.combatant_mut(pokemon).ability = Some(ability.clone());
            }

            BattleEvent::Item { pokemon, item } => {
                self.combatant_mut(pokemon).item = Some(item.clone());
            }

            BattleEvent::EndItem { pokemon, item: _ } => {
                self.combatant_mut(pokemon).item = None;
            }

            // === Transformations ===
            BattleEvent::Mega { pokemon, megastone } => {
                let dex = Arc::clone(self.dex());
                self.combatant_mut(pokemon)
                    .mega_evolve(megastone.as_deref(), &dex);
            }

            BattleEvent::Primal(pokemon) => {
                let dex = Arc::clone(self.dex());
                self.combatant_mut(pokemon).primal_revert(&dex);
            }

            BattleEvent::Transform { pokemon, into } => {
                self.combatant_mut(pokemon).transformed_into = into.as_ref().map(PokemonRef::key);
            }

            BattleEvent::Terastallize { pokemon, tera_type } => {
                let poke = self.combatant_mut(pokemon);
                poke.tera_type = Type::from_protocol(tera_type);
                poke.terastallized = true;
            }

            // === Nothing to track ===
            BattleEvent::Ignored(_) => {}

            BattleEvent::Unknown(kind) => {
                tracing::debug!(match_id = %self.tag(), kind = %kind, "Unhandled event kind");
            }
        }

        Ok(())
    }

    /// Handle a switch (or drag) message
    fn handle_switch(
        &mut self,
        pokemon: &PokemonRef,
        details: &PokemonDetails,
        condition: &str,
    ) -> Result<(), EventWarning> {
        let dex = Arc::clone(self.dex());
        let roster = self.roster_mut(pokemon.player);
        roster.clear_active();

        let poke = roster.get_or_insert(pokemon);
        poke.switch_in(details, condition, &dex)
            .map_err(|_| EventWarning::BadCondition {
                key: pokemon.key(),
                condition: condition.to_string(),
            })
    }

    /// Apply a condition string, reporting unreadable ones
    fn handle_condition(
        &mut self,
        pokemon: &PokemonRef,
        condition: &str,
    ) -> Result<(), EventWarning> {
        self.combatant_mut(pokemon)
            .apply_condition(condition)
            .map_err(|_| EventWarning::BadCondition {
                key: pokemon.key(),
                condition: condition.to_string(),
            })
    }

    /// Handle a move: learn it, spend PP, remember the target
    fn handle_move(
        &mut self,
        pokemon: &PokemonRef,
        move_name: &str,
        target: Option<&PokemonRef>,
    ) -> Result<(), EventWarning> {
        let dex = Arc::clone(self.dex());
        let target = target.map(PokemonRef::key);
        match self.combatant_mut(pokemon).use_move(move_name, target, &dex) {
            LearnOutcome::CapacityExceeded => Err(EventWarning::CapacityExceeded {
                key: pokemon.key(),
                move_id: to_id(move_name),
            }),
            LearnOutcome::Learned | LearnOutcome::AlreadyKnown | LearnOutcome::Rejected => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use duelist_protocol::{Player, Stat};

    use super::*;
    use crate::dex::Dex;
    use crate::types::{SideCondition, Status, Weather};

    fn new_match(name: &str) -> MatchState {
        MatchState::new("battle-gen7ou-1", name, Arc::new(Dex::builtin().unwrap()))
    }

    fn apply_all(state: &mut MatchState, lines: &[&str]) {
        for line in lines {
            let _ = state.apply_line(line);
        }
    }

    #[test]
    fn test_player_assigns_role() {
        let mut state = new_match("bot_b");
        state.apply_line("|player|p1|someone|1|").unwrap();
        assert!(state.role().is_none());

        state.apply_line("|player|p2|bot_b|").unwrap();
        assert_eq!(state.role(), Some(Player::P2));
    }

    #[test]
    fn test_conflicting_player_keeps_role() {
        let mut state = new_match("bot_b");
        state.apply_line("|player|p2|bot_b|").unwrap();

        let err = state.apply_line("|player|p1|Bot B|").unwrap_err();
        assert!(matches!(err, EventWarning::RoleConflict { .. }));
        assert_eq!(state.role(), Some(Player::P2));
    }

    #[test]
    fn test_switch_creates_own_combatant() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p2|bot_b|",
                "|switch|p2a: Pikachu|Pikachu, L50, M|100/100",
            ],
        );

        let pikachu = state.active().unwrap();
        assert_eq!(pikachu.species, "pikachu");
        assert_eq!(pikachu.level, 50);
        assert_eq!(pikachu.current_hp, Some(100));
        assert_eq!(pikachu.max_hp, Some(100));
        assert!(state.opponent_active().is_none());
    }

    #[test]
    fn test_switch_before_role_goes_to_own_roster() {
        let mut state = new_match("bot_b");
        state
            .apply_line("|switch|p1a: Garchomp|Garchomp, F|100/100")
            .unwrap();
        assert_eq!(state.own_roster().len(), 1);
        assert!(state.opponent_roster().is_empty());
    }

    #[test]
    fn test_switch_replaces_active() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p2|bot_b|",
                "|switch|p1a: Garchomp|Garchomp, F|100/100",
                "|-boost|p1a: Garchomp|atk|2",
                "|switch|p1a: Gengar|Gengar, M|100/100",
                "|switch|p1a: Garchomp|Garchomp, F|100/100",
            ],
        );

        let roster = state.opponent_roster();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.iter().filter(|p| p.active).count(), 1);

        let garchomp = state.opponent_active().unwrap();
        assert_eq!(garchomp.key, "garchomp");
        assert!(garchomp.boosts.is_clear());
    }

    #[test]
    fn test_too_short_is_dropped() {
        let mut state = new_match("bot_b");
        let err = state.apply_line("|switch|p1a: Pikachu").unwrap_err();
        assert!(matches!(err, EventWarning::Malformed(_)));
        assert!(state.own_roster().is_empty());
    }

    #[test]
    fn test_ignored_and_unknown_kinds() {
        let mut state = new_match("bot_b");
        state.apply_line("|-crit|p1a: Pikachu").unwrap();
        state.apply_line("|-somethingnew|x").unwrap();
        state.apply_line("").unwrap();
        state.apply_line("just some text").unwrap();
    }

    #[test]
    fn test_move_learns_and_spends_pp() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p2|bot_b|",
                "|switch|p2a: Pikachu|Pikachu, L50, M|100/100",
                "|switch|p1a: Gyarados|Gyarados, M|100/100",
                "|move|p2a: Pikachu|Thunderbolt|p1a: Gyarados",
            ],
        );

        let thunderbolt = state.active().unwrap().move_instance("thunderbolt").unwrap();
        assert_eq!(thunderbolt.pp, 14);
        assert_eq!(thunderbolt.last_target.as_deref(), Some("gyarados"));
    }

    #[test]
    fn test_fifth_move_is_a_warning() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p2|bot_b|",
                "|switch|p1a: Snorlax|Snorlax, M|100/100",
                "|move|p1a: Snorlax|Body Slam|p2a: Pikachu",
                "|move|p1a: Snorlax|Rest|p1a: Snorlax",
                "|move|p1a: Snorlax|Earthquake|p2a: Pikachu",
                "|move|p1a: Snorlax|Knock Off|p2a: Pikachu",
            ],
        );

        let err = state
            .apply_line("|move|p1a: Snorlax|Protect|p1a: Snorlax")
            .unwrap_err();
        assert!(matches!(err, EventWarning::CapacityExceeded { .. }));
        assert_eq!(state.opponent_active().unwrap().moves().len(), 4);
    }

    #[test]
    fn test_faint_and_hp_events() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p2|bot_b|",
                "|switch|p1a: Gengar|Gengar, M|100/100",
                "|-damage|p1a: Gengar|40/100 psn",
                "|-heal|p1a: Gengar|52/100 psn|[from] item: Leftovers",
            ],
        );
        let gengar = state.opponent_active().unwrap();
        assert_eq!(gengar.current_hp, Some(52));
        assert!(gengar.status.contains(Status::Poison));

        state.apply_line("|faint|p1a: Gengar").unwrap();
        let gengar = state.opponent_roster().get("gengar").unwrap();
        assert!(gengar.is_fainted());
        assert_eq!(gengar.current_hp, Some(0));
    }

    #[test]
    fn test_bad_condition_is_reported() {
        let mut state = new_match("bot_b");
        let err = state
            .apply_line("|-damage|p1a: Gengar|lots")
            .unwrap_err();
        assert!(matches!(err, EventWarning::BadCondition { .. }));
        assert_eq!(state.own_roster().get("gengar").unwrap().current_hp, Some(100));
    }

    #[test]
    fn test_status_and_cureteam() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p1|bot_b|",
                "|switch|p1a: Venusaur|Venusaur, F|100/100",
                "|-status|p1a: Venusaur|slp",
                "|switch|p1a: Blastoise|Blastoise, M|100/100",
                "|-status|p1a: Blastoise|par",
                "|faint|p1a: Blastoise",
                "|-cureteam|p1a: Venusaur|[from] move: Aromatherapy",
            ],
        );

        let roster = state.own_roster();
        assert!(roster.get("venusaur").unwrap().status.is_empty());
        let blastoise = roster.get("blastoise").unwrap();
        assert!(blastoise.is_fainted());
        assert!(!blastoise.status.contains(Status::Paralysis));
    }

    #[test]
    fn test_boost_events() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p1|bot_b|",
                "|switch|p1a: Garchomp|Garchomp, F|100/100",
                "|switch|p2a: Lucario|Lucario, M|100/100",
                "|-boost|p1a: Garchomp|atk|2",
                "|-unboost|p1a: Garchomp|def|1",
                "|-boost|p2a: Lucario|spa|3",
                "|-copyboost|p2a: Lucario|p1a: Garchomp",
            ],
        );
        let lucario = state.opponent_active().unwrap();
        assert_eq!(lucario.boosts.atk, 2);
        assert_eq!(lucario.boosts.spa, 0);

        state.apply_line("|-invertboost|p1a: Garchomp").unwrap();
        let garchomp = state.active().unwrap();
        assert_eq!(garchomp.boosts.get(Stat::Atk), -2);
        assert_eq!(garchomp.boosts.get(Stat::Def), 1);

        state.apply_line("|-clearallboost").unwrap();
        assert!(state.active().unwrap().boosts.is_clear());
        assert!(state.opponent_active().unwrap().boosts.is_clear());
    }

    #[test]
    fn test_extreme_boost_amounts_saturate() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p1|bot_b|",
                "|switch|p1a: Snorlax|Snorlax, F|100/100",
                "|-boost|p1a: Snorlax|atk|2147483647",
                "|-boost|p1a: Snorlax|atk|2147483647",
                "|-setboost|p1a: Snorlax|def|-2147483648",
            ],
        );
        assert_eq!(state.active().unwrap().boosts.atk, i32::MAX);

        state.apply_line("|-invertboost|p1a: Snorlax").unwrap();
        let snorlax = state.active().unwrap();
        assert_eq!(snorlax.boosts.atk, -i32::MAX);
        assert_eq!(snorlax.boosts.def, i32::MAX);
    }

    #[test]
    fn test_field_events() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p1|bot_b|",
                "|-weather|SunnyDay|[from] ability: Drought|[of] p2a: Groudon",
                "|-weather|SunnyDay|[upkeep]",
                "|-sidestart|p1: bot_b|move: Stealth Rock",
                "|-sidestart|p2: rival|Reflect",
            ],
        );

        assert_eq!(state.weather(), Weather::SunnyDay);
        assert!(state.own_side_conditions().contains(SideCondition::StealthRock));
        assert!(state.opponent_side_conditions().contains(SideCondition::Reflect));

        state.apply_line("|-sideend|p2: rival|Reflect").unwrap();
        assert!(state.opponent_side_conditions().is_empty());
    }

    #[test]
    fn test_volatiles_and_transformations() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p1|bot_b|",
                "|switch|p2a: Charizard|Charizard, M|100/100",
                "|-start|p2a: Charizard|confusion",
                "|-start|p2a: Charizard|perish3",
                "|-mega|p2a: Charizard|Charizard|Charizardite Y",
                "|-item|p2a: Charizard|Charizardite Y",
                "|-ability|p2a: Charizard|Drought",
            ],
        );

        let charizard = state.opponent_active().unwrap();
        assert!(charizard.volatiles.confused);
        assert_eq!(charizard.volatiles.perish_count, 3);
        assert!(charizard.mega);
        assert_eq!(charizard.species, "charizardmegay");
        assert_eq!(charizard.ability.as_deref(), Some("Drought"));

        state.apply_line("|-end|p2a: Charizard|confusion").unwrap();
        state.apply_line("|-enditem|p2a: Charizard|Charizardite Y").unwrap();
        let charizard = state.opponent_active().unwrap();
        assert!(!charizard.volatiles.confused);
        assert!(charizard.item.is_none());
    }

    #[test]
    fn test_metadata_and_win() {
        let mut state = new_match("bot_b");
        apply_all(
            &mut state,
            &[
                "|player|p2|bot_b|",
                "|gametype|singles",
                "|gen|7",
                "|tier|[Gen 7] OU",
                "|teamsize|p1|6",
                "|teamsize|p2|6",
                "|turn|5",
            ],
        );

        assert_eq!(state.game_type(), Some("singles"));
        assert_eq!(state.generation(), Some(7));
        assert_eq!(state.server_turn(), 5);
        assert_eq!(state.turn(), 0);
        assert_eq!(state.own_roster().team_size, Some(6));

        state.apply_line("|win|bot_b").unwrap();
        assert!(state.is_ended());
        assert!(state.won());
    }
}

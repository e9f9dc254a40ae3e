//! Combatant state

use std::sync::Arc;

use duelist_protocol::{
    Gender, HpStatus, ParseError, PokemonDetails, PokemonRef, SidePokemon, to_id,
};

use super::flags::{FlagKey, Flags};
use super::moves::{LearnOutcome, MAX_MOVES, MoveInstance};
use super::pokemon_type::Type;
use super::stats::{BaseStats, StatStages, Stats};
use super::status::{Status, StatusSet, Volatile, Volatiles};
use crate::dex::{Dex, MoveData};

/// Moves that show up in the event stream but never belong to a moveset
const PSEUDO_MOVES: &[&str] = &["struggle", "transform"];

impl FlagKey for Gender {
    const ALL: &'static [Self] = &[Gender::Female, Gender::Male, Gender::Neutral];

    fn key(&self) -> &'static str {
        self.as_str()
    }
}

/// Normalize a move token to a catalog id.
///
/// Returns None for tokens that are never learned.
pub fn normalize_move_id(raw: &str, dex: &Dex) -> Option<String> {
    let mut id = to_id(raw);
    if id.starts_with("hiddenpower") {
        id = "hiddenpower".to_string();
    }
    if id.is_empty() || PSEUDO_MOVES.contains(&id.as_str()) {
        return None;
    }

    // "zthunderbolt" is how some clients spell the z-powered base move
    if let Some(base) = id.strip_prefix('z')
        && !dex.has_move(&id)
        && dex.has_move(base)
    {
        id = base.to_string();
    }

    if dex.move_data(&id).is_some_and(|data| data.is_z_move()) {
        return None;
    }
    Some(id)
}

/// One creature in a roster
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    /// Roster key (lowercased name from the reference)
    pub key: String,
    /// Name as the server writes it
    pub name: String,
    /// Species or forme id
    pub species: String,
    pub level: u8,
    pub gender: Gender,
    pub shiny: bool,

    pub base_stats: BaseStats,
    /// Computed stats, only known for the own roster
    pub stats: Stats,
    /// Natural types of the current species
    pub types: Vec<Type>,

    pub current_hp: Option<u32>,
    pub max_hp: Option<u32>,

    pub boosts: StatStages,
    pub status: StatusSet,
    pub volatiles: Volatiles,

    moves: Vec<MoveInstance>,

    pub active: bool,
    pub mega: bool,
    pub primal: bool,

    pub ability: Option<String>,
    pub item: Option<String>,
    pub tera_type: Option<Type>,
    pub terastallized: bool,
    /// Key of the combatant this one transformed into
    pub transformed_into: Option<String>,
}

impl Combatant {
    /// Create a combatant known only by its reference name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: name.to_lowercase(),
            species: to_id(&name),
            name,
            level: 100,
            gender: Gender::Neutral,
            shiny: false,
            base_stats: BaseStats::ZERO,
            stats: Stats::ZERO,
            types: Vec::new(),
            current_hp: None,
            max_hp: None,
            boosts: StatStages::new(),
            status: StatusSet::new(),
            volatiles: Volatiles::default(),
            moves: Vec::new(),
            active: false,
            mega: false,
            primal: false,
            ability: None,
            item: None,
            tera_type: None,
            terastallized: false,
            transformed_into: None,
        }
    }

    pub fn from_ref(pokemon: &PokemonRef) -> Self {
        Self::new(pokemon.name.clone())
    }

    // === Identity ===

    /// Apply a details string (species, level, gender, tera type)
    pub fn apply_details(&mut self, details: &PokemonDetails, dex: &Dex) {
        if !details.species.is_empty() {
            self.set_species(&details.species, dex);
        }
        self.level = details.level;
        self.gender = details.gender;
        self.shiny = details.shiny;
        if let Some(tera) = details.tera_type.as_deref() {
            self.tera_type = Type::from_protocol(tera);
        }
    }

    /// Change species or forme, pulling base stats and types from the catalog
    pub fn set_species(&mut self, species: &str, dex: &Dex) {
        self.species = to_id(species);
        if let Some(data) = dex.species(&self.species) {
            self.base_stats = data.base_stats;
            self.types = data.types();
        }
    }

    /// Current types: a single override while a type change is active
    pub fn types(&self) -> Flags<Type> {
        match self.volatiles.type_override {
            Some(overridden) => Flags::only(overridden),
            None => self.types.iter().copied().collect(),
        }
    }

    // === Switching ===

    /// Enter the field: stages reset, switch-clearing volatiles reset,
    /// details and condition refreshed.
    pub fn switch_in(
        &mut self,
        details: &PokemonDetails,
        condition: &str,
        dex: &Dex,
    ) -> Result<(), ParseError> {
        self.boosts.clear();
        self.volatiles.reset_on_switch();
        self.active = true;
        self.apply_details(details, dex);
        self.apply_condition(condition)
    }

    // === HP and status ===

    /// Apply a condition string ("100/100", "50/100 par", "0 fnt").
    ///
    /// A string that cannot be read leaves the combatant at 100/100 and
    /// returns the parse error for the caller to report.
    pub fn apply_condition(&mut self, condition: &str) -> Result<(), ParseError> {
        let hp = match HpStatus::parse(condition) {
            Ok(hp) => hp,
            Err(e) => {
                self.current_hp = Some(100);
                self.max_hp = Some(100);
                return Err(e);
            }
        };

        if hp.is_fainted() {
            self.faint();
            return Ok(());
        }

        if let Some(status) = hp.status.as_deref().and_then(Status::from_protocol) {
            self.status.insert(status);
        }
        if let Some(max) = hp.max {
            self.max_hp = Some(max);
        }
        self.current_hp = Some(match self.max_hp {
            Some(max) => hp.current.min(max),
            None => hp.current,
        });
        Ok(())
    }

    pub fn faint(&mut self) {
        self.status.insert(Status::Fainted);
        self.current_hp = Some(0);
    }

    pub fn is_fainted(&self) -> bool {
        self.status.contains(Status::Fainted)
    }

    /// Add a status from its protocol tag
    pub fn set_status(&mut self, tag: &str) {
        if let Some(status) = Status::from_protocol(tag) {
            self.status.insert(status);
        }
    }

    /// Remove a status; fainted is never cured
    pub fn cure_status(&mut self, tag: &str) {
        if let Some(status) = Status::from_protocol(tag)
            && status != Status::Fainted
        {
            self.status.remove(status);
        }
    }

    /// Remove every status except fainted
    pub fn cure_all(&mut self) {
        let fainted = self.is_fainted();
        self.status.clear();
        self.status.set(Status::Fainted, fainted);
    }

    /// Whether this combatant may be switched in
    pub fn can_switch_in(&self) -> bool {
        !self.active && !self.is_fainted()
    }

    // === Volatiles ===

    /// Apply a -start; returns false for effects that are not tracked
    pub fn start_volatile(&mut self, effect: &str, detail: Option<&str>) -> bool {
        let Some(volatile) = Volatile::from_protocol(effect) else {
            return false;
        };
        if volatile == Volatile::Disable
            && let Some(disabled) = detail.and_then(|name| self.move_by_name_mut(name))
        {
            disabled.disabled = true;
        }
        self.volatiles.start(&volatile, detail);
        true
    }

    /// Apply an -end; returns false for effects that are not tracked
    pub fn end_volatile(&mut self, effect: &str) -> bool {
        let Some(volatile) = Volatile::from_protocol(effect) else {
            return false;
        };
        if volatile == Volatile::Disable {
            for instance in &mut self.moves {
                instance.disabled = false;
            }
        }
        self.volatiles.end(&volatile);
        true
    }

    // === Transformations ===

    /// Mega evolve, moving to the mega forme when the catalog has it.
    ///
    /// Megastones ending in " X" or " Y" pick the matching forme.
    pub fn mega_evolve(&mut self, megastone: Option<&str>, dex: &Dex) {
        self.mega = true;
        let suffix = match megastone.map(str::trim) {
            Some(stone) if stone.ends_with(" X") => "x",
            Some(stone) if stone.ends_with(" Y") => "y",
            _ => "",
        };
        let forme = format!("{}mega{}", self.species, suffix);
        if dex.species(&forme).is_some() {
            self.set_species(&forme, dex);
        }
    }

    /// Primal reversion, moving to the primal forme when the catalog has it
    pub fn primal_revert(&mut self, dex: &Dex) {
        self.primal = true;
        let forme = format!("{}primal", self.species);
        if dex.species(&forme).is_some() {
            self.set_species(&forme, dex);
        }
    }

    // === Moves ===

    /// Known moves in the order they were learned
    pub fn moves(&self) -> &[MoveInstance] {
        &self.moves
    }

    pub fn move_instance(&self, id: &str) -> Option<&MoveInstance> {
        self.moves.iter().find(|m| m.id == id)
    }

    pub fn move_instance_mut(&mut self, id: &str) -> Option<&mut MoveInstance> {
        self.moves.iter_mut().find(|m| m.id == id)
    }

    fn move_by_name_mut(&mut self, name: &str) -> Option<&mut MoveInstance> {
        let id = to_id(name.strip_prefix("move: ").unwrap_or(name));
        self.move_instance_mut(&id)
    }

    /// Add a move to the moveset.
    ///
    /// Moves missing from the catalog get a synthesized entry that lives only
    /// in this instance.
    pub fn learn_move(&mut self, raw: &str, dex: &Dex) -> LearnOutcome {
        let Some(id) = normalize_move_id(raw, dex) else {
            return LearnOutcome::Rejected;
        };
        if self.move_instance(&id).is_some() {
            return LearnOutcome::AlreadyKnown;
        }
        if self.moves.len() >= MAX_MOVES {
            return LearnOutcome::CapacityExceeded;
        }

        let data = match dex.move_data(&id) {
            Some(data) => Arc::clone(data),
            None => {
                tracing::warn!(move_id = %id, species = %self.species, "Unknown move, synthesizing catalog entry");
                Arc::new(MoveData::synthesized(&id))
            }
        };
        self.moves.push(MoveInstance::new(id, data));
        LearnOutcome::Learned
    }

    /// Learn a move and record one use of it
    pub fn use_move(&mut self, raw: &str, target: Option<String>, dex: &Dex) -> LearnOutcome {
        let outcome = self.learn_move(raw, dex);
        if let Some(id) = normalize_move_id(raw, dex)
            && let Some(instance) = self.move_instance_mut(&id)
        {
            instance.use_once(target);
        }
        outcome
    }

    /// Replace the moveset with the ids a request lists, keeping the state
    /// of moves that stay.
    pub fn replace_moves(&mut self, ids: &[String], dex: &Dex) {
        let mut previous = std::mem::take(&mut self.moves);
        for raw in ids {
            if let Some(id) = normalize_move_id(raw, dex)
                && let Some(pos) = previous.iter().position(|m| m.id == id)
            {
                if self.moves.len() < MAX_MOVES {
                    self.moves.push(previous.swap_remove(pos));
                }
                continue;
            }
            self.learn_move(raw, dex);
        }
    }

    /// Refresh everything a request reports about this combatant
    pub fn apply_request_entry(
        &mut self,
        entry: &SidePokemon,
        dex: &Dex,
    ) -> Result<(), ParseError> {
        self.apply_details(&PokemonDetails::parse(&entry.details), dex);
        if let Some(stats) = entry.stats {
            self.stats = stats.into();
        }
        if let Some(ability) = entry.base_ability.as_deref().filter(|a| !a.is_empty()) {
            self.ability = Some(ability.to_string());
        }
        self.item = entry.item.clone().filter(|item| !item.is_empty());
        self.active = entry.active;
        if !entry.moves.is_empty() {
            self.replace_moves(&entry.moves, dex);
        }
        self.apply_condition(&entry.condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dex() -> Dex {
        Dex::builtin().unwrap()
    }

    fn pikachu(dex: &Dex) -> Combatant {
        let mut pikachu = Combatant::new("Pikachu");
        pikachu.apply_details(&PokemonDetails::parse("Pikachu, L50, M"), dex);
        pikachu
    }

    #[test]
    fn test_new_from_name() {
        let combatant = Combatant::new("Mr. Mime");
        assert_eq!(combatant.key, "mr. mime");
        assert_eq!(combatant.species, "mrmime");
        assert_eq!(combatant.level, 100);
        assert!(combatant.current_hp.is_none());
        assert!(combatant.moves().is_empty());
    }

    #[test]
    fn test_details_pull_from_catalog() {
        let dex = dex();
        let pikachu = pikachu(&dex);
        assert_eq!(pikachu.species, "pikachu");
        assert_eq!(pikachu.level, 50);
        assert_eq!(pikachu.gender, Gender::Male);
        assert_eq!(pikachu.base_stats.spe, 90);
        assert!(pikachu.types().contains(Type::Electric));
    }

    #[test]
    fn test_switch_in_resets() {
        let dex = dex();
        let mut garchomp = Combatant::new("Garchomp");
        garchomp.boosts.atk = 2;
        garchomp.volatiles.confused = true;
        garchomp.volatiles.perish_count = 1;

        let details = PokemonDetails::parse("Garchomp, F");
        garchomp.switch_in(&details, "80/100", &dex).unwrap();
        assert!(garchomp.active);
        assert!(garchomp.boosts.is_clear());
        assert!(!garchomp.volatiles.confused);
        assert_eq!(garchomp.volatiles.perish_count, 4);
        assert_eq!(garchomp.current_hp, Some(80));
    }

    #[test]
    fn test_condition_with_status() {
        let mut combatant = Combatant::new("Snorlax");
        combatant.apply_condition("50/100 slp").unwrap();
        assert_eq!(combatant.current_hp, Some(50));
        assert_eq!(combatant.max_hp, Some(100));
        assert!(combatant.status.contains(Status::Sleep));

        combatant.apply_condition("150/100").unwrap();
        assert_eq!(combatant.current_hp, Some(100));
    }

    #[test]
    fn test_fainted_is_terminal() {
        let mut combatant = Combatant::new("Gengar");
        combatant.apply_condition("0 fnt").unwrap();
        combatant.apply_condition("0 fnt").unwrap();
        assert!(combatant.is_fainted());
        assert_eq!(combatant.current_hp, Some(0));

        combatant.cure_status("fnt");
        combatant.cure_all();
        assert!(combatant.is_fainted());
        assert!(!combatant.can_switch_in());
    }

    #[test]
    fn test_bad_condition_falls_back() {
        let mut combatant = Combatant::new("Ditto");
        assert!(combatant.apply_condition("lots/of").is_err());
        assert_eq!(combatant.current_hp, Some(100));
        assert_eq!(combatant.max_hp, Some(100));
    }

    #[test]
    fn test_cure_status() {
        let mut combatant = Combatant::new("Venusaur");
        combatant.set_status("psn");
        combatant.set_status("slp");
        combatant.cure_status("psn");
        assert!(!combatant.status.contains(Status::Poison));
        assert!(combatant.status.contains(Status::Sleep));

        combatant.cure_all();
        assert!(combatant.status.is_empty());
    }

    #[test]
    fn test_normalize_move_id() {
        let dex = dex();
        assert_eq!(normalize_move_id("Thunderbolt", &dex).as_deref(), Some("thunderbolt"));
        assert_eq!(normalize_move_id("Hidden Power Fire 60", &dex).as_deref(), Some("hiddenpower"));
        assert_eq!(normalize_move_id("zthunderbolt", &dex).as_deref(), Some("thunderbolt"));
        assert_eq!(normalize_move_id("Struggle", &dex), None);
        assert_eq!(normalize_move_id("transform", &dex), None);
        assert_eq!(normalize_move_id("Gigavolt Havoc", &dex), None);
    }

    #[test]
    fn test_learn_move_capacity() {
        let dex = dex();
        let mut pikachu = pikachu(&dex);
        for name in ["Thunderbolt", "Quick Attack", "Iron Tail", "Volt Switch"] {
            assert_eq!(pikachu.learn_move(name, &dex), LearnOutcome::Learned);
        }
        assert_eq!(pikachu.learn_move("thunderbolt", &dex), LearnOutcome::AlreadyKnown);
        assert_eq!(pikachu.learn_move("Body Slam", &dex), LearnOutcome::CapacityExceeded);
        assert_eq!(pikachu.learn_move("Struggle", &dex), LearnOutcome::Rejected);
        assert_eq!(pikachu.moves().len(), 4);
    }

    #[test]
    fn test_unknown_move_is_synthesized() {
        let dex = dex();
        let mut combatant = Combatant::new("Raichu");
        assert_eq!(combatant.learn_move("Brand New Move", &dex), LearnOutcome::Learned);

        let instance = combatant.move_instance("brandnewmove").unwrap();
        assert_eq!(instance.base_power(), 80);
        assert!(!dex.has_move("brandnewmove"));
    }

    #[test]
    fn test_use_move_spends_pp() {
        let dex = dex();
        let mut pikachu = pikachu(&dex);
        pikachu.use_move("Thunderbolt", Some("gyarados".to_string()), &dex);
        pikachu.use_move("Thunderbolt", None, &dex);

        let thunderbolt = pikachu.move_instance("thunderbolt").unwrap();
        assert_eq!(thunderbolt.pp, 13);
        assert_eq!(thunderbolt.last_target.as_deref(), Some("gyarados"));
    }

    #[test]
    fn test_replace_moves_keeps_state() {
        let dex = dex();
        let mut pikachu = pikachu(&dex);
        pikachu.use_move("Thunderbolt", None, &dex);
        pikachu.learn_move("Body Slam", &dex);

        let ids = vec!["thunderbolt".to_string(), "quickattack".to_string()];
        pikachu.replace_moves(&ids, &dex);

        let ids: Vec<_> = pikachu.moves().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["thunderbolt", "quickattack"]);
        assert_eq!(pikachu.move_instance("thunderbolt").unwrap().pp, 14);
    }

    #[test]
    fn test_disable_volatile() {
        let dex = dex();
        let mut pikachu = pikachu(&dex);
        pikachu.learn_move("Thunderbolt", &dex);

        assert!(pikachu.start_volatile("Disable", Some("Thunderbolt")));
        assert!(pikachu.move_instance("thunderbolt").unwrap().disabled);

        assert!(pikachu.end_volatile("Disable"));
        assert!(!pikachu.move_instance("thunderbolt").unwrap().disabled);

        assert!(!pikachu.start_volatile("Protect", None));
    }

    #[test]
    fn test_type_override() {
        let dex = dex();
        let mut pikachu = pikachu(&dex);
        pikachu.start_volatile("typechange", Some("Water"));
        assert_eq!(pikachu.types(), Flags::only(Type::Water));

        pikachu.end_volatile("typechange");
        assert_eq!(pikachu.types(), Flags::only(Type::Electric));
    }

    #[test]
    fn test_mega_and_primal_formes() {
        let dex = dex();
        let mut charizard = Combatant::new("Charizard");
        charizard.set_species("Charizard", &dex);
        charizard.mega_evolve(Some("Charizardite X"), &dex);
        assert!(charizard.mega);
        assert_eq!(charizard.species, "charizardmegax");
        assert!(charizard.types().contains(Type::Dragon));

        let mut groudon = Combatant::new("Groudon");
        groudon.primal_revert(&dex);
        assert!(groudon.primal);
        assert_eq!(groudon.species, "groudonprimal");
        assert_eq!(groudon.base_stats.atk, 180);

        let mut pikachu = pikachu(&dex);
        pikachu.mega_evolve(None, &dex);
        assert!(pikachu.mega);
        assert_eq!(pikachu.species, "pikachu");
    }
}

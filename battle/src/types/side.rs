//! Roster: the combatants of one side

use duelist_protocol::PokemonRef;

use super::pokemon::Combatant;

/// One side's combatants, in the order they were first seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pokemon: Vec<Combatant>,

    /// Announced team size, if the server sent one
    pub team_size: Option<u8>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    /// Iterate over every combatant in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.pokemon.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.pokemon.iter_mut()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.pokemon.iter().position(|p| p.key == key)
    }

    /// Find a combatant by roster key
    pub fn get(&self, key: &str) -> Option<&Combatant> {
        self.position(key).map(|idx| &self.pokemon[idx])
    }

    /// Find the combatant a reference names, creating it on first sight
    pub fn get_or_insert(&mut self, pokemon: &PokemonRef) -> &mut Combatant {
        let idx = match self.position(&pokemon.key()) {
            Some(idx) => idx,
            None => {
                self.pokemon.push(Combatant::from_ref(pokemon));
                self.pokemon.len() - 1
            }
        };
        &mut self.pokemon[idx]
    }

    /// The active combatant, if any
    pub fn active(&self) -> Option<&Combatant> {
        self.pokemon.iter().find(|p| p.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Combatant> {
        self.pokemon.iter_mut().find(|p| p.active)
    }

    /// Clear the active flag on every combatant
    pub fn clear_active(&mut self) {
        for poke in &mut self.pokemon {
            poke.active = false;
        }
    }

    /// Combatants not on the field, in insertion order (fainted included)
    pub fn bench(&self) -> impl Iterator<Item = &Combatant> {
        self.pokemon.iter().filter(|p| !p.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(s: &str) -> PokemonRef {
        PokemonRef::parse(s).unwrap()
    }

    fn create_test_roster() -> Roster {
        let mut roster = Roster::new();
        roster.get_or_insert(&reference("p1a: Pikachu")).active = true;
        roster.get_or_insert(&reference("p1: Charizard"));
        roster.get_or_insert(&reference("p1: Blastoise")).faint();
        roster
    }

    #[test]
    fn test_get_or_insert_is_stable() {
        let mut roster = create_test_roster();
        assert_eq!(roster.len(), 3);

        roster.get_or_insert(&reference("p1a: PIKACHU"));
        assert_eq!(roster.len(), 3);
        assert!(roster.get("pikachu").is_some());
    }

    #[test]
    fn test_active_and_bench() {
        let mut roster = create_test_roster();
        assert_eq!(roster.active().unwrap().key, "pikachu");

        let bench: Vec<_> = roster.bench().map(|p| p.key.as_str()).collect();
        assert_eq!(bench, vec!["charizard", "blastoise"]);

        roster.clear_active();
        assert!(roster.active().is_none());
    }
}

//! Fixed-shape boolean sets over small closed enums

use std::fmt;
use std::marker::PhantomData;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A closed enum with a stable, ordered list of members
pub trait FlagKey: Copy + PartialEq + 'static {
    /// Every member, in serialization order (at most 32)
    const ALL: &'static [Self];

    /// Key used when the set is serialized
    fn key(&self) -> &'static str;
}

/// Set of enum members stored as a bitmask.
///
/// Serializes as a map of every member to its membership, in `K::ALL` order,
/// so the shape never depends on which members are present.
pub struct Flags<K: FlagKey> {
    bits: u32,
    _key: PhantomData<K>,
}

impl<K: FlagKey> Flags<K> {
    pub const EMPTY: Self = Self {
        bits: 0,
        _key: PhantomData,
    };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// A set with exactly one member
    pub fn only(key: K) -> Self {
        let mut flags = Self::new();
        flags.insert(key);
        flags
    }

    fn bit(key: K) -> u32 {
        K::ALL
            .iter()
            .position(|k| *k == key)
            .map_or(0, |idx| 1 << idx)
    }

    pub fn insert(&mut self, key: K) {
        self.bits |= Self::bit(key);
    }

    pub fn remove(&mut self, key: K) {
        self.bits &= !Self::bit(key);
    }

    pub fn set(&mut self, key: K, on: bool) {
        if on {
            self.insert(key);
        } else {
            self.remove(key);
        }
    }

    pub fn contains(&self, key: K) -> bool {
        self.bits & Self::bit(key) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Members currently in the set, in `K::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        K::ALL.iter().copied().filter(|k| self.contains(*k))
    }
}

impl<K: FlagKey> Clone for Flags<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: FlagKey> Copy for Flags<K> {}

impl<K: FlagKey> Default for Flags<K> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<K: FlagKey> PartialEq for Flags<K> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<K: FlagKey> Eq for Flags<K> {}

impl<K: FlagKey> fmt::Debug for Flags<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|k| k.key())).finish()
    }
}

impl<K: FlagKey> Serialize for Flags<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(K::ALL.len()))?;
        for key in K::ALL {
            map.serialize_entry(key.key(), &self.contains(*key))?;
        }
        map.end()
    }
}

impl<K: FlagKey> FromIterator<K> for Flags<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut flags = Self::new();
        for key in iter {
            flags.insert(key);
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    #[test]
    fn test_insert_remove() {
        let mut flags: Flags<Type> = Flags::new();
        assert!(flags.is_empty());

        flags.insert(Type::Fire);
        flags.insert(Type::Water);
        assert!(flags.contains(Type::Fire));
        assert!(!flags.contains(Type::Grass));

        flags.remove(Type::Fire);
        assert_eq!(flags.iter().collect::<Vec<_>>(), vec![Type::Water]);
    }

    #[test]
    fn test_serialize_full_shape() {
        let flags = Flags::only(Type::Bug);
        let value = serde_json::to_value(flags).unwrap();
        let map = value.as_object().unwrap();

        assert_eq!(map.len(), 18);
        assert_eq!(map["bug"], true);
        assert_eq!(map["water"], false);
    }
}

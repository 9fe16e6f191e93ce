//! Case-insensitive name maps.
//!
//! Module names and package ids are matched without regard to case. Keys are
//! normalized to lower case on every access, so `Foo`, `foo` and `FOO` are the
//! same entry.

use std::collections::HashMap;

/// Map keyed by case-insensitive names.
#[derive(Debug, Clone)]
pub struct NameMap<V> {
    entries: HashMap<String, V>,
}

impl<V> NameMap<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn key(name: &str) -> String {
        name.to_lowercase()
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(&Self::key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::key(name))
    }

    /// Insert, replacing any existing value.
    pub fn insert(&mut self, name: &str, value: V) -> Option<V> {
        self.entries.insert(Self::key(name), value)
    }

    /// Insert only when no value exists. Returns whether the value was stored.
    pub fn insert_if_absent(&mut self, name: &str, value: V) -> bool {
        match self.entries.entry(Self::key(name)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by normalized name.
    pub fn sorted(&self) -> Vec<(&str, &V)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<V> Default for NameMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

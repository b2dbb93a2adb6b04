//! Case-insensitive configuration layers and the precedence merge.

use std::collections::BTreeMap;

use crate::value::{Entry, Value};

/// One configuration layer: a case-insensitive mapping from key to entry.
///
/// Keys are folded to lower case on insert and lookup, so no two entries in a
/// layer can differ only by casing. The original casing survives inside the
/// [`Entry`] for serialization.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    entries: BTreeMap<String, Entry>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the full process environment as a layer, once.
    ///
    /// Each `NAME=value` pair is stored under the lower-cased name with the
    /// value kept as a plain string. The snapshot is never refreshed; later
    /// environment changes are invisible to the store.
    pub fn from_env_snapshot() -> Self {
        let mut layer = Self::new();
        for (name, value) in std::env::vars_os() {
            let name = name.to_string_lossy();
            let value = value.to_string_lossy();
            layer.insert(&name, Value::Str(value.into_owned()));
        }
        layer
    }

    /// Inserts a value under the lower-cased key, replacing any previous
    /// entry for that key regardless of casing.
    pub fn insert(&mut self, key: &str, value: Value) {
        self.entries
            .insert(key.to_lowercase(), Entry::new(key, value));
    }

    /// Looks up an entry; the key is case-folded internally.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(&key.to_lowercase())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    /// Iterates entries in lower-cased key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Layer {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut layer = Self::new();
        for (key, value) in iter {
            layer.insert(&key, value);
        }
        layer
    }
}

/// Rebuilds the combined view from the three source layers.
///
/// Precedence, lowest to highest: defaults, then environment entries that
/// shadow an existing default, then the overrides tier (explicit `set` calls
/// and file-derived values) unconditionally. An environment entry whose key
/// has no default and no override never reaches the combined view.
///
/// The result is a fresh layer; the caller installs it atomically under its
/// own lock.
pub fn combine(defaults: &Layer, env: &Layer, overrides: &Layer) -> Layer {
    let mut combined = Layer::new();
    for (key, entry) in defaults.iter() {
        match env.entries.get(key) {
            Some(env_entry) => combined.entries.insert(key.clone(), env_entry.clone()),
            None => combined.entries.insert(key.clone(), entry.clone()),
        };
    }
    for (key, entry) in overrides.iter() {
        combined.entries.insert(key.clone(), entry.clone());
    }
    combined
}

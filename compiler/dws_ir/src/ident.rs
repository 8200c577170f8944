//! Case-insensitive identifiers.
//!
//! Pascal-family identifiers compare without regard to case but keep the
//! spelling they were declared with for display. `IdentKey` is the folded key;
//! `IdentMap` stores the original spelling next to each value.
//!
//! # Design
//!
//! - Keys are folded to lowercase once, at insertion.
//! - Lookups fold on the fly and avoid allocating when the probe is already
//!   lowercase (`Borrow<str>` on the key).
//! - `BTreeMap` storage for deterministic iteration.

use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashSet;

/// Fold an identifier to its comparison form.
#[inline]
fn fold(name: &str) -> Cow<'_, str> {
    if name.chars().any(char::is_uppercase) {
        Cow::Owned(name.to_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// A case-folded identifier key.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentKey(Box<str>);

impl IdentKey {
    /// Fold `name` into a key.
    pub fn new(name: &str) -> Self {
        IdentKey(fold(name).into_owned().into_boxed_str())
    }

    /// The folded text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether `name` folds to this key.
    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        *self.0 == *fold(name)
    }
}

impl Borrow<str> for IdentKey {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IdentKey {
    fn from(name: &str) -> Self {
        IdentKey::new(name)
    }
}

impl fmt::Debug for IdentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentKey({:?})", &*self.0)
    }
}

impl fmt::Display for IdentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compare two identifiers case-insensitively without allocating a key.
#[inline]
pub fn same_ident(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Ordered, case-insensitive map that remembers original spellings.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentMap<V> {
    entries: BTreeMap<IdentKey, (String, V)>,
}

impl<V> IdentMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        IdentMap {
            entries: BTreeMap::new(),
        }
    }

    /// Insert a value under `name`, returning the value it replaced.
    ///
    /// The stored spelling is updated to `name`.
    pub fn insert(&mut self, name: &str, value: V) -> Option<V> {
        self.entries
            .insert(IdentKey::new(name), (name.to_owned(), value))
            .map(|(_, old)| old)
    }

    /// Look up a value by name (case-insensitive).
    #[inline]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(fold(name).as_ref()).map(|(_, v)| v)
    }

    /// Look up a value mutably by name (case-insensitive).
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.entries.get_mut(fold(name).as_ref()).map(|(_, v)| v)
    }

    /// Look up the original spelling and value for `name`.
    #[inline]
    pub fn get_entry(&self, name: &str) -> Option<(&str, &V)> {
        self.entries
            .get(fold(name).as_ref())
            .map(|(n, v)| (n.as_str(), v))
    }

    /// Get the value for `name`, inserting `V::default()` first if absent.
    pub fn entry_or_default(&mut self, name: &str) -> &mut V
    where
        V: Default,
    {
        &mut self
            .entries
            .entry(IdentKey::new(name))
            .or_insert_with(|| (name.to_owned(), V::default()))
            .1
    }

    /// Check whether `name` is present (case-insensitive).
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(fold(name).as_ref())
    }

    /// Remove `name`, returning its original spelling and value.
    pub fn remove(&mut self, name: &str) -> Option<(String, V)> {
        self.entries.remove(fold(name).as_ref())
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &mut V) -> bool) {
        self.entries.retain(|_, (name, value)| keep(name.as_str(), value));
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(original spelling, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.values().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterate `(folded key, original spelling, value)` triples in key order.
    pub fn iter_keyed(&self) -> impl Iterator<Item = (&IdentKey, &str, &V)> {
        self.entries.iter().map(|(k, (n, v))| (k, n.as_str(), v))
    }

    /// Iterate original spellings in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(n, _)| n.as_str())
    }

    /// Iterate values in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|(_, v)| v)
    }
}

impl<V> Default for IdentMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for IdentMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Case-insensitive set of identifiers, used as a visited set by graph walks.
#[derive(Clone, Debug, Default)]
pub struct IdentSet {
    keys: FxHashSet<IdentKey>,
}

impl IdentSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name`, returning `false` if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.keys.insert(IdentKey::new(name))
    }

    /// Check whether `name` is present (case-insensitive).
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(fold(name).as_ref())
    }

    /// Number of identifiers in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

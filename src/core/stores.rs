//! Layer 8: Scoped stores
//!
//! Dynamically-named nested tables modeled as a map of scope identifier to
//! an inner map of entry name to value. Name uniqueness within a scope is
//! structural: the inner map key is the name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::behavior::Behavior;
use super::identity::{Name, Serial};
use super::metadata::{Attribute, ItemEvent, Tag};

/// A table of named entries, partitioned by a scope key.
///
/// Behaviors are scoped per group name; tags, attributes, and events per
/// item serial. Entries in different scopes never interact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopedStore<S: Ord, V> {
    scopes: BTreeMap<S, BTreeMap<Name, V>>,
}

// Derived Default would require S: Default + V: Default.
impl<S: Ord, V> Default for ScopedStore<S, V> {
    fn default() -> Self {
        Self {
            scopes: BTreeMap::new(),
        }
    }
}

impl<S: Ord, V> ScopedStore<S, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, scope: &S, name: &Name) -> bool {
        self.scopes
            .get(scope)
            .is_some_and(|entries| entries.contains_key(name))
    }

    pub fn get(&self, scope: &S, name: &Name) -> Option<&V> {
        self.scopes.get(scope)?.get(name)
    }

    pub fn get_mut(&mut self, scope: &S, name: &Name) -> Option<&mut V> {
        self.scopes.get_mut(scope)?.get_mut(name)
    }

    /// Insert an entry. The caller is responsible for the absence check;
    /// inserting over an existing entry replaces it.
    pub fn insert(&mut self, scope: S, name: Name, value: V) {
        self.scopes.entry(scope).or_default().insert(name, value);
    }

    pub fn remove(&mut self, scope: &S, name: &Name) -> Option<V> {
        let entries = self.scopes.get_mut(scope)?;
        let removed = entries.remove(name);
        if entries.is_empty() {
            self.scopes.remove(scope);
        }
        removed
    }

    /// Drop every entry in a scope. Used when the owning item is erased so
    /// no metadata outlives its parent.
    pub fn purge_scope(&mut self, scope: &S) {
        self.scopes.remove(scope);
    }

    /// Entries within one scope, in name order.
    pub fn iter_scope<'a>(&'a self, scope: &S) -> impl Iterator<Item = (&'a Name, &'a V)> {
        self.scopes.get(scope).into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.scopes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// Per-group behavior flags.
pub type BehaviorTable = ScopedStore<Name, Behavior>;
/// Per-item tags.
pub type TagStore = ScopedStore<Serial, Tag>;
/// Per-item attributes.
pub type AttributeStore = ScopedStore<Serial, Attribute>;
/// Per-item events.
pub type EventStore = ScopedStore<Serial, ItemEvent>;

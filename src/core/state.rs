//! Layer 9: Registry state
//!
//! The single source of truth: config singleton, group table, behavior
//! table, item table, per-item metadata stores, and frame table.
//!
//! INVARIANT: every item references an existing group, every metadata entry
//! references an existing item, and every frame references an existing
//! group. Mutators here are infallible commit steps; all validation happens
//! in the operation layer before the first write.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::behavior::{Behavior, Gate};
use super::config::Config;
use super::error::Error;
use super::frame::Frame;
use super::group::Group;
use super::identity::{AccountId, Name, Serial};
use super::item::Item;
use super::stores::{AttributeStore, BehaviorTable, EventStore, TagStore};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    config: Config,
    groups: BTreeMap<Name, Group>,
    behaviors: BehaviorTable,
    items: BTreeMap<Serial, Item>,
    tags: TagStore,
    attributes: AttributeStore,
    events: EventStore,
    frames: BTreeMap<Name, Frame>,
}

impl RegistryState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            groups: BTreeMap::new(),
            behaviors: BehaviorTable::new(),
            items: BTreeMap::new(),
            tags: TagStore::new(),
            attributes: AttributeStore::new(),
            events: EventStore::new(),
            frames: BTreeMap::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn group(&self, name: &Name) -> Result<&Group, Error> {
        self.groups
            .get(name)
            .ok_or_else(|| Error::GroupNotFound(name.clone()))
    }

    pub fn has_group(&self, name: &Name) -> bool {
        self.groups.contains_key(name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn item(&self, serial: Serial) -> Result<&Item, Error> {
        self.items.get(&serial).ok_or(Error::ItemNotFound(serial))
    }

    pub fn has_item(&self, serial: Serial) -> bool {
        self.items.contains_key(&serial)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn behavior(&self, group: &Name, name: &Name) -> Result<&Behavior, Error> {
        self.behaviors
            .get(group, name)
            .ok_or_else(|| Error::BehaviorNotFound {
                group: group.clone(),
                name: name.clone(),
            })
    }

    pub fn behaviors(&self) -> &BehaviorTable {
        &self.behaviors
    }

    pub fn tags(&self) -> &TagStore {
        &self.tags
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn frame(&self, name: &Name) -> Result<&Frame, Error> {
        self.frames
            .get(name)
            .ok_or_else(|| Error::FrameNotFound(name.clone()))
    }

    pub fn has_frame(&self, name: &Name) -> bool {
        self.frames.contains_key(name)
    }

    // =========================================================================
    // Commit steps (infallible; operation layer validates first)
    // =========================================================================

    pub(crate) fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Write a new group and seed its five birth behaviors.
    pub(crate) fn commit_group(&mut self, group: Group) {
        let group_name = group.name.clone();
        self.groups.insert(group_name.clone(), group);
        for (gate, enabled) in Gate::birth_defaults() {
            self.behaviors
                .insert(group_name.clone(), gate.name(), Behavior::new(enabled));
        }
    }

    pub(crate) fn group_mut(&mut self, name: &Name) -> &mut Group {
        self.groups
            .get_mut(name)
            .unwrap_or_else(|| unreachable!("group validated before commit"))
    }

    pub(crate) fn behaviors_mut(&mut self) -> &mut BehaviorTable {
        &mut self.behaviors
    }

    /// Allocate the next serial and write the item; counters move in the
    /// same step so no caller can observe a gap.
    pub(crate) fn commit_mint(&mut self, group_name: &Name, owner: AccountId) -> Serial {
        let serial = self.config.allocate_serial();
        debug_assert!(!self.items.contains_key(&serial));
        self.items
            .insert(serial, Item::new(serial, group_name.clone(), owner));
        self.group_mut(group_name).record_mint();
        serial
    }

    pub(crate) fn commit_owner(&mut self, serial: Serial, owner: AccountId) {
        if let Some(item) = self.items.get_mut(&serial) {
            item.owner = owner;
        }
    }

    /// Erase an item and all metadata scoped to it. Counters untouched.
    pub(crate) fn commit_consume(&mut self, serial: Serial) {
        self.items.remove(&serial);
        self.purge_item_metadata(serial);
    }

    /// Erase an item, its metadata, and shrink the group's live supply.
    pub(crate) fn commit_destroy(&mut self, serial: Serial) {
        if let Some(item) = self.items.remove(&serial) {
            self.group_mut(&item.group).record_destroy();
        }
        self.purge_item_metadata(serial);
    }

    fn purge_item_metadata(&mut self, serial: Serial) {
        self.tags.purge_scope(&serial);
        self.attributes.purge_scope(&serial);
        self.events.purge_scope(&serial);
    }

    pub(crate) fn tags_mut(&mut self) -> &mut TagStore {
        &mut self.tags
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }

    pub(crate) fn events_mut(&mut self) -> &mut EventStore {
        &mut self.events
    }

    pub(crate) fn commit_frame(&mut self, frame: Frame) {
        self.frames.insert(frame.name.clone(), frame);
    }

    pub(crate) fn remove_frame(&mut self, name: &Name) {
        self.frames.remove(name);
    }
}

//! Operation layer: authorization, gate checks, and commit.
//!
//! Every public operation is one atomic unit. All validation and every
//! fallible host call happen before the first state write; the write phase
//! cannot fail, so an error always leaves state exactly as before the call.

use std::collections::BTreeMap;

use crate::core::{
    AccountId, Config, Error, Frame, Gate, Group, ItemEvent, Name, PointDirection, RegistryState,
    Serial, Tag, Timestamp,
};
use crate::core::{Attribute, Behavior};
use crate::host::{AuditRecord, Host, TransferNotice};
use crate::Result;

/// The registry: state plus the host it runs inside.
pub struct Registry<H: Host> {
    state: RegistryState,
    host: H,
}

impl<H: Host> Registry<H> {
    /// One-shot registry construction with contract metadata and the
    /// initial admin.
    pub fn init(
        contract_name: impl Into<String>,
        contract_version: impl Into<String>,
        admin: AccountId,
        host: H,
    ) -> Result<Self> {
        if !host.is_account(&admin) {
            return Err(Error::UnknownAccount(admin));
        }
        let config = Config::new(contract_name.into(), contract_version.into(), admin);
        Ok(Self {
            state: RegistryState::new(config),
            host,
        })
    }

    /// Rehydrate a registry from host-persisted state.
    pub fn from_state(state: RegistryState, host: H) -> Self {
        Self { state, host }
    }

    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_parts(self) -> (RegistryState, H) {
        (self.state, self.host)
    }

    // =========================================================================
    // Admin operations
    // =========================================================================

    pub fn set_version(&mut self, caller: &AccountId, new_version: impl Into<String>) -> Result<()> {
        self.require_admin(caller)?;
        self.state.config_mut().contract_version = new_version.into();
        Ok(())
    }

    pub fn set_admin(&mut self, caller: &AccountId, new_admin: AccountId) -> Result<()> {
        self.require_admin(caller)?;
        if !self.host.is_account(&new_admin) {
            return Err(Error::UnknownAccount(new_admin));
        }
        self.state.config_mut().admin = new_admin;
        Ok(())
    }

    // =========================================================================
    // Group operations
    // =========================================================================

    pub fn new_group(
        &mut self,
        caller: &AccountId,
        title: impl Into<String>,
        description: impl Into<String>,
        group_name: Name,
        manager: AccountId,
        supply_cap: u64,
    ) -> Result<()> {
        self.require_admin(caller)?;
        if self.state.has_group(&group_name) {
            return Err(Error::GroupExists(group_name));
        }
        if supply_cap == 0 {
            return Err(Error::ZeroSupplyCap);
        }
        if !self.host.is_account(&manager) {
            return Err(Error::UnknownAccount(manager));
        }

        tracing::info!("new group `{group_name}` managed by {manager}, cap {supply_cap}");
        self.state.commit_group(Group::new(
            group_name,
            title.into(),
            description.into(),
            manager,
            supply_cap,
        ));
        Ok(())
    }

    pub fn edit_group(
        &mut self,
        caller: &AccountId,
        group_name: &Name,
        new_title: impl Into<String>,
        new_description: impl Into<String>,
    ) -> Result<()> {
        self.require_manager(caller, group_name)?;
        let group = self.state.group_mut(group_name);
        group.title = new_title.into();
        group.description = new_description.into();
        Ok(())
    }

    pub fn set_manager(
        &mut self,
        caller: &AccountId,
        group_name: &Name,
        new_manager: AccountId,
        memo: &str,
    ) -> Result<()> {
        self.require_manager(caller, group_name)?;
        if !self.host.is_account(&new_manager) {
            return Err(Error::UnknownAccount(new_manager));
        }
        tracing::info!("group `{group_name}` manager set to {new_manager}: {memo}");
        self.state.group_mut(group_name).manager = new_manager;
        Ok(())
    }

    // =========================================================================
    // Behavior operations
    // =========================================================================

    pub fn add_behavior(
        &mut self,
        caller: &AccountId,
        group_name: &Name,
        behavior_name: Name,
        initial_state: bool,
    ) -> Result<()> {
        self.require_manager(caller, group_name)?;
        if self.state.behaviors().contains(group_name, &behavior_name) {
            return Err(Error::BehaviorExists {
                group: group_name.clone(),
                name: behavior_name,
            });
        }
        self.state
            .behaviors_mut()
            .insert(group_name.clone(), behavior_name, Behavior::new(initial_state));
        Ok(())
    }

    pub fn toggle(&mut self, caller: &AccountId, group_name: &Name, behavior_name: &Name) -> Result<()> {
        self.require_manager(caller, group_name)?;
        // Existence check first so the error carries the right kind.
        self.state.behavior(group_name, behavior_name)?;
        if let Some(behavior) = self.state.behaviors_mut().get_mut(group_name, behavior_name) {
            behavior.toggle();
        }
        Ok(())
    }

    pub fn remove_behavior(
        &mut self,
        caller: &AccountId,
        group_name: &Name,
        behavior_name: &Name,
    ) -> Result<()> {
        self.require_manager(caller, group_name)?;
        self.state.behavior(group_name, behavior_name)?;
        self.state.behaviors_mut().remove(group_name, behavior_name);
        Ok(())
    }

    // =========================================================================
    // Item lifecycle
    // =========================================================================

    /// Mint a fresh item into a group.
    ///
    /// Serial allocation, the item write, the counter updates, and the audit
    /// emission form one atomic step: no other action can observe a gap or a
    /// reused serial, and a rejected audit record commits nothing.
    pub fn mint(&mut self, caller: &AccountId, to: AccountId, group_name: &Name) -> Result<Serial> {
        self.require_manager(caller, group_name)?;
        self.require_gate(group_name, Gate::Mint)?;
        if !self.host.is_account(&to) {
            return Err(Error::UnknownAccount(to));
        }
        if self.state.group(group_name)?.at_cap() {
            return Err(Error::SupplyCapReached(group_name.clone()));
        }

        let now = self.host.now();
        let serial = self.state.config().peek_serial();
        self.host.record(AuditRecord::new_serial(serial, now))?;

        let allocated = self.state.commit_mint(group_name, to);
        debug_assert_eq!(allocated, serial);
        tracing::debug!("minted item {serial} in group `{group_name}`");
        Ok(serial)
    }

    /// Reassign ownership of every listed serial, all-or-nothing.
    ///
    /// The caller must be the current owner of each item; one missing,
    /// unauthorized, or non-transferable serial fails the whole call with no
    /// owner changed. Both parties are notified on success.
    pub fn transfer(
        &mut self,
        caller: &AccountId,
        from: &AccountId,
        to: AccountId,
        serials: &[Serial],
        memo: impl Into<String>,
    ) -> Result<()> {
        if !self.host.is_account(&to) {
            return Err(Error::UnknownAccount(to));
        }
        for &serial in serials {
            let item = self.state.item(serial)?;
            if item.owner != *caller {
                return Err(Error::NotOwner {
                    caller: caller.clone(),
                    serial,
                });
            }
            let group = item.group.clone();
            self.require_gate(&group, Gate::Transfer)?;
        }

        for &serial in serials {
            self.state.commit_owner(serial, to.clone());
        }
        let notice = TransferNotice {
            from: from.clone(),
            to: to.clone(),
            serials: serials.to_vec(),
            memo: memo.into(),
        };
        self.host.notify(from, &notice);
        self.host.notify(&to, &notice);
        tracing::debug!("transferred {} item(s) from {from} to {}", serials.len(), notice.to);
        Ok(())
    }

    /// Owner-authorized one-shot signal. Pure permission check: external
    /// observers of the call consume it, state does not change.
    pub fn activate(&mut self, caller: &AccountId, serial: Serial) -> Result<()> {
        let item = self.state.item(serial)?;
        if item.owner != *caller {
            return Err(Error::NotOwner {
                caller: caller.clone(),
                serial,
            });
        }
        let group = item.group.clone();
        self.require_gate(&group, Gate::Activate)
    }

    /// Owner-authorized erase. Leaves both supply counters untouched
    /// (asymmetric with destroy, preserved as observed).
    pub fn consume(&mut self, caller: &AccountId, serial: Serial) -> Result<()> {
        let item = self.state.item(serial)?;
        if item.owner != *caller {
            return Err(Error::NotOwner {
                caller: caller.clone(),
                serial,
            });
        }
        let group = item.group.clone();
        self.require_gate(&group, Gate::Consume)?;

        self.state.commit_consume(serial);
        tracing::debug!("consumed item {serial} from group `{group}`");
        Ok(())
    }

    /// Manager-authorized erase that shrinks the group's live supply.
    /// `issued_supply` is never decremented by any operation.
    pub fn destroy(&mut self, caller: &AccountId, serial: Serial, memo: &str) -> Result<()> {
        let group = self.state.item(serial)?.group.clone();
        self.require_manager(caller, &group)?;
        self.require_gate(&group, Gate::Destroy)?;
        if self.state.group(&group)?.supply() == 0 {
            return Err(Error::SupplyUnderflow(group));
        }

        self.state.commit_destroy(serial);
        tracing::debug!("destroyed item {serial} from group `{group}`: {memo}");
        Ok(())
    }

    // =========================================================================
    // Tags
    // =========================================================================

    pub fn new_tag(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        tag_name: Name,
        content: impl Into<String>,
        checksum: Option<String>,
        algorithm: Option<String>,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        if self.state.tags().contains(&serial, &tag_name) {
            return Err(Error::TagExists {
                serial,
                name: tag_name,
            });
        }
        self.state
            .tags_mut()
            .insert(serial, tag_name, Tag::new(content.into(), checksum, algorithm));
        Ok(())
    }

    pub fn update_tag(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        tag_name: &Name,
        new_content: impl Into<String>,
        new_checksum: Option<String>,
        new_algorithm: Option<String>,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        let tag = self
            .state
            .tags_mut()
            .get_mut(&serial, tag_name)
            .ok_or_else(|| Error::TagNotFound {
                serial,
                name: tag_name.clone(),
            })?;
        tag.update(new_content.into(), new_checksum, new_algorithm);
        Ok(())
    }

    pub fn remove_tag(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        tag_name: &Name,
        memo: &str,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        if self.state.tags_mut().remove(&serial, tag_name).is_none() {
            return Err(Error::TagNotFound {
                serial,
                name: tag_name.clone(),
            });
        }
        tracing::debug!("removed tag `{tag_name}` from item {serial}: {memo}");
        Ok(())
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn new_attribute(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        attribute_name: Name,
        initial_points: i64,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        if self.state.attributes().contains(&serial, &attribute_name) {
            return Err(Error::AttributeExists {
                serial,
                name: attribute_name,
            });
        }
        self.state
            .attributes_mut()
            .insert(serial, attribute_name, Attribute::new(initial_points));
        Ok(())
    }

    /// Absolute overwrite of an attribute's points.
    pub fn set_points(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        attribute_name: &Name,
        new_points: i64,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        let attr = self.attribute_mut(serial, attribute_name)?;
        attr.points = new_points;
        Ok(())
    }

    pub fn increase_points(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        attribute_name: &Name,
        points_to_add: u64,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        if points_to_add == 0 {
            return Err(Error::NonPositiveDelta {
                direction: PointDirection::Add,
            });
        }
        let attr = self.attribute_mut(serial, attribute_name)?;
        attr.points = attr.points.saturating_add_unsigned(points_to_add);
        Ok(())
    }

    pub fn decrease_points(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        attribute_name: &Name,
        points_to_subtract: u64,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        if points_to_subtract == 0 {
            return Err(Error::NonPositiveDelta {
                direction: PointDirection::Subtract,
            });
        }
        // No clamping at zero: points may go negative.
        let attr = self.attribute_mut(serial, attribute_name)?;
        attr.points = attr.points.saturating_sub_unsigned(points_to_subtract);
        Ok(())
    }

    pub fn remove_attribute(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        attribute_name: &Name,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        if self
            .state
            .attributes_mut()
            .remove(&serial, attribute_name)
            .is_none()
        {
            return Err(Error::AttributeNotFound {
                serial,
                name: attribute_name.clone(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn new_event(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        event_name: Name,
        custom_time: Option<Timestamp>,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        if self.state.events().contains(&serial, &event_name) {
            return Err(Error::EventExists {
                serial,
                name: event_name,
            });
        }
        let event_time = custom_time.unwrap_or_else(|| self.host.now());
        self.state
            .events_mut()
            .insert(serial, event_name, ItemEvent::new(event_time));
        Ok(())
    }

    /// Adds `new_time` to the stored event time (reference behavior,
    /// preserved as observed; there is no replace variant).
    pub fn set_event_time(
        &mut self,
        caller: &AccountId,
        serial: Serial,
        event_name: &Name,
        new_time: Timestamp,
    ) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        let event = self
            .state
            .events_mut()
            .get_mut(&serial, event_name)
            .ok_or_else(|| Error::EventNotFound {
                serial,
                name: event_name.clone(),
            })?;
        event.add_time(new_time);
        Ok(())
    }

    pub fn remove_event(&mut self, caller: &AccountId, serial: Serial, event_name: &Name) -> Result<()> {
        self.require_item_manager(caller, serial)?;
        if self.state.events_mut().remove(&serial, event_name).is_none() {
            return Err(Error::EventNotFound {
                serial,
                name: event_name.clone(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Frames
    // =========================================================================

    pub fn new_frame(
        &mut self,
        caller: &AccountId,
        frame_name: Name,
        group_name: &Name,
        default_tags: BTreeMap<Name, String>,
        default_attributes: BTreeMap<Name, i64>,
    ) -> Result<()> {
        self.require_manager(caller, group_name)?;
        if self.state.has_frame(&frame_name) {
            return Err(Error::FrameExists(frame_name));
        }
        self.state.commit_frame(Frame::new(
            frame_name,
            group_name.clone(),
            default_tags,
            default_attributes,
        ));
        Ok(())
    }

    /// Apply a frame's defaults onto an item.
    ///
    /// Per default entry: create when absent (tags with empty
    /// checksum/algorithm); overwrite an existing entry only when
    /// `overwrite` is set, otherwise leave it untouched. Entries target
    /// disjoint keys, so iteration order is insignificant.
    pub fn apply_frame(
        &mut self,
        caller: &AccountId,
        frame_name: &Name,
        serial: Serial,
        overwrite: bool,
    ) -> Result<()> {
        let frame = self.state.frame(frame_name)?.clone();
        self.require_manager(caller, &frame.group)?;
        self.state.item(serial)?;

        // Creating and overwriting produce the same value (frame defaults
        // carry no checksum/algorithm), so both reduce to one insert.
        for (name, content) in frame.default_tags {
            if overwrite || !self.state.tags().contains(&serial, &name) {
                self.state
                    .tags_mut()
                    .insert(serial, name, Tag::new(content, None, None));
            }
        }
        for (name, points) in frame.default_attributes {
            if overwrite || !self.state.attributes().contains(&serial, &name) {
                self.state
                    .attributes_mut()
                    .insert(serial, name, Attribute::new(points));
            }
        }
        tracing::debug!("applied frame `{frame_name}` to item {serial} (overwrite: {overwrite})");
        Ok(())
    }

    pub fn remove_frame(&mut self, caller: &AccountId, frame_name: &Name, memo: &str) -> Result<()> {
        let group = self.state.frame(frame_name)?.group.clone();
        self.require_manager(caller, &group)?;
        self.state.remove_frame(frame_name);
        tracing::debug!("removed frame `{frame_name}`: {memo}");
        Ok(())
    }

    // =========================================================================
    // Shared checks
    // =========================================================================

    fn require_admin(&self, caller: &AccountId) -> Result<()> {
        if self.state.config().admin != *caller {
            return Err(Error::NotAdmin {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    fn require_manager(&self, caller: &AccountId, group_name: &Name) -> Result<()> {
        let group = self.state.group(group_name)?;
        if group.manager != *caller {
            return Err(Error::NotManager {
                caller: caller.clone(),
                group: group_name.clone(),
            });
        }
        Ok(())
    }

    /// Manager authorization through an item: the item must exist and the
    /// caller must manage its group. Owners hold no metadata rights.
    fn require_item_manager(&self, caller: &AccountId, serial: Serial) -> Result<()> {
        let group = self.state.item(serial)?.group.clone();
        self.require_manager(caller, &group)
    }

    /// Present-but-disabled and absent gates are distinct failures.
    fn require_gate(&self, group_name: &Name, gate: Gate) -> Result<()> {
        let behavior = self.state.behavior(group_name, &gate.name())?;
        if !behavior.enabled {
            return Err(Error::GateDisabled {
                group: group_name.clone(),
                gate,
            });
        }
        Ok(())
    }

    fn attribute_mut(&mut self, serial: Serial, name: &Name) -> Result<&mut Attribute> {
        self.state
            .attributes_mut()
            .get_mut(&serial, name)
            .ok_or_else(|| Error::AttributeNotFound {
                serial,
                name: name.clone(),
            })
    }
}

//! Layer 3: Groups
//!
//! A group is a named asset class: manager, descriptive text, and supply
//! accounting against a fixed cap.

use serde::{Deserialize, Serialize};

use super::identity::{AccountId, Name};

/// A named asset class.
///
/// INVARIANT: `supply <= supply_cap` and `issued_supply >= supply`;
/// `issued_supply` never decreases. Both counters move only through the
/// narrow mutators below, in lockstep with item writes in the state layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: Name,
    pub title: String,
    pub description: String,
    pub manager: AccountId,
    supply: u64,
    issued_supply: u64,
    supply_cap: u64,
}

impl Group {
    pub fn new(
        name: Name,
        title: String,
        description: String,
        manager: AccountId,
        supply_cap: u64,
    ) -> Self {
        Self {
            name,
            title,
            description,
            manager,
            supply: 0,
            issued_supply: 0,
            supply_cap,
        }
    }

    /// Current live item count.
    pub fn supply(&self) -> u64 {
        self.supply
    }

    /// Cumulative ever-minted count. Monotone.
    pub fn issued_supply(&self) -> u64 {
        self.issued_supply
    }

    pub fn supply_cap(&self) -> u64 {
        self.supply_cap
    }

    pub fn at_cap(&self) -> bool {
        self.supply >= self.supply_cap
    }

    /// Record a mint: both counters move together.
    pub(crate) fn record_mint(&mut self) {
        debug_assert!(self.supply < self.supply_cap);
        self.supply += 1;
        self.issued_supply += 1;
    }

    /// Record a destroy: live supply shrinks, issued supply stays.
    pub(crate) fn record_destroy(&mut self) {
        debug_assert!(self.supply > 0);
        self.supply -= 1;
    }
}

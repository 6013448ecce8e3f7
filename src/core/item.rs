//! Layer 4: Items
//!
//! A uniquely serialized unit belonging to a group, with a current owner.

use serde::{Deserialize, Serialize};

use super::identity::{AccountId, Name, Serial};

/// One minted item. Serial and group are fixed at mint; only the owner
/// changes (via transfer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub serial: Serial,
    pub group: Name,
    pub owner: AccountId,
}

impl Item {
    pub fn new(serial: Serial, group: Name, owner: AccountId) -> Self {
        Self {
            serial,
            group,
            owner,
        }
    }
}

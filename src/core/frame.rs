//! Layer 6: Frames
//!
//! A frame is a named, reusable bundle of default tag/attribute values tied
//! to a group, batch-applied onto items by the group's manager.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::identity::Name;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub name: Name,
    pub group: Name,
    pub default_tags: BTreeMap<Name, String>,
    pub default_attributes: BTreeMap<Name, i64>,
}

impl Frame {
    pub fn new(
        name: Name,
        group: Name,
        default_tags: BTreeMap<Name, String>,
        default_attributes: BTreeMap<Name, i64>,
    ) -> Self {
        Self {
            name,
            group,
            default_tags,
            default_attributes,
        }
    }
}

#![forbid(unsafe_code)]

//! Asset-provenance registry.
//!
//! An admin mints uniquely-serialized items into named groups. Each group
//! carries a manager, supply accounting against a fixed cap, and a table of
//! named boolean behaviors gating the item lifecycle (mint, transfer,
//! activate, consume, destroy). Items carry scoped metadata (tags,
//! attributes, events); frames batch-apply metadata defaults.
//!
//! The host provides identity checks, the clock, signature verification (a
//! verified `caller` is passed into every operation), and an audit sink; see
//! [`host::Host`]. Execution is single-operation-at-a-time: each operation
//! either commits fully or leaves state untouched.

pub mod core;
pub mod host;
pub mod registry;

pub use crate::core::{Error, ErrorKind};
pub type Result<T> = std::result::Result<T, Error>;

// Re-export the working surface at the crate root for convenience.
pub use crate::core::{
    AccountId, Attribute, Behavior, Config, Frame, Gate, Group, InvalidName, Item, ItemEvent,
    Name, PointDirection, RegistryState, Serial, Tag, Timestamp,
};
pub use crate::host::{AuditError, AuditRecord, Host, TransferNotice};
pub use crate::registry::Registry;

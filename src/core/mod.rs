//! Core domain types for the registry
//!
//! Module hierarchy follows type dependency order:
//! - time: Timestamp (Layer 0)
//! - identity: Name, AccountId, Serial (Layer 1)
//! - behavior: Behavior, Gate (Layer 2)
//! - group: Group (Layer 3)
//! - item: Item (Layer 4)
//! - metadata: Tag, Attribute, ItemEvent (Layer 5)
//! - frame: Frame (Layer 6)
//! - config: Config (Layer 7)
//! - stores: scoped composite-key tables (Layer 8)
//! - state: RegistryState (Layer 9)

pub mod behavior;
pub mod config;
pub mod error;
pub mod frame;
pub mod group;
pub mod identity;
pub mod item;
pub mod metadata;
pub mod state;
pub mod stores;
pub mod time;

pub use behavior::{Behavior, Gate};
pub use config::Config;
pub use error::{Error, ErrorKind, InvalidName, PointDirection};
pub use frame::Frame;
pub use group::Group;
pub use identity::{AccountId, Name, Serial};
pub use item::Item;
pub use metadata::{Attribute, ItemEvent, Tag};
pub use state::RegistryState;
pub use stores::{AttributeStore, BehaviorTable, EventStore, ScopedStore, TagStore};
pub use time::Timestamp;

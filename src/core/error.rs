//! Registry errors.
//!
//! Every failure aborts the whole enclosing operation; no partial writes are
//! ever committed and nothing retries at this layer. Each error carries a
//! human-readable reason and classifies into one of four categories via
//! [`Error::kind`] so callers can distinguish, e.g., a missing behavior from
//! a present-but-disabled one.

use thiserror::Error;

use super::behavior::Gate;
use super::identity::{AccountId, Name, Serial};
use crate::host::AuditError;

/// The four error categories of the operation surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong signer for the operation's required role.
    Authorization,
    /// A referenced group/item/behavior/tag/attribute/event/frame is absent.
    NotFound,
    /// An input or a counter guard rejected the operation.
    Validation,
    /// A name or serial is already taken in its scope.
    Conflict,
}

/// Malformed name or account string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidName {
    #[error("account `{raw}` is invalid: {reason}")]
    Account { raw: String, reason: String },
    #[error("name `{raw}` is invalid: {reason}")]
    Entry { raw: String, reason: String },
}

/// Whether a point delta adds or subtracts; only used for error reporting.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointDirection {
    Add,
    Subtract,
}

impl PointDirection {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    // --- authorization ---
    #[error("`{caller}` is not the registry admin")]
    NotAdmin { caller: AccountId },
    #[error("`{caller}` is not the manager of group `{group}`")]
    NotManager { caller: AccountId, group: Name },
    #[error("`{caller}` is not the owner of item {serial}")]
    NotOwner { caller: AccountId, serial: Serial },

    // --- not found ---
    #[error("group not found: `{0}`")]
    GroupNotFound(Name),
    #[error("item not found: {0}")]
    ItemNotFound(Serial),
    #[error("behavior not found: `{name}` in group `{group}`")]
    BehaviorNotFound { group: Name, name: Name },
    #[error("tag not found on item {serial}: `{name}`")]
    TagNotFound { serial: Serial, name: Name },
    #[error("attribute not found on item {serial}: `{name}`")]
    AttributeNotFound { serial: Serial, name: Name },
    #[error("event not found on item {serial}: `{name}`")]
    EventNotFound { serial: Serial, name: Name },
    #[error("frame not found: `{0}`")]
    FrameNotFound(Name),

    // --- validation ---
    #[error(transparent)]
    InvalidName(#[from] InvalidName),
    #[error("account doesn't exist: `{0}`")]
    UnknownAccount(AccountId),
    #[error("supply cap must be greater than zero")]
    ZeroSupplyCap,
    #[error("supply cap reached for group `{0}`")]
    SupplyCapReached(Name),
    #[error("cannot reduce supply below zero for group `{0}`")]
    SupplyUnderflow(Name),
    /// The gate behavior exists but is switched off. Distinct from
    /// [`Error::BehaviorNotFound`], which means the gate entry was removed.
    #[error("item is not {}", .gate.refusal())]
    GateDisabled { group: Name, gate: Gate },
    #[error("must {} greater than zero points", .direction.verb())]
    NonPositiveDelta { direction: PointDirection },
    #[error("audit sink rejected record: {0}")]
    Audit(#[from] AuditError),

    // --- conflict ---
    #[error("group name already taken: `{0}`")]
    GroupExists(Name),
    #[error("behavior already exists: `{name}` in group `{group}`")]
    BehaviorExists { group: Name, name: Name },
    #[error("tag name already exists on item {serial}: `{name}`")]
    TagExists { serial: Serial, name: Name },
    #[error("attribute name already exists for item {serial}: `{name}`")]
    AttributeExists { serial: Serial, name: Name },
    #[error("event already exists on item {serial}: `{name}`")]
    EventExists { serial: Serial, name: Name },
    #[error("frame already exists: `{0}`")]
    FrameExists(Name),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotAdmin { .. } | Error::NotManager { .. } | Error::NotOwner { .. } => {
                ErrorKind::Authorization
            }

            Error::GroupNotFound(_)
            | Error::ItemNotFound(_)
            | Error::BehaviorNotFound { .. }
            | Error::TagNotFound { .. }
            | Error::AttributeNotFound { .. }
            | Error::EventNotFound { .. }
            | Error::FrameNotFound(_) => ErrorKind::NotFound,

            Error::InvalidName(_)
            | Error::UnknownAccount(_)
            | Error::ZeroSupplyCap
            | Error::SupplyCapReached(_)
            | Error::SupplyUnderflow(_)
            | Error::GateDisabled { .. }
            | Error::NonPositiveDelta { .. }
            | Error::Audit(_) => ErrorKind::Validation,

            Error::GroupExists(_)
            | Error::BehaviorExists { .. }
            | Error::TagExists { .. }
            | Error::AttributeExists { .. }
            | Error::EventExists { .. }
            | Error::FrameExists(_) => ErrorKind::Conflict,
        }
    }
}

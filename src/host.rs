//! Host collaborator seam.
//!
//! The registry runs inside a host that owns identity existence checks,
//! signature verification, the clock, and an append-only audit sink.
//! Signature verification never reaches this crate: operations receive an
//! already-verified `caller` and the registry only decides whether that
//! identity holds the required role.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::{AccountId, Name, Serial};
use crate::core::time::Timestamp;

/// The audit sink refused a record. Aborts the enclosing operation; the
/// registry commits nothing when emission fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct AuditError {
    pub reason: String,
}

impl AuditError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One queryable history entry, emitted through the host's audit sink as
/// part of the triggering operation's atomic unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub event_name: Name,
    pub event_value: i64,
    pub event_time: Timestamp,
    pub memo: String,
}

impl AuditRecord {
    /// The record a successful mint emits.
    pub fn new_serial(serial: Serial, time: Timestamp) -> Self {
        Self {
            // "newserial" is in-alphabet; parse cannot fail.
            event_name: Name::parse("newserial").unwrap_or_else(|_| unreachable!()),
            event_value: serial.get() as i64,
            event_time: time,
            memo: format!("serial: {serial}"),
        }
    }
}

/// Observable side effect of a transfer, delivered to both parties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferNotice {
    pub from: AccountId,
    pub to: AccountId,
    pub serials: Vec<Serial>,
    pub memo: String,
}

/// External collaborators the registry consumes.
pub trait Host {
    /// Whether the identity exists in the host's account space.
    fn is_account(&self, account: &AccountId) -> bool;

    /// Current wall time.
    fn now(&self) -> Timestamp;

    /// Append a record to the audit history. Fallible: a rejected record
    /// rolls back the whole operation that produced it.
    fn record(&mut self, record: AuditRecord) -> Result<(), AuditError>;

    /// Notify a party about a transfer. Fire-and-forget.
    fn notify(&mut self, recipient: &AccountId, notice: &TransferNotice);
}

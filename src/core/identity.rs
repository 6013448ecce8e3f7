//! Layer 1: Identity atoms
//!
//! Name: scoped entry identifier (groups, behaviors, tags, attributes,
//! events, frames)
//! AccountId: actor identity (admin, managers, owners)
//! Serial: globally unique item number

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{Error, InvalidName};

/// Names and accounts share one alphabet: lowercase `a-z`, digits `1-5`,
/// and `.`, between 1 and 12 characters.
const NAME_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz12345.";

const NAME_MAX_LEN: usize = 12;

fn check_name(raw: &str) -> Result<(), String> {
    if raw.is_empty() {
        return Err("empty".into());
    }
    if raw.len() > NAME_MAX_LEN {
        return Err(format!("longer than {NAME_MAX_LEN} characters"));
    }
    match raw.chars().find(|c| !NAME_ALPHABET.contains(*c)) {
        Some(c) => Err(format!("invalid character `{c}`")),
        None => Ok(()),
    }
}

/// Scoped entry name.
///
/// Uniqueness is per scope (group for behaviors, item serial for
/// tags/attributes/events, global for groups and frames); the name itself
/// only guarantees well-formedness.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Parse and validate an entry name.
    pub fn parse(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        match check_name(&s) {
            Ok(()) => Ok(Self(s)),
            Err(reason) => Err(InvalidName::Entry { raw: s, reason }.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Actor identity.
///
/// Well-formedness is checked here; whether the account actually exists is
/// the host's call (`Host::is_account`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Parse and validate an account identity.
    pub fn parse(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        match check_name(&s) {
            Ok(()) => Ok(Self(s)),
            Err(reason) => Err(InvalidName::Account { raw: s, reason }.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({:?})", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally unique item number.
///
/// Allocated from a single monotone counter in the config singleton;
/// strictly increasing from 1 across all groups and never reused.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Serial(u64);

impl Serial {
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The next serial in allocation order.
    pub const fn next(&self) -> Serial {
        Serial(self.0 + 1)
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

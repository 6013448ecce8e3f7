//! Layer 0: Time primitives
//!
//! Timestamp: second-resolution wall time, sourced from the host clock.

use serde::{Deserialize, Serialize};

/// Wall-clock seconds since the Unix epoch.
///
/// The registry never reads the system clock itself; every timestamp comes
/// through the host's clock so tests stay deterministic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Sum of two timestamps, saturating at the representable maximum.
    ///
    /// Event times are updated additively (`set_event_time` adds the given
    /// value to the stored one), so addition of two timestamps is a real
    /// operation here, not a convenience.
    pub const fn saturating_add(self, other: Timestamp) -> Timestamp {
        Timestamp(self.0.saturating_add(other.0))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_add_caps_at_max() {
        let near_max = Timestamp::from_secs(u64::MAX - 1);
        let sum = near_max.saturating_add(Timestamp::from_secs(10));
        assert_eq!(sum.as_secs(), u64::MAX);
    }

    #[test]
    fn add_is_plain_sum_below_max() {
        let a = Timestamp::from_secs(1_600_000_000);
        let b = Timestamp::from_secs(3_600);
        assert_eq!(a.saturating_add(b).as_secs(), 1_600_003_600);
    }
}

//! Layer 7: Registry config singleton
//!
//! Contract metadata, the admin identity, and the last-issued serial.

use serde::{Deserialize, Serialize};

use super::identity::{AccountId, Serial};

/// Singleton configuration record.
///
/// `last_serial` is the single allocation counter behind every serial in the
/// registry; it only moves through [`Config::allocate_serial`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub contract_name: String,
    pub contract_version: String,
    pub admin: AccountId,
    last_serial: Serial,
}

impl Config {
    pub fn new(contract_name: String, contract_version: String, admin: AccountId) -> Self {
        Self {
            contract_name,
            contract_version,
            admin,
            last_serial: Serial::new(0),
        }
    }

    pub fn last_serial(&self) -> Serial {
        self.last_serial
    }

    /// The serial the next mint will receive.
    pub fn peek_serial(&self) -> Serial {
        self.last_serial.next()
    }

    /// Advance the counter and return the freshly allocated serial.
    pub(crate) fn allocate_serial(&mut self) -> Serial {
        self.last_serial = self.last_serial.next();
        self.last_serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials_start_at_one_and_increase() {
        let mut conf = Config::new("registry".into(), "v0.1.0".into(), AccountId::parse("admin").unwrap());
        assert_eq!(conf.allocate_serial(), Serial::new(1));
        assert_eq!(conf.allocate_serial(), Serial::new(2));
        assert_eq!(conf.last_serial(), Serial::new(2));
        assert_eq!(conf.peek_serial(), Serial::new(3));
    }
}

//! Layer 2: Behaviors
//!
//! Behavior: named boolean capability flag scoped to a group
//! Gate: the five well-known lifecycle gates

use serde::{Deserialize, Serialize};

use super::identity::Name;

/// A capability flag. Lives in a group's scope under a unique name.
///
/// Absence of an entry and an entry with `enabled == false` are different
/// states and produce different errors at the gate check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    pub enabled: bool,
}

impl Behavior {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Flip the flag in place.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

/// Lifecycle gates looked up by fixed names.
///
/// Managers may add behaviors under any free name, but only these five are
/// consulted by lifecycle operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    Mint,
    Transfer,
    Activate,
    Consume,
    Destroy,
}

impl Gate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mint => "mint",
            Self::Transfer => "transfer",
            Self::Activate => "activate",
            Self::Consume => "consume",
            Self::Destroy => "destroy",
        }
    }

    /// The behavior name this gate is stored under.
    pub fn name(&self) -> Name {
        // Gate names are in-alphabet and short, so parsing cannot fail.
        Name::parse(self.as_str()).unwrap_or_else(|_| unreachable!("gate names are valid"))
    }

    /// Adjective used in the disabled-gate refusal message.
    pub fn refusal(&self) -> &'static str {
        match self {
            Self::Mint => "mintable",
            Self::Transfer => "transferable",
            Self::Activate => "activatable",
            Self::Consume => "consumable",
            Self::Destroy => "destroyable",
        }
    }

    /// The five defaults seeded when a group is created.
    pub fn birth_defaults() -> [(Gate, bool); 5] {
        [
            (Gate::Mint, true),
            (Gate::Transfer, true),
            (Gate::Activate, false),
            (Gate::Consume, false),
            (Gate::Destroy, true),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let mut b = Behavior::new(false);
        b.toggle();
        assert!(b.enabled);
        b.toggle();
        assert!(!b.enabled);
    }

    #[test]
    fn birth_defaults_match_lifecycle_policy() {
        let defaults: std::collections::BTreeMap<_, _> = Gate::birth_defaults()
            .into_iter()
            .map(|(g, s)| (g.as_str(), s))
            .collect();
        assert_eq!(defaults["mint"], true);
        assert_eq!(defaults["transfer"], true);
        assert_eq!(defaults["activate"], false);
        assert_eq!(defaults["consume"], false);
        assert_eq!(defaults["destroy"], true);
    }

    #[test]
    fn gate_names_parse() {
        for (gate, _) in Gate::birth_defaults() {
            assert_eq!(gate.name().as_str(), gate.as_str());
        }
    }
}

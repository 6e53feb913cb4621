//! Traffic light phase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two states of a traffic light.
///
/// Transitions replace the value; a `Phase` is never mutated in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Stop. Every light starts here.
    #[default]
    Red,
    /// Go.
    Green,
}

impl Phase {
    /// Returns the opposite phase.
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Red,
        }
    }

    /// Returns true for [`Phase::Green`].
    #[inline]
    #[must_use]
    pub const fn is_green(self) -> bool {
        matches!(self, Self::Green)
    }

    /// Returns true for [`Phase::Red`].
    #[inline]
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Green => "green",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_red() {
        assert_eq!(Phase::default(), Phase::Red);
    }

    #[test]
    fn test_toggle_alternates() {
        assert_eq!(Phase::Red.toggled(), Phase::Green);
        assert_eq!(Phase::Green.toggled(), Phase::Red);
        assert_eq!(Phase::Red.toggled().toggled(), Phase::Red);
    }

    #[test]
    fn test_predicates() {
        assert!(Phase::Green.is_green());
        assert!(!Phase::Green.is_red());
        assert!(Phase::Red.is_red());
    }

    #[test]
    fn test_display_and_serde_names_match() {
        #[derive(Deserialize)]
        struct Doc {
            phase: Phase,
        }

        for phase in [Phase::Red, Phase::Green] {
            let doc: Doc = toml::from_str(&format!("phase = \"{phase}\"")).unwrap();
            assert_eq!(doc.phase, phase);
        }
        assert!(toml::from_str::<Doc>("phase = \"amber\"").is_err());
    }
}

//! Mode string -> axis removal policy.
//!
//! | mode    | forward (Z) | lateral (X) | upward (Y) |
//! |---------|-------------|-------------|------------|
//! | forward | yes         |             |            |
//! | lateral |             | yes         |            |
//! | both    | yes         | yes         |            |
//! | all     | yes         | yes         | yes        |
//!
//! Any other string removes nothing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InPlaceError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Forward,
    Lateral,
    #[default]
    Both,
    All,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Forward, Mode::Lateral, Mode::Both, Mode::All];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Forward => "forward",
            Mode::Lateral => "lateral",
            Mode::Both => "both",
            Mode::All => "all",
        }
    }

    /// One-line description for usage text.
    pub fn describe(self) -> &'static str {
        match self {
            Mode::Forward => "Remove forward movement only",
            Mode::Lateral => "Remove lateral movement only",
            Mode::Both => "Remove both forward and lateral (default)",
            Mode::All => "Remove forward, lateral, and upward",
        }
    }

    pub fn policy(self) -> AxisRemovalPolicy {
        match self {
            Mode::Forward => AxisRemovalPolicy::new(true, false, false),
            Mode::Lateral => AxisRemovalPolicy::new(false, true, false),
            Mode::Both => AxisRemovalPolicy::new(true, true, false),
            Mode::All => AxisRemovalPolicy::new(true, true, true),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = InPlaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| InPlaceError::UnrecognizedMode { mode: s.to_string() })
    }
}

/// Which translation axes of the root bone get flattened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisRemovalPolicy {
    /// Z
    pub remove_forward: bool,
    /// X
    pub remove_lateral: bool,
    /// Y; when false the initial height is held instead.
    pub remove_upward: bool,
}

impl AxisRemovalPolicy {
    pub const NONE: AxisRemovalPolicy = AxisRemovalPolicy::new(false, false, false);

    pub const fn new(remove_forward: bool, remove_lateral: bool, remove_upward: bool) -> Self {
        Self {
            remove_forward,
            remove_lateral,
            remove_upward,
        }
    }

    #[inline]
    pub fn removes_anything(&self) -> bool {
        self.remove_forward || self.remove_lateral || self.remove_upward
    }
}

/// Map a mode string to its policy. Unrecognized modes yield
/// [`AxisRemovalPolicy::NONE`].
pub fn resolve_policy(mode: &str) -> AxisRemovalPolicy {
    match mode.parse::<Mode>() {
        Ok(m) => m.policy(),
        Err(_) => {
            log::warn!("unrecognized mode '{mode}'; no axes will be removed");
            AxisRemovalPolicy::NONE
        }
    }
}

/// Like [`resolve_policy`] but rejects unrecognized modes.
pub fn resolve_policy_strict(mode: &str) -> Result<AxisRemovalPolicy, InPlaceError> {
    mode.parse::<Mode>().map(Mode::policy)
}

//! Run configuration for inplace-core.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InPlaceError;

/// Name fragments identifying a root bone, in priority order.
pub const DEFAULT_ROOT_BONE_CANDIDATES: [&str; 4] = ["Hips", "mixamorig:Hips", "Root", "root"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Case-insensitive name fragments the locator accepts.
    pub root_bone_candidates: Vec<String>,
    /// Reject unrecognized modes instead of treating them as "remove nothing".
    pub strict_mode: bool,
    /// Pretty-print the saved document.
    pub pretty_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_bone_candidates: DEFAULT_ROOT_BONE_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strict_mode: false,
            pretty_output: false,
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, InPlaceError> {
        let text = std::fs::read_to_string(path).map_err(|e| InPlaceError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(s: &str) -> Result<Self, InPlaceError> {
        let cfg: Config = serde_json::from_str(s).map_err(|e| InPlaceError::Config {
            reason: e.to_string(),
        })?;
        if cfg.root_bone_candidates.iter().all(|c| c.trim().is_empty()) {
            return Err(InPlaceError::Config {
                reason: "root_bone_candidates must contain at least one non-empty name".into(),
            });
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json_str(r#"{ "strict_mode": true }"#).unwrap();
        assert!(cfg.strict_mode);
        assert_eq!(cfg.root_bone_candidates, Config::default().root_bone_candidates);
    }

    #[test]
    fn empty_candidate_list_is_rejected() {
        let err = Config::from_json_str(r#"{ "root_bone_candidates": [] }"#).unwrap_err();
        assert!(matches!(err, InPlaceError::Config { .. }));
    }
}

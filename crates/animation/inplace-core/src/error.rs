//! Error taxonomy for an in-place run.

use std::path::PathBuf;

use inplace_scene::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InPlaceError {
    /// The input document could not be opened or parsed.
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// No node in the hierarchy looks like a root bone.
    #[error("could not find root bone (tried {candidates:?})")]
    RootBoneNotFound { candidates: Vec<String> },

    /// The scene has no animation stack.
    #[error("no animation found in scene")]
    NoAnimation,

    /// The first animation stack has no layer.
    #[error("no animation layer found in stack '{stack}'")]
    NoAnimationLayer { stack: String },

    /// Only raised by strict policy resolution.
    #[error("unrecognized mode '{mode}' (expected forward, lateral, both or all)")]
    UnrecognizedMode { mode: String },

    /// The edited scene could not be written.
    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl InPlaceError {
    /// Short category label for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Load { .. } | Self::Save { .. } => "io",
            Self::RootBoneNotFound { .. } => "skeleton",
            Self::NoAnimation | Self::NoAnimationLayer { .. } => "animation",
            Self::UnrecognizedMode { .. } | Self::Config { .. } => "configuration",
        }
    }

    /// Whether the scene was already edited in memory when this was raised.
    #[inline]
    pub fn after_edit(&self) -> bool {
        matches!(self, Self::Save { .. })
    }

    /// Follow-up advice for the user, when there is any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::RootBoneNotFound { .. } => Some(
                "Make sure this is a Mixamo-style rig. Try running with --debug to see the scene hierarchy.",
            ),
            Self::Load { .. } => Some("Check that the input path exists and is a scene document."),
            _ => None,
        }
    }
}

//! Errors raised by the scene document layer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DocumentError {
    /// The file could not be read or written.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a well-formed scene document.
    #[error("scene document parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The scene could not be encoded.
    #[error("scene document serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The document parsed but violates a scene invariant.
    #[error("invalid scene: {reason}")]
    Invalid { reason: String },
}

impl DocumentError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short category label for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Parse(_) | Self::Serialize(_) => "serialization",
            Self::Invalid { .. } => "validation",
        }
    }
}

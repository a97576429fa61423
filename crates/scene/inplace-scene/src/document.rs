//! Loading and persisting scene documents.
//!
//! Saves are atomic: the encoded scene goes to a sibling temporary file which
//! is renamed over the destination only after it has been fully written.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::DocumentError;
use crate::scene::Scene;

/// Storage boundary for scene documents.
pub trait DocumentAdapter {
    fn load(&self, path: &Path) -> Result<Scene, DocumentError>;
    fn save(&self, scene: &Scene, path: &Path) -> Result<(), DocumentError>;
}

/// JSON scene documents on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocument {
    /// Pretty-print on save.
    pub pretty: bool,
}

impl JsonDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn to_string(&self, scene: &Scene) -> Result<String, DocumentError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(scene)
        } else {
            serde_json::to_string(scene)
        };
        encoded.map_err(DocumentError::Serialize)
    }
}

/// Parse and validate a scene from JSON text.
pub fn parse_scene_json(s: &str) -> Result<Scene, DocumentError> {
    let scene: Scene = serde_json::from_str(s).map_err(DocumentError::Parse)?;
    scene.validate()?;
    Ok(scene)
}

impl DocumentAdapter for JsonDocument {
    fn load(&self, path: &Path) -> Result<Scene, DocumentError> {
        let text = fs::read_to_string(path).map_err(|e| DocumentError::io(path, e))?;
        let scene = parse_scene_json(&text)?;
        log::debug!(
            "loaded scene '{}' from {} ({} nodes, {} stacks)",
            scene.name,
            path.display(),
            scene.root.subtree_len(),
            scene.stack_count()
        );
        Ok(scene)
    }

    fn save(&self, scene: &Scene, path: &Path) -> Result<(), DocumentError> {
        let text = self.to_string(scene)?;
        write_atomic(path, text.as_bytes())?;
        log::debug!("saved scene '{}' to {}", scene.name, path.display());
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Write `bytes` to `path` via temp file + rename. On failure the temp file
/// is removed and `path` is left as it was.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DocumentError> {
    let tmp = temp_path_for(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, path)
    })();
    if let Err(e) = result {
        if tmp.exists() {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                log::warn!("could not remove {}: {cleanup}", tmp.display());
            }
        }
        return Err(DocumentError::io(path, e));
    }
    Ok(())
}

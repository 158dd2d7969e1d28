//! File-backed [`LoWriter`]: each key becomes `<output_dir>/<key>.json`.
//!
//! Keys may contain `/`, which maps to subdirectories. Writing a key again
//! replaces the file, so the last write wins.

use async_trait::async_trait;
use lo_tree_core::contract::LoWriter;
use lo_tree_core::error::CollaboratorError;
use serde_json::Value;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub struct FileLoWriter {
    output_dir: PathBuf,
}

impl FileLoWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        FileLoWriter {
            output_dir: output_dir.into(),
        }
    }

    /// Where `key` is stored. Keys escaping the output directory are rejected.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CollaboratorError> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(format!("invalid record key {key:?}").into());
        }
        Ok(self.output_dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl LoWriter for FileLoWriter {
    async fn write_obj(&self, key: &str, value: Value) -> Result<(), CollaboratorError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                tracing::error!(error = ?e, path = %parent.display(), "Failed to create record directory");
                e
            })?;
        }
        let json = serde_json::to_string_pretty(&value)?;
        fs::write(&path, json).map_err(|e| {
            tracing::error!(error = ?e, path = %path.display(), "Failed to write record");
            e
        })?;
        tracing::debug!(key = %key, path = %path.display(), "Record written");
        Ok(())
    }
}

//! Reading and writing `mockup.json`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::descriptor_path;
use crate::error::{MockupError, Result};
use crate::types::MockupDescriptor;

/// Serialize a descriptor as pretty-printed JSON (two-space indent).
pub fn to_pretty_json(descriptor: &MockupDescriptor) -> Result<String> {
    serde_json::to_string_pretty(descriptor).map_err(|e| MockupError::Parse {
        message: format!("Failed to serialize descriptor: {}", e),
        help: None,
    })
}

/// Write the descriptor to `mockup.json` inside `folder`, replacing any
/// previous file. Returns the written path.
pub fn write_descriptor(folder: &Path, descriptor: &MockupDescriptor) -> Result<PathBuf> {
    let path = descriptor_path(folder);
    let json = to_pretty_json(descriptor)?;

    fs::write(&path, json).map_err(|e| MockupError::io(&path, "Failed to write descriptor", e))?;

    Ok(path)
}

/// Read a descriptor previously written by [`write_descriptor`].
pub fn read_descriptor(path: &Path) -> Result<MockupDescriptor> {
    let content = fs::read_to_string(path)
        .map_err(|e| MockupError::io(path, "Failed to read descriptor", e))?;

    serde_json::from_str(&content).map_err(|e| MockupError::Parse {
        message: format!("Invalid descriptor {}: {}", path.display(), e),
        help: Some("Re-run generation to rebuild mockup.json".to_string()),
    })
}

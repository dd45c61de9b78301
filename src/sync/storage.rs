//! Object storage and catalog seams.
//!
//! The publish protocol only needs a handful of operations from each
//! remote system, so both are traits and the Supabase adapters live in
//! their own module.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Remote object storage keyed by path-like strings.
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStorage {
    /// Store `bytes` at `key`, replacing any existing object.
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()>;

    /// Publicly reachable URL for `key`, if the backend exposes one.
    fn public_url(&self, key: &str) -> Result<Option<String>>;

    /// Remove the objects at `keys`.
    fn delete(&self, keys: &[String]) -> Result<()>;
}

/// Append-only store of published mockup records.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogStore {
    fn insert(&self, record: &CatalogRecord) -> Result<()>;
}

/// One catalog entry per published folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub file_size: String,
    pub file_type: String,
    pub author: String,
    pub is_editable: bool,
    /// The full descriptor, embedded as JSON.
    pub mockup_data: serde_json::Value,
    pub source_url: Option<String>,
    pub preview_url: Option<String>,
}

/// MIME type for an uploaded file, by extension.
pub fn content_type(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

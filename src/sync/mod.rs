//! Publishing generated mockups.
//!
//! A publish uploads every file in a mockup folder, then inserts one
//! catalog record that embeds the descriptor and points at the uploaded
//! beauty image. Uploads and the insert hit independent systems, so the
//! publish runs as a saga: each upload records an undo, and any failure
//! before the insert completes removes what was uploaded.

mod saga;
mod storage;
mod supabase;

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::PublishConfig;
use crate::descriptor::{read_descriptor, to_pretty_json};
use crate::discovery::{descriptor_path, folder_name, list_files};
use crate::error::{MockupError, Result};
use crate::types::MockupDescriptor;

pub use saga::{Compensation, Saga};
pub use storage::{content_type, CatalogRecord, CatalogStore, ObjectStorage};
pub use supabase::{SupabaseCatalog, SupabaseClient, SupabaseStorage};

#[cfg(test)]
pub use storage::{MockCatalogStore, MockObjectStorage};

/// MIME type recorded for catalog entries (the descriptor itself).
const RECORD_FILE_TYPE: &str = "application/json";

/// Result of publishing one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published {
        title: String,
        slug: String,
        uploaded: usize,
    },
    /// The folder has no descriptor.
    Skipped,
}

/// Title for a published mockup: the descriptor name, else the folder name.
///
/// Only an empty name falls back; the name is otherwise used as written.
pub fn publish_title(descriptor: &MockupDescriptor, folder_name: &str) -> String {
    if descriptor.global.name.is_empty() {
        folder_name.to_string()
    } else {
        descriptor.global.name.clone()
    }
}

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Lower-case `title` and replace each run of whitespace with one hyphen.
///
/// Leading and trailing whitespace become hyphens too.
pub fn slugify(title: &str) -> String {
    WHITESPACE.replace_all(&title.to_lowercase(), "-").into_owned()
}

/// Human-readable size in kilobytes, e.g. `"1.25 KB"`.
fn format_kb(bytes: usize) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Publishes mockup folders to object storage and the catalog.
pub struct SyncEngine<'a> {
    config: &'a PublishConfig,
    storage: &'a dyn ObjectStorage,
    catalog: &'a dyn CatalogStore,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        config: &'a PublishConfig,
        storage: &'a dyn ObjectStorage,
        catalog: &'a dyn CatalogStore,
    ) -> Self {
        Self {
            config,
            storage,
            catalog,
        }
    }

    /// Publish `folder`, which must already contain `mockup.json`.
    ///
    /// Folders without a descriptor are skipped. On failure, everything
    /// uploaded for this folder is deleted before the original error is
    /// returned.
    pub fn publish(&self, folder: &Path) -> Result<PublishOutcome> {
        let name = folder_name(folder);
        let path = descriptor_path(folder);

        if !path.is_file() {
            tracing::warn!("Skipping {}: no mockup.json found", name);
            return Ok(PublishOutcome::Skipped);
        }

        let descriptor = read_descriptor(&path)
            .inspect_err(|e| tracing::error!("Publishing {} failed: {}", name, e))?;
        let title = publish_title(&descriptor, &name);
        let slug = slugify(&title);

        tracing::info!("Publishing \"{}\" from {}", title, name);

        let mut saga = Saga::new();
        match self.run(folder, &name, &descriptor, &title, &slug, &mut saga) {
            Ok(()) => {
                let uploaded = saga.commit();
                tracing::info!("Published \"{}\" ({} files)", title, uploaded);
                Ok(PublishOutcome::Published {
                    title,
                    slug,
                    uploaded,
                })
            }
            Err(e) => {
                tracing::error!("Publishing \"{}\" failed: {}", name, e);
                self.roll_back(&name, saga);
                Err(e)
            }
        }
    }

    fn run(
        &self,
        folder: &Path,
        name: &str,
        descriptor: &MockupDescriptor,
        title: &str,
        slug: &str,
        saga: &mut Saga,
    ) -> Result<()> {
        for file in list_files(folder)? {
            let undo = self.upload(folder, name, &file)?;
            saga.record(undo);
        }

        let base_key = self.config.storage_key(name, &descriptor.global.base);
        let source_url = self.storage.public_url(&base_key)?;
        if source_url.is_none() {
            tracing::warn!("No public URL for {}", base_key);
        }

        let record = self.record(descriptor, title, slug, source_url)?;
        self.catalog.insert(&record)
    }

    /// Upload one file, returning the action that removes it again.
    fn upload(&self, folder: &Path, name: &str, file: &str) -> Result<Compensation> {
        let path = folder.join(file);
        let bytes = fs::read(&path).map_err(|e| MockupError::io(&path, "Failed to read asset", e))?;
        let key = self.config.storage_key(name, file);

        tracing::debug!("Uploading {} ({} bytes)", key, bytes.len());
        self.storage.put(&key, &bytes, content_type(file))?;

        Ok(Compensation::DeleteObject(key))
    }

    fn record(
        &self,
        descriptor: &MockupDescriptor,
        title: &str,
        slug: &str,
        source_url: Option<String>,
    ) -> Result<CatalogRecord> {
        let body = to_pretty_json(descriptor)?;
        let mockup_data = serde_json::to_value(descriptor).map_err(|e| MockupError::Parse {
            message: format!("Failed to embed descriptor: {}", e),
            help: None,
        })?;

        Ok(CatalogRecord {
            title: title.to_string(),
            slug: slug.to_string(),
            description: format!("\"{}\"", title),
            file_size: format_kb(body.len()),
            file_type: RECORD_FILE_TYPE.to_string(),
            author: self.config.author.clone(),
            is_editable: true,
            mockup_data,
            source_url,
            preview_url: None,
        })
    }

    fn roll_back(&self, name: &str, saga: Saga) {
        if saga.is_empty() {
            return;
        }

        tracing::info!("Rolling back {} uploaded file(s) for {}", saga.len(), name);
        let failures = saga.compensate(self.storage);

        if failures.is_empty() {
            tracing::info!("Rollback complete for {}", name);
        }
        for failure in failures {
            tracing::warn!("Rollback failed for {}: {}", name, failure);
        }
    }
}

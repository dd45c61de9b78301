//! Runs generation and publishing over every mockup folder in a parent
//! directory.
//!
//! Folders are independent: a failure in one is logged and counted, and the
//! run moves on. Only an unreadable parent directory stops the run.

use std::path::Path;

use crate::descriptor::{write_descriptor, DescriptorBuilder};
use crate::discovery::{folder_name, list_subfolders};
use crate::error::{MockupError, Result};
use crate::sync::{PublishOutcome, SyncEngine};

/// Counts collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Subfolders found in the parent directory.
    pub folders: usize,
    /// Folders whose mockup.json was written.
    pub generated: usize,
    /// Folders without a beauty image.
    pub skipped: usize,
    /// Folders that failed during generation.
    pub errors: usize,
    pub published: usize,
    /// Folders with no mockup.json at publish time.
    pub publish_skipped: usize,
    pub publish_failed: usize,
}

impl RunReport {
    /// Whether any folder failed in either pass.
    pub fn has_failures(&self) -> bool {
        self.errors > 0 || self.publish_failed > 0
    }
}

/// Drives the generate pass and then the publish pass.
pub struct Orchestrator<'a> {
    builder: DescriptorBuilder<'a>,
    engine: SyncEngine<'a>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(builder: DescriptorBuilder<'a>, engine: SyncEngine<'a>) -> Self {
        Self { builder, engine }
    }

    /// Generate and publish every immediate subfolder of `parent`.
    pub fn run(&self, parent: &Path) -> Result<RunReport> {
        let parent = parent
            .canonicalize()
            .map_err(|e| MockupError::io(parent, "Parent directory does not exist", e))?;

        tracing::info!("Scanning parent directory: {}", parent.display());
        let folders = list_subfolders(&parent)?;

        let mut report = RunReport {
            folders: folders.len(),
            ..Default::default()
        };

        if folders.is_empty() {
            tracing::warn!("No subfolders found in {}", parent.display());
            return Ok(report);
        }

        tracing::info!("Found {} mockup folder(s)", folders.len());

        for folder in &folders {
            self.generate_folder(folder, &mut report);
        }

        for folder in &folders {
            self.publish_folder(folder, &mut report);
        }

        Ok(report)
    }

    fn generate_folder(&self, folder: &Path, report: &mut RunReport) {
        let name = folder_name(folder);
        tracing::info!("Processing {}", name);

        let result = self.builder.build(folder).and_then(|descriptor| match descriptor {
            Some(descriptor) => {
                write_descriptor(folder, &descriptor)?;
                Ok(Some(descriptor.layers.len()))
            }
            None => Ok(None),
        });

        match result {
            Ok(Some(layers)) => {
                tracing::info!("Generated mockup.json for {} with {} layer(s)", name, layers);
                report.generated += 1;
            }
            Ok(None) => {
                tracing::info!("Skipping {}: no beauty image found", name);
                report.skipped += 1;
            }
            Err(e) => {
                tracing::error!("Error processing {}: {}", name, e);
                report.errors += 1;
            }
        }
    }

    fn publish_folder(&self, folder: &Path, report: &mut RunReport) {
        match self.engine.publish(folder) {
            Ok(PublishOutcome::Published { .. }) => report.published += 1,
            Ok(PublishOutcome::Skipped) => report.publish_skipped += 1,
            // The engine has already logged the cause and rolled back
            Err(_) => report.publish_failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PublishConfig;
    use crate::dimensions::{Dimensions, MockDimensionResolver};
    use crate::sync::{MockCatalogStore, MockObjectStorage};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn resolver() -> MockDimensionResolver {
        let mut resolver = MockDimensionResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Ok(Dimensions::new(2000, 1500)));
        resolver
    }

    fn accepting_storage() -> MockObjectStorage {
        let mut storage = MockObjectStorage::new();
        storage.expect_put().returning(|_, _, _| Ok(()));
        storage.expect_public_url().returning(|_| Ok(None));
        storage.expect_delete().returning(|_| Ok(()));
        storage
    }

    fn accepting_catalog() -> MockCatalogStore {
        let mut catalog = MockCatalogStore::new();
        catalog.expect_insert().returning(|_| Ok(()));
        catalog
    }

    #[test]
    fn test_eligible_and_ineligible_folder() {
        let root = tempdir().unwrap();
        let shirt = root.path().join("shirt");
        let notes = root.path().join("notes");
        fs::create_dir_all(&shirt).unwrap();
        fs::create_dir_all(&notes).unwrap();
        fs::write(shirt.join("beauty.jpg"), b"img").unwrap();
        fs::write(shirt.join("m1-logo-design-z2.png"), b"img").unwrap();
        fs::write(notes.join("m1-logo-design-z2.png"), b"img").unwrap();

        let resolver = resolver();
        let config = PublishConfig::default();
        let storage = accepting_storage();
        let catalog = accepting_catalog();
        let orchestrator = Orchestrator::new(
            DescriptorBuilder::new(&resolver),
            SyncEngine::new(&config, &storage, &catalog),
        );

        let report = orchestrator.run(root.path()).unwrap();

        assert_eq!(
            report,
            RunReport {
                folders: 2,
                generated: 1,
                skipped: 1,
                errors: 0,
                published: 1,
                publish_skipped: 1,
                publish_failed: 0,
            }
        );
        assert!(!report.has_failures());
        assert!(shirt.join("mockup.json").exists());
        assert!(!notes.join("mockup.json").exists());
    }

    #[test]
    fn test_publish_failure_does_not_stop_other_folders() {
        let root = tempdir().unwrap();
        for name in ["a", "b"] {
            let folder = root.path().join(name);
            fs::create_dir_all(&folder).unwrap();
            fs::write(folder.join("beauty.png"), b"img").unwrap();
        }

        let resolver = resolver();
        let config = PublishConfig::default();

        let mut storage = MockObjectStorage::new();
        storage.expect_put().returning(|key, _, _| {
            if key.starts_with("online-mockups/a/") {
                Err(MockupError::Storage {
                    message: "denied".to_string(),
                })
            } else {
                Ok(())
            }
        });
        storage.expect_public_url().returning(|_| Ok(None));
        storage.expect_delete().returning(|_| Ok(()));

        let mut catalog = MockCatalogStore::new();
        catalog
            .expect_insert()
            .withf(|record| record.title == "b")
            .times(1)
            .returning(|_| Ok(()));

        let orchestrator = Orchestrator::new(
            DescriptorBuilder::new(&resolver),
            SyncEngine::new(&config, &storage, &catalog),
        );

        let report = orchestrator.run(root.path()).unwrap();

        assert_eq!(report.generated, 2);
        assert_eq!(report.published, 1);
        assert_eq!(report.publish_failed, 1);
        assert!(report.has_failures());
    }

    #[test]
    fn test_generation_error_is_counted_and_run_continues() {
        let root = tempdir().unwrap();
        let good = root.path().join("good");
        let bad = root.path().join("bad");
        fs::create_dir_all(&good).unwrap();
        fs::create_dir_all(&bad).unwrap();
        fs::write(good.join("beauty.png"), b"img").unwrap();
        fs::write(bad.join("beauty.png"), b"img").unwrap();
        // A directory where mockup.json should go makes the write fail
        fs::create_dir_all(bad.join("mockup.json")).unwrap();

        let resolver = resolver();
        let config = PublishConfig::default();
        let storage = accepting_storage();
        let catalog = accepting_catalog();
        let orchestrator = Orchestrator::new(
            DescriptorBuilder::new(&resolver),
            SyncEngine::new(&config, &storage, &catalog),
        );

        let report = orchestrator.run(root.path()).unwrap();

        assert_eq!(report.generated, 1);
        assert_eq!(report.errors, 1);
        assert_eq!(report.published, 1);
        assert_eq!(report.publish_skipped, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_entries_do_not_stop_the_run() {
        use std::os::unix::fs::symlink;

        let root = tempdir().unwrap();
        let mug = root.path().join("mug");
        fs::create_dir_all(&mug).unwrap();
        fs::write(mug.join("beauty.jpg"), b"img").unwrap();
        symlink(root.path().join("missing"), root.path().join("zz_broken")).unwrap();
        symlink(mug.join("gone.png"), mug.join("stale.png")).unwrap();

        let resolver = resolver();
        let config = PublishConfig::default();
        let storage = accepting_storage();
        let catalog = accepting_catalog();
        let orchestrator = Orchestrator::new(
            DescriptorBuilder::new(&resolver),
            SyncEngine::new(&config, &storage, &catalog),
        );

        let report = orchestrator.run(root.path()).unwrap();

        assert_eq!(report.folders, 1);
        assert_eq!(report.generated, 1);
        assert_eq!(report.errors, 0);
        assert_eq!(report.published, 1);
        assert!(mug.join("mockup.json").exists());
    }

    #[test]
    fn test_missing_parent_is_fatal() {
        let resolver = resolver();
        let config = PublishConfig::default();
        let storage = MockObjectStorage::new();
        let catalog = MockCatalogStore::new();
        let orchestrator = Orchestrator::new(
            DescriptorBuilder::new(&resolver),
            SyncEngine::new(&config, &storage, &catalog),
        );

        let result = orchestrator.run(Path::new("/nonexistent/mockups"));
        assert!(matches!(result, Err(MockupError::Io { .. })));
    }

    #[test]
    fn test_empty_parent() {
        let root = tempdir().unwrap();
        let resolver = resolver();
        let config = PublishConfig::default();
        let storage = MockObjectStorage::new();
        let catalog = MockCatalogStore::new();
        let orchestrator = Orchestrator::new(
            DescriptorBuilder::new(&resolver),
            SyncEngine::new(&config, &storage, &catalog),
        );

        let report = orchestrator.run(root.path()).unwrap();
        assert_eq!(report, RunReport::default());
    }
}

//! Generate command implementation.
//!
//! Builds mockup.json for every subfolder of the parent path, then
//! publishes each generated folder.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::PublishConfig;
use crate::descriptor::DescriptorBuilder;
use crate::dimensions::ImageProbe;
use crate::error::Result;
use crate::orchestrator::{Orchestrator, RunReport};
use crate::output::{display_path, plural, Printer};
use crate::sync::{CatalogStore, ObjectStorage, SupabaseCatalog, SupabaseClient, SupabaseStorage, SyncEngine};

/// Generate JSON descriptors for all mockup folders
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory containing one subfolder per mockup
    #[arg(value_name = "parentFolderPath")]
    pub parent: PathBuf,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let config = PublishConfig::discover(&args.parent)?;
    let client = SupabaseClient::new(config.credentials()?)?;
    let storage = SupabaseStorage::new(client.clone(), config.bucket.as_str());
    let catalog = SupabaseCatalog::new(client, config.table.as_str());

    execute(&args.parent, &config, &storage, &catalog, printer)?;

    Ok(())
}

/// Run the full pipeline against the given storage and catalog.
pub fn execute(
    parent: &Path,
    config: &PublishConfig,
    storage: &dyn ObjectStorage,
    catalog: &dyn CatalogStore,
    printer: &Printer,
) -> Result<RunReport> {
    printer.info("Scanning", &display_path(parent));

    let orchestrator = Orchestrator::new(
        DescriptorBuilder::new(&ImageProbe),
        SyncEngine::new(config, storage, catalog),
    );
    let report = orchestrator.run(parent)?;

    print_report(&report, printer);

    Ok(report)
}

fn print_report(report: &RunReport, printer: &Printer) {
    if report.folders == 0 {
        printer.warning("Empty", "no subfolders found");
        return;
    }

    printer.success("Generated", &plural(report.generated, "folder", "folders"));
    if report.skipped > 0 {
        printer.warning(
            "Skipped",
            &format!("{} (no beauty image)", plural(report.skipped, "folder", "folders")),
        );
    }
    if report.errors > 0 {
        printer.error("Errors", &plural(report.errors, "folder", "folders"));
    }

    printer.success("Published", &plural(report.published, "folder", "folders"));
    if report.publish_failed > 0 {
        printer.error(
            "Failed",
            &format!("{} rolled back", plural(report.publish_failed, "folder", "folders")),
        );
    }
}

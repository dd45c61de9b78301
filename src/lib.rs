//! mockup-cli - Mockup descriptor generator and publisher
//!
//! A library for turning folders of layered mockup assets into JSON
//! descriptors, then uploading each folder to object storage and
//! registering it in a catalog table.

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod dimensions;
pub mod discovery;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod sync;
pub mod types;

pub use config::PublishConfig;
pub use descriptor::{detect_base, read_descriptor, write_descriptor, DescriptorBuilder};
pub use dimensions::{DimensionResolver, Dimensions, ImageProbe, FALLBACK_CANVAS};
pub use error::{MockupError, Result};
pub use orchestrator::{Orchestrator, RunReport};
pub use parser::{classify_mask, MaskMatch, MaskName};
pub use sync::{CatalogRecord, CatalogStore, ObjectStorage, PublishOutcome, SyncEngine};
pub use types::{GlobalSettings, Group, Layer, LayerColour, LayerKind, MockupDescriptor};

//! Descriptor generation for a single mockup folder.
//!
//! Generation runs two passes over the folder listing. The first finds the
//! beauty image (which makes the folder eligible and fixes the canvas size)
//! and the optional UV pass. The second turns every mask filename into a
//! layer. Geometry problems never fail a folder: unreadable images fall back
//! to the default canvas or the canvas aspect ratio.
//!
//! # Example
//!
//! ```ignore
//! use mockup_cli::descriptor::{write_descriptor, DescriptorBuilder};
//! use mockup_cli::dimensions::ImageProbe;
//!
//! let builder = DescriptorBuilder::new(&ImageProbe);
//! if let Some(descriptor) = builder.build(folder)? {
//!     write_descriptor(folder, &descriptor)?;
//! }
//! ```

mod store;

use std::fs;
use std::path::Path;

use crate::dimensions::{DimensionResolver, Dimensions, FALLBACK_CANVAS};
use crate::discovery::{folder_name, list_files};
use crate::error::{MockupError, Result};
use crate::parser::{classify_mask, find_companion, is_base_image, is_uv_pass, Companion, MaskMatch};
use crate::types::{GlobalSettings, Layer, LayerKind, MockupDescriptor};

pub use store::{read_descriptor, to_pretty_json, write_descriptor};

/// Base and UV files found in the first pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePass<'a> {
    pub base: &'a str,
    pub uv: Option<&'a str>,
}

/// Find the beauty image and UV pass in a folder listing.
///
/// Returns `None` when there is no beauty image, which makes the folder
/// ineligible. When several files share a prefix the first one wins.
pub fn detect_base<S: AsRef<str>>(files: &[S]) -> Option<BasePass<'_>> {
    let mut base: Option<&str> = None;
    let mut uv: Option<&str> = None;

    for file in files.iter().map(|f| f.as_ref()) {
        if is_base_image(file) {
            match base {
                None => base = Some(file),
                Some(kept) => tracing::warn!("Ignoring extra beauty image {} (using {})", file, kept),
            }
        } else if is_uv_pass(file) {
            match uv {
                None => uv = Some(file),
                Some(kept) => tracing::warn!("Ignoring extra UV pass {} (using {})", file, kept),
            }
        }
    }

    base.map(|base| BasePass { base, uv })
}

/// Builds mockup descriptors from folder contents.
pub struct DescriptorBuilder<'r> {
    resolver: &'r dyn DimensionResolver,
}

impl<'r> DescriptorBuilder<'r> {
    pub fn new(resolver: &'r dyn DimensionResolver) -> Self {
        Self { resolver }
    }

    /// Build the descriptor for `folder`.
    ///
    /// Returns `Ok(None)` if the folder has no beauty image. Errors only
    /// when the folder itself cannot be listed.
    pub fn build(&self, folder: &Path) -> Result<Option<MockupDescriptor>> {
        let files = list_files(folder)?;
        Ok(self.build_from_listing(folder, &files))
    }

    /// Build a descriptor from an existing listing of `folder`.
    ///
    /// Layer ids follow the listing order; the final layers are sorted by
    /// z-index with ties kept in listing order.
    pub fn build_from_listing(&self, folder: &Path, files: &[String]) -> Option<MockupDescriptor> {
        let BasePass { base, uv } = detect_base(files)?;

        let canvas = match self.probe(folder, base) {
            Ok(dimensions) => dimensions,
            Err(e) => {
                tracing::warn!(
                    "Could not read dimensions for {}: {} (using {})",
                    base,
                    e,
                    FALLBACK_CANVAS
                );
                FALLBACK_CANVAS
            }
        };

        let global = GlobalSettings::new(folder_name(folder), base, canvas)
            .with_uv(uv.map(str::to_string));

        let mut layers = Vec::new();
        let mut next_id = 1;

        for file in files {
            if is_base_image(file) || is_uv_pass(file) {
                continue;
            }

            let (mask, kind) = match classify_mask(file) {
                MaskMatch::Design(mask) => {
                    let design = find_companion(files, Companion::Design, mask.asset_id)
                        .map(str::to_string);
                    (mask, LayerKind::Design { design })
                }
                MaskMatch::Color(mask, color) => (mask, LayerKind::Color { color }),
                MaskMatch::Unmatched => {
                    tracing::debug!("Ignoring {}", file);
                    continue;
                }
            };

            let aspect_ratio = self.resolve_aspect_ratio(folder, files, canvas, mask.asset_id);

            layers.push(
                Layer::new(next_id, mask.name, file.as_str(), kind, mask.z_index, canvas)
                    .with_aspect_ratio(aspect_ratio)
                    .with_noise_threshold(mask.noise_threshold),
            );
            next_id += 1;
        }

        layers.sort_by_key(|layer| layer.z_index);

        Some(MockupDescriptor::new(layers, global))
    }

    /// Aspect ratio for the layer whose mask id is `asset_id`.
    ///
    /// Uses the `l<id>` layout file when present and readable, otherwise the
    /// canvas aspect ratio.
    pub fn resolve_aspect_ratio(
        &self,
        folder: &Path,
        files: &[String],
        canvas: Dimensions,
        asset_id: u32,
    ) -> f64 {
        let Some(layout) = find_companion(files, Companion::Layout, asset_id) else {
            return canvas.aspect_ratio();
        };

        match self.probe(folder, layout) {
            Ok(dimensions) => dimensions.aspect_ratio(),
            Err(e) => {
                tracing::warn!("Could not read dimensions for {}: {}", layout, e);
                canvas.aspect_ratio()
            }
        }
    }

    fn probe(&self, folder: &Path, filename: &str) -> Result<Dimensions> {
        let path = folder.join(filename);
        let bytes = fs::read(&path).map_err(|e| MockupError::io(&path, "Failed to read image", e))?;
        self.resolver.resolve(&bytes)
    }
}

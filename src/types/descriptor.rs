//! Mockup descriptor types.
//!
//! These mirror the layer state consumed by the mockup editor, so field
//! names serialize in camelCase and the layer variant is written as a
//! `type` tag alongside the other layer fields.

use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;

use super::colour::LayerColour;

/// Name of the single group every descriptor starts with.
pub const DEFAULT_GROUP_NAME: &str = "Default Group";

/// Default brightness applied to the base image.
const DEFAULT_BRIGHTNESS: f64 = 1.0;

/// Default contrast applied to the base image.
const DEFAULT_CONTRAST: f64 = 1.0;

/// Default highlight intensity for the whole scene.
const DEFAULT_HIGHLIGHTS_INTENSITY: f64 = 2.7;

/// A layer group. Grouping is done in the editor; generation only ever
/// emits the default group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u32,
    pub name: String,
}

impl Group {
    pub fn default_group() -> Self {
        Self {
            id: 1,
            name: DEFAULT_GROUP_NAME.to_string(),
        }
    }
}

/// Crop offset of the design inside its mask.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Crop {
    pub x: f64,
    pub y: f64,
}

/// What a layer paints into its mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerKind {
    /// User artwork, optionally seeded from a `d<N>` design file.
    Design { design: Option<String> },
    /// A flat fill colour.
    Color { color: LayerColour },
}

impl LayerKind {
    /// The `type` tag as written to JSON.
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Design { .. } => "design",
            LayerKind::Color { .. } => "color",
        }
    }
}

/// A single mask-driven layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub width: u32,
    pub mask: String,
    pub z_index: u32,
    pub group_id: Option<u32>,
    pub crop: Crop,
    pub zoom: f64,
    #[serde(flatten)]
    pub kind: LayerKind,
    pub aspect_ratio: f64,
    pub noise_threshold: f64,
}

impl Layer {
    /// Create an ungrouped layer covering the whole canvas.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        mask: impl Into<String>,
        kind: LayerKind,
        z_index: u32,
        canvas: Dimensions,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            height: canvas.height,
            width: canvas.width,
            mask: mask.into(),
            z_index,
            group_id: None,
            crop: Crop::default(),
            zoom: 1.0,
            kind,
            aspect_ratio: canvas.aspect_ratio(),
            noise_threshold: 0.0,
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_noise_threshold(mut self, noise_threshold: f64) -> Self {
        self.noise_threshold = noise_threshold;
        self
    }

    pub fn is_design(&self) -> bool {
        matches!(self.kind, LayerKind::Design { .. })
    }

    pub fn is_color(&self) -> bool {
        matches!(self.kind, LayerKind::Color { .. })
    }
}

/// Scene-wide render settings for a mockup folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    pub name: String,
    /// Filename of the beauty (base) image.
    pub base: String,
    /// Filename of the UV pass, if the folder has one.
    pub uv: Option<String>,
    pub brightness: f64,
    pub contrast: f64,
    pub highlights_intensity: f64,
    pub uv_texture: Option<String>,
    pub base_texture: Option<String>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl GlobalSettings {
    pub fn new(name: impl Into<String>, base: impl Into<String>, canvas: Dimensions) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            uv: None,
            brightness: DEFAULT_BRIGHTNESS,
            contrast: DEFAULT_CONTRAST,
            highlights_intensity: DEFAULT_HIGHLIGHTS_INTENSITY,
            uv_texture: None,
            base_texture: None,
            canvas_width: canvas.width,
            canvas_height: canvas.height,
        }
    }

    pub fn with_uv(mut self, uv: Option<String>) -> Self {
        self.uv = uv;
        self
    }

    pub fn canvas(&self) -> Dimensions {
        Dimensions::new(self.canvas_width, self.canvas_height)
    }
}

/// The full layer state of one mockup, as persisted to `mockup.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockupDescriptor {
    pub layers: Vec<Layer>,
    pub groups: Vec<Group>,
    pub global: GlobalSettings,
    pub loading: bool,
}

impl MockupDescriptor {
    pub fn new(layers: Vec<Layer>, global: GlobalSettings) -> Self {
        Self {
            layers,
            groups: vec![Group::default_group()],
            global,
            loading: true,
        }
    }

    /// Get a layer by its mask filename.
    pub fn layer_by_mask(&self, mask: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.mask == mask)
    }
}

//! Core domain types for mockup descriptors.
//!
//! This module contains the structures persisted to `mockup.json`:
//! - `MockupDescriptor` - The full layer state for one mockup folder
//! - `Layer` / `LayerKind` - A single mask-driven layer and its variant
//! - `GlobalSettings` - Canvas and render settings for the folder
//! - `LayerColour` - Normalized fill colour for colour layers

mod colour;
mod descriptor;

pub use colour::LayerColour;
pub use descriptor::{
    Crop, GlobalSettings, Group, Layer, LayerKind, MockupDescriptor, DEFAULT_GROUP_NAME,
};

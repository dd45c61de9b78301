//! Parsers for the naming conventions used in mockup folders.
//!
//! Layer metadata lives entirely in filenames, so parsing is a matter of
//! classifying each filename in a folder listing.
//!
//! # Usage
//!
//! ```ignore
//! use mockup_cli::parser::{classify_mask, MaskMatch};
//!
//! match classify_mask("m1-logo-design-z2.png") {
//!     MaskMatch::Design(mask) => println!("design layer {}", mask.name),
//!     MaskMatch::Color(mask, colour) => println!("{} filled with {}", mask.name, colour),
//!     MaskMatch::Unmatched => {}
//! }
//! ```

pub mod filename;

pub use filename::{
    classify_mask, find_companion, is_base_image, is_uv_pass, Companion, MaskMatch, MaskName,
};

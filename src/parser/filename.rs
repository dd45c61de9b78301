//! Filename convention matchers.
//!
//! Mockup folders carry no manifest; every layer property is encoded in the
//! mask filename:
//!
//! - `m<id>-<name>-design-z<z>[-n<noise>].<ext>` - design layer
//! - `m<id>-<name>-color-default_<colour>-z<z>[-n<noise>].<ext>` - colour layer
//!
//! `<ext>` is `jpg`, `jpeg` or `png`, and all matching is case-insensitive.
//! The `<id>` ties a mask to its companion files `d<id>` (design source)
//! and `l<id>` (layout, used for aspect ratio).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::types::LayerColour;

static DESIGN_MASK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^m([0-9]+)-(.+?)-design-z([0-9]+)(?:-n([0-9.]+))?\.(?:jpg|jpeg|png)$")
        .expect("design mask pattern is valid")
});

static COLOR_MASK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^m([0-9]+)-(.+?)-color-default_([0-9a-f]{6}|(?-u:[\w\s])+)-z([0-9]+)(?:-n([0-9.]+))?\.(?:jpg|jpeg|png)$",
    )
    .expect("colour mask pattern is valid")
});

/// Fields shared by both mask conventions.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskName {
    /// The `<id>` segment, used only to find companion files.
    pub asset_id: u32,
    /// Display name with underscores turned into spaces.
    pub name: String,
    pub z_index: u32,
    /// The `-n` segment, or 0 when absent.
    pub noise_threshold: f64,
}

/// Result of matching a filename against the mask conventions.
#[derive(Debug, Clone, PartialEq)]
pub enum MaskMatch {
    Design(MaskName),
    Color(MaskName, LayerColour),
    Unmatched,
}

impl MaskMatch {
    pub fn is_unmatched(&self) -> bool {
        matches!(self, MaskMatch::Unmatched)
    }

    /// The shared mask fields, if the filename matched.
    pub fn mask_name(&self) -> Option<&MaskName> {
        match self {
            MaskMatch::Design(mask) | MaskMatch::Color(mask, _) => Some(mask),
            MaskMatch::Unmatched => None,
        }
    }
}

/// Companion assets looked up by a mask's `<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Companion {
    /// `d<id>.jpg|png`, the artwork for a design layer.
    Design,
    /// `l<id>.jpg|png`, whose geometry gives the layer's aspect ratio.
    Layout,
}

impl Companion {
    fn prefix(self) -> char {
        match self {
            Companion::Design => 'd',
            Companion::Layout => 'l',
        }
    }
}

/// Match a filename against the design and colour conventions.
///
/// The design convention is tried first. Filenames matching neither are
/// `Unmatched`, which callers ignore.
pub fn classify_mask(filename: &str) -> MaskMatch {
    if let Some(caps) = DESIGN_MASK.captures(filename) {
        return match mask_name(filename, &caps, 3, 4) {
            Some(mask) => MaskMatch::Design(mask),
            None => MaskMatch::Unmatched,
        };
    }

    if let Some(caps) = COLOR_MASK.captures(filename) {
        let colour = LayerColour::from_token(&caps[3]);
        return match mask_name(filename, &caps, 4, 5) {
            Some(mask) => MaskMatch::Color(mask, colour),
            None => MaskMatch::Unmatched,
        };
    }

    MaskMatch::Unmatched
}

/// Build the shared fields from a successful match.
///
/// Numeric segments too large for `u32` make the whole filename unmatched.
fn mask_name(filename: &str, caps: &Captures, z_group: usize, noise_group: usize) -> Option<MaskName> {
    let asset_id = caps[1].parse().ok()?;
    let z_index = caps[z_group].parse().ok()?;
    let noise_threshold = caps
        .get(noise_group)
        .map(|m| parse_noise(filename, m.as_str()))
        .unwrap_or(0.0);

    Some(MaskName {
        asset_id,
        name: caps[2].replace('_', " "),
        z_index,
        noise_threshold,
    })
}

/// Parse the leading number of a noise segment; `1.2.3` reads as `1.2`.
fn parse_noise(filename: &str, raw: &str) -> f64 {
    let end = raw
        .match_indices('.')
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(raw.len());

    match raw[..end].parse::<f64>() {
        Ok(value) => {
            if end < raw.len() {
                tracing::warn!("Truncating noise threshold '{}' to {} in {}", raw, value, filename);
            }
            value
        }
        Err(_) => {
            tracing::warn!("Ignoring malformed noise threshold '{}' in {}", raw, filename);
            0.0
        }
    }
}

/// Check if a filename names the beauty (base) image.
pub fn is_base_image(filename: &str) -> bool {
    starts_with_ignore_case(filename, "beauty")
}

/// Check if a filename names the UV pass.
pub fn is_uv_pass(filename: &str) -> bool {
    starts_with_ignore_case(filename, "uv")
}

/// Find the companion file for a mask id, matching `<prefix><id>.jpg` or
/// `<prefix><id>.png` case-insensitively.
pub fn find_companion<'a, S: AsRef<str>>(
    files: &'a [S],
    companion: Companion,
    asset_id: u32,
) -> Option<&'a str> {
    let jpg = format!("{}{}.jpg", companion.prefix(), asset_id);
    let png = format!("{}{}.png", companion.prefix(), asset_id);

    files
        .iter()
        .map(|f| f.as_ref())
        .find(|f| f.eq_ignore_ascii_case(&jpg) || f.eq_ignore_ascii_case(&png))
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design(filename: &str) -> MaskName {
        match classify_mask(filename) {
            MaskMatch::Design(mask) => mask,
            other => panic!("expected design match for {}, got {:?}", filename, other),
        }
    }

    fn color(filename: &str) -> (MaskName, LayerColour) {
        match classify_mask(filename) {
            MaskMatch::Color(mask, colour) => (mask, colour),
            other => panic!("expected colour match for {}, got {:?}", filename, other),
        }
    }

    #[test]
    fn test_design_mask_full() {
        let mask = design("m3-front_logo-design-z4-n0.25.png");
        assert_eq!(mask.asset_id, 3);
        assert_eq!(mask.name, "front logo");
        assert_eq!(mask.z_index, 4);
        assert_eq!(mask.noise_threshold, 0.25);
    }

    #[test]
    fn test_design_mask_without_noise_defaults_to_zero() {
        let mask = design("m1-logo-design-z2.png");
        assert_eq!(mask.asset_id, 1);
        assert_eq!(mask.name, "logo");
        assert_eq!(mask.z_index, 2);
        assert_eq!(mask.noise_threshold, 0.0);
    }

    #[test]
    fn test_design_mask_case_insensitive() {
        let mask = design("M1-Logo-DESIGN-Z2.JPEG");
        assert_eq!(mask.name, "Logo");
        assert_eq!(mask.z_index, 2);
    }

    #[test]
    fn test_design_mask_name_with_hyphens() {
        // Lazy name capture stops at the first "-design-"
        let mask = design("m2-left-sleeve-design-z1.jpg");
        assert_eq!(mask.name, "left-sleeve");
    }

    #[test]
    fn test_color_mask_hex() {
        let (mask, colour) = color("m2-tee-color-default_ff0000-z1.png");
        assert_eq!(mask.asset_id, 2);
        assert_eq!(mask.name, "tee");
        assert_eq!(mask.z_index, 1);
        assert_eq!(colour.as_str(), "#ff0000");
    }

    #[test]
    fn test_color_mask_hex_case_preserved() {
        let (_, colour) = color("m2-tee-color-default_FfA0c1-z1.png");
        assert_eq!(colour.as_str(), "#FfA0c1");
    }

    #[test]
    fn test_color_mask_named_colour() {
        let (mask, colour) = color("m5-cap_top-color-default_navy blue-z3-n1.5.jpg");
        assert_eq!(mask.name, "cap top");
        assert_eq!(mask.noise_threshold, 1.5);
        assert_eq!(colour.as_str(), "navy blue");
    }

    #[test]
    fn test_unmatched_files() {
        assert!(classify_mask("d1.png").is_unmatched());
        assert!(classify_mask("l1.jpg").is_unmatched());
        assert!(classify_mask("notes.txt").is_unmatched());
        assert!(classify_mask("m1-logo-design-z2.gif").is_unmatched());
        assert!(classify_mask("m1-logo-design.png").is_unmatched());
        assert!(classify_mask("mx-logo-design-z2.png").is_unmatched());
    }

    #[test]
    fn test_oversized_numbers_are_unmatched() {
        assert!(classify_mask("m1-logo-design-z99999999999.png").is_unmatched());
    }

    #[test]
    fn test_noise_reads_leading_number() {
        let mask = design("m1-logo-design-z2-n1.2.3.png");
        assert_eq!(mask.noise_threshold, 1.2);
    }

    #[test]
    fn test_malformed_noise_falls_back_to_zero() {
        let mask = design("m1-logo-design-z2-n..png");
        assert_eq!(mask.noise_threshold, 0.0);
    }

    #[test]
    fn test_color_token_is_ascii_only() {
        assert!(classify_mask("m1-cap-color-default_rougé-z1.png").is_unmatched());
    }

    #[test]
    fn test_design_wins_over_color() {
        let mask = classify_mask("m1-a-color-default_red-design-z1.png");
        assert!(matches!(mask, MaskMatch::Design(_)));
    }

    #[test]
    fn test_base_and_uv_detection() {
        assert!(is_base_image("beauty.jpg"));
        assert!(is_base_image("BEAUTY_final.png"));
        assert!(!is_base_image("m1-beauty-design-z1.png"));
        assert!(is_uv_pass("uv.png"));
        assert!(is_uv_pass("UV_pass.jpg"));
        assert!(!is_uv_pass("u.png"));
    }

    #[test]
    fn test_find_companion() {
        let files = vec!["beauty.jpg", "D1.PNG", "l1.jpg", "d2.jpeg", "d10.png"];

        assert_eq!(find_companion(&files, Companion::Design, 1), Some("D1.PNG"));
        assert_eq!(find_companion(&files, Companion::Layout, 1), Some("l1.jpg"));
        // .jpeg is not a companion extension
        assert_eq!(find_companion(&files, Companion::Design, 2), None);
        assert_eq!(find_companion(&files, Companion::Design, 10), Some("d10.png"));
        assert_eq!(find_companion(&files, Companion::Layout, 10), None);
    }

    #[test]
    fn test_mask_name_accessor() {
        assert!(classify_mask("m1-a-design-z1.png").mask_name().is_some());
        assert!(classify_mask("readme.md").mask_name().is_none());
    }
}

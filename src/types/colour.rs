//! Colour token normalization for colour layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fill colour of a colour layer.
///
/// Filenames carry either a bare six-digit hex value or a named colour.
/// Hex values are stored CSS-style with a leading `#`; anything else is
/// kept verbatim so the editor can resolve it as a colour name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerColour(String);

impl LayerColour {
    /// Normalize a colour token taken from a mask filename.
    ///
    /// Letter case of hex digits is preserved.
    pub fn from_token(token: &str) -> Self {
        if is_hex6(token) {
            Self(format!("#{}", token))
        } else {
            Self(token.to_string())
        }
    }

    /// Check if this colour is a `#RRGGBB` value.
    pub fn is_hex(&self) -> bool {
        self.0
            .strip_prefix('#')
            .map_or(false, is_hex6)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exactly six ASCII hex digits.
fn is_hex6(s: &str) -> bool {
    s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit())
}

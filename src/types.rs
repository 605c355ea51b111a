//! Common types used throughout the image search client
//!
//! Type aliases plus the enumerated filter values accepted by the image
//! search endpoint. Each filter serializes to the exact string the API
//! expects on the query string.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Filter Values
// ============================================================================

/// Generates `as_str`, `Display` and case-insensitive `FromStr` for a filter
/// enum. The strings must match the serde representation.
macro_rules! filter_values {
    ($ty:ident, $field:literal, { $($variant:ident => $value:literal),+ $(,)? }) => {
        impl $ty {
            /// All accepted values
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Wire representation of the value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                $ty::ALL
                    .iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .copied()
                    .ok_or_else(|| {
                        let accepted: Vec<&str> = $ty::ALL.iter().map($ty::as_str).collect();
                        Error::invalid_value(
                            $field,
                            format!("'{s}' is not one of {}", accepted.join(", ")),
                        )
                    })
            }
        }
    };
}

/// Adult content filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SafeSearch {
    Off,
    Moderate,
    Strict,
}

filter_values!(SafeSearch, "safeSearch", {
    Off => "Off",
    Moderate => "Moderate",
    Strict => "Strict",
});

/// Aspect ratio filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Aspect {
    Square,
    Wide,
    Tall,
    All,
}

filter_values!(Aspect, "aspect", {
    Square => "Square",
    Wide => "Wide",
    Tall => "Tall",
    All => "All",
});

/// Dominant color filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Color {
    ColorOnly,
    Monochrome,
    Black,
    Blue,
    Brown,
    Gray,
    Green,
    Orange,
    Pink,
    Purple,
    Red,
    Teal,
    White,
    Yellow,
}

filter_values!(Color, "color", {
    ColorOnly => "ColorOnly",
    Monochrome => "Monochrome",
    Black => "Black",
    Blue => "Blue",
    Brown => "Brown",
    Gray => "Gray",
    Green => "Green",
    Orange => "Orange",
    Pink => "Pink",
    Purple => "Purple",
    Red => "Red",
    Teal => "Teal",
    White => "White",
    Yellow => "Yellow",
});

/// Content kind filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ImageContent {
    Face,
    Portrait,
}

filter_values!(ImageContent, "imageContent", {
    Face => "Face",
    Portrait => "Portrait",
});

/// Image type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ImageType {
    AnimatedGif,
    AnimatedGifHttps,
    Clipart,
    Line,
    Photo,
    Shopping,
    Transparent,
}

filter_values!(ImageType, "imageType", {
    AnimatedGif => "AnimatedGif",
    AnimatedGifHttps => "AnimatedGifHttps",
    Clipart => "Clipart",
    Line => "Line",
    Photo => "Photo",
    Shopping => "Shopping",
    Transparent => "Transparent",
});

/// License filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum License {
    All,
    Any,
    Public,
    Share,
    ShareCommercially,
    Modify,
    ModifyCommercially,
}

filter_values!(License, "license", {
    All => "All",
    Any => "Any",
    Public => "Public",
    Share => "Share",
    ShareCommercially => "ShareCommercially",
    Modify => "Modify",
    ModifyCommercially => "ModifyCommercially",
});

/// Discovery age filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Freshness {
    Day,
    Week,
    Month,
}

filter_values!(Freshness, "freshness", {
    Day => "Day",
    Week => "Week",
    Month => "Month",
});

/// Size bucket filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    Wallpaper,
    All,
}

filter_values!(ImageSize, "size", {
    Small => "Small",
    Medium => "Medium",
    Large => "Large",
    Wallpaper => "Wallpaper",
    All => "All",
});

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

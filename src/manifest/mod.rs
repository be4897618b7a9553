pub mod parser;

pub use parser::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Parsed web app manifest. Only the members an engine needs to install and
/// present a web app are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebAppManifest {
    pub name: String,
    pub short_name: Option<String>,
    pub description: Option<String>,
    pub start_url: String,
    pub scope: Option<String>,
    pub display: DisplayMode,
    pub theme_color: Option<String>,
    pub background_color: Option<String>,
    pub icons: Vec<Icon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayMode {
    #[serde(rename = "fullscreen")]
    Fullscreen,
    #[serde(rename = "standalone")]
    Standalone,
    #[serde(rename = "minimal-ui")]
    MinimalUi,
    #[serde(rename = "browser")]
    #[default]
    Browser,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Fullscreen => "fullscreen",
            DisplayMode::Standalone => "standalone",
            DisplayMode::MinimalUi => "minimal-ui",
            DisplayMode::Browser => "browser",
        }
    }
}

/// One entry of the manifest `icons` member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub src: String,
    pub sizes: Vec<Size>,
    pub icon_type: Option<String>,
    pub purpose: BTreeSet<Purpose>,
}

impl Icon {
    /// Icon with no sizes, no type and the default `any` purpose.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            sizes: Vec::new(),
            icon_type: None,
            purpose: BTreeSet::from([Purpose::Any]),
        }
    }
}

/// How the icon is meant to be displayed. Ordering follows declaration
/// order, which is also the serialization order of a purpose set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Purpose {
    Any,
    Monochrome,
    Maskable,
}

impl Purpose {
    pub fn name(&self) -> &'static str {
        match self {
            Purpose::Any => "ANY",
            Purpose::Monochrome => "MONOCHROME",
            Purpose::Maskable => "MASKABLE",
        }
    }

    /// Case-insensitive lookup of a manifest purpose keyword.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "any" => Some(Purpose::Any),
            "monochrome" => Some(Purpose::Monochrome),
            "maskable" => Some(Purpose::Maskable),
            _ => None,
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_enum_name(self.name()))
    }
}

/// Icon dimensions as declared by `sizes`.
///
/// A concrete size always has both dimensions greater than zero; use
/// [`Size::new`] to build one. `Any` marks a scalable (usually vector) icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Any,
    Fixed { width: u32, height: u32 },
}

pub const ANY_SIZE_TOKEN: &str = "any";

impl Size {
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Size::Fixed { width, height })
    }

    pub fn width(&self) -> Option<u32> {
        match self {
            Size::Any => None,
            Size::Fixed { width, .. } => Some(*width),
        }
    }

    pub fn height(&self) -> Option<u32> {
        match self {
            Size::Any => None,
            Size::Fixed { height, .. } => Some(*height),
        }
    }

    /// Parses `any` or `<width>x<height>`. Malformed tokens and zero
    /// dimensions yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case(ANY_SIZE_TOKEN) {
            return Some(Size::Any);
        }

        let (width, height) = token.split_once(['x', 'X'])?;
        Self::new(parse_dimension(width)?, parse_dimension(height)?)
    }
}

fn parse_dimension(digits: &str) -> Option<u32> {
    // u32::from_str would also accept a leading '+'
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for Size {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::parse(s).ok_or_else(|| ManifestError::InvalidSize(s.to_string()))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Any => f.write_str(ANY_SIZE_TOKEN),
            Size::Fixed { width, height } => write!(f, "{}x{}", width, height),
        }
    }
}

impl Default for WebAppManifest {
    fn default() -> Self {
        Self {
            name: String::new(),
            short_name: None,
            description: None,
            start_url: "/".to_string(),
            scope: None,
            display: DisplayMode::default(),
            theme_color: None,
            background_color: None,
            icons: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Malformed icon entry at index {index}: {reason}")]
    MalformedIconEntry { index: usize, reason: String },
    #[error("Invalid size: {0}")]
    InvalidSize(String),
}

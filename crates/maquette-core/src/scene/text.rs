//! Text run payload.

use serde::{Deserialize, Serialize};

/// Horizontal text alignment within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// A block of text placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content.
    pub content: String,
    /// Font size in page pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Font family name, resolved by the renderer.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

fn default_font_size() -> f64 {
    24.0
}

fn default_font_family() -> String {
    "Arial".to_string()
}

impl TextRun {
    /// Create a run with default typography.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: default_font_size(),
            font_family: default_font_family(),
            align: TextAlign::Left,
            bold: false,
            italic: false,
        }
    }
}

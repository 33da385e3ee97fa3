//! Vector icon payload.

use serde::{Deserialize, Serialize};

/// An SVG-style path icon, scaled from its view box into the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconPath {
    /// SVG path data (`d` attribute).
    pub path_data: String,
    #[serde(default = "default_view_box")]
    pub view_box_width: f64,
    #[serde(default = "default_view_box")]
    pub view_box_height: f64,
}

fn default_view_box() -> f64 {
    24.0
}

impl IconPath {
    pub fn new(path_data: impl Into<String>) -> Self {
        Self {
            path_data: path_data.into(),
            view_box_width: default_view_box(),
            view_box_height: default_view_box(),
        }
    }
}

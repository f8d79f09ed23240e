//! Canvas configuration for rendering figures.

use serde::{Deserialize, Serialize};

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 1000;
/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: u32 = 700;

/// Canvas size and typography used when a figure is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub title_font_size: u32,
    pub label_font_size: u32,
    pub margin: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title_font_size: 22,
            label_font_size: 13,
            margin: 20,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(100);
        self.height = height.max(100);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{"width": 640}"#).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn test_with_size_clamps_tiny_canvas() {
        let config = RenderConfig::default().with_size(10, 300);
        assert_eq!((config.width, config.height), (100, 300));
    }
}

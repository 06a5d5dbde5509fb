//! Context configuration
//!
//! Size and color depth of the hidden probe window, plus the fixed surface
//! format policy derived from it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    pub color_depth_bits: u8,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            title: "glprobe".to_string(),
            width: 640,
            height: 480,
            color_depth_bits: 16,
        }
    }
}

impl ContextConfig {
    /// Surface format requested for this configuration.
    pub fn pixel_format(&self) -> PixelFormatRequest {
        PixelFormatRequest::for_color_depth(self.color_depth_bits)
    }
}

/// Surface format handed to the platform's format selection.
///
/// Only the color depth follows the caller; everything else is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormatRequest {
    pub color_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub accum_bits: u8,
    pub double_buffer: bool,
}

impl PixelFormatRequest {
    pub const DEPTH_BITS: u8 = 16;

    pub fn for_color_depth(color_bits: u8) -> Self {
        Self {
            color_bits,
            alpha_bits: 0,
            depth_bits: Self::DEPTH_BITS,
            stencil_bits: 0,
            accum_bits: 0,
            double_buffer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_probe_window() {
        let config = ContextConfig::default();
        assert_eq!((config.width, config.height, config.color_depth_bits), (640, 480, 16));
    }

    #[test]
    fn format_policy_is_fixed_except_color() {
        let format = ContextConfig { color_depth_bits: 32, ..Default::default() }.pixel_format();

        assert_eq!(format.color_bits, 32);
        assert_eq!(format.depth_bits, 16);
        assert_eq!(format.stencil_bits, 0);
        assert_eq!(format.alpha_bits, 0);
        assert_eq!(format.accum_bits, 0);
        assert!(format.double_buffer);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ContextConfig = serde_json::from_str(r#"{ "width": 1024 }"#).unwrap();

        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 480);
        assert_eq!(config.title, "glprobe");
    }
}

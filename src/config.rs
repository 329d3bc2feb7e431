//! Painter configuration.
//!
//! Everything the surrounding application tunes (smoothing window, brush
//! defaults, debounce timings, camera request) lives here and is handed to
//! the core as plain constructor parameters. A JSON file may override any
//! subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::Color;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    /// Number of raw pointer observations kept for smoothing.
    pub smoothing_window: usize,
    /// How far the weighted average is pulled toward the newest raw point (0..=1).
    pub smoothing_mix: f32,
    /// Maximum spacing in pixels between interpolated sub-points.
    pub interp_step: f32,

    pub default_thickness: u32,
    pub default_color: Color,
    /// Colors selectable with `PaintSession::select_palette`.
    pub palette: Vec<Color>,
    /// Radius of the raster eraser punch.
    pub erase_radius: i32,
    /// Soft wide pass beneath each crisp segment.
    pub glow: bool,

    /// Index/thumb tip distance (pixels) below which the hand counts as pinching.
    pub pinch_threshold: f32,
    pub pinch_hold_ms: u64,
    pub fist_hold_ms: u64,
    pub undo_cooldown_ms: u64,
    pub toggle_cooldown_ms: u64,

    pub camera_index: u32,
    pub camera_width: u32,
    pub camera_height: u32,
    pub output_dir: String,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            smoothing_mix: 0.65,
            interp_step: 4.0,
            default_thickness: 6,
            default_color: Color::RED,
            palette: vec![
                Color::rgb(255, 0, 0),     // red
                Color::rgb(0, 0, 255),     // blue
                Color::rgb(0, 255, 0),     // green
                Color::rgb(255, 255, 0),   // yellow
                Color::rgb(255, 255, 255), // white
                Color::rgb(255, 0, 255),   // purple
                Color::rgb(255, 128, 0),   // orange
                Color::rgb(165, 42, 42),   // brown
            ],
            erase_radius: 25,
            glow: true,
            pinch_threshold: 45.0,
            pinch_hold_ms: 50,
            fist_hold_ms: 400,
            undo_cooldown_ms: 800,
            toggle_cooldown_ms: 1000,
            camera_index: 0,
            camera_width: 640,
            camera_height: 480,
            output_dir: "output".into(),
        }
    }
}

impl PainterConfig {
    /// Parse a JSON document; absent fields fall back to defaults.
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        let cfg: PainterConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Reject values the core would otherwise have to silently ignore.
    pub fn validate(&self) -> Result<(), Error> {
        if self.smoothing_window == 0 {
            return Err(Error::ConfigInvalid("smoothing_window must be >= 1".into()));
        }
        if !(0.0..=1.0).contains(&self.smoothing_mix) {
            return Err(Error::ConfigInvalid("smoothing_mix must be within 0..=1".into()));
        }
        if !(self.interp_step.is_finite() && self.interp_step > 0.0) {
            return Err(Error::ConfigInvalid("interp_step must be > 0".into()));
        }
        if self.default_thickness == 0 {
            return Err(Error::ConfigInvalid("default_thickness must be >= 1".into()));
        }
        if self.erase_radius < 1 {
            return Err(Error::ConfigInvalid("erase_radius must be >= 1".into()));
        }
        if self.palette.is_empty() {
            return Err(Error::ConfigInvalid("palette must not be empty".into()));
        }
        if !(self.pinch_threshold.is_finite() && self.pinch_threshold > 0.0) {
            return Err(Error::ConfigInvalid("pinch_threshold must be > 0".into()));
        }
        Ok(())
    }
}

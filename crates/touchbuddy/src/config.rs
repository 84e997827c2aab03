//! Touch manager configuration.
//!
//! Loaded from TOML; every field is optional:
//!
//! ```toml
//! flick_min_length = 8000.0
//! drag_threshold_sq = 25.0
//! supported_gestures = ["tap", "double_tap", "flick", "pinch", "pinch_complete"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use touchbuddy_core::{GestureKind, GestureType};

use crate::error::ConfigError;

/// Minimum flick velocity reported as a flick.
pub const DEFAULT_FLICK_MIN_LENGTH: f32 = 8000.0;

/// Squared distance (px²) a contact must travel before its release counts
/// as a drop instead of a tap.
pub const DEFAULT_DRAG_THRESHOLD_SQ: f32 = 25.0;

/// Configuration for a [`TouchManager`](crate::TouchManager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TouchConfig {
    /// Flicks with a shorter delta are ignored.
    pub flick_min_length: f32,
    /// Releases closer than this (squared) to the press are not drops.
    pub drag_threshold_sq: f32,
    /// Gesture kinds requested from the panel.
    pub supported_gestures: Vec<GestureKind>,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            flick_min_length: DEFAULT_FLICK_MIN_LENGTH,
            drag_threshold_sq: DEFAULT_DRAG_THRESHOLD_SQ,
            supported_gestures: GestureKind::ALL.to_vec(),
        }
    }
}

impl TouchConfig {
    /// Parse and validate a TOML config.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check thresholds are finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("flick_min_length", self.flick_min_length)?;
        check_threshold("drag_threshold_sq", self.drag_threshold_sq)
    }

    /// The supported gestures as a mask.
    pub fn gesture_mask(&self) -> GestureType {
        self.supported_gestures.iter().copied().collect()
    }
}

pub(crate) fn check_threshold(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite and non-negative, got {value}"),
        })
    }
}

//! TOML frame scripts.
//!
//! A script is a list of `[[frame]]` tables:
//!
//! ```toml
//! [[frame]]
//! touches = [{ id = 1, position = { x = 0.0, y = 0.0 }, phase = "pressed" }]
//!
//! [[frame]]
//! active = false
//!
//! [[frame]]
//! gestures = [{ kind = "tap", position = { x = 0.0, y = 0.0 }, position2 = { x = 0.0, y = 0.0 }, delta = { x = 0.0, y = 0.0 } }]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::panel::{Frame, ScriptedTouchPanel};

/// Error loading a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Script file could not be read.
    #[error("failed to read script {path}: {source}")]
    Io {
        /// Script path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Script is not valid TOML or has the wrong shape.
    #[error("invalid script: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A recorded sequence of panel frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchScript {
    /// Frames in playback order
    #[serde(default, rename = "frame")]
    pub frames: Vec<Frame>,
}

impl TouchScript {
    /// Parse a script from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a script file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if the script has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Queue every active frame on a panel. Inactive frames are skipped
    /// because an unfocused host never polls the panel.
    pub fn load_into(&self, panel: &mut ScriptedTouchPanel) {
        panel.extend_frames(self.frames.iter().filter(|f| f.active).cloned());
    }
}

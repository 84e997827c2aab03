//! TouchBuddy: touch-panel input for 2D game loops.
//!
//! Polls a [`TouchSource`] once per frame and turns raw contacts and
//! platform gestures into pointer-style events: clicks, highlights, drags,
//! drops, flicks and pinches.
//!
//! # Example
//!
//! ```
//! use touchbuddy::{InputHelper, TouchManager};
//! use touchbuddy_test::{Frame, ScriptedTouchPanel};
//!
//! let mut panel = ScriptedTouchPanel::new();
//! panel.push_frame(Frame::new().press(1, (10.0, 20.0)));
//!
//! let mut touch = TouchManager::new(panel);
//! touch.update(true);
//!
//! let touched: Vec<_> = touch.touch_positions().collect();
//! assert_eq!(touched.len(), 1);
//! ```

pub use touchbuddy_core::*;

mod component;
mod config;
mod error;
mod manager;
mod pinch;
mod tracker;

pub use component::{GameHost, TouchComponent};
pub use config::{TouchConfig, DEFAULT_DRAG_THRESHOLD_SQ, DEFAULT_FLICK_MIN_LENGTH};
pub use error::ConfigError;
pub use manager::{TouchInput, TouchManager};
pub use pinch::{PinchState, PinchTracker};
pub use tracker::TouchTracker;

//! Testing tools for TouchBuddy input managers.
//!
//! - [`ScriptedTouchPanel`]: a deterministic [`TouchSource`] replaying
//!   queued [`Frame`]s with realistic previous-location history.
//! - [`TouchScript`]: TOML fixtures describing frame sequences.
//!
//! ```
//! use touchbuddy_core::TouchSource;
//! use touchbuddy_test::{Frame, ScriptedTouchPanel};
//!
//! let mut panel = ScriptedTouchPanel::new();
//! panel.push_frame(Frame::new().press(1, (10.0, 10.0)));
//! assert_eq!(panel.state().len(), 1);
//! ```
//!
//! [`TouchSource`]: touchbuddy_core::TouchSource

mod panel;
mod script;

pub use panel::{Frame, ScriptedTouch, ScriptedTouchPanel};
pub use script::{ScriptError, TouchScript};

/// Directory holding the bundled fixture scripts.
pub const FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");

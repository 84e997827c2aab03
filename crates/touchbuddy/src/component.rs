//! Touch input as a per-frame game component.

use touchbuddy_core::{
    ClickEvent, CoordinateConverter, DragEvent, DropEvent, FlickEvent, GestureType,
    HighlightEvent, InputHelper, PinchEvent, TouchSource,
};

use crate::config::TouchConfig;
use crate::error::ConfigError;
use crate::manager::{TouchInput, TouchManager};
use crate::pinch::PinchState;

/// The game loop hosting a [`TouchComponent`].
pub trait GameHost {
    /// True while the game window has focus.
    fn is_active(&self) -> bool;
}

impl GameHost for bool {
    fn is_active(&self) -> bool {
        *self
    }
}

/// Touch manager updated once per frame from its host.
#[derive(Debug)]
pub struct TouchComponent<S> {
    manager: TouchManager<S>,
}

impl<S: TouchSource> TouchComponent<S> {
    /// Component with the default config and identity coordinates.
    pub fn new(source: S) -> Self {
        Self::from_manager(TouchManager::new(source))
    }

    /// Component converting positions with `converter`.
    pub fn with_converter(source: S, converter: CoordinateConverter) -> Self {
        Self::from_manager(TouchManager::with_converter(source, converter))
    }

    /// Component with an explicit config.
    pub fn with_config(source: S, converter: CoordinateConverter, config: TouchConfig) -> Self {
        Self::from_manager(TouchManager::with_config(source, converter, config))
    }

    /// Poll the panel for this frame. Nothing is read while the host is
    /// unfocused.
    pub fn update<H: GameHost + ?Sized>(&mut self, host: &H) {
        self.manager.update(host.is_active());
    }

    /// Change the gesture kinds requested from the panel.
    pub fn set_supported_gestures(&mut self, gestures: GestureType) {
        self.manager.set_supported_gestures(gestures);
    }

    /// Set the minimum flick length. Negative or non-finite lengths are
    /// rejected.
    pub fn set_flick_min_length(&mut self, length: f32) -> Result<(), ConfigError> {
        self.manager.set_flick_min_length(length)
    }
}

impl<S> TouchComponent<S> {
    /// Wrap an existing manager.
    pub const fn from_manager(manager: TouchManager<S>) -> Self {
        Self { manager }
    }

    /// The wrapped manager.
    pub const fn manager(&self) -> &TouchManager<S> {
        &self.manager
    }

    /// The wrapped manager, mutably.
    pub fn manager_mut(&mut self) -> &mut TouchManager<S> {
        &mut self.manager
    }

    /// Unwrap the manager.
    pub fn into_manager(self) -> TouchManager<S> {
        self.manager
    }

    /// Gesture kinds requested from the panel.
    pub const fn supported_gestures(&self) -> GestureType {
        self.manager.supported_gestures()
    }

    /// Minimum flick length.
    pub const fn flick_min_length(&self) -> f32 {
        self.manager.flick_min_length()
    }

    /// The pinch in progress.
    pub const fn pinch(&self) -> Option<&PinchState> {
        self.manager.pinch()
    }
}

impl<S> InputHelper for TouchComponent<S> {
    fn clicks(&self) -> &[ClickEvent] {
        self.manager.clicks()
    }

    fn highlights(&self) -> &[HighlightEvent] {
        self.manager.highlights()
    }

    fn drags(&self) -> &[DragEvent] {
        self.manager.drags()
    }

    fn drops(&self) -> &[DropEvent] {
        self.manager.drops()
    }
}

impl<S> TouchInput for TouchComponent<S> {
    fn is_enabled(&self) -> bool {
        self.manager.is_enabled()
    }

    fn flicks(&self) -> &[FlickEvent] {
        self.manager.flicks()
    }

    fn pinches(&self) -> &[PinchEvent] {
        self.manager.pinches()
    }
}

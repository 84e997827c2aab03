//! Pinch accumulation across gesture samples.

use touchbuddy_core::Point;
use tracing::debug;

/// Two pinching fingers and the latest change in their separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchState {
    /// First finger
    pub first: Point,
    /// Second finger
    pub second: Point,
    /// Separation change at the last update; positive when spreading
    pub delta: f32,
}

impl PinchState {
    /// Baseline state; the first sample of a pinch has no delta.
    pub const fn new(first: Point, second: Point) -> Self {
        Self {
            first,
            second,
            delta: 0.0,
        }
    }

    /// Current separation of the fingers.
    pub fn distance(&self) -> f32 {
        self.first.distance(&self.second)
    }

    /// Move to new finger positions, recording how much the separation
    /// changed.
    pub fn update(&mut self, first: Point, second: Point) {
        let before = self.distance();
        self.first = first;
        self.second = second;
        self.delta = self.distance() - before;
    }
}

/// Holds the pinch in progress, if any.
#[derive(Debug, Clone, Default)]
pub struct PinchTracker {
    state: Option<PinchState>,
}

impl PinchTracker {
    /// Create a tracker with no pinch in progress.
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Zero the delta of a lingering pinch so a frame without pinch samples
    /// reports no movement.
    pub fn begin_frame(&mut self) {
        if let Some(state) = &mut self.state {
            state.delta = 0.0;
        }
    }

    /// Feed a pinch sample: starts a pinch or updates the current one.
    pub fn sample(&mut self, first: Point, second: Point) {
        match &mut self.state {
            Some(state) => state.update(first, second),
            None => {
                let state = PinchState::new(first, second);
                debug!(distance = state.distance(), "pinch started");
                self.state = Some(state);
            }
        }
    }

    /// End the pinch, returning its last state.
    pub fn complete(&mut self) -> Option<PinchState> {
        let ended = self.state.take();
        if ended.is_some() {
            debug!("pinch completed");
        }
        ended
    }

    /// The pinch in progress.
    pub const fn state(&self) -> Option<&PinchState> {
        self.state.as_ref()
    }

    /// True while a pinch is in progress.
    pub const fn is_active(&self) -> bool {
        self.state.is_some()
    }
}

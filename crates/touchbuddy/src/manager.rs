//! Per-frame translation of touch-panel input into pointer events.
//!
//! [`TouchManager`] polls a [`TouchSource`] once per [`TouchManager::update`]
//! and rebuilds six event lists:
//!
//! | Input | Event |
//! |-------|-------|
//! | contact pressed or moving | [`HighlightEvent`] every frame |
//! | contact moving for a second frame or more | [`DragEvent`] |
//! | dragged contact released far enough from its press | [`DropEvent`] |
//! | tap / double-tap gesture | [`ClickEvent`] |
//! | flick gesture above the minimum length | [`FlickEvent`] per tracked contact |
//! | pinch in progress | one [`PinchEvent`] per frame |
//!
//! [`HighlightEvent`]: touchbuddy_core::HighlightEvent
//! [`DragEvent`]: touchbuddy_core::DragEvent
//! [`DropEvent`]: touchbuddy_core::DropEvent
//! [`ClickEvent`]: touchbuddy_core::ClickEvent

use touchbuddy_core::{
    ClickEvent, CoordinateConverter, DragEvent, DropEvent, FlickEvent, GestureKind, GestureType,
    HighlightEvent, InputHelper, MouseButton, PinchEvent, Point, PointerEvents, TouchPhase,
    TouchSample, TouchSource,
};
use tracing::{debug, trace, warn};

use crate::config::{
    check_threshold, TouchConfig, DEFAULT_DRAG_THRESHOLD_SQ, DEFAULT_FLICK_MIN_LENGTH,
};
use crate::error::ConfigError;
use crate::pinch::{PinchState, PinchTracker};
use crate::tracker::TouchTracker;

/// Read surface of a touch input manager: the pointer events plus the
/// touch-only flick and pinch lists.
pub trait TouchInput: InputHelper {
    /// False when no touch panel is present.
    fn is_enabled(&self) -> bool;

    /// Flicks this frame.
    fn flicks(&self) -> &[FlickEvent];

    /// Pinch deltas this frame.
    fn pinches(&self) -> &[PinchEvent];
}

/// Central place to read taps, touches and gestures from a touch panel.
#[derive(Debug)]
pub struct TouchManager<S> {
    source: S,
    enabled: bool,
    supported_gestures: GestureType,
    flick_min_length: f32,
    drag_threshold_sq: f32,
    pointer: PointerEvents,
    flicks: Vec<FlickEvent>,
    pinches: Vec<PinchEvent>,
    tracker: TouchTracker,
    pinch: PinchTracker,
}

impl<S: TouchSource> TouchManager<S> {
    /// Manager with the default config and identity coordinates.
    pub fn new(source: S) -> Self {
        Self::with_config(source, CoordinateConverter::identity(), TouchConfig::default())
    }

    /// Manager with the default config, converting positions with `converter`.
    pub fn with_converter(source: S, converter: CoordinateConverter) -> Self {
        Self::with_config(source, converter, TouchConfig::default())
    }

    /// Manager with an explicit config.
    ///
    /// Queries the panel capabilities once; without a connected panel the
    /// manager stays disabled for its whole lifetime. A negative or
    /// non-finite threshold is replaced by its default.
    pub fn with_config(mut source: S, converter: CoordinateConverter, config: TouchConfig) -> Self {
        let enabled = source.capabilities().is_connected;
        let supported_gestures = config.gesture_mask();
        if enabled {
            source.set_enabled_gestures(supported_gestures);
        }
        let flick_min_length = threshold_or_default(
            "flick_min_length",
            config.flick_min_length,
            DEFAULT_FLICK_MIN_LENGTH,
        );
        let drag_threshold_sq = threshold_or_default(
            "drag_threshold_sq",
            config.drag_threshold_sq,
            DEFAULT_DRAG_THRESHOLD_SQ,
        );
        debug!(
            enabled,
            gestures = supported_gestures.bits(),
            flick_min_length,
            "touch manager created"
        );

        Self {
            source,
            enabled,
            supported_gestures,
            flick_min_length,
            drag_threshold_sq,
            pointer: PointerEvents::new(converter),
            flicks: Vec::new(),
            pinches: Vec::new(),
            tracker: TouchTracker::new(),
            pinch: PinchTracker::new(),
        }
    }

    /// Rebuild this frame's events.
    ///
    /// Every list is cleared first. When `is_active` is false (the host is
    /// not focused) or touch is disabled nothing is polled and no state
    /// changes.
    pub fn update(&mut self, is_active: bool) {
        self.pointer.clear();
        self.flicks.clear();
        self.pinches.clear();

        if !is_active || !self.enabled {
            return;
        }

        self.pinch.begin_frame();
        let touches = self.source.state();
        let gestures = self.read_gestures(&touches);
        self.read_touches(&touches);

        trace!(
            touches = touches.len(),
            gestures,
            tracked = self.tracker.len(),
            "touch frame"
        );
    }

    fn read_gestures(&mut self, touches: &[TouchSample]) -> usize {
        let mut count = 0;
        while self.source.is_gesture_available() {
            let Some(gesture) = self.source.read_gesture() else {
                break;
            };
            count += 1;

            match gesture.kind {
                GestureKind::Tap => {
                    self.pointer.add_click(gesture.position, MouseButton::Left, false);
                }
                GestureKind::DoubleTap => {
                    self.pointer.add_click(gesture.position, MouseButton::Left, true);
                }
                GestureKind::Flick => self.add_flicks(gesture.delta, touches),
                GestureKind::Pinch => {
                    let first = self.pointer.convert(gesture.position);
                    let second = self.pointer.convert(gesture.position2);
                    self.pinch.sample(first, second);
                }
                GestureKind::PinchComplete => {
                    self.pinch.complete();
                }
            }
        }

        if let Some(state) = self.pinch.state() {
            self.pinches.push(PinchEvent { delta: state.delta });
        }
        count
    }

    // One flick per tracked contact, not per gesture: two fingers down
    // during a flick report it twice.
    fn add_flicks(&mut self, delta: Point, touches: &[TouchSample]) {
        if delta.length() < self.flick_min_length {
            trace!(length = delta.length(), "flick below minimum length");
            return;
        }

        for touch in touches {
            if touch.try_previous().is_some() && self.tracker.is_tracking(touch) {
                let position = self.pointer.convert(touch.position());
                self.flicks.push(FlickEvent { position, delta });
            }
        }
    }

    fn read_touches(&mut self, touches: &[TouchSample]) {
        for touch in touches {
            match touch.phase() {
                TouchPhase::Pressed => {
                    self.pointer.add_highlight(touch.position());
                    self.tracker.record(touch.location);
                }
                TouchPhase::Moved => {
                    self.pointer.add_highlight(touch.position());
                    if let Some((start, previous)) = self.tracker.continuing(touch) {
                        self.pointer.add_drag(
                            start.position,
                            touch.position(),
                            touch.position() - previous.position,
                            MouseButton::Left,
                        );
                    }
                }
                TouchPhase::Released => {
                    if let Some((start, _)) = self.tracker.continuing(touch) {
                        let start = self.pointer.convert(start.position);
                        let drop = self.pointer.convert(touch.position());

                        // a release a pixel or two from the press is a tap
                        if (drop - start).length_squared() >= self.drag_threshold_sq {
                            self.pointer.add_drop(start, drop, MouseButton::Left);
                        }
                    }
                    self.tracker.forget(touch.id());
                }
                TouchPhase::Invalid => {}
            }
        }
    }

    /// Change the gesture kinds requested from the panel. Stored but not
    /// forwarded while touch is disabled.
    pub fn set_supported_gestures(&mut self, gestures: GestureType) {
        self.supported_gestures = gestures;
        if self.enabled {
            self.source.set_enabled_gestures(gestures);
            debug!(gestures = gestures.bits(), "supported gestures changed");
        }
    }

    /// Set the minimum flick length. A negative or non-finite length is
    /// rejected and the current one kept.
    pub fn set_flick_min_length(&mut self, length: f32) -> Result<(), ConfigError> {
        check_threshold("flick_min_length", length)?;
        self.flick_min_length = length;
        Ok(())
    }
}

fn threshold_or_default(field: &'static str, value: f32, default: f32) -> f32 {
    match check_threshold(field, value) {
        Ok(()) => value,
        Err(err) => {
            warn!(%err, default, "using default threshold");
            default
        }
    }
}

impl<S> TouchManager<S> {
    /// False when no touch panel is present.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Gesture kinds requested from the panel.
    pub const fn supported_gestures(&self) -> GestureType {
        self.supported_gestures
    }

    /// Minimum flick length.
    pub const fn flick_min_length(&self) -> f32 {
        self.flick_min_length
    }

    /// Minimum squared drag distance for a drop.
    pub const fn drag_threshold_sq(&self) -> f32 {
        self.drag_threshold_sq
    }

    /// Flicks this frame.
    pub fn flicks(&self) -> &[FlickEvent] {
        &self.flicks
    }

    /// Pinch deltas this frame.
    pub fn pinches(&self) -> &[PinchEvent] {
        &self.pinches
    }

    /// The pinch in progress.
    pub const fn pinch(&self) -> Option<&PinchState> {
        self.pinch.state()
    }

    /// Recorded touch starts.
    pub const fn tracker(&self) -> &TouchTracker {
        &self.tracker
    }

    /// Click, highlight, drag and drop buffers.
    pub const fn pointer_events(&self) -> &PointerEvents {
        &self.pointer
    }

    /// The touch panel.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The touch panel, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Give back the touch panel.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S> InputHelper for TouchManager<S> {
    fn clicks(&self) -> &[ClickEvent] {
        self.pointer.clicks()
    }

    fn highlights(&self) -> &[HighlightEvent] {
        self.pointer.highlights()
    }

    fn drags(&self) -> &[DragEvent] {
        self.pointer.drags()
    }

    fn drops(&self) -> &[DropEvent] {
        self.pointer.drops()
    }
}

impl<S> TouchInput for TouchManager<S> {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn flicks(&self) -> &[FlickEvent] {
        &self.flicks
    }

    fn pinches(&self) -> &[PinchEvent] {
        &self.pinches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchbuddy_core::GestureSample;
    use touchbuddy_test::{Frame, ScriptedTouchPanel};

    fn manager() -> TouchManager<ScriptedTouchPanel> {
        TouchManager::new(ScriptedTouchPanel::new())
    }

    fn step(manager: &mut TouchManager<ScriptedTouchPanel>, frame: Frame) {
        let active = frame.active;
        if active {
            manager.source_mut().push_frame(frame);
        }
        manager.update(active);
    }

    #[test]
    fn test_new_enables_gestures_on_panel() {
        let manager = manager();
        assert!(manager.is_enabled());
        assert_eq!(manager.source().enabled_gestures(), GestureType::ALL);
        assert_eq!(manager.flick_min_length(), 8000.0);
        assert_eq!(manager.drag_threshold_sq(), 25.0);
    }

    #[test]
    fn test_disconnected_panel_disables_manager() {
        let mut manager = TouchManager::new(ScriptedTouchPanel::disconnected());
        assert!(!manager.is_enabled());
        assert!(manager.source().enabled_gestures().is_empty());

        manager.set_supported_gestures(GestureType::TAP);
        assert_eq!(manager.supported_gestures(), GestureType::TAP);
        assert!(manager.source().enabled_gestures().is_empty());

        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        assert!(manager.highlights().is_empty());
        assert_eq!(manager.source().frames_read(), 0);
    }

    #[test]
    fn test_press_highlights_and_records() {
        let mut manager = manager();
        step(&mut manager, Frame::new().press(1, (3.0, 4.0)));

        assert_eq!(manager.highlights().len(), 1);
        assert_eq!(manager.highlights()[0].position, Point::new(3.0, 4.0));
        assert!(manager.drags().is_empty());
        assert_eq!(manager.tracker().len(), 1);
    }

    #[test]
    fn test_first_move_is_not_a_drag() {
        let mut manager = manager();
        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (4.0, 0.0)));

        assert_eq!(manager.highlights().len(), 1);
        assert!(manager.drags().is_empty());
    }

    #[test]
    fn test_second_move_drags_from_press() {
        let mut manager = manager();
        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (4.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (10.0, 2.0)));

        let drag = manager.drags()[0];
        assert_eq!(drag.start, Point::new(0.0, 0.0));
        assert_eq!(drag.current, Point::new(10.0, 2.0));
        assert_eq!(drag.delta, Point::new(6.0, 2.0));
        assert_eq!(drag.button, MouseButton::Left);
    }

    #[test]
    fn test_move_without_previous_is_skipped() {
        let mut manager = manager();
        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (4.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (8.0, 0.0)).without_previous(1));

        assert_eq!(manager.highlights().len(), 1);
        assert!(manager.drags().is_empty());
    }

    #[test]
    fn test_tap_and_double_tap_click() {
        let mut manager = manager();
        step(
            &mut manager,
            Frame::new()
                .gesture(GestureSample::tap(Point::new(1.0, 1.0)))
                .gesture(GestureSample::double_tap(Point::new(2.0, 2.0))),
        );

        let clicks = manager.clicks();
        assert_eq!(clicks.len(), 2);
        assert!(!clicks[0].double_click);
        assert!(clicks[1].double_click);
        assert_eq!(clicks[1].position, Point::new(2.0, 2.0));
    }

    #[test]
    fn test_unsupported_gestures_never_arrive() {
        let mut manager = manager();
        manager.set_supported_gestures(GestureType::DOUBLE_TAP);
        step(&mut manager, Frame::new().gesture(GestureSample::tap(Point::ORIGIN)));

        assert!(manager.clicks().is_empty());
    }

    #[test]
    fn test_flick_threshold_is_configurable() {
        let mut manager = manager();
        manager.set_flick_min_length(100.0).unwrap();
        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(
            &mut manager,
            Frame::new()
                .moved(1, (5.0, 0.0))
                .gesture(GestureSample::flick(Point::new(500.0, 0.0))),
        );

        assert_eq!(manager.flicks().len(), 1);
        assert_eq!(manager.flicks()[0].position, Point::new(5.0, 0.0));
        assert_eq!(manager.flicks()[0].delta, Point::new(500.0, 0.0));
    }

    #[test]
    fn test_pinch_reported_once_per_frame() {
        let mut manager = manager();
        step(
            &mut manager,
            Frame::new()
                .gesture(GestureSample::pinch(Point::new(0.0, 0.0), Point::new(10.0, 0.0)))
                .gesture(GestureSample::pinch(Point::new(0.0, 0.0), Point::new(12.0, 0.0)))
                .gesture(GestureSample::pinch(Point::new(0.0, 0.0), Point::new(15.0, 0.0))),
        );

        assert_eq!(manager.pinches().len(), 1);
        assert!((manager.pinches()[0].delta - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_lingering_pinch_reports_zero() {
        let mut manager = manager();
        step(
            &mut manager,
            Frame::new()
                .gesture(GestureSample::pinch(Point::new(0.0, 0.0), Point::new(10.0, 0.0)))
                .gesture(GestureSample::pinch(Point::new(0.0, 0.0), Point::new(20.0, 0.0))),
        );
        step(&mut manager, Frame::new());

        assert_eq!(manager.pinches(), &[PinchEvent { delta: 0.0 }]);
        assert!(manager.pinch().is_some());
    }

    #[test]
    fn test_converter_applies_to_positions_not_deltas() {
        let converter = CoordinateConverter::new(|p| Point::new(p.x / 2.0, p.y / 2.0));
        let mut manager = TouchManager::with_converter(ScriptedTouchPanel::new(), converter);
        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (10.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (20.0, 0.0)));

        let drag = manager.drags()[0];
        assert_eq!(drag.current, Point::new(10.0, 0.0));
        assert_eq!(drag.delta, Point::new(10.0, 0.0));
        assert_eq!(manager.highlights()[0].position, Point::new(10.0, 0.0));
    }

    #[test]
    fn test_drop_threshold_measured_in_game_space() {
        let converter = CoordinateConverter::new(|p| Point::new(p.x / 4.0, p.y / 4.0));
        let mut manager = TouchManager::with_converter(ScriptedTouchPanel::new(), converter);
        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (8.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (16.0, 0.0)));
        step(&mut manager, Frame::new().release(1, (16.0, 0.0)));

        // 16px on screen is 4 units in game space: 16 < 25
        assert!(manager.drops().is_empty());
    }

    #[test]
    fn test_release_forgets_start() {
        let mut manager = manager();
        for id in 0..100 {
            step(&mut manager, Frame::new().press(id, (0.0, 0.0)));
            step(&mut manager, Frame::new().release(id, (0.0, 0.0)));
        }
        assert!(manager.tracker().is_empty());

        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (10.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (20.0, 0.0)));
        step(&mut manager, Frame::new().release(1, (20.0, 0.0)));
        assert_eq!(manager.drops().len(), 1);
        assert_eq!(manager.tracker().len(), 0);
    }

    #[test]
    fn test_flick_in_release_frame_still_reported() {
        let mut manager = manager();
        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(
            &mut manager,
            Frame::new()
                .release(1, (30.0, 0.0))
                .gesture(GestureSample::flick(Point::new(9000.0, 0.0))),
        );

        assert_eq!(manager.flicks().len(), 1);
        assert!(manager.tracker().is_empty());
    }

    #[test]
    fn test_invalid_flick_length_rejected() {
        let mut manager = manager();
        assert!(manager.set_flick_min_length(f32::NAN).is_err());
        assert!(manager.set_flick_min_length(-1.0).is_err());
        assert_eq!(manager.flick_min_length(), 8000.0);

        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(
            &mut manager,
            Frame::new()
                .moved(1, (1.0, 0.0))
                .gesture(GestureSample::flick(Point::new(1.0, 0.0))),
        );
        assert!(manager.flicks().is_empty());
    }

    #[test]
    fn test_invalid_config_thresholds_fall_back() {
        let config = TouchConfig {
            flick_min_length: -5.0,
            drag_threshold_sq: f32::NAN,
            ..TouchConfig::default()
        };
        let mut manager = TouchManager::with_config(
            ScriptedTouchPanel::new(),
            CoordinateConverter::identity(),
            config,
        );
        assert_eq!(manager.flick_min_length(), DEFAULT_FLICK_MIN_LENGTH);
        assert_eq!(manager.drag_threshold_sq(), DEFAULT_DRAG_THRESHOLD_SQ);

        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (50.0, 0.0)));
        step(&mut manager, Frame::new().moved(1, (100.0, 0.0)));
        step(&mut manager, Frame::new().release(1, (100.0, 0.0)));
        assert_eq!(manager.drops().len(), 1);
    }

    #[test]
    fn test_invalid_phase_ignored() {
        let mut manager = manager();
        step(
            &mut manager,
            Frame::new().touch(1, (0.0, 0.0), TouchPhase::Invalid),
        );

        assert!(manager.highlights().is_empty());
        assert!(manager.tracker().is_empty());
    }

    #[test]
    fn test_touch_input_trait_object() {
        let mut manager = manager();
        step(&mut manager, Frame::new().press(1, (0.0, 0.0)));

        let input: &dyn TouchInput = &manager;
        assert!(input.is_enabled());
        assert_eq!(input.touch_positions().count(), 1);
        assert!(input.flicks().is_empty());
    }
}

//! Deterministic touch panel driven frame by frame.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use touchbuddy_core::{
    GestureSample, GestureType, Point, TouchCapabilities, TouchCollection, TouchId, TouchLocation,
    TouchPhase, TouchSample, TouchSource,
};

/// One touch point in a scripted frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedTouch {
    /// Touch identifier
    pub id: i32,
    /// Screen position
    pub position: Point,
    /// Phase this frame
    pub phase: TouchPhase,
    /// Withhold the previous location, as platforms sometimes do
    #[serde(default)]
    pub no_previous: bool,
}

/// Everything the panel reports for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Whether the host is focused this frame
    #[serde(default = "default_active")]
    pub active: bool,
    /// Touch points, in reporting order
    #[serde(default)]
    pub touches: Vec<ScriptedTouch>,
    /// Gesture samples buffered during this frame
    #[serde(default)]
    pub gestures: Vec<GestureSample>,
}

const fn default_active() -> bool {
    true
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            active: true,
            touches: Vec::new(),
            gestures: Vec::new(),
        }
    }
}

impl Frame {
    /// Empty active frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the host as unfocused for this frame.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Add a touch point.
    #[must_use]
    pub fn touch(mut self, id: i32, position: impl Into<Point>, phase: TouchPhase) -> Self {
        self.touches.push(ScriptedTouch {
            id,
            position: position.into(),
            phase,
            no_previous: false,
        });
        self
    }

    /// Add a pressed touch.
    #[must_use]
    pub fn press(self, id: i32, position: impl Into<Point>) -> Self {
        self.touch(id, position, TouchPhase::Pressed)
    }

    /// Add a moved touch.
    #[must_use]
    pub fn moved(self, id: i32, position: impl Into<Point>) -> Self {
        self.touch(id, position, TouchPhase::Moved)
    }

    /// Add a released touch.
    #[must_use]
    pub fn release(self, id: i32, position: impl Into<Point>) -> Self {
        self.touch(id, position, TouchPhase::Released)
    }

    /// Withhold the previous location for every touch with `id` in this frame.
    #[must_use]
    pub fn without_previous(mut self, id: i32) -> Self {
        for touch in self.touches.iter_mut().filter(|t| t.id == id) {
            touch.no_previous = true;
        }
        self
    }

    /// Buffer a gesture sample.
    #[must_use]
    pub fn gesture(mut self, gesture: GestureSample) -> Self {
        self.gestures.push(gesture);
        self
    }
}

/// A [`TouchSource`] replaying queued [`Frame`]s.
///
/// Each call to [`TouchSource::state`] consumes the next frame. The panel
/// remembers the last location of every contact so samples carry their
/// previous location like a hardware panel would: a contact seen last frame
/// gets its old location back, a contact that was released or absent does
/// not. Gesture samples of a frame are buffered when the frame is consumed
/// and only kinds enabled through [`TouchSource::set_enabled_gestures`] are
/// kept.
#[derive(Debug, Clone)]
pub struct ScriptedTouchPanel {
    capabilities: TouchCapabilities,
    enabled: GestureType,
    frames: VecDeque<Frame>,
    gestures: VecDeque<GestureSample>,
    history: HashMap<TouchId, TouchLocation>,
    frames_read: usize,
}

impl Default for ScriptedTouchPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedTouchPanel {
    /// Connected panel supporting ten contacts.
    pub fn new() -> Self {
        Self::with_capabilities(TouchCapabilities::connected(10))
    }

    /// Panel reporting no touch hardware.
    pub fn disconnected() -> Self {
        Self::with_capabilities(TouchCapabilities::disconnected())
    }

    /// Panel with explicit capabilities.
    pub fn with_capabilities(capabilities: TouchCapabilities) -> Self {
        Self {
            capabilities,
            enabled: GestureType::NONE,
            frames: VecDeque::new(),
            gestures: VecDeque::new(),
            history: HashMap::new(),
            frames_read: 0,
        }
    }

    /// Queue a frame.
    pub fn push_frame(&mut self, frame: Frame) -> &mut Self {
        self.frames.push_back(frame);
        self
    }

    /// Queue several frames.
    pub fn extend_frames(&mut self, frames: impl IntoIterator<Item = Frame>) -> &mut Self {
        self.frames.extend(frames);
        self
    }

    /// Buffer a gesture sample directly, outside any frame.
    pub fn queue_gesture(&mut self, gesture: GestureSample) -> &mut Self {
        if self.enabled.contains_kind(gesture.kind) {
            self.gestures.push_back(gesture);
        }
        self
    }

    /// Gesture kinds currently enabled.
    pub const fn enabled_gestures(&self) -> GestureType {
        self.enabled
    }

    /// Frames still queued.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Frames consumed so far.
    pub const fn frames_read(&self) -> usize {
        self.frames_read
    }

    fn sample(&self, touch: &ScriptedTouch) -> TouchSample {
        let id = TouchId::new(touch.id);
        let sample = TouchSample::new(id, touch.position, touch.phase);
        match self.history.get(&id) {
            Some(previous) if !touch.no_previous && touch.phase != TouchPhase::Pressed => {
                sample.with_previous(*previous)
            }
            _ => sample,
        }
    }
}

impl TouchSource for ScriptedTouchPanel {
    fn capabilities(&self) -> TouchCapabilities {
        self.capabilities
    }

    fn state(&mut self) -> TouchCollection {
        let Some(frame) = self.frames.pop_front() else {
            self.history.clear();
            return TouchCollection::new();
        };
        self.frames_read += 1;

        let samples: TouchCollection = frame.touches.iter().map(|t| self.sample(t)).collect();

        let seen: HashSet<TouchId> = samples.iter().map(TouchSample::id).collect();
        self.history.retain(|id, _| seen.contains(id));
        for sample in &samples {
            if sample.phase() == TouchPhase::Released {
                self.history.remove(&sample.id());
            } else {
                self.history.insert(sample.id(), sample.location);
            }
        }

        for gesture in frame.gestures {
            self.queue_gesture(gesture);
        }

        samples
    }

    fn is_gesture_available(&self) -> bool {
        !self.gestures.is_empty()
    }

    fn read_gesture(&mut self) -> Option<GestureSample> {
        self.gestures.pop_front()
    }

    fn set_enabled_gestures(&mut self, gestures: GestureType) {
        self.enabled = gestures;
    }
}

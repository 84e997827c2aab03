//! Raw touch-panel input: touch samples, gesture samples and the
//! [`TouchSource`] trait a platform implements.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Touch identifier assigned by the platform for the lifetime of one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct TouchId(pub i32);

impl TouchId {
    /// Create a new touch ID.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }
}

/// Per-frame state of a single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    /// Location is not valid; platforms report this for dead entries.
    #[default]
    Invalid,
    /// First frame the contact is down.
    Pressed,
    /// Still down, position changed or re-sampled.
    Moved,
    /// Lifted this frame.
    Released,
}

/// A single recorded touch location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchLocation {
    /// Touch identifier
    pub id: TouchId,
    /// Position in screen space
    pub position: Point,
    /// Phase of the contact
    pub phase: TouchPhase,
}

impl TouchLocation {
    /// Create a new touch location.
    pub const fn new(id: TouchId, position: Point, phase: TouchPhase) -> Self {
        Self {
            id,
            position,
            phase,
        }
    }
}

/// A touch point as reported by a [`TouchSource`] for the current frame.
///
/// Carries the sample for the same id from the previous frame when the
/// platform can supply it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchSample {
    /// Current location
    pub location: TouchLocation,
    /// Location of the same contact in the previous frame, if known
    pub previous: Option<TouchLocation>,
}

impl TouchSample {
    /// Create a sample with no previous location.
    pub const fn new(id: TouchId, position: Point, phase: TouchPhase) -> Self {
        Self {
            location: TouchLocation::new(id, position, phase),
            previous: None,
        }
    }

    /// Attach the previous location of this contact.
    #[must_use]
    pub fn with_previous(mut self, previous: TouchLocation) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Touch identifier.
    pub const fn id(&self) -> TouchId {
        self.location.id
    }

    /// Current screen position.
    pub const fn position(&self) -> Point {
        self.location.position
    }

    /// Current phase.
    pub const fn phase(&self) -> TouchPhase {
        self.location.phase
    }

    /// Previous location of this contact. `None` is an expected outcome,
    /// platforms drop history on their own schedule.
    pub const fn try_previous(&self) -> Option<&TouchLocation> {
        self.previous.as_ref()
    }
}

/// All touch points reported for one frame, in platform order.
pub type TouchCollection = Vec<TouchSample>;

/// Capabilities of the touch panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TouchCapabilities {
    /// Whether a touch panel is present
    pub is_connected: bool,
    /// Maximum number of simultaneous contacts
    pub maximum_touch_count: u32,
}

impl TouchCapabilities {
    /// Capabilities of a connected panel.
    pub const fn connected(maximum_touch_count: u32) -> Self {
        Self {
            is_connected: true,
            maximum_touch_count,
        }
    }

    /// Capabilities when no panel is present.
    pub const fn disconnected() -> Self {
        Self {
            is_connected: false,
            maximum_touch_count: 0,
        }
    }
}

/// Kinds of gestures recognized by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// Single short touch
    Tap,
    /// Two taps in quick succession
    DoubleTap,
    /// Fast directional swipe, reported once with its velocity
    Flick,
    /// Two-finger sample, reported continuously while pinching
    Pinch,
    /// End of a pinch
    PinchComplete,
}

impl GestureKind {
    /// Every gesture kind.
    pub const ALL: [Self; 5] = [
        Self::Tap,
        Self::DoubleTap,
        Self::Flick,
        Self::Pinch,
        Self::PinchComplete,
    ];

    const fn bit(self) -> u32 {
        match self {
            Self::Tap => 1,
            Self::DoubleTap => 1 << 1,
            Self::Flick => 1 << 2,
            Self::Pinch => 1 << 3,
            Self::PinchComplete => 1 << 4,
        }
    }
}

/// Bitmask of gesture kinds requested from a [`TouchSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct GestureType(u32);

impl GestureType {
    /// No gestures
    pub const NONE: Self = Self(0);
    /// Tap
    pub const TAP: Self = Self(GestureKind::Tap.bit());
    /// Double tap
    pub const DOUBLE_TAP: Self = Self(GestureKind::DoubleTap.bit());
    /// Flick
    pub const FLICK: Self = Self(GestureKind::Flick.bit());
    /// Pinch
    pub const PINCH: Self = Self(GestureKind::Pinch.bit());
    /// Pinch complete
    pub const PINCH_COMPLETE: Self = Self(GestureKind::PinchComplete.bit());
    /// Every gesture kind
    pub const ALL: Self = Self(0b1_1111);

    /// Raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits, dropping unknown ones.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// True if every gesture in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if a single gesture kind is enabled.
    pub const fn contains_kind(self, kind: GestureKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// True if no gesture is enabled.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Enabled gesture kinds, in declaration order.
    pub fn kinds(self) -> impl Iterator<Item = GestureKind> {
        GestureKind::ALL
            .into_iter()
            .filter(move |kind| self.contains_kind(*kind))
    }
}

impl From<GestureKind> for GestureType {
    fn from(kind: GestureKind) -> Self {
        Self(kind.bit())
    }
}

impl FromIterator<GestureKind> for GestureType {
    fn from_iter<I: IntoIterator<Item = GestureKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, |mask, kind| mask | Self::from(kind))
    }
}

impl BitOr for GestureType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for GestureType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for GestureType {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

/// A completed or in-progress gesture reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    /// Gesture kind
    pub kind: GestureKind,
    /// Primary position (tap location, first pinch finger)
    pub position: Point,
    /// Secondary position (second pinch finger)
    pub position2: Point,
    /// Gesture delta (flick velocity)
    pub delta: Point,
}

impl GestureSample {
    /// Tap at a position.
    pub const fn tap(position: Point) -> Self {
        Self::at(GestureKind::Tap, position)
    }

    /// Double tap at a position.
    pub const fn double_tap(position: Point) -> Self {
        Self::at(GestureKind::DoubleTap, position)
    }

    /// Flick with the given velocity.
    pub const fn flick(delta: Point) -> Self {
        Self {
            kind: GestureKind::Flick,
            position: Point::ORIGIN,
            position2: Point::ORIGIN,
            delta,
        }
    }

    /// Pinch sample with both finger positions.
    pub const fn pinch(position: Point, position2: Point) -> Self {
        Self {
            kind: GestureKind::Pinch,
            position,
            position2,
            delta: Point::ORIGIN,
        }
    }

    /// End of a pinch.
    pub const fn pinch_complete() -> Self {
        Self::at(GestureKind::PinchComplete, Point::ORIGIN)
    }

    const fn at(kind: GestureKind, position: Point) -> Self {
        Self {
            kind,
            position,
            position2: Point::ORIGIN,
            delta: Point::ORIGIN,
        }
    }
}

/// A platform touch panel.
///
/// Polled once per frame by the touch manager. Implementations buffer
/// gesture samples between frames; the manager drains all of them.
pub trait TouchSource {
    /// Panel capabilities. Queried once when the manager is created.
    fn capabilities(&self) -> TouchCapabilities;

    /// Current set of touch points.
    fn state(&mut self) -> TouchCollection;

    /// Whether a buffered gesture sample is waiting.
    fn is_gesture_available(&self) -> bool;

    /// Pop the next buffered gesture sample.
    fn read_gesture(&mut self) -> Option<GestureSample>;

    /// Request which gesture kinds the platform should recognize.
    fn set_enabled_gestures(&mut self, gestures: GestureType);
}

impl<T: TouchSource + ?Sized> TouchSource for Box<T> {
    fn capabilities(&self) -> TouchCapabilities {
        (**self).capabilities()
    }

    fn state(&mut self) -> TouchCollection {
        (**self).state()
    }

    fn is_gesture_available(&self) -> bool {
        (**self).is_gesture_available()
    }

    fn read_gesture(&mut self) -> Option<GestureSample> {
        (**self).read_gesture()
    }

    fn set_enabled_gestures(&mut self, gestures: GestureType) {
        (**self).set_enabled_gestures(gestures);
    }
}

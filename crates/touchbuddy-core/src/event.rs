//! Semantic pointer events produced from touch input.
//!
//! Every event is a per-frame value: input managers clear and rebuild their
//! event lists on each update. Positions are in game coordinates (after
//! [`CoordinateConverter`] has been applied); deltas are raw screen vectors.

use crate::convert::CoordinateConverter;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers. Touch input always reports [`MouseButton::Left`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MouseButton {
    /// Left mouse button
    #[default]
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

/// A click (tap) at a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Click position
    pub position: Point,
    /// Button clicked
    pub button: MouseButton,
    /// Whether this was a double click
    pub double_click: bool,
}

/// "Currently touching here". Fires every frame a contact is down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightEvent {
    /// Highlighted position
    pub position: Point,
}

/// A tracked contact moved this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    /// Where the contact was pressed
    pub start: Point,
    /// Where the contact is now
    pub current: Point,
    /// Movement since the previous frame, in screen space
    pub delta: Point,
    /// Button dragging
    pub button: MouseButton,
}

/// A dragged contact was released.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    /// Where the drag started
    pub start: Point,
    /// Where the contact was released
    pub drop: Point,
    /// Button released
    pub button: MouseButton,
}

/// A fast swipe completed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlickEvent {
    /// Position of the contact the flick was attributed to
    pub position: Point,
    /// Flick velocity, in screen space
    pub delta: Point,
}

/// Incremental change of the distance between two pinching fingers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchEvent {
    /// Distance change since the previous pinch sample; positive when the
    /// fingers move apart
    pub delta: f32,
}

/// Read access to the pointer events of the current frame.
///
/// Slices are valid until the owner's next update; the borrow checker
/// enforces this since updating needs `&mut self`.
pub trait InputHelper {
    /// Clicks this frame.
    fn clicks(&self) -> &[ClickEvent];

    /// Highlights this frame.
    fn highlights(&self) -> &[HighlightEvent];

    /// Drags this frame.
    fn drags(&self) -> &[DragEvent];

    /// Drops this frame.
    fn drops(&self) -> &[DropEvent];

    /// Positions of every click this frame.
    fn tap_positions(&self) -> PositionIter<'_, ClickEvent> {
        let position: fn(&ClickEvent) -> Point = |click| click.position;
        self.clicks().iter().map(position)
    }

    /// Positions of every highlight this frame.
    fn touch_positions(&self) -> PositionIter<'_, HighlightEvent> {
        let position: fn(&HighlightEvent) -> Point = |highlight| highlight.position;
        self.highlights().iter().map(position)
    }
}

/// Iterator over event positions.
pub type PositionIter<'a, E> = std::iter::Map<std::slice::Iter<'a, E>, fn(&E) -> Point>;

/// Click, highlight, drag and drop buffers shared by input sources.
///
/// Owned by composition by each concrete input manager. Buffers are reused
/// across frames; [`PointerEvents::clear`] keeps their capacity.
#[derive(Debug, Clone, Default)]
pub struct PointerEvents {
    converter: CoordinateConverter,
    clicks: Vec<ClickEvent>,
    highlights: Vec<HighlightEvent>,
    drags: Vec<DragEvent>,
    drops: Vec<DropEvent>,
}

impl PointerEvents {
    /// Create empty buffers using `converter` for screen positions.
    pub fn new(converter: CoordinateConverter) -> Self {
        Self {
            converter,
            ..Self::default()
        }
    }

    /// The coordinate converter.
    pub const fn converter(&self) -> &CoordinateConverter {
        &self.converter
    }

    /// Convert a screen position to game coordinates.
    pub fn convert(&self, screen: Point) -> Point {
        self.converter.convert(screen)
    }

    /// Remove every event.
    pub fn clear(&mut self) {
        self.clicks.clear();
        self.highlights.clear();
        self.drags.clear();
        self.drops.clear();
    }

    /// True if no event was recorded.
    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty()
            && self.highlights.is_empty()
            && self.drags.is_empty()
            && self.drops.is_empty()
    }

    /// Record a click at a screen position.
    pub fn add_click(&mut self, screen: Point, button: MouseButton, double_click: bool) {
        let position = self.convert(screen);
        self.clicks.push(ClickEvent {
            position,
            button,
            double_click,
        });
    }

    /// Record a highlight at a screen position.
    pub fn add_highlight(&mut self, screen: Point) {
        let position = self.convert(screen);
        self.highlights.push(HighlightEvent { position });
    }

    /// Record a drag. `start` and `current` are screen positions; `delta` is
    /// stored unconverted.
    pub fn add_drag(&mut self, start: Point, current: Point, delta: Point, button: MouseButton) {
        let start = self.convert(start);
        let current = self.convert(current);
        self.drags.push(DragEvent {
            start,
            current,
            delta,
            button,
        });
    }

    /// Record a drop. Positions are already in game coordinates, since drop
    /// thresholds are measured there.
    pub fn add_drop(&mut self, start: Point, drop: Point, button: MouseButton) {
        self.drops.push(DropEvent {
            start,
            drop,
            button,
        });
    }
}

impl InputHelper for PointerEvents {
    fn clicks(&self) -> &[ClickEvent] {
        &self.clicks
    }

    fn highlights(&self) -> &[HighlightEvent] {
        &self.highlights
    }

    fn drags(&self) -> &[DragEvent] {
        &self.drags
    }

    fn drops(&self) -> &[DropEvent] {
        &self.drops
    }
}

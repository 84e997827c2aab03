//! Start positions of in-progress touches.

use std::collections::HashMap;

use touchbuddy_core::{TouchId, TouchLocation, TouchPhase, TouchSample};

/// Remembers the pressed location of each contact, keyed by touch id.
///
/// Entries are overwritten by the next press with the same id and removed
/// once the contact is released, so the map only holds contacts still down.
/// An entry is only used if its stored id matches the sample asking for it.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    starts: HashMap<TouchId, TouchLocation>,
}

impl TouchTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pressed location, replacing any earlier one for the same id.
    pub fn record(&mut self, pressed: TouchLocation) {
        self.starts.insert(pressed.id, pressed);
    }

    /// Drop the start record of a finished contact.
    pub fn forget(&mut self, id: TouchId) -> Option<TouchLocation> {
        self.starts.remove(&id)
    }

    /// Recorded start of a contact.
    pub fn start(&self, id: TouchId) -> Option<&TouchLocation> {
        self.starts.get(&id).filter(|start| start.id == id)
    }

    /// True if a press with this sample's id has been recorded.
    pub fn is_tracking(&self, sample: &TouchSample) -> bool {
        self.start(sample.id()).is_some()
    }

    /// Start and previous location of a contact that has been moving for at
    /// least one frame.
    ///
    /// `None` unless the platform supplied a previous location, that
    /// location was itself a move (the first move after a press is treated
    /// as touch-down jitter) and a press with the same id was recorded.
    pub fn continuing(&self, sample: &TouchSample) -> Option<(TouchLocation, TouchLocation)> {
        let previous = sample.try_previous()?;
        if previous.phase != TouchPhase::Moved {
            return None;
        }
        let start = self.start(sample.id())?;
        Some((*start, *previous))
    }

    /// Number of contacts with a recorded start.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// True if no contact is being tracked.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchbuddy_core::Point;

    fn location(id: i32, x: f32, phase: TouchPhase) -> TouchLocation {
        TouchLocation::new(TouchId::new(id), Point::new(x, 0.0), phase)
    }

    fn sample(id: i32, x: f32, phase: TouchPhase) -> TouchSample {
        TouchSample::new(TouchId::new(id), Point::new(x, 0.0), phase)
    }

    #[test]
    fn test_record_and_lookup() {
        let mut tracker = TouchTracker::new();
        tracker.record(location(4, 1.0, TouchPhase::Pressed));

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.start(TouchId::new(4)).unwrap().position, Point::new(1.0, 0.0));
        assert!(tracker.start(TouchId::new(14)).is_none());
    }

    #[test]
    fn test_record_overwrites() {
        let mut tracker = TouchTracker::new();
        tracker.record(location(1, 1.0, TouchPhase::Pressed));
        tracker.record(location(1, 9.0, TouchPhase::Pressed));

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.start(TouchId::new(1)).unwrap().position.x, 9.0);
    }

    #[test]
    fn test_ids_do_not_alias() {
        let mut tracker = TouchTracker::new();
        tracker.record(location(1, 1.0, TouchPhase::Pressed));
        tracker.record(location(11, 2.0, TouchPhase::Pressed));

        assert_eq!(tracker.start(TouchId::new(1)).unwrap().position.x, 1.0);
        assert_eq!(tracker.start(TouchId::new(11)).unwrap().position.x, 2.0);
    }

    #[test]
    fn test_forget_removes_start() {
        let mut tracker = TouchTracker::new();
        tracker.record(location(3, 1.0, TouchPhase::Pressed));
        tracker.record(location(4, 2.0, TouchPhase::Pressed));

        assert_eq!(tracker.forget(TouchId::new(3)).unwrap().position.x, 1.0);
        assert!(tracker.forget(TouchId::new(3)).is_none());
        assert!(tracker.start(TouchId::new(3)).is_none());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_continuing_requires_previous() {
        let mut tracker = TouchTracker::new();
        tracker.record(location(1, 0.0, TouchPhase::Pressed));

        assert!(tracker.continuing(&sample(1, 5.0, TouchPhase::Moved)).is_none());
    }

    #[test]
    fn test_continuing_rejects_first_move() {
        let mut tracker = TouchTracker::new();
        tracker.record(location(1, 0.0, TouchPhase::Pressed));

        let first_move =
            sample(1, 5.0, TouchPhase::Moved).with_previous(location(1, 0.0, TouchPhase::Pressed));
        assert!(tracker.continuing(&first_move).is_none());
    }

    #[test]
    fn test_continuing_requires_recorded_press() {
        let tracker = TouchTracker::new();
        let moving =
            sample(1, 5.0, TouchPhase::Moved).with_previous(location(1, 2.0, TouchPhase::Moved));
        assert!(tracker.continuing(&moving).is_none());
        assert!(!tracker.is_tracking(&moving));
    }

    #[test]
    fn test_continuing() {
        let mut tracker = TouchTracker::new();
        tracker.record(location(1, 0.0, TouchPhase::Pressed));

        let moving =
            sample(1, 5.0, TouchPhase::Moved).with_previous(location(1, 2.0, TouchPhase::Moved));
        let (start, previous) = tracker.continuing(&moving).unwrap();
        assert_eq!(start.position.x, 0.0);
        assert_eq!(previous.position.x, 2.0);
    }
}

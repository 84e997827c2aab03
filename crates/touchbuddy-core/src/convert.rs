//! Screen-to-game coordinate conversion.

use crate::geometry::Point;
use std::fmt;
use std::sync::Arc;

type ConvertFn = dyn Fn(Point) -> Point + Send + Sync;

/// Converts a screen-space point into the caller's game coordinate space.
///
/// Applied when an event is constructed, never to events already emitted.
/// The default converter is the identity.
#[derive(Clone, Default)]
pub struct CoordinateConverter {
    convert: Option<Arc<ConvertFn>>,
}

impl CoordinateConverter {
    /// Wrap a conversion function.
    pub fn new<F>(convert: F) -> Self
    where
        F: Fn(Point) -> Point + Send + Sync + 'static,
    {
        Self {
            convert: Some(Arc::new(convert)),
        }
    }

    /// Converter that returns every point unchanged.
    pub const fn identity() -> Self {
        Self { convert: None }
    }

    /// Converter applying a uniform scale then an offset, the usual
    /// letterboxed resolution mapping.
    pub fn scale_offset(scale: f32, offset: Point) -> Self {
        Self::new(move |p| Point::new(p.x * scale + offset.x, p.y * scale + offset.y))
    }

    /// Whether this converter is the identity.
    pub const fn is_identity(&self) -> bool {
        self.convert.is_none()
    }

    /// Convert a screen coordinate.
    #[inline]
    pub fn convert(&self, screen: Point) -> Point {
        match &self.convert {
            Some(convert) => convert(screen),
            None => screen,
        }
    }
}

impl fmt::Debug for CoordinateConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateConverter")
            .field("identity", &self.is_identity())
            .finish()
    }
}

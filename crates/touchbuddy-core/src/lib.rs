//! Core types and traits for TouchBuddy.
//!
//! This crate provides the vocabulary shared by touch input managers and
//! the platforms feeding them:
//! - Geometric primitives: [`Point`]
//! - Raw platform input: [`TouchSample`], [`GestureSample`], [`TouchSource`]
//! - Semantic output: [`ClickEvent`], [`HighlightEvent`], [`DragEvent`],
//!   [`DropEvent`], [`FlickEvent`], [`PinchEvent`]
//! - The [`PointerEvents`] sink and the [`InputHelper`] read surface
//! - Screen-to-game [`CoordinateConverter`]

mod convert;
mod event;
mod geometry;
mod touch;

pub use convert::CoordinateConverter;
pub use event::{
    ClickEvent, DragEvent, DropEvent, FlickEvent, HighlightEvent, InputHelper, MouseButton,
    PinchEvent, PointerEvents, PositionIter,
};
pub use geometry::Point;
pub use touch::{
    GestureKind, GestureSample, GestureType, TouchCapabilities, TouchCollection, TouchId,
    TouchLocation, TouchPhase, TouchSample, TouchSource,
};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inbound pointer and scale events, and the events forwarded to quadrants.

use kurbo::Point;
use understory_viewport::Quadrant;

/// Pointer identifier, unique among the pointers currently down.
pub type PointerId = u64;

/// What a raw pointer event reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The first pointer went down.
    Down,
    /// A pointer moved.
    Move,
    /// The last pointer went up.
    Up,
    /// The platform aborted the whole pointer sequence.
    Cancel,
    /// An additional pointer went down while another was already down.
    PointerDown,
    /// A pointer went up while others remain down.
    PointerUp,
}

/// A raw pointer event in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub action: PointerAction,
    /// Which pointer it happened to.
    pub pointer_id: PointerId,
    /// Where, in screen coordinates.
    pub position: Point,
}

impl PointerEvent {
    /// Creates a pointer event.
    #[must_use]
    pub const fn new(action: PointerAction, pointer_id: PointerId, position: Point) -> Self {
        Self {
            action,
            pointer_id,
            position,
        }
    }
}

/// Output of an external scale-gesture recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleEvent {
    /// A pinch started around `focus`.
    Begin {
        /// Screen-space centre of the pinch.
        focus: Point,
    },
    /// The pinch changed by `factor` since the previous update.
    Update {
        /// Screen-space centre of the pinch.
        focus: Point,
        /// Incremental scale factor.
        factor: f64,
    },
    /// The pinch ended.
    End,
}

/// Recognizes pinch gestures from the raw pointer stream.
///
/// Recognition itself lives with the host; the router only consumes what a
/// detector reports.
pub trait ScaleDetector {
    /// Observes `event`, returning the scale event it produces, if any.
    fn on_pointer(&mut self, event: &PointerEvent) -> Option<ScaleEvent>;
}

impl<D: ScaleDetector + ?Sized> ScaleDetector for &mut D {
    fn on_pointer(&mut self, event: &PointerEvent) -> Option<ScaleEvent> {
        (**self).on_pointer(event)
    }
}

/// The quadrant a forwarded pointer sequence is delivered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Delivered to one quadrant in its table-local coordinates.
    Quadrant(Quadrant),
    /// The corner had no size when the sequence started; positions are
    /// passed through in screen coordinates.
    Unmapped,
}

impl From<Option<Quadrant>> for Route {
    fn from(quadrant: Option<Quadrant>) -> Self {
        quadrant.map_or(Self::Unmapped, Self::Quadrant)
    }
}

impl Route {
    /// The target quadrant, if mapped.
    #[must_use]
    pub const fn quadrant(self) -> Option<Quadrant> {
        match self {
            Self::Quadrant(q) => Some(q),
            Self::Unmapped => None,
        }
    }
}

/// What a forwarded event means to the receiving quadrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuadrantAction {
    /// The sequence starts.
    Down,
    /// The pointer moved without being claimed as a pan.
    Move,
    /// The sequence ended normally.
    Up,
    /// The sequence was taken over by a pan or pinch, or aborted.
    Cancel,
}

/// A pointer event remapped into a quadrant's own coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadrantEvent {
    /// Receiver.
    pub route: Route,
    /// Meaning.
    pub action: QuadrantAction,
    /// The pointer that produced it.
    pub pointer_id: PointerId,
    /// Position in the receiver's table-local coordinates.
    pub position: Point,
}

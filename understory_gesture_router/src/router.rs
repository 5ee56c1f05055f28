// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan/scale disambiguation and per-quadrant pointer forwarding.
//!
//! ## States
//!
//! - [`GestureState::Idle`]: no pointer is down.
//! - [`GestureState::Tracking`]: one pointer is down and has not moved past
//!   the touch slop. Its events are remapped and forwarded to the quadrant it
//!   went down in.
//! - [`GestureState::Scrolling`]: the pointer moved past the slop. Every move
//!   pans the viewport and nothing is forwarded.
//! - [`GestureState::Scaling`]: a pinch is in progress. Scale updates zoom
//!   the viewport and raw moves only update pointer bookkeeping.
//!
//! Whenever a forwarded sequence is taken over by a pan or pinch, the
//! receiving quadrant gets exactly one [`QuadrantAction::Cancel`].

use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use understory_viewport::{ViewportController, ViewportError};

use crate::{
    PointerAction, PointerEvent, PointerId, QuadrantAction, QuadrantEvent, Route, RouterConfig,
    ScaleEvent,
};

/// Events produced by one call into the router, in delivery order.
pub type QuadrantEvents = SmallVec<[QuadrantEvent; 2]>;

/// Gesture classification, with the active pointer carried in the payload.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No gesture.
    #[default]
    Idle,
    /// A pointer is down but has not moved far enough to pan.
    Tracking {
        /// The pointer being followed.
        pointer: PointerId,
        /// Screen position where tracking started.
        start: Point,
        /// Most recent screen position.
        last: Point,
        /// Receiver of the forwarded sequence, or `None` when nothing is
        /// being forwarded (after a pinch ended with a pointer still down).
        route: Option<Route>,
    },
    /// Drags pan the viewport.
    Scrolling {
        /// The pointer driving the pan.
        pointer: PointerId,
        /// Most recent screen position.
        last: Point,
    },
    /// A pinch zoom is in progress.
    Scaling,
}

impl GestureState {
    /// The pointer that drives the current state, if any.
    #[must_use]
    pub const fn active_pointer(&self) -> Option<PointerId> {
        match *self {
            Self::Tracking { pointer, .. } | Self::Scrolling { pointer, .. } => Some(pointer),
            Self::Idle | Self::Scaling => None,
        }
    }
}

/// Routes raw input between the viewport and the quadrant tables.
///
/// Every call requires a built [`ViewportController`]; before the first build
/// they fail with [`ViewportError::NotBuilt`].
#[derive(Clone, Debug, Default)]
pub struct GestureRouter {
    config: RouterConfig,
    state: GestureState,
    pointers: HashMap<PointerId, Point>,
}

impl GestureRouter {
    /// Creates an idle router.
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> RouterConfig {
        self.config
    }

    /// Replaces the configuration; the new slop applies to the next move.
    pub fn set_config(&mut self, config: RouterConfig) {
        self.config = config;
    }

    /// The current gesture state.
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Returns `true` unless the router is idle.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Handles one raw pointer event.
    ///
    /// Returns the events to deliver to quadrants. Pans are applied to
    /// `viewport` directly.
    pub fn handle_pointer(
        &mut self,
        viewport: &mut ViewportController,
        event: PointerEvent,
    ) -> Result<QuadrantEvents, ViewportError> {
        if !viewport.is_built() {
            return Err(ViewportError::NotBuilt);
        }
        let PointerEvent {
            action,
            pointer_id,
            position,
        } = event;
        let mut out = QuadrantEvents::new();
        match action {
            PointerAction::Down => {
                self.pointers.clear();
                self.pointers.insert(pointer_id, position);
                if !matches!(self.state, GestureState::Scaling) {
                    self.release(viewport, &mut out);
                    let hit = viewport.map_to_quadrant(position)?;
                    let route = Route::from(hit.quadrant);
                    out.push(QuadrantEvent {
                        route,
                        action: QuadrantAction::Down,
                        pointer_id,
                        position: hit.local,
                    });
                    self.transition(GestureState::Tracking {
                        pointer: pointer_id,
                        start: position,
                        last: position,
                        route: Some(route),
                    });
                }
            }
            PointerAction::PointerDown => {
                self.pointers.insert(pointer_id, position);
            }
            PointerAction::Move => {
                if let Some(slot) = self.pointers.get_mut(&pointer_id) {
                    *slot = position;
                }
                self.on_move(viewport, pointer_id, position, &mut out)?;
            }
            PointerAction::PointerUp => {
                self.pointers.remove(&pointer_id);
                self.on_secondary_up(viewport, pointer_id, position, &mut out);
            }
            PointerAction::Up | PointerAction::Cancel => {
                self.pointers.clear();
                if let GestureState::Tracking {
                    pointer,
                    route: Some(route),
                    ..
                } = self.state
                {
                    let kind = if action == PointerAction::Up && pointer == pointer_id {
                        QuadrantAction::Up
                    } else {
                        QuadrantAction::Cancel
                    };
                    out.push(forward(viewport, route, kind, pointer, position));
                }
                self.transition(GestureState::Idle);
            }
        }
        Ok(out)
    }

    /// Handles one event from the scale-gesture recognizer.
    ///
    /// An update that arrives without a preceding begin starts the pinch
    /// implicitly.
    pub fn handle_scale(
        &mut self,
        viewport: &mut ViewportController,
        event: ScaleEvent,
    ) -> Result<QuadrantEvents, ViewportError> {
        if !viewport.is_built() {
            return Err(ViewportError::NotBuilt);
        }
        let mut out = QuadrantEvents::new();
        match event {
            ScaleEvent::Begin { .. } => self.begin_scaling(viewport, &mut out),
            ScaleEvent::Update { focus, factor } => {
                if !matches!(self.state, GestureState::Scaling) {
                    self.begin_scaling(viewport, &mut out);
                }
                viewport.apply_pan_and_scale(Vec2::ZERO, focus, factor)?;
            }
            ScaleEvent::End => {
                if matches!(self.state, GestureState::Scaling) {
                    self.reanchor();
                }
            }
        }
        Ok(out)
    }

    /// Abandons the current gesture and forgets every pointer.
    ///
    /// Any forwarded sequence still in flight is cancelled. Hosts call this
    /// before rebuilding the tables mid-gesture.
    pub fn cancel(&mut self, viewport: &ViewportController) -> QuadrantEvents {
        let mut out = QuadrantEvents::new();
        self.release(viewport, &mut out);
        self.pointers.clear();
        self.transition(GestureState::Idle);
        out
    }

    fn on_move(
        &mut self,
        viewport: &mut ViewportController,
        id: PointerId,
        position: Point,
        out: &mut QuadrantEvents,
    ) -> Result<(), ViewportError> {
        match self.state {
            GestureState::Tracking {
                pointer,
                start,
                last,
                route,
            } if pointer == id => {
                let moved = position - start;
                let slop = self.config.touch_slop();
                if beyond(moved.x, slop) || beyond(moved.y, slop) {
                    if let Some(route) = route {
                        out.push(forward(
                            viewport,
                            route,
                            QuadrantAction::Cancel,
                            pointer,
                            position,
                        ));
                    }
                    viewport.apply_pan_and_scale(last - position, Point::ZERO, 1.0)?;
                    self.transition(GestureState::Scrolling {
                        pointer,
                        last: position,
                    });
                } else {
                    if let Some(route) = route {
                        out.push(forward(
                            viewport,
                            route,
                            QuadrantAction::Move,
                            pointer,
                            position,
                        ));
                    }
                    self.state = GestureState::Tracking {
                        pointer,
                        start,
                        last: position,
                        route,
                    };
                }
            }
            GestureState::Scrolling { pointer, last } if pointer == id => {
                viewport.apply_pan_and_scale(last - position, Point::ZERO, 1.0)?;
                self.state = GestureState::Scrolling {
                    pointer,
                    last: position,
                };
            }
            _ => {}
        }
        Ok(())
    }

    /// Re-anchors onto a remaining pointer when the active one lifts.
    fn on_secondary_up(
        &mut self,
        viewport: &ViewportController,
        id: PointerId,
        position: Point,
        out: &mut QuadrantEvents,
    ) {
        if self.state.active_pointer() != Some(id) {
            return;
        }
        if let GestureState::Tracking {
            route: Some(route), ..
        } = self.state
        {
            out.push(forward(viewport, route, QuadrantAction::Up, id, position));
        }
        let Some((next, next_position)) = self.lowest_pointer() else {
            self.transition(GestureState::Idle);
            return;
        };
        match self.state {
            GestureState::Tracking { .. } => self.transition(GestureState::Tracking {
                pointer: next,
                start: next_position,
                last: next_position,
                route: None,
            }),
            GestureState::Scrolling { .. } => {
                self.state = GestureState::Scrolling {
                    pointer: next,
                    last: next_position,
                };
            }
            GestureState::Idle | GestureState::Scaling => {}
        }
    }

    fn begin_scaling(&mut self, viewport: &ViewportController, out: &mut QuadrantEvents) {
        self.release(viewport, out);
        self.transition(GestureState::Scaling);
    }

    /// Resumes tracking the lowest remaining pointer after a pinch.
    fn reanchor(&mut self) {
        let next = match self.lowest_pointer() {
            Some((pointer, position)) => GestureState::Tracking {
                pointer,
                start: position,
                last: position,
                route: None,
            },
            None => GestureState::Idle,
        };
        self.transition(next);
    }

    /// Cancels the forwarded sequence in flight, if any.
    fn release(&mut self, viewport: &ViewportController, out: &mut QuadrantEvents) {
        if let GestureState::Tracking {
            pointer,
            last,
            route: Some(route),
            ..
        } = self.state
        {
            out.push(forward(
                viewport,
                route,
                QuadrantAction::Cancel,
                pointer,
                last,
            ));
            self.state = GestureState::Tracking {
                pointer,
                start: last,
                last,
                route: None,
            };
        }
    }

    fn lowest_pointer(&self) -> Option<(PointerId, Point)> {
        self.pointers
            .iter()
            .min_by_key(|(id, _)| **id)
            .map(|(&id, &position)| (id, position))
    }

    fn transition(&mut self, next: GestureState) {
        #[cfg(feature = "tracing")]
        {
            if core::mem::discriminant(&self.state) != core::mem::discriminant(&next) {
                tracing::debug!(from = ?self.state, to = ?next, "gesture state changed");
            }
        }
        self.state = next;
    }
}

fn beyond(offset: f64, slop: f64) -> bool {
    offset > slop || offset < -slop
}

/// Builds a forwarded event, mapping `position` into the route's quadrant.
fn forward(
    viewport: &ViewportController,
    route: Route,
    action: QuadrantAction,
    pointer_id: PointerId,
    position: Point,
) -> QuadrantEvent {
    let position = match route {
        Route::Quadrant(quadrant) => viewport.to_local(quadrant, position),
        Route::Unmapped => position,
    };
    QuadrantEvent {
        route,
        action,
        pointer_id,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use understory_table_layout::{FixedCell, QuadrantTable, Row};
    use understory_viewport::{Quadrant, QuadrantTables};

    fn grid(rows: usize, columns: usize, w: f64, h: f64) -> QuadrantTable<FixedCell> {
        QuadrantTable::from_rows(
            (0..rows).map(|_| Row::with_cells((0..columns).map(|_| FixedCell::from_wh(w, h)))),
        )
    }

    /// Corner 50×30, body origin (50, 30), content 450×430, viewport 200×200.
    fn viewport() -> ViewportController {
        let mut tables = QuadrantTables::new(
            grid(20, 10, 40.0, 20.0),
            grid(1, 10, 40.0, 30.0),
            grid(20, 1, 50.0, 20.0),
            grid(1, 1, 50.0, 30.0),
        );
        let mut vc = ViewportController::default();
        vc.set_viewport_size(Size::new(200.0, 200.0));
        vc.build(&mut tables).unwrap();
        vc
    }

    fn ev(action: PointerAction, id: PointerId, x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(action, id, Point::new(x, y))
    }

    fn body(action: QuadrantAction, pointer_id: PointerId, x: f64, y: f64) -> QuadrantEvent {
        QuadrantEvent {
            route: Route::Quadrant(Quadrant::Body),
            action,
            pointer_id,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn tap_is_forwarded_in_quadrant_coordinates() {
        let mut vc = viewport();
        let mut router = GestureRouter::default();

        let down = router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 7, 100.0, 100.0))
            .unwrap();
        assert_eq!(down.as_slice(), &[body(QuadrantAction::Down, 7, 50.0, 70.0)]);
        assert!(matches!(router.state(), GestureState::Tracking { pointer: 7, .. }));

        let up = router
            .handle_pointer(&mut vc, ev(PointerAction::Up, 7, 102.0, 101.0))
            .unwrap();
        assert_eq!(up.as_slice(), &[body(QuadrantAction::Up, 7, 52.0, 71.0)]);
        assert_eq!(router.state(), GestureState::Idle);
        assert_eq!(router.pointer_count(), 0);
        assert_eq!(vc.pan(), Vec2::ZERO, "a tap never pans");
    }

    #[test]
    fn header_taps_route_to_headers() {
        let mut vc = viewport();
        let mut router = GestureRouter::default();
        let down = router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 1, 60.0, 10.0))
            .unwrap();
        assert_eq!(down[0].route, Route::Quadrant(Quadrant::ColumnHeader));
        assert_eq!(down[0].position, Point::new(10.0, 10.0));
    }

    #[test]
    fn small_moves_stay_with_the_starting_quadrant() {
        let mut vc = viewport();
        let mut router = GestureRouter::default();
        router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 1, 52.0, 100.0))
            .unwrap();

        // Crosses into the row header but stays below the slop.
        let moved = router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 1, 46.0, 100.0))
            .unwrap();
        assert_eq!(moved.as_slice(), &[body(QuadrantAction::Move, 1, -4.0, 70.0)]);
    }

    #[test]
    fn drag_past_slop_cancels_once_then_pans() {
        let mut vc = viewport();
        let mut router = GestureRouter::default();
        router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 1, 100.0, 100.0))
            .unwrap();

        let below = router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 1, 95.0, 100.0))
            .unwrap();
        assert_eq!(below.as_slice(), &[body(QuadrantAction::Move, 1, 45.0, 70.0)]);
        assert_eq!(vc.pan(), Vec2::ZERO);

        let crossing = router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 1, 80.0, 100.0))
            .unwrap();
        assert_eq!(crossing.as_slice(), &[body(QuadrantAction::Cancel, 1, 30.0, 70.0)]);
        assert_eq!(vc.pan(), Vec2::new(-15.0, 0.0));
        assert!(matches!(router.state(), GestureState::Scrolling { pointer: 1, .. }));

        let panning = router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 1, 70.0, 90.0))
            .unwrap();
        assert!(panning.is_empty(), "cancel is sent only once");
        assert_eq!(vc.pan(), Vec2::new(-25.0, -10.0));

        let up = router
            .handle_pointer(&mut vc, ev(PointerAction::Up, 1, 70.0, 90.0))
            .unwrap();
        assert!(up.is_empty());
        assert_eq!(router.state(), GestureState::Idle);
    }

    #[test]
    fn slop_threshold_is_exclusive() {
        let mut vc = viewport();
        let mut router = GestureRouter::new(RouterConfig::new(10.0).unwrap());
        router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 1, 100.0, 100.0))
            .unwrap();
        router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 1, 100.0, 110.0))
            .unwrap();
        assert!(matches!(router.state(), GestureState::Tracking { .. }));
        router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 1, 100.0, 110.5))
            .unwrap();
        assert!(matches!(router.state(), GestureState::Scrolling { .. }));
    }

    #[test]
    fn pinch_cancels_forwarding_and_drives_zoom() {
        let mut vc = viewport();
        let mut router = GestureRouter::default();
        router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 1, 100.0, 100.0))
            .unwrap();
        router
            .handle_pointer(&mut vc, ev(PointerAction::PointerDown, 2, 150.0, 150.0))
            .unwrap();

        let begin = router
            .handle_scale(
                &mut vc,
                ScaleEvent::Begin {
                    focus: Point::new(125.0, 125.0),
                },
            )
            .unwrap();
        assert_eq!(begin.as_slice(), &[body(QuadrantAction::Cancel, 1, 50.0, 70.0)]);
        assert_eq!(router.state(), GestureState::Scaling);

        let update = router
            .handle_scale(
                &mut vc,
                ScaleEvent::Update {
                    focus: Point::new(125.0, 125.0),
                    factor: 2.0,
                },
            )
            .unwrap();
        assert!(update.is_empty());
        assert_eq!(vc.scale(), 2.0);
        assert_eq!(vc.pan(), Vec2::new(-125.0, -125.0));

        let moved = router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 1, 40.0, 40.0))
            .unwrap();
        assert!(moved.is_empty(), "raw moves are bookkeeping only while scaling");
        assert_eq!(vc.pan(), Vec2::new(-125.0, -125.0));

        router.handle_scale(&mut vc, ScaleEvent::End).unwrap();
        assert_eq!(
            router.state(),
            GestureState::Tracking {
                pointer: 1,
                start: Point::new(40.0, 40.0),
                last: Point::new(40.0, 40.0),
                route: None,
            }
        );

        router
            .handle_pointer(&mut vc, ev(PointerAction::PointerUp, 2, 150.0, 150.0))
            .unwrap();
        let after = router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 1, 42.0, 40.0))
            .unwrap();
        assert!(after.is_empty(), "nothing is forwarded after a pinch");
        let up = router
            .handle_pointer(&mut vc, ev(PointerAction::Up, 1, 42.0, 40.0))
            .unwrap();
        assert!(up.is_empty());
        assert_eq!(router.state(), GestureState::Idle);
    }

    #[test]
    fn lifting_the_active_pointer_keeps_scrolling() {
        let mut vc = viewport();
        let mut router = GestureRouter::default();
        router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 1, 100.0, 100.0))
            .unwrap();
        router
            .handle_pointer(&mut vc, ev(PointerAction::PointerDown, 2, 150.0, 150.0))
            .unwrap();
        router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 1, 100.0, 80.0))
            .unwrap();
        assert_eq!(vc.pan(), Vec2::new(0.0, -20.0));

        let lifted = router
            .handle_pointer(&mut vc, ev(PointerAction::PointerUp, 1, 100.0, 80.0))
            .unwrap();
        assert!(lifted.is_empty());
        assert_eq!(
            router.state(),
            GestureState::Scrolling {
                pointer: 2,
                last: Point::new(150.0, 150.0)
            }
        );

        router
            .handle_pointer(&mut vc, ev(PointerAction::Move, 2, 150.0, 140.0))
            .unwrap();
        assert_eq!(vc.pan(), Vec2::new(0.0, -30.0), "no jump when re-anchoring");
    }

    #[test]
    fn lifting_the_active_pointer_while_tracking_ends_its_sequence() {
        let mut vc = viewport();
        let mut router = GestureRouter::default();
        router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 1, 100.0, 100.0))
            .unwrap();
        router
            .handle_pointer(&mut vc, ev(PointerAction::PointerDown, 2, 150.0, 150.0))
            .unwrap();
        let lifted = router
            .handle_pointer(&mut vc, ev(PointerAction::PointerUp, 1, 100.0, 100.0))
            .unwrap();
        assert_eq!(lifted.as_slice(), &[body(QuadrantAction::Up, 1, 50.0, 70.0)]);
        assert!(matches!(
            router.state(),
            GestureState::Tracking {
                pointer: 2,
                route: None,
                ..
            }
        ));
    }

    #[test]
    fn cancel_drains_the_sequence_in_flight() {
        let mut vc = viewport();
        let mut router = GestureRouter::default();
        router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 3, 100.0, 100.0))
            .unwrap();
        assert!(router.is_active());

        let drained = router.cancel(&vc);
        assert_eq!(drained.as_slice(), &[body(QuadrantAction::Cancel, 3, 50.0, 70.0)]);
        assert!(!router.is_active());
        assert!(router.cancel(&vc).is_empty(), "second cancel is a no-op");

        let platform_cancel = router
            .handle_pointer(&mut vc, ev(PointerAction::Cancel, 3, 100.0, 100.0))
            .unwrap();
        assert!(platform_cancel.is_empty());
    }

    #[test]
    fn routing_before_build_is_rejected() {
        let mut vc = ViewportController::default();
        let mut router = GestureRouter::default();
        assert_eq!(
            router.handle_pointer(&mut vc, ev(PointerAction::Down, 1, 0.0, 0.0)),
            Err(ViewportError::NotBuilt)
        );
        assert_eq!(
            router.handle_scale(&mut vc, ScaleEvent::End),
            Err(ViewportError::NotBuilt)
        );
    }

    #[test]
    fn empty_corner_forwards_untransformed() {
        let mut tables = QuadrantTables::new(
            grid(2, 2, 40.0, 40.0),
            QuadrantTable::new(),
            QuadrantTable::new(),
            QuadrantTable::new(),
        );
        let mut vc = ViewportController::default();
        vc.build(&mut tables).unwrap();
        let mut router = GestureRouter::default();
        let down = router
            .handle_pointer(&mut vc, ev(PointerAction::Down, 1, 12.0, 34.0))
            .unwrap();
        assert_eq!(down[0].route, Route::Unmapped);
        assert_eq!(down[0].position, Point::new(12.0, 34.0));
    }
}

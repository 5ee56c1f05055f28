// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A pinned-header table that owns its tables, viewport and router.

use kurbo::{Affine, Size};
use smallvec::SmallVec;
use understory_table_layout::{CellBox, CellIndex};
use understory_viewport::{
    Quadrant, QuadrantTables, ScrollMetrics, ViewportConfig, ViewportController,
};

use crate::{
    FacadeError, GestureRouter, PointerEvent, QuadrantEvent, QuadrantEvents, RouterConfig,
    ScaleDetector, ScaleEvent,
};

/// A forwarded event together with the cell it lands on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Delivery {
    /// The remapped event.
    pub event: QuadrantEvent,
    /// The cell under the event's position, if any.
    pub cell: Option<CellIndex>,
}

/// Deliveries produced by one input event, in order.
pub type Deliveries = SmallVec<[Delivery; 2]>;

/// Four quadrant tables wired to a viewport and a gesture router.
///
/// ## Usage
///
/// - Assemble the tables, then call [`FixedHeaderTable::build`].
/// - Feed raw input through [`FixedHeaderTable::handle_input`] (or
///   [`handle_pointer`](FixedHeaderTable::handle_pointer) and
///   [`handle_scale`](FixedHeaderTable::handle_scale) separately) and deliver
///   the returned [`Delivery`] values to your cells.
/// - Draw each quadrant with [`FixedHeaderTable::transform`].
/// - To change the grid mid-gesture, call
///   [`FixedHeaderTable::cancel_gesture`] first.
#[derive(Clone, Debug)]
pub struct FixedHeaderTable<C> {
    tables: QuadrantTables<C>,
    viewport: ViewportController,
    router: GestureRouter,
}

impl<C> FixedHeaderTable<C> {
    /// Wraps `tables`. Nothing is measured until [`FixedHeaderTable::build`].
    #[must_use]
    pub fn new(
        tables: QuadrantTables<C>,
        viewport_config: ViewportConfig,
        router_config: RouterConfig,
    ) -> Self {
        Self {
            tables,
            viewport: ViewportController::new(viewport_config),
            router: GestureRouter::new(router_config),
        }
    }

    /// The quadrant tables.
    #[must_use]
    pub const fn tables(&self) -> &QuadrantTables<C> {
        &self.tables
    }

    /// Mutable access to the tables; call [`FixedHeaderTable::build`] after
    /// changing them.
    pub fn tables_mut(&mut self) -> &mut QuadrantTables<C> {
        &mut self.tables
    }

    /// The viewport controller.
    #[must_use]
    pub const fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// The gesture router.
    #[must_use]
    pub const fn router(&self) -> &GestureRouter {
        &self.router
    }

    /// Offers `event` to `detector`, applies any scale event it reports, then
    /// routes the raw event.
    pub fn handle_input<D: ScaleDetector>(
        &mut self,
        detector: &mut D,
        event: PointerEvent,
    ) -> Result<Deliveries, FacadeError> {
        let mut out = match detector.on_pointer(&event) {
            Some(scale) => self.handle_scale(scale)?,
            None => Deliveries::new(),
        };
        out.extend(self.handle_pointer(event)?);
        Ok(out)
    }

    /// Routes one raw pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Deliveries, FacadeError> {
        let events = self.router.handle_pointer(&mut self.viewport, event)?;
        Ok(self.resolve(events))
    }

    /// Applies one event from the scale-gesture recognizer.
    pub fn handle_scale(&mut self, event: ScaleEvent) -> Result<Deliveries, FacadeError> {
        let events = self.router.handle_scale(&mut self.viewport, event)?;
        Ok(self.resolve(events))
    }

    /// Abandons the active gesture, cancelling any forwarded sequence.
    pub fn cancel_gesture(&mut self) -> Deliveries {
        let events = self.router.cancel(&self.viewport);
        self.resolve(events)
    }

    /// The matrix to draw `quadrant` with.
    #[must_use]
    pub const fn transform(&self, quadrant: Quadrant) -> Affine {
        self.viewport.transform(quadrant)
    }

    /// Scrollbar ranges, offsets and extents.
    #[must_use]
    pub fn scroll_metrics(&self) -> ScrollMetrics {
        self.viewport.scroll_metrics()
    }

    /// Sets the visible area, re-clamping the pan.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport.set_viewport_size(size);
    }

    fn resolve(&self, events: QuadrantEvents) -> Deliveries {
        events
            .into_iter()
            .map(|event| Delivery {
                event,
                cell: event
                    .route
                    .quadrant()
                    .and_then(|q| self.tables.get(q).cell_at(event.position)),
            })
            .collect()
    }
}

impl<C: CellBox> FixedHeaderTable<C> {
    /// Aligns the tables and refreshes the viewport's content bounds.
    ///
    /// Refuses with [`FacadeError::GestureActive`] while a gesture is in
    /// progress.
    pub fn build(&mut self) -> Result<(), FacadeError> {
        if self.router.is_active() {
            return Err(FacadeError::GestureActive);
        }
        self.viewport.build(&mut self.tables)?;
        Ok(())
    }
}

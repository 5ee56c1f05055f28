// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture Router: turns raw touch input into pans, pinch zooms and
//! quadrant-local events for a pinned-header grid.
//!
//! - [`GestureRouter`] is an explicit state machine over [`GestureState`]. A
//!   single pointer is tracked until it moves past the touch slop, at which
//!   point its drag pans the viewport; pinches reported by a
//!   [`ScaleDetector`] zoom around their focus. Events that are not consumed
//!   by a pan or zoom are mapped into the coordinates of the quadrant the
//!   pointer went down in and returned as [`QuadrantEvent`]s.
//! - [`FixedHeaderTable`] bundles the four tables, a
//!   [`ViewportController`](understory_viewport::ViewportController) and a
//!   router, and resolves each forwarded event to the cell it lands on.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture_router::{
//!     FixedHeaderTable, PointerAction, PointerEvent, QuadrantAction, RouterConfig,
//! };
//! use understory_table_layout::{CellIndex, FixedCell, QuadrantTable, Row};
//! use understory_viewport::{QuadrantTables, ViewportConfig};
//!
//! fn table(rows: usize, columns: usize) -> QuadrantTable<FixedCell> {
//!     QuadrantTable::from_rows((0..rows).map(|_| {
//!         Row::with_cells((0..columns).map(|_| FixedCell::from_wh(40.0, 40.0)))
//!     }))
//! }
//!
//! let tables = QuadrantTables::new(table(25, 25), table(2, 25), table(25, 1), table(2, 1));
//! let mut grid =
//!     FixedHeaderTable::new(tables, ViewportConfig::default(), RouterConfig::default());
//! grid.set_viewport_size(kurbo::Size::new(320.0, 480.0));
//! grid.build().unwrap();
//!
//! // A tap just past the headers lands on the first body cell.
//! let down = grid
//!     .handle_pointer(PointerEvent::new(PointerAction::Down, 0, Point::new(45.0, 85.0)))
//!     .unwrap();
//! assert_eq!(down[0].event.action, QuadrantAction::Down);
//! assert_eq!(down[0].cell, Some(CellIndex::new(0, 0)));
//!
//! // Dragging past the slop cancels the tap and pans instead.
//! let drag = grid
//!     .handle_pointer(PointerEvent::new(PointerAction::Move, 0, Point::new(45.0, 45.0)))
//!     .unwrap();
//! assert_eq!(drag[0].event.action, QuadrantAction::Cancel);
//! assert_eq!(grid.scroll_metrics().vertical_offset, 40.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod event;
mod facade;
mod router;

pub use config::RouterConfig;
pub use error::{ConfigError, FacadeError};
pub use event::{
    PointerAction, PointerEvent, PointerId, QuadrantAction, QuadrantEvent, Route, ScaleDetector,
    ScaleEvent,
};
pub use facade::{Deliveries, Delivery, FixedHeaderTable};
pub use router::{GestureRouter, GestureState, QuadrantEvents};

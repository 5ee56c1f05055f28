// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Viewport: lockstep pan and zoom for a pinned-header grid.
//!
//! A grid with pinned headers is drawn as four tables ([`Quadrant`]s). They
//! share one scale, but the headers ignore one pan component each so they
//! stay glued to their edge:
//!
//! | quadrant | follows horizontal pan | follows vertical pan |
//! |---|---|---|
//! | body | yes | yes |
//! | column header | yes | no |
//! | row header | no | yes |
//! | corner | no | no |
//!
//! [`ViewportController`] owns the scale and pan. It
//! - aligns the four [`QuadrantTables`] on [`build`](ViewportController::build),
//! - applies pan and pinch-zoom deltas with clamping and focal-point
//!   compensation,
//! - produces one [`Affine`](kurbo::Affine) per quadrant ([`QuadrantTransforms`]),
//! - maps a screen point back into a quadrant's own coordinates.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_table_layout::{FixedCell, QuadrantTable, Row};
//! use understory_viewport::{Quadrant, QuadrantTables, ViewportController};
//!
//! fn table(rows: usize, columns: usize) -> QuadrantTable<FixedCell> {
//!     QuadrantTable::from_rows((0..rows).map(|_| {
//!         Row::with_cells((0..columns).map(|_| FixedCell::from_wh(40.0, 20.0)))
//!     }))
//! }
//!
//! let mut tables = QuadrantTables::new(table(30, 10), table(1, 10), table(30, 1), table(1, 1));
//! let mut viewport = ViewportController::default();
//! viewport.set_viewport_size(Size::new(200.0, 200.0));
//! viewport.build(&mut tables).unwrap();
//! assert_eq!(viewport.content_size(), Size::new(440.0, 620.0));
//!
//! // Drag the grid up and to the left.
//! viewport.apply_pan_and_scale(Vec2::new(30.0, 50.0), Point::ZERO, 1.0).unwrap();
//! assert_eq!(viewport.pan(), Vec2::new(-30.0, -50.0));
//!
//! // The column header only moved horizontally.
//! let [.., tx, ty] = viewport.transform(Quadrant::ColumnHeader).as_coeffs();
//! assert_eq!((tx, ty), (-30.0, 0.0));
//!
//! // A touch below and right of the corner lands in the body.
//! let hit = viewport.map_to_quadrant(Point::new(100.0, 100.0)).unwrap();
//! assert_eq!(hit.quadrant, Some(Quadrant::Body));
//! assert_eq!(hit.local, Point::new(90.0, 130.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod error;
mod quadrant;
mod transforms;

pub use config::ViewportConfig;
pub use controller::{QuadrantHit, ScrollMetrics, ViewportController};
pub use error::{BuildError, ConfigError, ViewportError};
pub use quadrant::{Axis, PanAxes, Quadrant, QuadrantTables};
pub use transforms::QuadrantTransforms;

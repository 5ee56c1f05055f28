// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Table Layout: two-pass measurement for tables that must line up with each other.
//!
//! A grid with pinned headers is drawn as four separate tables (body, column
//! header, row header, corner) that have to agree on column widths and row
//! heights across their shared edges. This crate provides the pieces needed
//! to make that happen without knowing anything about the widget system that
//! owns the cells:
//!
//! - [`CellBox`]: the capability a host cell must provide (report a natural
//!   size, accept an exact size). [`FixedCell`] is a geometry-only
//!   implementation.
//! - [`Row`]: a horizontal run of cells measured either naturally
//!   ([`Row::measure_natural`]) or at fixed widths and height
//!   ([`Row::measure_fixed`]).
//! - [`QuadrantTable`]: an ordered stack of rows that aggregates per-column
//!   widths and per-row heights and accepts unified vectors back.
//! - [`align`]: the union pass. [`align::union_widths`] / [`align::union_heights`]
//!   take the element-wise maximum of two tables' vectors and
//!   [`align::apply_widths`] / [`align::apply_heights`] push the result back
//!   and re-measure in fixed mode.
//! - [`TrackOffsets`]: prefix sums over column widths or row heights, used to
//!   resolve a point to a [`CellIndex`].
//!
//! Measurement is strictly ordered: a row must be measured naturally before
//! it can be measured at fixed size, and doing otherwise yields
//! [`LayoutError::NotMeasured`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_table_layout::{FixedCell, QuadrantTable, Row, align};
//!
//! let mut table = QuadrantTable::new();
//! table.push_row(Row::with_cells([FixedCell::from_wh(10.0, 8.0), FixedCell::from_wh(30.0, 6.0)]));
//! table.push_row(Row::with_cells([FixedCell::from_wh(25.0, 4.0), FixedCell::from_wh(5.0, 9.0)]));
//!
//! assert_eq!(table.measure_natural(), Size::new(40.0, 17.0));
//!
//! // Align every row of the table to its own per-column maximum.
//! let widths = table.column_width_union();
//! align::apply_widths(&widths, &mut table).unwrap();
//! assert_eq!(table.size(), Size::new(55.0, 17.0));
//! ```
//!
//! All sizes are logical pixels and are expected to be finite and non-negative.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod align;
mod cell;
mod error;
mod row;
mod table;
mod tracks;

pub use cell::{CellBox, FixedCell};
pub use error::LayoutError;
pub use row::{LayoutMode, Row};
pub use table::{CellIndex, QuadrantTable};
pub use tracks::TrackOffsets;

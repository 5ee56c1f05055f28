// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairwise union of column widths and row heights between quadrant tables.
//!
//! Two tables that must line up along one axis are reconciled by taking the
//! element-wise maximum of their vectors along that axis and pushing the
//! result back into both. The largest occupant of a column (or row) always
//! wins, so nothing ever shrinks below its natural size.
//!
//! ```
//! use understory_table_layout::{FixedCell, QuadrantTable, Row, align};
//!
//! let mut body = QuadrantTable::from_rows([Row::with_cells([
//!     FixedCell::from_wh(40.0, 10.0),
//!     FixedCell::from_wh(15.0, 10.0),
//! ])]);
//! let mut header = QuadrantTable::from_rows([Row::with_cells([
//!     FixedCell::from_wh(25.0, 12.0),
//!     FixedCell::from_wh(30.0, 12.0),
//! ])]);
//! body.measure_natural();
//! header.measure_natural();
//!
//! let widths = align::union_widths(&body, &header);
//! assert_eq!(widths, [40.0, 30.0]);
//!
//! align::apply_widths(&widths, &mut body).unwrap();
//! align::apply_widths(&widths, &mut header).unwrap();
//! assert_eq!(body.width(), header.width());
//! ```

use alloc::vec::Vec;

use crate::table::merge_max;
use crate::{CellBox, LayoutError, QuadrantTable};

/// Element-wise maximum of the two tables' per-column widths.
///
/// The result is as long as the longer of the two vectors; a column present in
/// only one table keeps that table's width.
#[must_use]
pub fn union_widths<A, B>(a: &QuadrantTable<A>, b: &QuadrantTable<B>) -> Vec<f64> {
    let mut widths = a.column_width_union();
    merge_max(&mut widths, &b.column_width_union());
    widths
}

/// Element-wise maximum of the two tables' per-row heights.
///
/// The result is as long as the taller of the two tables; a row present in
/// only one table keeps that table's height.
#[must_use]
pub fn union_heights<A, B>(a: &QuadrantTable<A>, b: &QuadrantTable<B>) -> Vec<f64> {
    let mut heights = a.row_heights();
    merge_max(&mut heights, &b.row_heights());
    heights
}

/// Pushes unified column widths into every row of `table` and re-measures it
/// in fixed mode.
pub fn apply_widths<C: CellBox>(
    widths: &[f64],
    table: &mut QuadrantTable<C>,
) -> Result<(), LayoutError> {
    table.set_column_widths(widths)?;
    table.measure_fixed()?;
    #[cfg(feature = "tracing")]
    tracing::trace!(columns = widths.len(), "applied unified column widths");
    Ok(())
}

/// Pushes unified row heights into `table` and re-measures it in fixed mode.
pub fn apply_heights<C: CellBox>(
    heights: &[f64],
    table: &mut QuadrantTable<C>,
) -> Result<(), LayoutError> {
    table.set_row_heights(heights)?;
    table.measure_fixed()?;
    #[cfg(feature = "tracing")]
    tracing::trace!(rows = heights.len(), "applied unified row heights");
    Ok(())
}

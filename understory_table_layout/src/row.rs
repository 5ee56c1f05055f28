// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A horizontal run of cells and its two measurement modes.
//!
//! A [`Row`] is measured twice during a table-set build:
//!
//! 1. [`Row::measure_natural`] asks every cell for its unconstrained size and
//!    records one width per column plus the tallest cell height.
//! 2. After the alignment pass has widened those values to agree with the
//!    partner quadrant, [`Row::measure_fixed`] forces every cell to exactly
//!    `column_widths[i] × row_height`.

use alloc::vec::Vec;

use kurbo::{Insets, Size};

use crate::{CellBox, LayoutError, TrackOffsets};

/// Which pass last measured a [`Row`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Cells were measured unconstrained.
    Natural,
    /// Cells were forced to the unified column widths and row height.
    Fixed,
}

/// An ordered sequence of cells, indexed by column.
#[derive(Clone, Debug)]
pub struct Row<C> {
    cells: Vec<C>,
    column_widths: Vec<f64>,
    row_height: f64,
    padding: Insets,
    min_size: Size,
    size: Size,
    mode: Option<LayoutMode>,
    columns: TrackOffsets,
}

impl<C> Default for Row<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Row<C> {
    /// Creates an empty row with no padding and no minimum size.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: Vec::new(),
            column_widths: Vec::new(),
            row_height: 0.0,
            padding: Insets::ZERO,
            min_size: Size::ZERO,
            size: Size::ZERO,
            mode: None,
            columns: TrackOffsets::new(),
        }
    }

    /// Creates a row from a sequence of cells.
    #[must_use]
    pub fn with_cells<I: IntoIterator<Item = C>>(cells: I) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Sets the padding around the row's cells.
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self.mode = None;
        self
    }

    /// Sets the minimum size reported by measurement.
    #[must_use]
    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self.mode = None;
        self
    }

    /// Appends a cell. Any previous measurement is discarded.
    pub fn push_cell(&mut self, cell: C) {
        self.cells.push(cell);
        self.mode = None;
    }

    /// Number of cells (columns) in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cells of this row in column order.
    #[must_use]
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    /// The cell at `column`, if any.
    #[must_use]
    pub fn cell(&self, column: usize) -> Option<&C> {
        self.cells.get(column)
    }

    /// Mutable access to the cell at `column`, if any.
    pub fn cell_mut(&mut self, column: usize) -> Option<&mut C> {
        self.cells.get_mut(column)
    }

    /// Per-column widths, index-aligned with [`Row::cells`] once measured.
    #[must_use]
    pub fn column_widths(&self) -> &[f64] {
        &self.column_widths
    }

    /// Height shared by every cell of the row, excluding padding.
    #[must_use]
    pub const fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Padding around the row's cells.
    #[must_use]
    pub const fn padding(&self) -> Insets {
        self.padding
    }

    /// The row's own size from the last measurement, including padding.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The pass that last measured this row, or `None` if it was never measured.
    #[must_use]
    pub const fn layout_mode(&self) -> Option<LayoutMode> {
        self.mode
    }

    /// Overwrites the per-column widths with the leading entries of `widths`.
    ///
    /// `widths` may be longer than the row (extra entries belong to columns this
    /// row does not have) but not shorter.
    pub fn set_column_widths(&mut self, widths: &[f64]) -> Result<(), LayoutError> {
        let Some(widths) = widths.get(..self.cells.len()) else {
            return Err(LayoutError::WidthCountMismatch {
                expected: self.cells.len(),
                found: widths.len(),
            });
        };
        self.column_widths.clear();
        self.column_widths.extend(widths.iter().copied().map(non_negative));
        Ok(())
    }

    /// Overwrites the shared row height.
    pub fn set_row_height(&mut self, height: f64) {
        self.row_height = non_negative(height);
    }

    /// Returns the column under `x`, in row-local coordinates.
    ///
    /// Padding is not part of any column.
    #[must_use]
    pub fn column_at(&self, x: f64) -> Option<usize> {
        self.columns.index_at_offset(x - self.padding.x0)
    }

    /// Start offset of `column` in row-local coordinates, including leading padding.
    #[must_use]
    pub fn column_offset(&self, column: usize) -> f64 {
        self.padding.x0 + self.columns.offset_of(column)
    }

    fn finish(&mut self, content_width: f64) -> Size {
        let width = (content_width + self.padding.x_value()).max(self.min_size.width);
        let height = (self.row_height + self.padding.y_value()).max(self.min_size.height);
        self.columns.rebuild(self.column_widths.iter().copied());
        self.size = Size::new(width, height);
        self.size
    }
}

impl<C: CellBox> Row<C> {
    /// Measures every cell unconstrained.
    ///
    /// Records each cell's natural width as its column width and the tallest
    /// natural height as the row height, then returns the row's own natural
    /// size (content plus padding, at least the minimum size). Calling this
    /// again recomputes everything from scratch.
    pub fn measure_natural(&mut self) -> Size {
        self.column_widths.clear();
        self.row_height = 0.0;
        let mut content_width = 0.0;
        for cell in &mut self.cells {
            let natural = cell.measure_natural();
            let width = non_negative(natural.width);
            self.column_widths.push(width);
            content_width += width;
            self.row_height = self.row_height.max(non_negative(natural.height));
        }
        self.mode = Some(LayoutMode::Natural);
        self.finish(content_width)
    }

    /// Forces every cell to `column_widths[i] × row_height`.
    ///
    /// Must run after [`Row::measure_natural`] (and after any alignment has
    /// widened the widths and height); otherwise returns
    /// [`LayoutError::NotMeasured`]. The row's width becomes the sum of the
    /// column widths plus padding.
    pub fn measure_fixed(&mut self) -> Result<Size, LayoutError> {
        if self.mode.is_none() {
            return Err(LayoutError::NotMeasured);
        }
        debug_assert_eq!(
            self.column_widths.len(),
            self.cells.len(),
            "column widths must stay index-aligned with cells"
        );
        let height = self.row_height;
        let mut content_width = 0.0;
        for (cell, &width) in self.cells.iter_mut().zip(&self.column_widths) {
            cell.measure_exact(Size::new(width, height));
            content_width += width;
        }
        self.mode = Some(LayoutMode::Fixed);
        Ok(self.finish(content_width))
    }
}

/// Clamps negative (and NaN) measurements to zero.
pub(crate) fn non_negative(value: f64) -> f64 {
    debug_assert!(value.is_finite(), "measurements must be finite; got {value:?}");
    if value.is_nan() || value.is_sign_negative() {
        0.0
    } else {
        value
    }
}

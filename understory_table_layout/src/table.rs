// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A vertical stack of rows forming one quadrant of a pinned-header grid.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::{CellBox, LayoutError, Row, TrackOffsets};

/// Position of a cell within a [`QuadrantTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
}

impl CellIndex {
    /// Creates a cell index.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// An ordered sequence of [`Row`]s.
///
/// All rows of one table are expected to have the same number of cells;
/// [`QuadrantTable::column_count`] reports a [`LayoutError::RaggedRows`] when
/// they do not. The table is as wide as its widest row and as tall as the sum
/// of its row heights.
#[derive(Clone, Debug)]
pub struct QuadrantTable<C> {
    rows: Vec<Row<C>>,
    size: Size,
    row_tracks: TrackOffsets,
}

impl<C> Default for QuadrantTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> QuadrantTable<C> {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            size: Size::ZERO,
            row_tracks: TrackOffsets::new(),
        }
    }

    /// Creates a table from a sequence of rows.
    #[must_use]
    pub fn from_rows<I: IntoIterator<Item = Row<C>>>(rows: I) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Row<C>) {
        self.rows.push(row);
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows of this table in order.
    #[must_use]
    pub fn rows(&self) -> &[Row<C>] {
        &self.rows
    }

    /// The row at `index`, if any.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row<C>> {
        self.rows.get(index)
    }

    /// Mutable access to the row at `index`, if any.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row<C>> {
        self.rows.get_mut(index)
    }

    /// The cell at `index`, if any.
    #[must_use]
    pub fn cell(&self, index: CellIndex) -> Option<&C> {
        self.rows.get(index.row)?.cell(index.column)
    }

    /// The table's size from the last measurement.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The table's width from the last measurement.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.size.width
    }

    /// The table's height from the last measurement.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.size.height
    }

    /// Returns the shared column count, rejecting ragged tables.
    ///
    /// An empty table has zero columns.
    pub fn column_count(&self) -> Result<usize, LayoutError> {
        let Some(first) = self.rows.first() else {
            return Ok(0);
        };
        let expected = first.len();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            Some((row, r)) => Err(LayoutError::RaggedRows {
                row,
                expected,
                found: r.len(),
            }),
            None => Ok(expected),
        }
    }

    /// Per-column maximum width across all rows.
    ///
    /// The result is as long as the longest row.
    #[must_use]
    pub fn column_width_union(&self) -> Vec<f64> {
        let mut widths = Vec::new();
        for row in &self.rows {
            merge_max(&mut widths, row.column_widths());
        }
        widths
    }

    /// Per-row height, index-aligned with [`QuadrantTable::rows`].
    #[must_use]
    pub fn row_heights(&self) -> Vec<f64> {
        self.rows.iter().map(Row::row_height).collect()
    }

    /// Overwrites every row's column widths with `widths`.
    ///
    /// Nothing is changed if `widths` is shorter than any row.
    pub fn set_column_widths(&mut self, widths: &[f64]) -> Result<(), LayoutError> {
        let longest = self.rows.iter().map(Row::len).max().unwrap_or(0);
        if widths.len() < longest {
            return Err(LayoutError::WidthCountMismatch {
                expected: longest,
                found: widths.len(),
            });
        }
        for row in &mut self.rows {
            row.set_column_widths(widths)?;
        }
        Ok(())
    }

    /// Overwrites every row's height with the matching entry of `heights`.
    ///
    /// Nothing is changed if `heights` is shorter than the number of rows.
    pub fn set_row_heights(&mut self, heights: &[f64]) -> Result<(), LayoutError> {
        if heights.len() < self.rows.len() {
            return Err(LayoutError::HeightCountMismatch {
                expected: self.rows.len(),
                found: heights.len(),
            });
        }
        for (row, &height) in self.rows.iter_mut().zip(heights) {
            row.set_row_height(height);
        }
        Ok(())
    }

    /// Top edge of row `index` in table-local coordinates.
    #[must_use]
    pub fn row_offset(&self, index: usize) -> f64 {
        self.row_tracks.offset_of(index)
    }

    /// Resolves the cell under `local`, a point in table-local coordinates.
    ///
    /// Points on row padding or outside the table resolve to `None`.
    #[must_use]
    pub fn cell_at(&self, local: Point) -> Option<CellIndex> {
        let row_index = self.row_tracks.index_at_offset(local.y)?;
        let row = self.rows.get(row_index)?;
        let inner_y = local.y - self.row_tracks.offset_of(row_index) - row.padding().y0;
        if inner_y < 0.0 || inner_y >= row.row_height() {
            return None;
        }
        let column = row.column_at(local.x)?;
        Some(CellIndex::new(row_index, column))
    }

    /// The rectangle a cell occupies in table-local coordinates.
    #[must_use]
    pub fn cell_rect(&self, index: CellIndex) -> Option<Rect> {
        let row = self.rows.get(index.row)?;
        let width = *row.column_widths().get(index.column)?;
        let origin = Point::new(
            row.column_offset(index.column),
            self.row_tracks.offset_of(index.row) + row.padding().y0,
        );
        Some(Rect::from_origin_size(
            origin,
            Size::new(width, row.row_height()),
        ))
    }

    fn finish(&mut self) -> Size {
        let width = self
            .rows
            .iter()
            .map(|row| row.size().width)
            .fold(0.0, f64::max);
        self.row_tracks
            .rebuild(self.rows.iter().map(|row| row.size().height));
        self.size = Size::new(width, self.row_tracks.total_extent());
        self.size
    }
}

impl<C: CellBox> QuadrantTable<C> {
    /// Measures every row naturally and returns the table's natural size.
    pub fn measure_natural(&mut self) -> Size {
        for row in &mut self.rows {
            row.measure_natural();
        }
        self.finish()
    }

    /// Measures every row at its fixed widths and height.
    ///
    /// Fails with [`LayoutError::NotMeasured`] if any row was not measured
    /// naturally first.
    pub fn measure_fixed(&mut self) -> Result<Size, LayoutError> {
        for row in &mut self.rows {
            row.measure_fixed()?;
        }
        Ok(self.finish())
    }
}

/// Element-wise maximum of `acc` and `values`, growing `acc` as needed.
pub(crate) fn merge_max(acc: &mut Vec<f64>, values: &[f64]) {
    for (index, &value) in values.iter().enumerate() {
        match acc.get_mut(index) {
            Some(slot) => *slot = slot.max(value),
            None => acc.push(value),
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The four quadrants of a pinned-header grid and the tables that fill them.

use understory_table_layout::QuadrantTable;

/// One of the four sub-grids that together make up a pinned-header table.
///
/// ```text
/// +--------+----------------+
/// | Corner |  ColumnHeader  |
/// +--------+----------------+
/// |  Row   |                |
/// | Header |      Body      |
/// |        |                |
/// +--------+----------------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    /// The scrollable data cells.
    Body,
    /// Pinned to the top edge; pans horizontally with the body.
    ColumnHeader,
    /// Pinned to the leading edge; pans vertically with the body.
    RowHeader,
    /// Pinned on both axes.
    Corner,
}

impl Quadrant {
    /// Every quadrant, in a stable order.
    pub const ALL: [Self; 4] = [
        Self::Body,
        Self::ColumnHeader,
        Self::RowHeader,
        Self::Corner,
    ];

    /// The axes along which this quadrant follows the viewport's pan.
    #[must_use]
    pub const fn pan_axes(self) -> PanAxes {
        match self {
            Self::Body => PanAxes::all(),
            Self::ColumnHeader => PanAxes::HORIZONTAL,
            Self::RowHeader => PanAxes::VERTICAL,
            Self::Corner => PanAxes::empty(),
        }
    }
}

bitflags::bitflags! {
    /// Pan components a quadrant's transform honours.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PanAxes: u8 {
        /// Follows the horizontal pan.
        const HORIZONTAL = 0b0000_0001;
        /// Follows the vertical pan.
        const VERTICAL   = 0b0000_0010;
    }
}

/// The shared axis of an alignment pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The pair shares column widths.
    Columns,
    /// The pair shares row heights.
    Rows,
}

/// The four quadrant tables of one grid.
#[derive(Clone, Debug, Default)]
pub struct QuadrantTables<C> {
    /// Scrollable data cells.
    pub body: QuadrantTable<C>,
    /// Header above the body, sharing its columns.
    pub column_header: QuadrantTable<C>,
    /// Header beside the body, sharing its rows.
    pub row_header: QuadrantTable<C>,
    /// Top-leading cell block shared by both headers.
    pub corner: QuadrantTable<C>,
}

impl<C> QuadrantTables<C> {
    /// Bundles four tables.
    #[must_use]
    pub const fn new(
        body: QuadrantTable<C>,
        column_header: QuadrantTable<C>,
        row_header: QuadrantTable<C>,
        corner: QuadrantTable<C>,
    ) -> Self {
        Self {
            body,
            column_header,
            row_header,
            corner,
        }
    }

    /// The table for `quadrant`.
    #[must_use]
    pub const fn get(&self, quadrant: Quadrant) -> &QuadrantTable<C> {
        match quadrant {
            Quadrant::Body => &self.body,
            Quadrant::ColumnHeader => &self.column_header,
            Quadrant::RowHeader => &self.row_header,
            Quadrant::Corner => &self.corner,
        }
    }

    /// Mutable access to the table for `quadrant`.
    pub fn get_mut(&mut self, quadrant: Quadrant) -> &mut QuadrantTable<C> {
        match quadrant {
            Quadrant::Body => &mut self.body,
            Quadrant::ColumnHeader => &mut self.column_header,
            Quadrant::RowHeader => &mut self.row_header,
            Quadrant::Corner => &mut self.corner,
        }
    }
}

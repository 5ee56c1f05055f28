// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural and sequencing errors raised by measurement and alignment.

/// Errors produced while measuring or aligning quadrant tables.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A row does not have the same number of cells as the first row of its table.
    #[error("row {row} has {found} cells but the table has {expected} columns")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Cell count of the offending row.
        found: usize,
    },
    /// Fixed measurement was requested before natural measurement.
    #[error("fixed measurement requested before natural measurement")]
    NotMeasured,
    /// A unified width vector is shorter than the table's column count.
    #[error("{found} column widths supplied for a table with {expected} columns")]
    WidthCountMismatch {
        /// Number of columns in the table.
        expected: usize,
        /// Number of widths supplied.
        found: usize,
    },
    /// A unified height vector is shorter than the table's row count.
    #[error("{found} row heights supplied for a table with {expected} rows")]
    HeightCountMismatch {
        /// Number of rows in the table.
        expected: usize,
        /// Number of heights supplied.
        found: usize,
    },
}

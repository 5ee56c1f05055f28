// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cell capability contract and a plain geometry-only cell.

use alloc::boxed::Box;

use kurbo::Size;

/// An opaque box with an intrinsic natural size.
///
/// Hosts implement this for whatever sits inside a table cell (a text view, an
/// image, a nested widget). The table only ever asks two things of a cell:
///
/// - report its natural size when measured without constraints, and
/// - accept an exact size that it must stretch to fill.
///
/// Natural size is expected to be stable: measuring a cell naturally after it
/// has been given an exact size must report the same natural size as before.
/// Both dimensions must be finite and non-negative; negative values are
/// treated as zero.
pub trait CellBox {
    /// Measures the cell without constraints and returns its natural size.
    fn measure_natural(&mut self) -> Size;

    /// Forces the cell to lay itself out at exactly `size`.
    fn measure_exact(&mut self, size: Size);
}

impl<C: CellBox + ?Sized> CellBox for &mut C {
    fn measure_natural(&mut self) -> Size {
        (**self).measure_natural()
    }

    fn measure_exact(&mut self, size: Size) {
        (**self).measure_exact(size);
    }
}

impl<C: CellBox + ?Sized> CellBox for Box<C> {
    fn measure_natural(&mut self) -> Size {
        (**self).measure_natural()
    }

    fn measure_exact(&mut self, size: Size) {
        (**self).measure_exact(size);
    }
}

/// A cell that is nothing but a rectangle.
///
/// The natural size is fixed at construction; the most recent exact size is
/// recorded and can be read back with [`FixedCell::assigned_size`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedCell {
    natural: Size,
    assigned: Option<Size>,
}

impl FixedCell {
    /// Creates a cell with the given natural size.
    #[must_use]
    pub const fn new(natural: Size) -> Self {
        Self {
            natural,
            assigned: None,
        }
    }

    /// Creates a cell with the given natural width and height.
    #[must_use]
    pub const fn from_wh(width: f64, height: f64) -> Self {
        Self::new(Size::new(width, height))
    }

    /// Returns the natural size of this cell.
    #[must_use]
    pub const fn natural_size(&self) -> Size {
        self.natural
    }

    /// Returns the size last assigned by fixed measurement, if any.
    #[must_use]
    pub const fn assigned_size(&self) -> Option<Size> {
        self.assigned
    }
}

impl CellBox for FixedCell {
    fn measure_natural(&mut self) -> Size {
        self.natural
    }

    fn measure_exact(&mut self, size: Size) {
        self.assigned = Some(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_cell_keeps_natural_size_after_exact_measure() {
        let mut cell = FixedCell::from_wh(30.0, 12.0);
        assert_eq!(cell.assigned_size(), None);

        cell.measure_exact(Size::new(50.0, 20.0));
        assert_eq!(cell.assigned_size(), Some(Size::new(50.0, 20.0)));
        assert_eq!(cell.measure_natural(), Size::new(30.0, 12.0));
    }

    #[test]
    fn boxed_cells_forward_to_inner() {
        let mut inner = FixedCell::from_wh(4.0, 5.0);
        {
            let mut boxed: Box<dyn CellBox + '_> = Box::new(&mut inner);
            assert_eq!(boxed.measure_natural(), Size::new(4.0, 5.0));
            boxed.measure_exact(Size::new(8.0, 9.0));
        }
        assert_eq!(inner.assigned_size(), Some(Size::new(8.0, 9.0)));
    }
}

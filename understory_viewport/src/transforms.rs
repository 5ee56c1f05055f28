// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The four per-quadrant matrices, derived wholesale from scale and pan.

use kurbo::{Affine, Vec2};

use crate::{PanAxes, Quadrant};

/// One [`Affine`] per quadrant.
///
/// Every matrix is `scale` followed by the components of `pan` that the
/// quadrant's [`Quadrant::pan_axes`] allow, so the column header never
/// translates vertically and the row header never translates horizontally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadrantTransforms {
    /// Body matrix.
    pub body: Affine,
    /// Column header matrix.
    pub column_header: Affine,
    /// Row header matrix.
    pub row_header: Affine,
    /// Corner matrix.
    pub corner: Affine,
}

impl Default for QuadrantTransforms {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl QuadrantTransforms {
    /// All four quadrants untransformed.
    pub const IDENTITY: Self = Self {
        body: Affine::IDENTITY,
        column_header: Affine::IDENTITY,
        row_header: Affine::IDENTITY,
        corner: Affine::IDENTITY,
    };

    /// Computes all four matrices for `scale` and `pan`.
    #[must_use]
    pub fn new(scale: f64, pan: Vec2) -> Self {
        Self {
            body: Self::for_quadrant(Quadrant::Body, scale, pan),
            column_header: Self::for_quadrant(Quadrant::ColumnHeader, scale, pan),
            row_header: Self::for_quadrant(Quadrant::RowHeader, scale, pan),
            corner: Self::for_quadrant(Quadrant::Corner, scale, pan),
        }
    }

    /// Computes the matrix of a single quadrant.
    #[must_use]
    pub fn for_quadrant(quadrant: Quadrant, scale: f64, pan: Vec2) -> Affine {
        let axes = quadrant.pan_axes();
        let translation = Vec2::new(
            if axes.contains(PanAxes::HORIZONTAL) {
                pan.x
            } else {
                0.0
            },
            if axes.contains(PanAxes::VERTICAL) {
                pan.y
            } else {
                0.0
            },
        );
        Affine::scale(scale).then_translate(translation)
    }

    /// The matrix of `quadrant`.
    #[must_use]
    pub const fn get(&self, quadrant: Quadrant) -> Affine {
        match quadrant {
            Quadrant::Body => self.body,
            Quadrant::ColumnHeader => self.column_header,
            Quadrant::RowHeader => self.row_header,
            Quadrant::Corner => self.corner,
        }
    }
}

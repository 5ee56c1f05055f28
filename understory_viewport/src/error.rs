// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_table_layout::LayoutError;

use crate::{Axis, Quadrant};

/// Invalid [`ViewportConfig`](crate::ViewportConfig) limits.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A limit was NaN or infinite.
    #[error("scale limits must be finite (min {min_scale}, max {max_scale})")]
    NonFinite {
        /// Requested minimum.
        min_scale: f64,
        /// Requested maximum.
        max_scale: f64,
    },
    /// The minimum was zero or negative.
    #[error("minimum scale must be positive, got {0}")]
    NonPositiveMinimum(f64),
    /// The minimum exceeded the maximum.
    #[error("minimum scale {min_scale} exceeds maximum scale {max_scale}")]
    Inverted {
        /// Requested minimum.
        min_scale: f64,
        /// Requested maximum.
        max_scale: f64,
    },
    /// The range did not contain `1.0`.
    #[error("scale range [{min_scale}, {max_scale}] must contain 1.0")]
    ExcludesUnitScale {
        /// Requested minimum.
        min_scale: f64,
        /// Requested maximum.
        max_scale: f64,
    },
}

/// A table set that cannot be aligned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// One quadrant table failed to lay out.
    #[error("{quadrant:?} table: {source}")]
    Layout {
        /// The offending quadrant.
        quadrant: Quadrant,
        /// The underlying layout failure.
        source: LayoutError,
    },
    /// Two tables that must share an axis disagree on its length.
    #[error(
        "{first:?} has {first_len} {axis:?} but {second:?} has {second_len}; they must match"
    )]
    ShapeMismatch {
        /// The shared axis.
        axis: Axis,
        /// First table of the pair.
        first: Quadrant,
        /// Second table of the pair.
        second: Quadrant,
        /// Column or row count of `first`.
        first_len: usize,
        /// Column or row count of `second`.
        second_len: usize,
    },
}

/// Misuse of a [`ViewportController`](crate::ViewportController).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewportError {
    /// Pan, scale or hit mapping was requested before a successful build.
    #[error("viewport has not been built")]
    NotBuilt,
}

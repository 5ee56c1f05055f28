// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_viewport::{BuildError, ViewportError};

/// Invalid [`RouterConfig`](crate::RouterConfig).
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The touch slop was negative or not finite.
    #[error("touch slop must be finite and non-negative, got {0}")]
    InvalidTouchSlop(f64),
}

/// Failures surfaced by [`FixedHeaderTable`](crate::FixedHeaderTable).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FacadeError {
    /// The tables could not be aligned.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Input arrived before the first successful build.
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    /// A rebuild was requested mid-gesture; cancel the gesture first.
    #[error("cannot rebuild while a gesture is active")]
    GestureActive,
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale limits.

use crate::ConfigError;

/// Bounds on the viewport's zoom factor.
///
/// The unit scale must lie within the bounds, since a freshly built viewport
/// starts at scale `1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    min_scale: f64,
    max_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 2.0,
        }
    }
}

impl ViewportConfig {
    /// Validates and creates a configuration.
    pub fn new(min_scale: f64, max_scale: f64) -> Result<Self, ConfigError> {
        if !min_scale.is_finite() || !max_scale.is_finite() {
            return Err(ConfigError::NonFinite {
                min_scale,
                max_scale,
            });
        }
        if min_scale <= 0.0 {
            return Err(ConfigError::NonPositiveMinimum(min_scale));
        }
        if min_scale > max_scale {
            return Err(ConfigError::Inverted {
                min_scale,
                max_scale,
            });
        }
        if !(min_scale..=max_scale).contains(&1.0) {
            return Err(ConfigError::ExcludesUnitScale {
                min_scale,
                max_scale,
            });
        }
        Ok(Self {
            min_scale,
            max_scale,
        })
    }

    /// Smallest allowed scale.
    #[must_use]
    pub const fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Largest allowed scale.
    #[must_use]
    pub const fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Clamps `scale` into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ConfigError;

/// Gesture router tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouterConfig {
    touch_slop: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self { touch_slop: 8.0 }
    }
}

impl RouterConfig {
    /// Creates a configuration.
    ///
    /// `touch_slop` is the displacement, in logical pixels along either axis,
    /// a pointer must exceed before its drag becomes a pan.
    pub fn new(touch_slop: f64) -> Result<Self, ConfigError> {
        if !touch_slop.is_finite() || touch_slop < 0.0 {
            return Err(ConfigError::InvalidTouchSlop(touch_slop));
        }
        Ok(Self { touch_slop })
    }

    /// Pan threshold in logical pixels.
    #[must_use]
    pub const fn touch_slop(&self) -> f64 {
        self.touch_slop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slop_is_validated() {
        assert_eq!(RouterConfig::default().touch_slop(), 8.0);
        assert_eq!(RouterConfig::new(0.0).map(|c| c.touch_slop()), Ok(0.0));
        assert!(matches!(
            RouterConfig::new(-1.0),
            Err(ConfigError::InvalidTouchSlop(_))
        ));
        assert!(RouterConfig::new(f64::INFINITY).is_err());
    }
}

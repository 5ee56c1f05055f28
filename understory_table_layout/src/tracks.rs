// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prefix-sum offsets over a dense strip of tracks (columns or rows).

use alloc::vec::Vec;

/// Start offsets for a dense strip of tracks indexed `0..len`.
///
/// Tables are always fully materialized, so the prefix sums are computed
/// eagerly whenever the extents change rather than lazily on query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackOffsets {
    extents: Vec<f64>,
    starts: Vec<f64>,
    total: f64,
}

impl TrackOffsets {
    /// Creates an empty strip.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            extents: Vec::new(),
            starts: Vec::new(),
            total: 0.0,
        }
    }

    /// Creates a strip from a slice of track extents.
    #[must_use]
    pub fn from_extents(extents: &[f64]) -> Self {
        let mut tracks = Self::new();
        tracks.rebuild(extents.iter().copied());
        tracks
    }

    /// Replaces all extents and recomputes the start offsets.
    ///
    /// Negative extents are clamped to zero.
    pub fn rebuild<I>(&mut self, extents: I)
    where
        I: IntoIterator<Item = f64>,
    {
        self.extents.clear();
        self.starts.clear();
        let mut pos = 0.0;
        for extent in extents {
            debug_assert!(
                extent.is_finite(),
                "TrackOffsets extents must be finite; got {extent:?}"
            );
            let extent = if extent.is_sign_negative() { 0.0 } else { extent };
            self.starts.push(pos);
            self.extents.push(extent);
            pos += extent;
        }
        self.total = pos;
    }

    /// Number of tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// Returns `true` if there are no tracks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Sum of all track extents.
    #[must_use]
    pub const fn total_extent(&self) -> f64 {
        self.total
    }

    /// Start offset of `index`. Indices past the end return the total extent.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        self.starts.get(index).copied().unwrap_or(self.total)
    }

    /// Extent of `index`, or zero when out of range.
    #[must_use]
    pub fn extent_of(&self, index: usize) -> f64 {
        self.extents.get(index).copied().unwrap_or(0.0)
    }

    /// Returns the track containing `offset`.
    ///
    /// A track covers `[start, start + extent)`. Offsets before the first
    /// track or at/after the end of the strip resolve to `None`.
    #[must_use]
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        if self.is_empty() || offset.is_nan() || offset < 0.0 || offset >= self.total {
            return None;
        }
        // Last track whose start is at or before `offset`.
        let after = self.starts.partition_point(|&start| start <= offset);
        after.checked_sub(1)
    }
}

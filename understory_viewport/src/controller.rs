// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport state, table-set alignment and pointer-to-quadrant mapping.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use understory_table_layout::{CellBox, align};

use crate::{
    Axis, BuildError, Quadrant, QuadrantTables, QuadrantTransforms, ViewportConfig, ViewportError,
};

/// Pairs that share column widths, in the order they are unified.
const COLUMN_PAIRS: [(Quadrant, Quadrant); 2] = [
    (Quadrant::Body, Quadrant::ColumnHeader),
    (Quadrant::RowHeader, Quadrant::Corner),
];

/// Pairs that share row heights, in the order they are unified.
const ROW_PAIRS: [(Quadrant, Quadrant); 2] = [
    (Quadrant::Body, Quadrant::RowHeader),
    (Quadrant::ColumnHeader, Quadrant::Corner),
];

/// Scrollbar inputs for the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Scaled content width.
    pub horizontal_range: f64,
    /// Distance scrolled from the leading edge.
    pub horizontal_offset: f64,
    /// Visible width.
    pub horizontal_extent: f64,
    /// Scaled content height.
    pub vertical_range: f64,
    /// Distance scrolled from the top edge.
    pub vertical_offset: f64,
    /// Visible height.
    pub vertical_extent: f64,
}

/// Where a screen point lands in the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadrantHit {
    /// The quadrant under the point.
    ///
    /// `None` while the corner has no size yet; the point is then passed
    /// through unchanged in both `content` and `local`.
    pub quadrant: Option<Quadrant>,
    /// The point in the composed grid's unscaled layout space.
    pub content: Point,
    /// The point relative to the quadrant table's own origin.
    pub local: Point,
}

impl QuadrantHit {
    const fn unmapped(point: Point) -> Self {
        Self {
            quadrant: None,
            content: point,
            local: point,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct QuadrantSizes {
    body: Size,
    column_header: Size,
    row_header: Size,
    corner: Size,
}

/// Owns scale and pan for a four-quadrant grid and derives its matrices.
///
/// Usage:
/// - [`ViewportController::build`] aligns the four tables and records their
///   final sizes.
/// - [`ViewportController::apply_pan_and_scale`] moves and zooms the grid;
///   scale stays within the configured limits and pan within the content
///   bounds after every call.
/// - [`ViewportController::transform`] hands the renderer one matrix per
///   quadrant, and [`ViewportController::map_to_quadrant`] maps input back.
///
/// Pan is the translation of the visible origin and is never positive: a pan
/// of `(-30, 0)` means the body has been scrolled 30 pixels to the left.
#[derive(Clone, Debug)]
pub struct ViewportController {
    config: ViewportConfig,
    scale: f64,
    pan: Vec2,
    viewport: Size,
    sizes: Option<QuadrantSizes>,
    transforms: QuadrantTransforms,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl ViewportController {
    /// Creates an unbuilt controller at unit scale and zero pan.
    #[must_use]
    pub const fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            scale: 1.0,
            pan: Vec2::ZERO,
            viewport: Size::ZERO,
            sizes: None,
            transforms: QuadrantTransforms::IDENTITY,
        }
    }

    /// Aligns the four tables and derives content bounds from them.
    ///
    /// Every table is measured naturally, then column widths are unified
    /// for the column-sharing pairs and row heights for the row-sharing
    /// pairs, and each table ends up measured at its fixed size. Current
    /// scale and pan are kept and re-clamped against the new content.
    ///
    /// A table with no rows takes no part in shape checks, so a grid can be
    /// built before its headers exist.
    pub fn build<C: CellBox>(&mut self, tables: &mut QuadrantTables<C>) -> Result<(), BuildError> {
        check_shapes(tables)?;
        for quadrant in Quadrant::ALL {
            tables.get_mut(quadrant).measure_natural();
        }
        for (first, second) in COLUMN_PAIRS {
            let widths = align::union_widths(tables.get(first), tables.get(second));
            for quadrant in [first, second] {
                align::apply_widths(&widths, tables.get_mut(quadrant))
                    .map_err(|source| BuildError::Layout { quadrant, source })?;
            }
        }
        for (first, second) in ROW_PAIRS {
            let heights = align::union_heights(tables.get(first), tables.get(second));
            for quadrant in [first, second] {
                align::apply_heights(&heights, tables.get_mut(quadrant))
                    .map_err(|source| BuildError::Layout { quadrant, source })?;
            }
        }

        self.sizes = Some(QuadrantSizes {
            body: tables.body.size(),
            column_header: tables.column_header.size(),
            row_header: tables.row_header.size(),
            corner: tables.corner.size(),
        });
        self.settle(Vec2::ZERO);

        #[cfg(feature = "tracing")]
        {
            let content = self.content_size();
            tracing::debug!(
                content_width = content.width,
                content_height = content.height,
                body_rows = tables.body.len(),
                "built quadrant tables"
            );
        }
        Ok(())
    }

    /// Returns `true` once [`ViewportController::build`] has succeeded.
    #[must_use]
    pub const fn is_built(&self) -> bool {
        self.sizes.is_some()
    }

    /// Pans by `delta` and multiplies the scale by `scale_delta`, keeping the
    /// content under `focal` (a screen point) stationary while zooming.
    ///
    /// A positive `delta` moves the content towards the leading edges, as a
    /// finger dragging the grid left would. The new scale is clamped to the
    /// configured limits and the pan to the content bounds; `focal` is
    /// ignored when `scale_delta == 1.0`.
    ///
    /// Non-finite deltas and non-positive scale factors are discarded.
    pub fn apply_pan_and_scale(
        &mut self,
        delta: Vec2,
        focal: Point,
        scale_delta: f64,
    ) -> Result<(), ViewportError> {
        if !self.is_built() {
            return Err(ViewportError::NotBuilt);
        }
        let mut delta = delta;
        if !delta.is_finite() {
            #[cfg(feature = "tracing")]
            tracing::warn!(dx = delta.x, dy = delta.y, "discarding non-finite pan");
            delta = Vec2::ZERO;
        }
        if scale_delta != 1.0 {
            if scale_delta.is_finite() && scale_delta > 0.0 && focal.is_finite() {
                let content_focal = self.transforms.body.inverse() * focal;
                let new_scale = self.config.clamp(self.scale * scale_delta);
                // Move the pan so that the focal content point projects back onto `focal`.
                let projected = content_focal.to_vec2() * new_scale + self.pan;
                delta += projected - focal.to_vec2();
                self.scale = new_scale;
            } else {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    scale_delta,
                    focal_x = focal.x,
                    focal_y = focal.y,
                    "discarding invalid scale"
                );
            }
        }
        self.settle(delta);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            scale = self.scale,
            pan_x = self.pan.x,
            pan_y = self.pan.y,
            "applied pan and scale"
        );
        Ok(())
    }

    /// Replaces the scale limits, re-clamping scale and pan immediately.
    pub fn set_config(&mut self, config: ViewportConfig) {
        self.config = config;
        self.scale = config.clamp(self.scale);
        self.settle(Vec2::ZERO);
    }

    /// The current scale limits.
    #[must_use]
    pub const fn config(&self) -> ViewportConfig {
        self.config
    }

    /// Smallest allowed scale.
    #[must_use]
    pub const fn min_scale(&self) -> f64 {
        self.config.min_scale()
    }

    /// Largest allowed scale.
    #[must_use]
    pub const fn max_scale(&self) -> f64 {
        self.config.max_scale()
    }

    /// Sets the visible area and re-clamps the pan against it.
    ///
    /// Negative or non-finite dimensions are treated as zero.
    pub fn set_viewport_size(&mut self, size: Size) {
        let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        self.viewport = Size::new(sanitize(size.width), sanitize(size.height));
        self.settle(Vec2::ZERO);
    }

    /// The visible area.
    #[must_use]
    pub const fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// The current scale.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// The current pan; both components are always `<= 0`.
    #[must_use]
    pub const fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Lower bound of the pan at the current scale.
    ///
    /// Either component is positive when the scaled content is smaller than
    /// the viewport on that axis, in which case the pan is pinned at zero.
    #[must_use]
    pub fn max_pan(&self) -> Vec2 {
        let content = self.content_size();
        Vec2::new(
            self.viewport.width - content.width * self.scale,
            self.viewport.height - content.height * self.scale,
        )
    }

    /// Unscaled content size: the corner plus the headers beyond it.
    ///
    /// Zero before the first build.
    #[must_use]
    pub fn content_size(&self) -> Size {
        let sizes = self.sizes.unwrap_or_default();
        Size::new(
            sizes.corner.width + sizes.column_header.width,
            sizes.corner.height + sizes.row_header.height,
        )
    }

    /// Fixed size of `quadrant`'s table from the last build.
    #[must_use]
    pub fn quadrant_size(&self, quadrant: Quadrant) -> Size {
        let sizes = self.sizes.unwrap_or_default();
        match quadrant {
            Quadrant::Body => sizes.body,
            Quadrant::ColumnHeader => sizes.column_header,
            Quadrant::RowHeader => sizes.row_header,
            Quadrant::Corner => sizes.corner,
        }
    }

    /// Top-left of `quadrant`'s table within the composed grid.
    #[must_use]
    pub fn quadrant_origin(&self, quadrant: Quadrant) -> Point {
        let sizes = self.sizes.unwrap_or_default();
        match quadrant {
            Quadrant::Corner => Point::ZERO,
            Quadrant::ColumnHeader => Point::new(sizes.corner.width, 0.0),
            Quadrant::RowHeader => Point::new(0.0, sizes.corner.height),
            Quadrant::Body => Point::new(sizes.row_header.width, sizes.column_header.height),
        }
    }

    /// Bounds of `quadrant`'s table within the composed grid, before scaling.
    #[must_use]
    pub fn quadrant_bounds(&self, quadrant: Quadrant) -> Rect {
        Rect::from_origin_size(
            self.quadrant_origin(quadrant),
            self.quadrant_size(quadrant),
        )
    }

    /// The matrix the renderer applies to `quadrant`.
    #[must_use]
    pub const fn transform(&self, quadrant: Quadrant) -> Affine {
        self.transforms.get(quadrant)
    }

    /// All four matrices.
    #[must_use]
    pub const fn transforms(&self) -> &QuadrantTransforms {
        &self.transforms
    }

    /// Maps table-local coordinates of `quadrant` to the screen.
    #[must_use]
    pub fn local_transform(&self, quadrant: Quadrant) -> Affine {
        self.transform(quadrant) * Affine::translate(self.quadrant_origin(quadrant).to_vec2())
    }

    /// Scrollbar ranges, offsets and extents.
    #[must_use]
    pub fn scroll_metrics(&self) -> ScrollMetrics {
        let content = self.content_size();
        ScrollMetrics {
            horizontal_range: content.width * self.scale,
            horizontal_offset: -self.pan.x,
            horizontal_extent: self.viewport.width,
            vertical_range: content.height * self.scale,
            vertical_offset: -self.pan.y,
            vertical_extent: self.viewport.height,
        }
    }

    /// Classifies a screen point by quadrant and maps it into that quadrant's
    /// unscaled coordinates.
    ///
    /// The drawn corner's right and bottom edges divide the screen; a point
    /// exactly on a dividing line belongs to the top or leading quadrant.
    pub fn map_to_quadrant(&self, point: Point) -> Result<QuadrantHit, ViewportError> {
        let sizes = self.sizes.ok_or(ViewportError::NotBuilt)?;
        if sizes.corner == Size::ZERO {
            return Ok(QuadrantHit::unmapped(point));
        }
        let drawn = self.transforms.corner * Point::new(sizes.corner.width, sizes.corner.height);
        let quadrant = match (point.x <= drawn.x, point.y <= drawn.y) {
            (true, true) => Quadrant::Corner,
            (false, true) => Quadrant::ColumnHeader,
            (true, false) => Quadrant::RowHeader,
            (false, false) => Quadrant::Body,
        };
        let content = self.transforms.get(quadrant).inverse() * point;
        Ok(QuadrantHit {
            quadrant: Some(quadrant),
            content,
            local: content - self.quadrant_origin(quadrant).to_vec2(),
        })
    }

    /// Maps a screen point into `quadrant`'s table-local coordinates, whether
    /// or not the point lies inside that quadrant.
    ///
    /// Used to keep delivering a pointer sequence to the quadrant it started
    /// in after the pointer has crossed into another one.
    #[must_use]
    pub fn to_local(&self, quadrant: Quadrant, point: Point) -> Point {
        self.transforms.get(quadrant).inverse() * point - self.quadrant_origin(quadrant).to_vec2()
    }

    fn settle(&mut self, delta: Vec2) {
        let max_pan = self.max_pan();
        self.pan = Vec2::new(
            (self.pan.x - delta.x).max(max_pan.x).min(0.0),
            (self.pan.y - delta.y).max(max_pan.y).min(0.0),
        );
        self.transforms = QuadrantTransforms::new(self.scale, self.pan);
    }
}

fn check_shapes<C>(tables: &QuadrantTables<C>) -> Result<(), BuildError> {
    let columns = |quadrant: Quadrant| {
        tables
            .get(quadrant)
            .column_count()
            .map_err(|source| BuildError::Layout { quadrant, source })
    };
    for (axis, pairs) in [(Axis::Columns, COLUMN_PAIRS), (Axis::Rows, ROW_PAIRS)] {
        for (first, second) in pairs {
            if tables.get(first).is_empty() || tables.get(second).is_empty() {
                continue;
            }
            let (first_len, second_len) = match axis {
                Axis::Columns => (columns(first)?, columns(second)?),
                Axis::Rows => (tables.get(first).len(), tables.get(second).len()),
            };
            if first_len != second_len {
                return Err(BuildError::ShapeMismatch {
                    axis,
                    first,
                    second,
                    first_len,
                    second_len,
                });
            }
        }
    }
    for quadrant in Quadrant::ALL {
        columns(quadrant)?;
    }
    Ok(())
}

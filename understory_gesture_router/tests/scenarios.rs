// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios driving a full pinned-header grid.

use kurbo::{Point, Size, Vec2};
use understory_gesture_router::{
    FixedHeaderTable, PointerAction, PointerEvent, PointerId, QuadrantAction, RouterConfig,
    ScaleDetector, ScaleEvent,
};
use understory_table_layout::{CellIndex, FixedCell, QuadrantTable, Row};
use understory_viewport::{Quadrant, QuadrantTables, ViewportConfig};

fn table(
    rows: usize,
    columns: usize,
    size: impl Fn(usize, usize) -> (f64, f64),
) -> QuadrantTable<FixedCell> {
    QuadrantTable::from_rows((0..rows).map(|r| {
        Row::with_cells((0..columns).map(|c| {
            let (w, h) = size(r, c);
            FixedCell::from_wh(w, h)
        }))
    }))
}

/// 25×25 body of 40×40 cells, a two-row column header, a one-column row
/// header and a 2×1 corner, with headers of uneven natural size.
fn spreadsheet(config: ViewportConfig) -> FixedHeaderTable<FixedCell> {
    let tables = QuadrantTables::new(
        table(25, 25, |_, _| (40.0, 40.0)),
        table(2, 25, |r, c| (30.0 + 2.0 * c as f64, 20.0 + 10.0 * r as f64)),
        table(25, 1, |r, _| (70.0, 30.0 + r as f64 * 2.0)),
        table(2, 1, |_, _| (50.0, 15.0)),
    );
    let mut grid = FixedHeaderTable::new(tables, config, RouterConfig::default());
    grid.set_viewport_size(Size::new(360.0, 640.0));
    grid.build().unwrap();
    grid
}

/// Two-finger pinch recognizer reporting the change in finger span.
#[derive(Default)]
struct TwoFingerPinch {
    fingers: Vec<(PointerId, Point)>,
    span: Option<f64>,
}

impl TwoFingerPinch {
    fn geometry(&self) -> Option<(Point, f64)> {
        match self.fingers.as_slice() {
            [(_, a), (_, b), ..] => Some((a.midpoint(*b), (*a - *b).hypot())),
            _ => None,
        }
    }
}

impl ScaleDetector for TwoFingerPinch {
    fn on_pointer(&mut self, event: &PointerEvent) -> Option<ScaleEvent> {
        match event.action {
            PointerAction::Down | PointerAction::PointerDown => {
                self.fingers.push((event.pointer_id, event.position));
                let (focus, span) = self.geometry()?;
                if self.span.is_some() {
                    return None;
                }
                self.span = Some(span);
                Some(ScaleEvent::Begin { focus })
            }
            PointerAction::Move => {
                let finger = self
                    .fingers
                    .iter_mut()
                    .find(|(id, _)| *id == event.pointer_id)?;
                finger.1 = event.position;
                let previous = self.span?;
                let (focus, span) = self.geometry()?;
                self.span = Some(span);
                Some(ScaleEvent::Update {
                    focus,
                    factor: span / previous,
                })
            }
            PointerAction::PointerUp | PointerAction::Up | PointerAction::Cancel => {
                self.fingers.retain(|(id, _)| *id != event.pointer_id);
                if event.action != PointerAction::PointerUp {
                    self.fingers.clear();
                }
                self.span.take().map(|_| ScaleEvent::End)
            }
        }
    }
}

fn pointer(action: PointerAction, id: PointerId, x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(action, id, Point::new(x, y))
}

#[test]
fn build_aligns_every_shared_axis() {
    let grid = spreadsheet(ViewportConfig::default());
    let tables = grid.tables();

    let body_widths = tables.body.column_width_union();
    let header_widths = tables.column_header.column_width_union();
    assert_eq!(body_widths.len(), 25);
    for column in 0..25 {
        assert_eq!(
            body_widths[column], header_widths[column],
            "column {column} differs between body and column header"
        );
        assert!(body_widths[column] >= 40.0);
    }
    assert_eq!(body_widths[24], 78.0, "wide header columns win");

    assert_eq!(
        tables.column_header.row_heights(),
        tables.corner.row_heights()
    );
    assert_eq!(tables.corner.row_heights(), vec![20.0, 30.0]);
    assert_eq!(tables.body.row_heights(), tables.row_header.row_heights());
    assert_eq!(
        tables.row_header.column_width_union(),
        tables.corner.column_width_union()
    );

    let content = grid.viewport().content_size();
    assert_eq!(
        content.width,
        tables.corner.width() + tables.column_header.width()
    );
    assert_eq!(
        content.height,
        tables.corner.height() + tables.row_header.height()
    );
}

#[test]
fn rebuilding_is_a_fixed_point() {
    let mut grid = spreadsheet(ViewportConfig::default());
    let snapshot = |grid: &FixedHeaderTable<FixedCell>| {
        Quadrant::ALL.map(|q| {
            let t = grid.tables().get(q);
            (t.column_width_union(), t.row_heights())
        })
    };
    let first = snapshot(&grid);
    grid.build().unwrap();
    assert_eq!(first, snapshot(&grid));
}

#[test]
fn repeated_zoom_clamps_at_the_maximum() {
    let mut grid = spreadsheet(ViewportConfig::new(0.1, 3.0).unwrap());
    for _ in 0..6 {
        grid.handle_scale(ScaleEvent::Update {
            focus: Point::new(200.0, 300.0),
            factor: 10.0,
        })
        .unwrap();
        assert!(grid.viewport().scale() <= 3.0);
    }
    assert_eq!(grid.viewport().scale(), 3.0);
    grid.handle_scale(ScaleEvent::End).unwrap();
}

#[test]
fn corner_divides_the_screen() {
    let tables = QuadrantTables::new(
        table(4, 4, |_, _| (40.0, 20.0)),
        table(1, 4, |_, _| (40.0, 30.0)),
        table(4, 1, |_, _| (50.0, 20.0)),
        table(1, 1, |_, _| (50.0, 30.0)),
    );
    let mut grid =
        FixedHeaderTable::new(tables, ViewportConfig::default(), RouterConfig::default());
    grid.set_viewport_size(Size::new(150.0, 80.0));
    grid.build().unwrap();

    for (x, y, expected, cell) in [
        (10.0, 10.0, Quadrant::Corner, CellIndex::new(0, 0)),
        (60.0, 10.0, Quadrant::ColumnHeader, CellIndex::new(0, 0)),
        (10.0, 40.0, Quadrant::RowHeader, CellIndex::new(0, 0)),
        (60.0, 40.0, Quadrant::Body, CellIndex::new(0, 0)),
        (135.0, 75.0, Quadrant::Body, CellIndex::new(2, 2)),
    ] {
        let down = grid
            .handle_pointer(pointer(PointerAction::Down, 1, x, y))
            .unwrap();
        assert_eq!(down[0].event.route.quadrant(), Some(expected), "({x}, {y})");
        assert_eq!(down[0].cell, Some(cell), "({x}, {y})");
        grid.handle_pointer(pointer(PointerAction::Up, 1, x, y))
            .unwrap();
    }
}

#[test]
fn scrolled_headers_stay_pinned() {
    let mut grid = spreadsheet(ViewportConfig::default());
    grid.handle_pointer(pointer(PointerAction::Down, 1, 300.0, 500.0))
        .unwrap();
    grid.handle_pointer(pointer(PointerAction::Move, 1, 200.0, 300.0))
        .unwrap();
    grid.handle_pointer(pointer(PointerAction::Up, 1, 200.0, 300.0))
        .unwrap();
    assert_eq!(grid.viewport().pan(), Vec2::new(-100.0, -200.0));

    let metrics = grid.scroll_metrics();
    assert_eq!(metrics.horizontal_offset, 100.0);
    assert_eq!(metrics.vertical_offset, 200.0);

    let [.., _, header_ty] = grid.transform(Quadrant::ColumnHeader).as_coeffs();
    let [.., row_header_tx, _] = grid.transform(Quadrant::RowHeader).as_coeffs();
    assert_eq!((header_ty, row_header_tx), (0.0, 0.0));

    // The first header cell has scrolled out; a tap at the header's leading
    // edge now lands on a later column.
    let corner_width = grid.viewport().quadrant_size(Quadrant::Corner).width;
    let down = grid
        .handle_pointer(pointer(PointerAction::Down, 2, corner_width + 1.0, 5.0))
        .unwrap();
    assert_eq!(down[0].event.route.quadrant(), Some(Quadrant::ColumnHeader));
    assert_eq!(down[0].event.position, Point::new(101.0, 5.0));
    assert_eq!(down[0].cell, Some(CellIndex::new(0, 2)));
}

#[test]
fn pinch_with_a_detector_zooms_about_the_fingers() {
    let mut grid = spreadsheet(ViewportConfig::new(0.25, 4.0).unwrap());
    let mut pinch = TwoFingerPinch::default();

    let down = grid
        .handle_input(&mut pinch, pointer(PointerAction::Down, 10, 150.0, 300.0))
        .unwrap();
    assert_eq!(down[0].event.action, QuadrantAction::Down);

    let second = grid
        .handle_input(
            &mut pinch,
            pointer(PointerAction::PointerDown, 11, 250.0, 300.0),
        )
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].event.action, QuadrantAction::Cancel);

    // Spread the fingers one at a time to double the span.
    grid.handle_input(&mut pinch, pointer(PointerAction::Move, 10, 100.0, 300.0))
        .unwrap();
    assert!((grid.viewport().scale() - 1.5).abs() < 1e-9);

    // The second update pivots on the final midpoint.
    let focus = Point::new(200.0, 300.0);
    let anchored = grid.transform(Quadrant::Body).inverse() * focus;
    grid.handle_input(&mut pinch, pointer(PointerAction::Move, 11, 300.0, 300.0))
        .unwrap();
    let scale = grid.viewport().scale();
    assert!((scale - 2.0).abs() < 1e-9, "scale {scale}");
    let projected = grid.transform(Quadrant::Body) * anchored;
    assert!((projected - focus).hypot() < 1e-9, "{projected:?}");

    let lift = grid
        .handle_input(&mut pinch, pointer(PointerAction::PointerUp, 11, 300.0, 300.0))
        .unwrap();
    assert!(lift.is_empty());
    assert!(grid.router().is_active(), "finger 10 is still down");
    grid.handle_input(&mut pinch, pointer(PointerAction::Up, 10, 100.0, 300.0))
        .unwrap();
    assert!(!grid.router().is_active());
}

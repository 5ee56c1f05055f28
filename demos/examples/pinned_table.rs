// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A spreadsheet-style grid with pinned headers, driven by synthetic touches.
//!
//! This example shows how to:
//! - implement `CellBox` for a host cell (here, a text label),
//! - assemble the four quadrant tables and build a `FixedHeaderTable`,
//! - route taps, drags and a pinch, and read back transforms and scrollbars.
//!
//! Run:
//! - `cargo run -p understory_demos --example pinned_table`

use kurbo::{Point, Size};
use understory_gesture_router::{
    Deliveries, FixedHeaderTable, PointerAction, PointerEvent, RouterConfig, ScaleDetector,
    ScaleEvent,
};
use understory_table_layout::{CellBox, CellIndex, QuadrantTable, Row};
use understory_viewport::{Quadrant, QuadrantTables, ViewportConfig};

/// A text cell whose natural size depends on its label.
#[derive(Debug)]
struct Label {
    text: String,
    frame: Size,
}

impl Label {
    const CHAR_WIDTH: f64 = 7.0;
    const LINE_HEIGHT: f64 = 18.0;
    const PADDING: f64 = 6.0;

    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            frame: Size::ZERO,
        }
    }
}

impl CellBox for Label {
    fn measure_natural(&mut self) -> Size {
        let lines = self.text.lines().count().max(1) as f64;
        let longest = self.text.lines().map(str::len).max().unwrap_or(0) as f64;
        Size::new(
            longest * Self::CHAR_WIDTH + 2.0 * Self::PADDING,
            lines * Self::LINE_HEIGHT + 2.0 * Self::PADDING,
        )
    }

    fn measure_exact(&mut self, size: Size) {
        self.frame = size;
    }
}

/// Pinches whenever two pointers are down, reporting the span ratio.
#[derive(Debug, Default)]
struct Pinch {
    fingers: Vec<(u64, Point)>,
    span: Option<f64>,
}

impl ScaleDetector for Pinch {
    fn on_pointer(&mut self, event: &PointerEvent) -> Option<ScaleEvent> {
        match event.action {
            PointerAction::Down | PointerAction::PointerDown => {
                self.fingers.push((event.pointer_id, event.position));
            }
            PointerAction::Move => {
                let finger = self
                    .fingers
                    .iter_mut()
                    .find(|(id, _)| *id == event.pointer_id)?;
                finger.1 = event.position;
            }
            PointerAction::PointerUp => {
                self.fingers.retain(|(id, _)| *id != event.pointer_id);
                return self.span.take().map(|_| ScaleEvent::End);
            }
            PointerAction::Up | PointerAction::Cancel => {
                self.fingers.clear();
                return self.span.take().map(|_| ScaleEvent::End);
            }
        }
        let [(_, a), (_, b)] = self.fingers.as_slice() else {
            return None;
        };
        let focus = a.midpoint(*b);
        let span = (*a - *b).hypot();
        match self.span.replace(span) {
            None => Some(ScaleEvent::Begin { focus }),
            Some(previous) => Some(ScaleEvent::Update {
                focus,
                factor: span / previous,
            }),
        }
    }
}

fn table(
    rows: usize,
    columns: usize,
    text: impl Fn(usize, usize) -> String,
) -> QuadrantTable<Label> {
    QuadrantTable::from_rows(
        (0..rows).map(|r| Row::with_cells((0..columns).map(|c| Label::new(text(r, c))))),
    )
}

fn column_name(column: usize) -> String {
    let letter = char::from(b'A' + (column % 26) as u8);
    letter.to_string()
}

fn report(label: &str, deliveries: &Deliveries) {
    if deliveries.is_empty() {
        println!("{label:<28} (consumed)");
    }
    for d in deliveries {
        println!(
            "{label:<28} {:?} -> {:?} at {:?}, cell {:?}",
            d.event.action, d.event.route, d.event.position, d.cell
        );
    }
}

fn main() {
    const ROWS: usize = 25;
    const COLUMNS: usize = 25;

    let tables = QuadrantTables::new(
        table(ROWS, COLUMNS, |r, c| format!("{}", (r + 1) * (c + 3) * 17)),
        table(2, COLUMNS, |r, c| {
            if r == 0 {
                column_name(c)
            } else {
                format!("Quarter {}\ntotal", c + 1)
            }
        }),
        table(ROWS, 1, |r, _| format!("Region {}", r + 1)),
        table(2, 1, |r, _| if r == 0 { "Sales".into() } else { String::new() }),
    );

    let mut grid = FixedHeaderTable::new(
        tables,
        ViewportConfig::new(0.25, 3.0).expect("valid scale limits"),
        RouterConfig::default(),
    );
    grid.set_viewport_size(Size::new(360.0, 640.0));
    grid.build().expect("quadrant tables line up");

    let viewport = grid.viewport();
    println!("content size: {:?}", viewport.content_size());
    for q in Quadrant::ALL {
        println!("{q:?}: bounds {:?}", viewport.quadrant_bounds(q));
    }
    if let Some(cell) = grid.tables().body.cell(CellIndex::new(0, 0)) {
        println!("first body cell {:?} laid out at {:?}", cell.text, cell.frame);
    }

    let mut pinch = Pinch::default();
    let mut send = |grid: &mut FixedHeaderTable<Label>, label: &str, action, id, x, y| {
        let event = PointerEvent::new(action, id, Point::new(x, y));
        let deliveries = grid
            .handle_input(&mut pinch, event)
            .expect("grid is built");
        report(label, &deliveries);
    };

    send(&mut grid, "tap body: down", PointerAction::Down, 1, 150.0, 120.0);
    send(&mut grid, "tap body: up", PointerAction::Up, 1, 151.0, 121.0);

    send(&mut grid, "drag: down", PointerAction::Down, 1, 200.0, 400.0);
    send(&mut grid, "drag: small move", PointerAction::Move, 1, 196.0, 397.0);
    send(&mut grid, "drag: past slop", PointerAction::Move, 1, 150.0, 300.0);
    send(&mut grid, "drag: pan", PointerAction::Move, 1, 100.0, 200.0);
    send(&mut grid, "drag: up", PointerAction::Up, 1, 100.0, 200.0);
    println!("after drag: {:?}", grid.scroll_metrics());

    send(&mut grid, "pinch: first finger", PointerAction::Down, 1, 150.0, 300.0);
    send(&mut grid, "pinch: second finger", PointerAction::PointerDown, 2, 210.0, 300.0);
    send(&mut grid, "pinch: spread", PointerAction::Move, 2, 270.0, 300.0);
    send(&mut grid, "pinch: lift second", PointerAction::PointerUp, 2, 270.0, 300.0);
    send(&mut grid, "pinch: lift first", PointerAction::Up, 1, 150.0, 300.0);
    println!(
        "after pinch: scale {:.2}, {:?}",
        grid.viewport().scale(),
        grid.scroll_metrics()
    );

    for q in Quadrant::ALL {
        println!("{q:?} transform: {:?}", grid.transform(q).as_coeffs());
    }

    send(&mut grid, "tap header: down", PointerAction::Down, 1, 200.0, 20.0);
    send(&mut grid, "tap header: up", PointerAction::Up, 1, 200.0, 20.0);
}

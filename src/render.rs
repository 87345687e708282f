//! Frame building.
//!
//! [`render`] turns the game state into a flat list of [`DrawOp`]s without
//! touching any drawing surface; [`replay`] feeds that list to a [`Surface`].
//! Only marks inside the visible cell range are emitted, so a frame costs
//! what is on screen rather than what is on the board.

use thiserror::Error;

use crate::model::{Axis, Board, Cell, Player, WinLine};
use crate::viewport::{CELL_SIZE_PX, CellRange, PixelPoint, Viewport};

const CIRCLE_RADIUS: f64 = 8.0;
const CROSS_INSET: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    Grid,
    Mark,
    WinLine,
}

impl StrokeStyle {
    pub fn color(self) -> &'static str {
        match self {
            StrokeStyle::Grid => "#d0d7de",
            StrokeStyle::Mark => "#24292f",
            StrokeStyle::WinLine => "#cf222e",
        }
    }

    pub fn line_width(self) -> f64 {
        match self {
            StrokeStyle::Grid => 1.0,
            StrokeStyle::Mark => 1.5,
            StrokeStyle::WinLine => 2.5,
        }
    }
}

/// One drawing primitive, logical pixel coordinates after `SetScale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    /// Wipe the whole surface.
    Clear,
    /// Logical-to-physical scale for the ops that follow.
    SetScale(f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// Full circle.
    Arc { x: f64, y: f64, radius: f64 },
    Stroke(StrokeStyle),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub cull_win_lines: bool,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing surface is not available")]
    SurfaceUnavailable,
    #[error("drawing context rejected a call: {0}")]
    ContextLost(String),
}

/// Anything that can rasterize [`DrawOp`]s.
pub trait Surface {
    fn clear(&mut self);
    fn set_scale(&mut self, scale: f64) -> Result<(), RenderError>;
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64) -> Result<(), RenderError>;
    fn stroke(&mut self, style: StrokeStyle);
}

pub fn replay(ops: &[DrawOp], surface: &mut impl Surface) -> Result<(), RenderError> {
    for op in ops {
        match *op {
            DrawOp::Clear => surface.clear(),
            DrawOp::SetScale(s) => surface.set_scale(s)?,
            DrawOp::BeginPath => surface.begin_path(),
            DrawOp::MoveTo(x, y) => surface.move_to(x, y),
            DrawOp::LineTo(x, y) => surface.line_to(x, y),
            DrawOp::Arc { x, y, radius } => surface.arc(x, y, radius)?,
            DrawOp::Stroke(style) => surface.stroke(style),
        }
    }
    Ok(())
}

pub fn render(
    board: &Board,
    viewport: &Viewport,
    lines: &[WinLine],
    dpr: f64,
    options: RenderOptions,
) -> Vec<DrawOp> {
    let mut ops = vec![DrawOp::Clear, DrawOp::SetScale(dpr)];
    grid(viewport, dpr, &mut ops);
    marks(board, viewport, dpr, &mut ops);
    let range = options
        .cull_win_lines
        .then(|| viewport.visible_cell_range(dpr));
    win_lines(lines, viewport, range, &mut ops);
    ops
}

fn grid(viewport: &Viewport, dpr: f64, ops: &mut Vec<DrawOp>) {
    let (w, h) = viewport.logical_size(dpr);
    let (phase_x, phase_y) = viewport.grid_phase();
    ops.push(DrawOp::BeginPath);
    let mut x = phase_x;
    while x < w {
        ops.push(DrawOp::MoveTo(x, 0.0));
        ops.push(DrawOp::LineTo(x, h));
        x += CELL_SIZE_PX;
    }
    let mut y = phase_y;
    while y < h {
        ops.push(DrawOp::MoveTo(0.0, y));
        ops.push(DrawOp::LineTo(w, y));
        y += CELL_SIZE_PX;
    }
    ops.push(DrawOp::Stroke(StrokeStyle::Grid));
}

/// Occupied cells inside `range`, walking whichever of the two is smaller.
fn visible_marks(board: &Board, range: CellRange) -> Vec<(Cell, Player)> {
    if range.cell_count() < board.len() as u64 {
        range
            .cells()
            .filter_map(|c| board.get(c).map(|p| (c, p)))
            .collect()
    } else {
        board.iter().filter(|(c, _)| range.contains(*c)).collect()
    }
}

fn marks(board: &Board, viewport: &Viewport, dpr: f64, ops: &mut Vec<DrawOp>) {
    let range = viewport.visible_cell_range(dpr);
    ops.push(DrawOp::BeginPath);
    for (cell, player) in visible_marks(board, range) {
        let o = viewport.cell_origin(cell);
        match player {
            Player::First => {
                let c = viewport.cell_center(cell);
                // Start the subpath on the circle so it is not joined to the previous mark.
                ops.push(DrawOp::MoveTo(c.x + CIRCLE_RADIUS, c.y));
                ops.push(DrawOp::Arc {
                    x: c.x,
                    y: c.y,
                    radius: CIRCLE_RADIUS,
                });
            }
            Player::Second => {
                let near = CROSS_INSET;
                let far = CELL_SIZE_PX - CROSS_INSET;
                ops.push(DrawOp::MoveTo(o.x + near, o.y + near));
                ops.push(DrawOp::LineTo(o.x + far, o.y + far));
                ops.push(DrawOp::MoveTo(o.x + far, o.y + near));
                ops.push(DrawOp::LineTo(o.x + near, o.y + far));
            }
        }
    }
    ops.push(DrawOp::Stroke(StrokeStyle::Mark));
}

/// Offsets from the first and last cell's top-left corner to the stroke ends.
fn win_line_insets(axis: Axis) -> ((f64, f64), (f64, f64)) {
    match axis {
        Axis::DiagDown => ((7.0, 7.0), (13.0, 13.0)),
        Axis::DiagUp => ((7.0, 13.0), (13.0, 7.0)),
        Axis::Vertical => ((10.0, 5.0), (10.0, 15.0)),
        Axis::Horizontal => ((5.0, 10.0), (15.0, 10.0)),
    }
}

fn win_line_segment(line: &WinLine, viewport: &Viewport) -> (PixelPoint, PixelPoint) {
    let (first, last) = line.ends();
    let ((sx, sy), (ex, ey)) = win_line_insets(line.axis);
    let a = viewport.cell_origin(first);
    let b = viewport.cell_origin(last);
    (PixelPoint::new(a.x + sx, a.y + sy), PixelPoint::new(b.x + ex, b.y + ey))
}

fn win_lines(lines: &[WinLine], viewport: &Viewport, cull: Option<CellRange>, ops: &mut Vec<DrawOp>) {
    ops.push(DrawOp::BeginPath);
    for line in lines {
        if let Some(range) = cull {
            let (first, last) = line.ends();
            if !range.intersects_span(first, last) {
                continue;
            }
        }
        let (a, b) = win_line_segment(line, viewport);
        ops.push(DrawOp::MoveTo(a.x, a.y));
        ops.push(DrawOp::LineTo(b.x, b.y));
    }
    ops.push(DrawOp::Stroke(StrokeStyle::WinLine));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(ops: &[DrawOp], f: impl Fn(&DrawOp) -> bool) -> usize {
        ops.iter().filter(|op| f(op)).count()
    }

    fn arcs(ops: &[DrawOp]) -> usize {
        count(ops, |op| matches!(op, DrawOp::Arc { .. }))
    }

    /// Ops between the mark path's BeginPath and its Stroke.
    fn mark_section(ops: &[DrawOp]) -> &[DrawOp] {
        let end = ops
            .iter()
            .position(|op| *op == DrawOp::Stroke(StrokeStyle::Mark))
            .unwrap();
        let start = ops[..end].iter().rposition(|op| *op == DrawOp::BeginPath).unwrap();
        &ops[start + 1..end]
    }

    fn win_section(ops: &[DrawOp]) -> &[DrawOp] {
        let end = ops.len() - 1;
        assert_eq!(ops[end], DrawOp::Stroke(StrokeStyle::WinLine));
        let start = ops[..end].iter().rposition(|op| *op == DrawOp::BeginPath).unwrap();
        &ops[start + 1..end]
    }

    #[test]
    fn frame_starts_with_clear_and_scale() {
        let vp = Viewport::new(100.0, 60.0);
        let ops = render(&Board::new(), &vp, &[], 2.0, RenderOptions::default());
        assert_eq!(&ops[..3], &[DrawOp::Clear, DrawOp::SetScale(2.0), DrawOp::BeginPath]);
    }

    #[test]
    fn grid_covers_logical_extent() {
        let vp = Viewport::new(100.0, 60.0);
        let ops = render(&Board::new(), &vp, &[], 1.0, RenderOptions::default());
        // Vertical lines at 0,20,...,80 and horizontal at 0,20,40.
        let verticals = count(&ops, |op| matches!(op, DrawOp::LineTo(_, y) if *y == 60.0));
        let horizontals = count(&ops, |op| matches!(op, DrawOp::LineTo(x, _) if *x == 100.0));
        assert_eq!(verticals, 5);
        assert_eq!(horizontals, 3);
    }

    #[test]
    fn grid_is_phase_shifted_by_offset() {
        let mut vp = Viewport::new(100.0, 100.0);
        vp.offset_x = 7.0;
        let ops = render(&Board::new(), &vp, &[], 1.0, RenderOptions::default());
        assert!(ops.contains(&DrawOp::MoveTo(13.0, 0.0)));
        assert!(!ops.contains(&DrawOp::MoveTo(0.0 - 7.0, 0.0)));
    }

    #[test]
    fn glyphs_follow_owner() {
        let mut board = Board::new();
        board.place(Cell::new(0, 0), Player::First);
        board.place(Cell::new(1, 0), Player::Second);
        let vp = Viewport::new(200.0, 200.0);
        let ops = render(&board, &vp, &[], 1.0, RenderOptions::default());
        let marks = mark_section(&ops);
        assert!(marks.contains(&DrawOp::Arc { x: 10.0, y: 10.0, radius: 8.0 }));
        assert!(marks.contains(&DrawOp::MoveTo(22.0, 2.0)));
        assert!(marks.contains(&DrawOp::LineTo(38.0, 18.0)));
        assert!(marks.contains(&DrawOp::MoveTo(38.0, 2.0)));
        assert!(marks.contains(&DrawOp::LineTo(22.0, 18.0)));
    }

    #[test]
    fn off_screen_marks_are_culled() {
        let mut board = Board::new();
        board.place(Cell::new(0, 0), Player::First);
        board.place(Cell::new(-1, -1), Player::First); // low-side margin
        board.place(Cell::new(-2, 0), Player::First);
        board.place(Cell::new(50, 0), Player::First);
        board.place(Cell::new(0, -300), Player::First);
        let vp = Viewport::new(200.0, 200.0);
        let ops = render(&board, &vp, &[], 1.0, RenderOptions::default());
        assert_eq!(arcs(&ops), 2);
    }

    #[test]
    fn dense_board_walks_visible_range() {
        let mut board = Board::new();
        for x in -200..200 {
            for y in -50..50 {
                board.place(Cell::new(x, y), if (x + y) % 2 == 0 { Player::First } else { Player::Second });
            }
        }
        let vp = Viewport::new(100.0, 100.0);
        let range = vp.visible_cell_range(1.0);
        assert!(range.cell_count() < board.len() as u64);
        let marks = visible_marks(&board, range);
        assert_eq!(marks.len() as u64, range.cell_count());
        assert!(marks.iter().all(|(c, p)| board.get(*c) == Some(*p)));
    }

    #[test]
    fn win_line_spans_two_cells_each_side() {
        let vp = Viewport::new(400.0, 400.0);
        let line = WinLine { anchor: Cell::new(5, 5), axis: Axis::Horizontal };
        let ops = render(&Board::new(), &vp, &[line], 1.0, RenderOptions::default());
        assert_eq!(win_section(&ops), &[DrawOp::MoveTo(65.0, 110.0), DrawOp::LineTo(155.0, 110.0)]);

        let line = WinLine { anchor: Cell::new(5, 5), axis: Axis::DiagUp };
        let ops = render(&Board::new(), &vp, &[line], 1.0, RenderOptions::default());
        assert_eq!(win_section(&ops), &[DrawOp::MoveTo(67.0, 153.0), DrawOp::LineTo(153.0, 67.0)]);
    }

    #[test]
    fn win_lines_are_drawn_off_screen_unless_culled() {
        let vp = Viewport::new(200.0, 200.0);
        let far = WinLine { anchor: Cell::new(100, 100), axis: Axis::Vertical };
        let near = WinLine { anchor: Cell::new(1, 1), axis: Axis::DiagDown };
        let lines = [far, near];
        let ops = render(&Board::new(), &vp, &lines, 1.0, RenderOptions::default());
        assert_eq!(win_section(&ops).len(), 4);
        let ops = render(&Board::new(), &vp, &lines, 1.0, RenderOptions { cull_win_lines: true });
        assert_eq!(win_section(&ops).len(), 2);
    }

    #[test]
    fn render_leaves_state_untouched() {
        let mut board = Board::new();
        board.place(Cell::new(2, 2), Player::Second);
        let vp = Viewport::new(300.0, 300.0);
        let before = (board.clone(), vp.clone());
        let a = render(&board, &vp, &[], 1.0, RenderOptions::default());
        let b = render(&board, &vp, &[], 1.0, RenderOptions::default());
        assert_eq!(a, b);
        assert_eq!((board, vp), before);
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail_arcs: bool,
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.calls.push("clear".into());
        }
        fn set_scale(&mut self, scale: f64) -> Result<(), RenderError> {
            self.calls.push(format!("scale {scale}"));
            Ok(())
        }
        fn begin_path(&mut self) {
            self.calls.push("begin".into());
        }
        fn move_to(&mut self, x: f64, y: f64) {
            self.calls.push(format!("move {x} {y}"));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.calls.push(format!("line {x} {y}"));
        }
        fn arc(&mut self, x: f64, y: f64, radius: f64) -> Result<(), RenderError> {
            if self.fail_arcs {
                return Err(RenderError::ContextLost("arc".into()));
            }
            self.calls.push(format!("arc {x} {y} {radius}"));
            Ok(())
        }
        fn stroke(&mut self, style: StrokeStyle) {
            self.calls.push(format!("stroke {}", style.color()));
        }
    }

    #[test]
    fn replay_forwards_ops_in_order() {
        let ops = [
            DrawOp::Clear,
            DrawOp::SetScale(1.5),
            DrawOp::BeginPath,
            DrawOp::MoveTo(1.0, 2.0),
            DrawOp::Arc { x: 3.0, y: 4.0, radius: 8.0 },
            DrawOp::LineTo(5.0, 6.0),
            DrawOp::Stroke(StrokeStyle::WinLine),
        ];
        let mut rec = Recorder::default();
        replay(&ops, &mut rec).unwrap();
        assert_eq!(
            rec.calls,
            ["clear", "scale 1.5", "begin", "move 1 2", "arc 3 4 8", "line 5 6", "stroke #cf222e"]
        );
    }

    #[test]
    fn replay_stops_on_surface_error() {
        let ops = [DrawOp::Arc { x: 0.0, y: 0.0, radius: 1.0 }, DrawOp::Clear];
        let mut rec = Recorder {
            fail_arcs: true,
            ..Default::default()
        };
        assert!(matches!(replay(&ops, &mut rec), Err(RenderError::ContextLost(_))));
        assert!(rec.calls.is_empty());
    }
}

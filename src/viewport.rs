// Pan state and the pixel <-> grid transform.
//
// Offsets are kept in logical (CSS) pixels, while pointer positions and the
// drawable size arrive in physical pixels. The device pixel ratio is always
// passed in by the caller because it changes when the window moves between
// displays.

use crate::model::Cell;

/// Edge length of one grid cell in logical pixels.
pub const CELL_SIZE_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Inclusive rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub top_left: Cell,
    pub bottom_right: Cell,
}

impl CellRange {
    pub fn contains(&self, cell: Cell) -> bool {
        self.top_left.x <= cell.x
            && cell.x <= self.bottom_right.x
            && self.top_left.y <= cell.y
            && cell.y <= self.bottom_right.y
    }

    /// Number of cells covered, saturating on absurd ranges.
    pub fn cell_count(&self) -> u64 {
        let w = (self.bottom_right.x - self.top_left.x + 1).max(0) as u64;
        let h = (self.bottom_right.y - self.top_left.y + 1).max(0) as u64;
        w.saturating_mul(h)
    }

    /// True if the segment of cells from `a` to `b` has its bounding box overlapping this range.
    pub fn intersects_span(&self, a: Cell, b: Cell) -> bool {
        let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
        let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
        min_x <= self.bottom_right.x
            && max_x >= self.top_left.x
            && min_y <= self.bottom_right.y
            && max_y >= self.top_left.y
    }

    /// Row-major walk over every cell in the range.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.top_left.y..=self.bottom_right.y)
            .flat_map(move |y| (self.top_left.x..=self.bottom_right.x).map(move |x| Cell::new(x, y)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Content-space pan, logical pixels.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Drawable size, physical pixels.
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

fn sanitize_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn pixel_to_cell(&self, p: PixelPoint, dpr: f64) -> Cell {
        let dpr = sanitize_ratio(dpr);
        Cell::new(
            ((p.x / dpr + self.offset_x) / CELL_SIZE_PX).floor() as i64,
            ((p.y / dpr + self.offset_y) / CELL_SIZE_PX).floor() as i64,
        )
    }

    /// Top-left corner of `cell` on screen, logical pixels.
    pub fn cell_origin(&self, cell: Cell) -> PixelPoint {
        PixelPoint::new(
            cell.x as f64 * CELL_SIZE_PX - self.offset_x,
            cell.y as f64 * CELL_SIZE_PX - self.offset_y,
        )
    }

    pub fn cell_center(&self, cell: Cell) -> PixelPoint {
        let o = self.cell_origin(cell);
        PixelPoint::new(o.x + CELL_SIZE_PX / 2.0, o.y + CELL_SIZE_PX / 2.0)
    }

    /// Cells that may be at least partly on screen, with one extra cell on the low side.
    pub fn visible_cell_range(&self, dpr: f64) -> CellRange {
        let dpr = sanitize_ratio(dpr);
        let left = (self.offset_x / CELL_SIZE_PX).floor() as i64;
        let top = (self.offset_y / CELL_SIZE_PX).floor() as i64;
        let right = ((self.offset_x + self.width / dpr) / CELL_SIZE_PX).floor() as i64;
        let bottom = ((self.offset_y + self.height / dpr) / CELL_SIZE_PX).floor() as i64;
        CellRange {
            top_left: Cell::new(left - 1, top - 1),
            bottom_right: Cell::new(right, bottom),
        }
    }

    /// Move the content with the pointer: dragging right shifts the window left.
    pub fn pan_by(&mut self, dx: f64, dy: f64, dpr: f64) {
        let dpr = sanitize_ratio(dpr);
        self.offset_x -= dx / dpr;
        self.offset_y -= dy / dpr;
    }

    pub fn reset(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    /// Screen position of the first grid line on each axis, in [0, CELL_SIZE_PX).
    pub fn grid_phase(&self) -> (f64, f64) {
        (
            (-self.offset_x).rem_euclid(CELL_SIZE_PX),
            (-self.offset_y).rem_euclid(CELL_SIZE_PX),
        )
    }

    /// Pointer travel, physical pixels, before a press counts as a drag.
    pub fn drag_threshold(&self) -> f64 {
        self.width.min(self.height) / 100.0
    }

    /// Drawable size in logical pixels.
    pub fn logical_size(&self, dpr: f64) -> (f64, f64) {
        let dpr = sanitize_ratio(dpr);
        (self.width / dpr, self.height / dpr)
    }
}

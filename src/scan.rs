//! Scannable Shapes
//!
//! A scannable shape answers, for one scanline, where along the line the
//! shape is inside. A scan session starts with [`Scannable::init_scan`],
//! which fixes the clip rectangle and the scan direction; queries within a
//! session must move forward, the shape is free to forget edges it has
//! passed.
//!
//! Session state belongs to one instance. To scan the same shape from
//! another thread, [`fork`](Scannable::fork) it first.
//!
//! [`Scannable::init_scan`]: trait.Scannable.html#tymethod.init_scan

use crate::circle::Circle;
use crate::geometry::{BoundingRectangle, Coordinate};
use crate::region::Region;

/// Direction of the scanlines
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Orientation {
    /// Rows: scanlines at constant y, intersections are x values
    Horizontal,
    /// Columns: scanlines at constant x, intersections are y values
    Vertical,
}

impl Default for Orientation {
    fn default() -> Orientation {
        Orientation::Horizontal
    }
}

impl Orientation {
    /// Scan direction needing fewer scanlines for a bounding box
    ///
    /// Horizontal when the box is wider than tall
    pub fn for_bounds(r: &BoundingRectangle) -> Orientation {
        if r.width() > r.height() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
    /// Split a point into (scan, cross) coordinates
    #[inline]
    pub fn axes(self, p: &Coordinate) -> (f64, f64) {
        match self {
            Orientation::Horizontal => (p.y, p.x),
            Orientation::Vertical => (p.x, p.y),
        }
    }
    /// Range of a rectangle along the scan axis
    #[inline]
    pub fn scan_range(self, r: &BoundingRectangle) -> (f64, f64) {
        match self {
            Orientation::Horizontal => (r.min_y, r.max_y),
            Orientation::Vertical => (r.min_x, r.max_x),
        }
    }
    /// Range of a rectangle along the scanline
    #[inline]
    pub fn cross_range(self, r: &BoundingRectangle) -> (f64, f64) {
        match self {
            Orientation::Horizontal => (r.min_x, r.max_x),
            Orientation::Vertical => (r.min_y, r.max_y),
        }
    }
    /// Point from (scan, cross) coordinates
    #[inline]
    pub fn point(self, scan: f64, cross: f64) -> Coordinate {
        match self {
            Orientation::Horizontal => Coordinate::new(cross, scan),
            Orientation::Vertical => Coordinate::new(scan, cross),
        }
    }
}

/// Geometry that can be swept by scanlines
pub trait Scannable {
    /// Bounding box of the whole shape
    fn bounds(&self) -> BoundingRectangle;
    /// Start a scan session
    ///
    /// Intersections are clipped to `clip`, scanlines run in `orientation`
    fn init_scan(&mut self, clip: &BoundingRectangle, orientation: Orientation);
    /// Intervals inside the shape along the scanline at `pos`
    ///
    /// `out` is cleared and filled with an even number of ascending
    /// interval boundaries. `pos` must not decrease within a session.
    fn compute_intersections(&mut self, pos: f64, out: &mut Vec<f64>);
    /// Direction of the current scan session
    fn orientation(&self) -> Orientation;
    /// Independent copy with fresh scan state
    fn fork(&self) -> Self
    where
        Self: Sized;

    /// Intervals along the row at `y`, session must be horizontal
    fn compute_horizontal_intersections(&mut self, y: f64, out: &mut Vec<f64>) {
        debug_assert_eq!(self.orientation(), Orientation::Horizontal);
        self.compute_intersections(y, out)
    }
    /// Intervals along the column at `x`, session must be vertical
    fn compute_vertical_intersections(&mut self, x: f64, out: &mut Vec<f64>) {
        debug_assert_eq!(self.orientation(), Orientation::Vertical);
        self.compute_intersections(x, out)
    }
}

/// Keep the parts of the intervals in `raw` inside `[lo, hi]`
pub(crate) fn clip_intervals(raw: &[f64], lo: f64, hi: f64, out: &mut Vec<f64>) {
    for pair in raw.chunks_exact(2) {
        let a = pair[0].max(lo);
        let b = pair[1].min(hi);
        if a < b {
            out.push(a);
            out.push(b);
        }
    }
}

/// Any shape the renderer can scan
#[derive(Debug,Clone)]
pub enum Shape {
    Circle(Circle),
    Region(Region),
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Shape {
        Shape::Circle(c)
    }
}
impl From<Region> for Shape {
    fn from(r: Region) -> Shape {
        Shape::Region(r)
    }
}

impl Scannable for Shape {
    fn bounds(&self) -> BoundingRectangle {
        match self {
            Shape::Circle(c) => c.bounds(),
            Shape::Region(r) => r.bounds(),
        }
    }
    fn init_scan(&mut self, clip: &BoundingRectangle, orientation: Orientation) {
        match self {
            Shape::Circle(c) => c.init_scan(clip, orientation),
            Shape::Region(r) => r.init_scan(clip, orientation),
        }
    }
    fn compute_intersections(&mut self, pos: f64, out: &mut Vec<f64>) {
        match self {
            Shape::Circle(c) => c.compute_intersections(pos, out),
            Shape::Region(r) => r.compute_intersections(pos, out),
        }
    }
    fn orientation(&self) -> Orientation {
        match self {
            Shape::Circle(c) => c.orientation(),
            Shape::Region(r) => r.orientation(),
        }
    }
    fn fork(&self) -> Shape {
        match self {
            Shape::Circle(c) => Shape::Circle(c.fork()),
            Shape::Region(r) => Shape::Region(r.fork()),
        }
    }
}

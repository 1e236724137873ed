//! Circle

use crate::geometry::{BoundingRectangle, Coordinate};
use crate::scan::{clip_intervals, Orientation, Scannable};

/// Filled circle, at most one interval per scanline
///
///     use georaster::{Circle, Coordinate, Scannable, Orientation, BoundingRectangle};
///
///     let mut c = Circle::new(Coordinate::new(5.0, 5.0), 3.0);
///     let clip = BoundingRectangle::new(0.0, 0.0, 10.0, 10.0);
///     c.init_scan(&clip, Orientation::Horizontal);
///     let mut xs = vec![];
///     c.compute_horizontal_intersections(5.0, &mut xs);
///     assert_eq!(xs, vec![2.0, 8.0]);
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Circle {
    center: Coordinate,
    radius: f64,
    clip: BoundingRectangle,
    orientation: Orientation,
}

impl Circle {
    pub fn new(center: Coordinate, radius: f64) -> Self {
        Self {
            center,
            radius: radius.abs(),
            clip: BoundingRectangle::EMPTY,
            orientation: Orientation::Horizontal,
        }
    }
    pub fn center(&self) -> Coordinate {
        self.center
    }
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Scannable for Circle {
    fn bounds(&self) -> BoundingRectangle {
        BoundingRectangle::new(self.center.x - self.radius, self.center.y - self.radius,
                               self.center.x + self.radius, self.center.y + self.radius)
    }
    fn init_scan(&mut self, clip: &BoundingRectangle, orientation: Orientation) {
        self.clip = *clip;
        self.orientation = orientation;
    }
    fn compute_intersections(&mut self, pos: f64, out: &mut Vec<f64>) {
        out.clear();
        let (cs, cc) = self.orientation.axes(&self.center);
        let d = pos - cs;
        let h2 = self.radius * self.radius - d * d;
        if h2 <= 0.0 {
            return;
        }
        let half = h2.sqrt();
        let (lo, hi) = self.orientation.cross_range(&self.clip);
        clip_intervals(&[cc - half, cc + half], lo, hi, out);
    }
    fn orientation(&self) -> Orientation {
        self.orientation
    }
    fn fork(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }
}

//! Line Polygonizing
//!
//! Converts a stroked line into fillable contours: the outline of the line
//! drawn with a pen of `width`, including joins at the vertices and caps at
//! the ends of open paths.
//!
//! # Example
//!
//!     use georaster::{LinePath, Polygonizer, LineCap, LineJoin};
//!
//!     let path = LinePath::from_xy(&[(0.0, 0.0), (10.0, 0.0)]);
//!
//!     let mut pen = Polygonizer::new();
//!     pen.set_width(2.0).unwrap();
//!     pen.set_line_join(LineJoin::Round);
//!     pen.set_start_cap(LineCap::Flat);
//!     pen.set_end_cap(LineCap::Flat);
//!
//!     let outline = pen.polygonize_path(&path);
//!     assert_eq!(outline.len(), 4);
//!

use crate::error::{RasterError, RasterResult};
use crate::geometry::clean_vertices;
use crate::geometry::len;
use crate::geometry::{Contour, Coordinate, InteriorFillMode, LinePath, Polygon};

use std::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;
/// Turns closer than this to a straight line get a single vertex
const ANGLE_EPSILON: f64 = 1e-9;
const INTERSECTION_EPSILON: f64 = 1e-30;
/// Arc segments per unit of width over half a turn
const ROUND_STEPS_PER_WIDTH: f64 = 2.0;
const MIN_ROUND_STEPS: usize = 4;
const MAX_MITER_LIMIT: f64 = 10.0;

/// Line End or Cap Style
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum LineCap {
    Flat,
    Square,
    Round,
    Triangle,
}

/// Style of the outside corner where two segments meet
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum LineJoin {
    Bevel,
    Round,
    Miter,
    MiterClipped,
}

impl Default for LineCap {
    fn default() -> LineCap {
        LineCap::Flat
    }
}
impl Default for LineJoin {
    fn default() -> LineJoin {
        LineJoin::Miter
    }
}

/// Direction of the segment `from -> to` in radians, in `[0, 2pi)`
///
/// Computed as `atan(|dy|/|dx|)` corrected for the quadrant. Axis aligned
/// segments are handled without dividing by zero.
///
///     use georaster::{segment_angle, Coordinate};
///     use std::f64::consts::PI;
///
///     let o = Coordinate::new(0.0, 0.0);
///     assert_eq!(segment_angle(&o, &Coordinate::new(0.0, 5.0)), PI / 2.0);
///     assert_eq!(segment_angle(&o, &Coordinate::new(-1.0, 0.0)), PI);
///     assert!((segment_angle(&o, &Coordinate::new(-1.0, -1.0)) - 1.25 * PI).abs() < 1e-12);
pub fn segment_angle(from: &Coordinate, to: &Coordinate) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 {
        return if dy >= 0.0 { PI / 2.0 } else { 1.5 * PI };
    }
    if dy == 0.0 {
        return if dx > 0.0 { 0.0 } else { PI };
    }
    let a = (dy.abs() / dx.abs()).atan();
    match (dx > 0.0, dy > 0.0) {
        (true, true) => a,
        (false, true) => PI - a,
        (false, false) => PI + a,
        (true, false) => TWO_PI - a,
    }
}

/// Point `d` to the left of `p` relative to direction `angle`
fn offset(p: &Coordinate, angle: f64, d: f64) -> Coordinate {
    Coordinate::new(p.x - d * angle.sin(), p.y + d * angle.cos())
}

/// Point `d` ahead of `p` along direction `angle`
fn advance(p: &Coordinate, angle: f64, d: f64) -> Coordinate {
    Coordinate::new(p.x + d * angle.cos(), p.y + d * angle.sin())
}

/// Intersection of the infinite lines a-b and c-d, None if parallel
///
/// [Line-Line Intersection at Wikipedia](https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line)
fn line_intersection(a: &Coordinate, b: &Coordinate,
                     c: &Coordinate, d: &Coordinate) -> Option<(Coordinate, f64, f64)> {
    let den = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);
    if den.abs() < INTERSECTION_EPSILON {
        return None;
    }
    let t = ((c.x - a.x) * (d.y - c.y) - (c.y - a.y) * (d.x - c.x)) / den;
    let u = ((c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)) / den;
    let p = Coordinate::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    Some((p, t, u))
}

/// Intersection of the segments a-b and c-d
fn segment_intersection(a: &Coordinate, b: &Coordinate,
                        c: &Coordinate, d: &Coordinate) -> Option<Coordinate> {
    let eps = 1e-9;
    match line_intersection(a, b, c, d) {
        Some((p, t, u)) if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps => Some(p),
        _ => None,
    }
}

/// Stroke outline builder
#[derive(Debug,Clone,PartialEq)]
pub struct Polygonizer {
    /// Width of line
    width: f64,
    /// Half of the width, distance of the outline from the center line
    half: f64,
    /// Maximum miter length in units of half the width
    miter_limit: f64,
    start_cap: LineCap,
    end_cap: LineCap,
    line_join: LineJoin,
}

impl Default for Polygonizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Polygonizer {
    /// Width 1, miter limit 4, miter joins and flat caps
    pub fn new() -> Self {
        Self {
            width: 1.0,
            half: 0.5,
            miter_limit: 4.0,
            start_cap: LineCap::Flat,
            end_cap: LineCap::Flat,
            line_join: LineJoin::Miter,
        }
    }
    pub fn width(&self) -> f64 {
        self.width
    }
    /// Set the Stroke Width, must be positive and finite
    pub fn set_width(&mut self, width: f64) -> RasterResult<()> {
        if !(width > 0.0 && width.is_finite()) {
            return Err(RasterError::config(format!("stroke width must be > 0, got {}", width)));
        }
        self.width = width;
        self.half = width / 2.0;
        Ok(())
    }
    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }
    /// Set miter limit, within (0, 10]
    pub fn set_miter_limit(&mut self, miter_limit: f64) -> RasterResult<()> {
        if !(miter_limit > 0.0 && miter_limit <= MAX_MITER_LIMIT) {
            return Err(RasterError::config(format!(
                "miter limit must be in (0,{}], got {}", MAX_MITER_LIMIT, miter_limit)));
        }
        self.miter_limit = miter_limit;
        Ok(())
    }
    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }
    pub fn set_line_join(&mut self, line_join: LineJoin) {
        self.line_join = line_join;
    }
    pub fn start_cap(&self) -> LineCap {
        self.start_cap
    }
    pub fn set_start_cap(&mut self, cap: LineCap) {
        self.start_cap = cap;
    }
    pub fn end_cap(&self) -> LineCap {
        self.end_cap
    }
    pub fn set_end_cap(&mut self, cap: LineCap) {
        self.end_cap = cap;
    }

    /// Number of arc segments for a turn of `sweep` radians
    fn arc_steps(&self, sweep: f64) -> usize {
        let n = (ROUND_STEPS_PER_WIDTH * self.width * sweep.abs() / PI).ceil() as usize;
        n.max(MIN_ROUND_STEPS)
    }
    /// Points strictly inside an arc of radius half width around `c`
    ///
    /// Negative `sweep` runs clockwise
    fn calc_arc(&self, c: &Coordinate, from: f64, sweep: f64, out: &mut Vec<Coordinate>) {
        let n = self.arc_steps(sweep);
        let da = sweep / n as f64;
        for i in 1..n {
            let a = from + da * i as f64;
            out.push(Coordinate::new(c.x + self.half * a.cos(), c.y + self.half * a.sin()));
        }
    }
    /// Calculate Line End Cap
    ///
    /// `angle` is the direction the line leaves through `p`. The cap runs
    /// from the left outline point to the right one; both corner points
    /// are emitted by the sides.
    fn calc_cap(&self, p: &Coordinate, angle: f64, cap: LineCap, out: &mut Vec<Coordinate>) {
        match cap {
            LineCap::Flat => {}
            LineCap::Square => {
                let tip = advance(p, angle, self.half);
                out.push(offset(&tip, angle, self.half));
                out.push(offset(&tip, angle, -self.half));
            }
            LineCap::Triangle => out.push(advance(p, angle, self.half)),
            LineCap::Round => self.calc_arc(p, angle + PI / 2.0, -PI, out),
        }
    }
    /// Calculate a Miter Join
    ///
    /// `o1a`-`o1b` and `o2a`-`o2b` are the offset edges meeting at `p1`
    fn calc_miter(&self, p1: &Coordinate, a1: f64, a2: f64,
                  o1a: &Coordinate, o1b: &Coordinate,
                  o2a: &Coordinate, o2b: &Coordinate,
                  out: &mut Vec<Coordinate>) {
        let lim = self.miter_limit * self.half;
        let apex = match line_intersection(o1a, o1b, o2a, o2b) {
            Some((apex, _, _)) => apex,
            None => {
                out.push(*o1b);
                out.push(*o2a);
                return;
            }
        };
        let di = len(p1, &apex);
        if di <= lim {
            out.push(apex);
            return;
        }
        match self.line_join {
            LineJoin::MiterClipped => {
                // Cut perpendicular to the bisector at distance lim from p1
                let mid = Coordinate::new((o1b.x + o2a.x) / 2.0, (o1b.y + o2a.y) / 2.0);
                let dbevel = len(p1, &mid);
                let k = ((lim - dbevel) / (di - dbevel)).max(0.0);
                out.push(Coordinate::new(o1b.x + (apex.x - o1b.x) * k,
                                         o1b.y + (apex.y - o1b.y) * k));
                out.push(Coordinate::new(o2a.x + (apex.x - o2a.x) * k,
                                         o2a.y + (apex.y - o2a.y) * k));
            }
            _ => {
                // Points along each offset edge lying lim away from p1
                let t = (lim * lim - self.half * self.half).max(0.0).sqrt();
                out.push(advance(o1b, a1, t));
                out.push(advance(o2a, a2, -t));
            }
        }
    }
    /// Calculate the Join of Two Line Segments on the left side
    fn calc_join(&self, p0: &Coordinate, p1: &Coordinate, p2: &Coordinate,
                 out: &mut Vec<Coordinate>) {
        let a1 = segment_angle(p0, p1);
        let a2 = segment_angle(p1, p2);
        let o1a = offset(p0, a1, self.half);
        let o1b = offset(p1, a1, self.half);
        let o2a = offset(p1, a2, self.half);
        let o2b = offset(p2, a2, self.half);

        // Angle on the left between the incoming and outgoing segment
        let turn = (a1 + PI - a2).rem_euclid(TWO_PI);
        if (turn - PI).abs() < ANGLE_EPSILON {
            out.push(o1b);
            return;
        }
        if turn < PI {
            // Inner Join
            match segment_intersection(&o1a, &o1b, &o2a, &o2b) {
                Some(p) => out.push(p),
                None => {
                    out.push(o1b);
                    out.push(*p1);
                    out.push(o2a);
                }
            }
            return;
        }
        // Outer Join
        match self.line_join {
            LineJoin::Bevel => {
                out.push(o1b);
                out.push(o2a);
            }
            LineJoin::Round => {
                out.push(o1b);
                self.calc_arc(p1, a1 + PI / 2.0, -(turn - PI), out);
                out.push(o2a);
            }
            LineJoin::Miter | LineJoin::MiterClipped => {
                self.calc_miter(p1, a1, a2, &o1a, &o1b, &o2a, &o2b, out)
            }
        }
    }
    /// Left outline of a vertex list
    fn calc_side(&self, v: &[Coordinate], closed: bool, out: &mut Vec<Coordinate>) {
        let n = v.len();
        if closed {
            for i in 0..n {
                self.calc_join(&v[(i + n - 1) % n], &v[i], &v[(i + 1) % n], out);
            }
            return;
        }
        out.push(offset(&v[0], segment_angle(&v[0], &v[1]), self.half));
        for i in 1..n - 1 {
            self.calc_join(&v[i - 1], &v[i], &v[i + 1], out);
        }
        out.push(offset(&v[n - 1], segment_angle(&v[n - 2], &v[n - 1]), self.half));
    }
    /// Outline of an open path as one closed contour
    ///
    /// Paths with fewer than 2 distinct vertices give an empty contour
    pub fn polygonize_path(&self, path: &LinePath) -> Contour {
        let v = clean_vertices(&path.vertices, false);
        let n = v.len();
        if n < 2 {
            return Contour::default();
        }
        let mut out = Vec::with_capacity(4 * n);
        // Forward Path
        self.calc_side(&v, false, &mut out);
        self.calc_cap(&v[n - 1], segment_angle(&v[n - 2], &v[n - 1]), self.end_cap, &mut out);
        // Backward Path
        let rev: Vec<_> = v.iter().rev().copied().collect();
        self.calc_side(&rev, false, &mut out);
        self.calc_cap(&v[0], segment_angle(&v[1], &v[0]), self.start_cap, &mut out);
        Contour::new(clean_vertices(&out, true))
    }
    /// Outline of a closed contour as two rings, one per side
    ///
    /// Both rings start at the join of the first vertex and run in opposite
    /// directions. Contours with fewer than 3 distinct vertices give no rings
    pub fn polygonize_contour(&self, contour: &Contour) -> Vec<Contour> {
        let v = clean_vertices(&contour.vertices, true);
        if v.len() < 3 {
            return vec![];
        }
        let mut forward = Vec::with_capacity(2 * v.len());
        self.calc_side(&v, true, &mut forward);
        let rev: Vec<_> = v[..1].iter().chain(v[1..].iter().rev()).copied().collect();
        let mut backward = Vec::with_capacity(2 * v.len());
        self.calc_side(&rev, true, &mut backward);
        vec![Contour::new(clean_vertices(&forward, true)),
             Contour::new(clean_vertices(&backward, true))]
    }
    /// Fillable polygon for an open path
    pub fn stroke_path(&self, path: &LinePath) -> Polygon {
        let c = self.polygonize_path(path);
        let contours = if c.is_empty() { vec![] } else { vec![c] };
        Polygon::new(contours, InteriorFillMode::Winding)
    }
    /// Fillable ring polygon for a closed contour
    ///
    /// The two sides are chained into one contour through a zero width
    /// bridge at the first vertex and filled by the non-zero rule. The
    /// sides cancel inside the ring, while places where the outline folds
    /// over itself stay filled.
    pub fn stroke_contour(&self, contour: &Contour) -> Polygon {
        let rings = self.polygonize_contour(contour);
        if rings.is_empty() {
            return Polygon::new(vec![], InteriorFillMode::Winding);
        }
        let mut out = Vec::with_capacity(rings.iter().map(|r| r.len() + 1).sum());
        for ring in &rings {
            if let Some(&first) = ring.vertices.first() {
                out.extend_from_slice(&ring.vertices);
                out.push(first);
            }
        }
        Polygon::from_contour(Contour::new(out), InteriorFillMode::Winding)
    }
}

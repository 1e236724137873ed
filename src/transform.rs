//! Coordinate Transformations
//!
//! Projections from the coordinate system layer come in as plain
//! `(x,y) -> (x,y)` functions; the affine transform maps map units onto
//! pixels.

use crate::error::{RasterError, RasterResult};
use crate::geometry::{BoundingRectangle, Contour, Coordinate, Geometry, LinePath, Polygon};

use std::ops::Mul;

/// Point to point mapping of the plane
pub trait CoordinateTransform {
    fn transform(&self, x: f64, y: f64) -> (f64, f64);

    /// Transform a coordinate, failing on non-finite results
    fn transform_coordinate(&self, c: &Coordinate) -> RasterResult<Coordinate> {
        let (x, y) = self.transform(c.x, c.y);
        let out = Coordinate::new(x, y);
        if !out.is_finite() {
            return Err(RasterError::non_convergence(format!(
                "transform of ({}, {}) gave ({}, {})", c.x, c.y, x, y)));
        }
        Ok(out)
    }
    /// Transform every vertex of a geometry
    fn transform_geometry(&self, g: &Geometry) -> RasterResult<Geometry> {
        let pts = |v: &[Coordinate]| -> RasterResult<Vec<Coordinate>> {
            v.iter().map(|c| self.transform_coordinate(c)).collect()
        };
        Ok(match g {
            Geometry::Point(p) => Geometry::Point(self.transform_coordinate(p)?),
            Geometry::Path(p) => Geometry::Path(LinePath::new(pts(&p.vertices)?)),
            Geometry::Contour(c) => Geometry::Contour(Contour::new(pts(&c.vertices)?)),
            Geometry::Polygon(p) => {
                let contours = p.contours.iter()
                    .map(|c| pts(&c.vertices).map(Contour::new))
                    .collect::<RasterResult<Vec<_>>>()?;
                Geometry::Polygon(Polygon::new(contours, p.fill_mode))
            }
        })
    }
}

impl<F> CoordinateTransform for F
    where F: Fn(f64, f64) -> (f64, f64)
{
    fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        self(x, y)
    }
}

/// Affine Transformation
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Affine {
    pub sx: f64,
    pub sy: f64,
    pub shx: f64,
    pub shy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::new()
    }
}

impl Affine {
    /// Identity transform
    pub fn new() -> Self {
        Self { sx: 1.0,  sy: 1.0,
               shx: 0.0, shy: 0.0,
               tx: 0.0,  ty: 0.0,
        }
    }
    /// Map the map extent `world` onto a `width` x `height` pixel image
    ///
    /// The y axis is flipped so north is up.
    ///
    ///     use georaster::{Affine, BoundingRectangle, CoordinateTransform};
    ///
    ///     let world = BoundingRectangle::new(100.0, 40.0, 110.0, 45.0);
    ///     let view = Affine::viewport(&world, 200, 100).unwrap();
    ///     assert_eq!(view.transform(100.0, 45.0), (0.0, 0.0));
    ///     assert_eq!(view.transform(110.0, 40.0), (200.0, 100.0));
    pub fn viewport(world: &BoundingRectangle, width: usize, height: usize) -> RasterResult<Affine> {
        if world.is_empty() || world.width() <= 0.0 || world.height() <= 0.0 {
            return Err(RasterError::config("viewport extent must have a positive area"));
        }
        let sx = width as f64 / world.width();
        let sy = height as f64 / world.height();
        Ok(Affine {
            sx, sy: -sy,
            shx: 0.0, shy: 0.0,
            tx: -world.min_x * sx,
            ty: world.max_y * sy,
        })
    }
    /// Add a translation to the transform
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }
    /// Add a scaling to the transform
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.sx  *= sx;
        self.shx *= sx;
        self.tx  *= sx;
        self.sy  *= sy;
        self.shy *= sy;
        self.ty  *= sy;
    }
    /// Add a rotation to the transform
    ///
    /// angle is in radians
    pub fn rotate(&mut self, angle: f64) {
        let ca = angle.cos();
        let sa = angle.sin();
        let t0   = self.sx  * ca - self.shy * sa;
        let t2   = self.shx * ca - self.sy  * sa;
        let t4   = self.tx  * ca - self.ty  * sa;
        self.shy = self.sx  * sa + self.shy * ca;
        self.sy  = self.shx * sa + self.sy  * ca;
        self.ty  = self.tx  * sa + self.ty  * ca;
        self.sx  = t0;
        self.shx = t2;
        self.tx  = t4;
    }
    fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }
    /// Inverse transform, None when singular
    pub fn inverted(&self) -> Option<Affine> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let d = 1.0 / det;
        let sx = self.sy * d;
        let sy = self.sx * d;
        let shy = -self.shy * d;
        let shx = -self.shx * d;
        let tx = -self.tx * sx - self.ty * shx;
        let ty = -self.tx * shy - self.ty * sy;
        Some(Affine { sx, sy, shx, shy, tx, ty })
    }
    /// Apply `self` then `m`
    pub fn then(&self, m: &Affine) -> Self {
        let t0  = self.sx  * m.sx  + self.shy * m.shx;
        let t2  = self.shx * m.sx  + self.sy  * m.shx;
        let t4  = self.tx  * m.sx  + self.ty  * m.shx + m.tx;
        let shy = self.sx  * m.shy + self.shy * m.sy;
        let sy  = self.shx * m.shy + self.sy  * m.sy;
        let ty  = self.tx  * m.shy + self.ty  * m.sy + m.ty;
        Affine { sx: t0, sy, shx: t2, shy, tx: t4, ty }
    }
    pub fn new_scale(sx: f64, sy: f64) -> Affine {
        let mut t = Self::new();
        t.scale(sx, sy);
        t
    }
    pub fn new_translate(tx: f64, ty: f64) -> Affine {
        let mut t = Self::new();
        t.translate(tx, ty);
        t
    }
    pub fn new_rotate(ang: f64) -> Affine {
        let mut t = Self::new();
        t.rotate(ang);
        t
    }
}

impl CoordinateTransform for Affine {
    fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx  + y * self.shx + self.tx,
         x * self.shy + y * self.sy  + self.ty)
    }
}

impl Mul<Affine> for Affine {
    type Output = Affine;
    fn mul(self, rhs: Affine) -> Self {
        self.then(&rhs)
    }
}

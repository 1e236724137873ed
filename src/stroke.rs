//! Stroke Sequences
//!
//! Before a line is outlined it can be reshaped by a chain of
//! transformers, for example reprojected and then dashed. Each transformer
//! maps one path or contour to any number of paths or contours; the
//! results are outlined by a [`Polygonizer`].
//!
//! # Example
//!
//!     use georaster::{Dash, Geometry, LinePath, Polygonizer, StrokeSequence};
//!
//!     let mut seq = StrokeSequence::new();
//!     seq.push(Dash::new(vec![2.0, 1.0], 0.0).unwrap());
//!
//!     let line = Geometry::from(LinePath::from_xy(&[(0.0, 0.0), (10.0, 0.0)]));
//!     let polys = seq.stroke(&line, &Polygonizer::new()).unwrap();
//!     // Dashes start at 0, 3, 6 and 9
//!     assert_eq!(polys.len(), 4);

use crate::error::{RasterError, RasterResult};
use crate::geometry::{len, Coordinate, Geometry, LinePath, Polygon};
use crate::polygonize::Polygonizer;
use crate::transform::CoordinateTransform;

use std::fmt;
use std::sync::Arc;

use tracing::trace;

/// Reshape a line before outlining
///
/// Input is always a [`Geometry::Path`] or a [`Geometry::Contour`]; output
/// must be paths or contours as well.
pub trait StrokeTransformer: Send + Sync {
    fn apply(&self, geometry: Geometry) -> RasterResult<Vec<Geometry>>;
}

/// Apply a coordinate transform to every vertex of the line
#[derive(Debug,Clone)]
pub struct Reproject<T>(pub T);

impl<T> StrokeTransformer for Reproject<T>
    where T: CoordinateTransform + Send + Sync
{
    fn apply(&self, geometry: Geometry) -> RasterResult<Vec<Geometry>> {
        Ok(vec![self.0.transform_geometry(&geometry)?])
    }
}

/// Dash pattern
///
/// Lengths alternate between drawn and skipped parts, starting with a
/// drawn part. `offset` is how far into the pattern the line starts.
#[derive(Debug,Clone,PartialEq)]
pub struct Dash {
    pattern: Vec<f64>,
    offset: f64,
}

impl Dash {
    pub fn new(pattern: Vec<f64>, offset: f64) -> RasterResult<Dash> {
        if pattern.is_empty() {
            return Err(RasterError::invalid_argument("dash pattern is empty"));
        }
        if pattern.iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(RasterError::invalid_argument(
                format!("dash lengths must be finite and >= 0: {:?}", pattern)));
        }
        if pattern.iter().sum::<f64>() <= 0.0 {
            return Err(RasterError::invalid_argument("dash pattern has zero length"));
        }
        if !offset.is_finite() {
            return Err(RasterError::invalid_argument("dash offset must be finite"));
        }
        Ok(Dash { pattern, offset })
    }
    pub fn pattern(&self) -> &[f64] {
        &self.pattern
    }
    pub fn offset(&self) -> f64 {
        self.offset
    }
    /// Pattern index and remaining length at the start of the line
    fn start(&self) -> (usize, f64) {
        let total: f64 = self.pattern.iter().sum();
        let mut skip = self.offset.rem_euclid(total);
        let mut i = 0;
        while skip >= self.pattern[i] && skip > 0.0 {
            skip -= self.pattern[i];
            i = (i + 1) % self.pattern.len();
        }
        (i, self.pattern[i] - skip)
    }
    /// Drawn pieces of the polyline `v`
    pub fn split(&self, v: &[Coordinate]) -> Vec<LinePath> {
        let mut out = vec![];
        if v.len() < 2 {
            return out;
        }
        let (mut i, mut remain) = self.start();
        let mut current: Vec<Coordinate> = vec![];
        if i % 2 == 0 {
            current.push(v[0]);
        }
        for w in v.windows(2) {
            let (a, b) = (w[0], w[1]);
            let seg = len(&a, &b);
            let mut t = 0.0;
            while seg - t > remain {
                t += remain;
                let p = Coordinate::new(a.x + (b.x - a.x) * t / seg, a.y + (b.y - a.y) * t / seg);
                if i % 2 == 0 {
                    current.push(p);
                    if current.len() >= 2 {
                        out.push(LinePath::new(std::mem::take(&mut current)));
                    }
                    current.clear();
                } else {
                    current = vec![p];
                }
                i = (i + 1) % self.pattern.len();
                remain = self.pattern[i];
            }
            remain -= seg - t;
            if i % 2 == 0 {
                current.push(b);
            }
        }
        if i % 2 == 0 && current.len() >= 2 {
            out.push(LinePath::new(current));
        }
        out
    }
}

impl StrokeTransformer for Dash {
    fn apply(&self, geometry: Geometry) -> RasterResult<Vec<Geometry>> {
        let parts = match geometry {
            Geometry::Path(p) => self.split(&p.vertices),
            Geometry::Contour(c) => {
                // Dash around the closed ring
                let mut v = c.vertices;
                if let Some(&first) = v.first() {
                    v.push(first);
                }
                self.split(&v)
            }
            other => {
                return Err(RasterError::invalid_argument(
                    format!("dash cannot be applied to a {}", other.kind())));
            }
        };
        Ok(parts.into_iter().map(Geometry::Path).collect())
    }
}

/// Ordered chain of stroke transformers
#[derive(Clone,Default)]
pub struct StrokeSequence {
    transformers: Vec<Arc<dyn StrokeTransformer>>,
}

impl fmt::Debug for StrokeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrokeSequence")
            .field("transformers", &self.transformers.len())
            .finish()
    }
}

fn is_line(g: &Geometry) -> bool {
    matches!(g, Geometry::Path(_) | Geometry::Contour(_))
}

impl StrokeSequence {
    /// Empty sequence, lines are outlined as they are
    pub fn new() -> Self {
        Self { transformers: vec![] }
    }
    /// Append a transformer to the end of the chain
    pub fn push<T: StrokeTransformer + 'static>(&mut self, t: T) -> &mut Self {
        self.transformers.push(Arc::new(t));
        self
    }
    pub fn len(&self) -> usize {
        self.transformers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
    /// Run `geometry` through every transformer in order
    pub fn transform(&self, geometry: &Geometry) -> RasterResult<Vec<Geometry>> {
        if !is_line(geometry) {
            return Err(RasterError::invalid_argument(
                format!("only paths and contours can be stroked, got a {}", geometry.kind())));
        }
        let mut current = vec![geometry.clone()];
        for (k, t) in self.transformers.iter().enumerate() {
            let mut next = Vec::with_capacity(current.len());
            for g in current {
                for out in t.apply(g)? {
                    if !is_line(&out) {
                        return Err(RasterError::invalid_operation(
                            format!("stroke transformer {} produced a {}", k, out.kind())));
                    }
                    next.push(out);
                }
            }
            current = next;
        }
        Ok(current)
    }
    /// Transform then outline, one polygon per resulting line
    ///
    /// Degenerate lines give no polygon.
    pub fn stroke(&self, geometry: &Geometry, pen: &Polygonizer) -> RasterResult<Vec<Polygon>> {
        let lines = self.transform(geometry)?;
        let n = lines.len();
        let polys: Vec<Polygon> = lines.iter()
            .filter_map(|g| match g {
                Geometry::Path(p) => Some(pen.stroke_path(p)),
                Geometry::Contour(c) => Some(pen.stroke_contour(c)),
                _ => None,
            })
            .filter(|p| !p.contours.is_empty())
            .collect();
        trace!(lines = n, polygons = polys.len(), "stroked");
        Ok(polys)
    }
}

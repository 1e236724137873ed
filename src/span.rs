//! Span Generation
//!
//! Turns one scannable shape and one fill into anti-aliased pixel spans.
//! Every pixel row (or column) is sampled by `subpixel_level` sub-scanlines;
//! the inside intervals of all sub-scanlines are accumulated into a per pixel
//! coverage which becomes the pixel alpha through a gamma table.

use crate::color::{alpha, multiply_u8, with_alpha};
use crate::error::{RasterError, RasterResult};
use crate::fill::Fill;
use crate::geometry::BoundingRectangle;
use crate::scan::{Orientation, Scannable};

use tracing::trace;

/// Contiguous run of pixels along one axis
///
/// Horizontal spans advance in x from (`x`,`y`), vertical spans in y.
#[derive(Debug,Clone,PartialEq)]
pub struct PixelSpan {
    pub orientation: Orientation,
    pub x: i64,
    pub y: i64,
    /// Packed ARGB color per pixel
    pub colors: Vec<u32>,
}

impl PixelSpan {
    pub fn new(orientation: Orientation, x: i64, y: i64, colors: Vec<u32>) -> Self {
        Self { orientation, x, y, colors }
    }
    pub fn len(&self) -> usize {
        self.colors.len()
    }
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
    /// Location of the `i`th pixel
    pub fn position(&self, i: usize) -> (i64, i64) {
        match self.orientation {
            Orientation::Horizontal => (self.x + i as i64, self.y),
            Orientation::Vertical => (self.x, self.y + i as i64),
        }
    }
    /// Pixels as (x, y, color)
    pub fn pixels(&self) -> impl Iterator<Item = (i64, i64, u32)> + '_ {
        self.colors.iter().enumerate().map(move |(i, &c)| {
            let (x, y) = self.position(i);
            (x, y, c)
        })
    }
}

/// Anti-aliased span generator
#[derive(Debug,Clone)]
pub struct SpanGenerator {
    subpixel_level: u8,
    gamma: f64,
    /// Alpha for coverage `i / 255`
    alpha_table: Vec<u8>,
}

impl Default for SpanGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn gamma_table(gamma: f64) -> Vec<u8> {
    (0..256)
        .map(|i| f64::from(i) / 255.0)
        .map(|v| (v.powf(gamma) * 255.0).round() as u8)
        .collect()
}

impl SpanGenerator {
    /// Sub-pixel level 4, gamma 1
    pub fn new() -> Self {
        Self { subpixel_level: 4, gamma: 1.0, alpha_table: gamma_table(1.0) }
    }
    pub fn subpixel_level(&self) -> u8 {
        self.subpixel_level
    }
    /// Number of sub-scanlines per pixel, at least 1
    pub fn set_subpixel_level(&mut self, level: u8) -> RasterResult<()> {
        if level == 0 {
            return Err(RasterError::config("sub-pixel level must be >= 1"));
        }
        self.subpixel_level = level;
        Ok(())
    }
    pub fn antialiasing_gamma(&self) -> f64 {
        self.gamma
    }
    /// Exponent applied to the coverage fraction, positive and finite
    ///
    /// The alpha table is rebuilt from the new value.
    pub fn set_antialiasing_gamma(&mut self, gamma: f64) -> RasterResult<()> {
        if !(gamma > 0.0 && gamma.is_finite()) {
            return Err(RasterError::config(format!("anti-aliasing gamma must be > 0, got {}", gamma)));
        }
        self.gamma = gamma;
        self.alpha_table = gamma_table(gamma);
        Ok(())
    }
    /// Alpha for an accumulated coverage in `0 ..= subpixel_level`
    #[inline]
    pub fn coverage_alpha(&self, coverage: f64) -> u8 {
        let level = f64::from(self.subpixel_level);
        let frac = coverage.max(0.0).min(level) / level;
        self.alpha_table[(frac * 255.0).round() as usize]
    }
    /// Final pixel color from the fill color and the coverage alpha
    ///
    /// A fill without alpha is treated as opaque.
    #[inline]
    fn compose(color: u32, aa: u8) -> u32 {
        let fa = alpha(color);
        let a = if fa == 0 { aa } else { multiply_u8(aa, fa) };
        with_alpha(color, a)
    }

    /// Rasterize `shape` with `fill` inside the pixel window `clip`
    ///
    /// `clip` is in pixel units; pixel `(x,y)` covers `[x, x+1) x [y, y+1)`.
    /// Sub-scanlines outside a fractional clip edge are not sampled, so a
    /// partly clipped row only gets the coverage inside the clip. Spans are
    /// appended to `spans` scanline by scanline.
    pub fn generate<S: Scannable>(&self, shape: &mut S, fill: &Fill,
                                  clip: &BoundingRectangle, orientation: Orientation,
                                  spans: &mut Vec<PixelSpan>) {
        let window = shape.bounds().intersection(clip);
        if window.is_empty() {
            return;
        }
        let (wlo, whi) = orientation.scan_range(&window);
        let (clo, chi) = orientation.scan_range(clip);
        let first = wlo.floor().max(clo.floor()) as i64;
        let last = whi.ceil().min(chi.ceil()) as i64;
        if last <= first {
            return;
        }
        shape.init_scan(clip, orientation);

        let level = usize::from(self.subpixel_level);
        let step = 1.0 / level as f64;
        let mut hits = Vec::new();
        let mut intervals: Vec<(f64, f64)> = Vec::new();
        let mut cover: Vec<f64> = Vec::new();
        let before = spans.len();

        for line in first..last {
            intervals.clear();
            for s in 0..level {
                let pos = line as f64 + (s as f64 + 0.5) * step;
                if pos < clo || pos >= chi {
                    continue;
                }
                shape.compute_intersections(pos, &mut hits);
                intervals.extend(hits.chunks_exact(2).map(|p| (p[0], p[1])));
            }
            if intervals.is_empty() {
                continue;
            }
            let lo = intervals.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
            let hi = intervals.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
            let base = lo.floor() as i64;
            let n = (hi.ceil() as i64 - base).max(0) as usize;
            if n == 0 {
                continue;
            }
            cover.clear();
            cover.resize(n, 0.0);
            for &(a, b) in &intervals {
                accumulate(&mut cover, base, a, b);
            }
            self.emit(line, base, &cover, fill, orientation, spans);
        }
        trace!(spans = spans.len() - before, first, last, ?orientation, "generated spans");
    }

    /// Split the coverage of one scanline into spans of covered pixels
    fn emit(&self, line: i64, base: i64, cover: &[f64], fill: &Fill,
            orientation: Orientation, spans: &mut Vec<PixelSpan>) {
        let mut run: Option<PixelSpan> = None;
        for (i, &c) in cover.iter().enumerate() {
            if c <= 0.0 {
                if let Some(span) = run.take() {
                    spans.push(span);
                }
                continue;
            }
            let p = base + i as i64;
            let (x, y) = match orientation {
                Orientation::Horizontal => (p, line),
                Orientation::Vertical => (line, p),
            };
            let color = Self::compose(fill.color_at(x, y), self.coverage_alpha(c));
            match run.as_mut() {
                Some(span) => span.colors.push(color),
                None => run = Some(PixelSpan::new(orientation, x, y, vec![color])),
            }
        }
        if let Some(span) = run {
            spans.push(span);
        }
    }
}

/// Add the interval `[a, b]` of one sub-scanline to the pixel coverage
///
/// Partially covered end pixels get the covered fraction, pixels in
/// between get 1.
fn accumulate(cover: &mut [f64], base: i64, a: f64, b: f64) {
    if b <= a {
        return;
    }
    let ia = a.floor();
    let ib = b.floor();
    let pa = (ia as i64 - base) as usize;
    if ia == ib {
        cover[pa] += b - a;
        return;
    }
    cover[pa] += ia + 1.0 - a;
    let pb = (ib as i64 - base) as usize;
    for c in &mut cover[pa + 1..pb] {
        *c += 1.0;
    }
    let frac = b - ib;
    if frac > 0.0 {
        cover[pb] += frac;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_splits_partial_pixels() {
        let mut cover = vec![0.0; 4];
        accumulate(&mut cover, 10, 10.5, 13.25);
        assert_eq!(cover, vec![0.5, 1.0, 1.0, 0.25]);
    }

    #[test]
    fn accumulate_ending_on_pixel_edge() {
        let mut cover = vec![0.0; 2];
        accumulate(&mut cover, 0, 0.0, 2.0);
        assert_eq!(cover, vec![1.0, 1.0]);
    }

    #[test]
    fn gamma_table_is_rebuilt_from_new_gamma() {
        let mut g = SpanGenerator::new();
        assert_eq!(g.coverage_alpha(2.0), 128);
        g.set_antialiasing_gamma(2.0).unwrap();
        assert_eq!(g.coverage_alpha(2.0), 64);
        assert!(g.set_antialiasing_gamma(0.0).is_err());
        assert_eq!(g.antialiasing_gamma(), 2.0);
    }

    #[test]
    fn fill_without_alpha_is_opaque() {
        assert_eq!(SpanGenerator::compose(0x0012_3456, 200), 0xC812_3456);
        assert_eq!(SpanGenerator::compose(0x8012_3456, 255), 0x8012_3456);
    }
}

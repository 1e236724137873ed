//! Raster Buffer
//!
//! Packed ARGB pixels stored in row-major order (C-format),
//! `index = y * width + x`.

use crate::color::{blend, Argb8};
use crate::error::RasterResult;
use crate::geometry::BoundingRectangle;
use crate::scan::Orientation;
use crate::span::PixelSpan;

use std::ops::{Index, IndexMut};
use std::path::Path;

/// Pixel store and compositing target
#[derive(Debug,Default,Clone,PartialEq)]
pub struct RasterBuffer {
    /// Pixel data, one `0xAARRGGBB` value per pixel
    pub data: Vec<u32>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
}

/// Visit the part of `span` inside the pixel rectangle `[x0,x1) x [y0,y1)`
///
/// `f` receives the band relative position and the span color
fn clip_span<F>(span: &PixelSpan, x0: usize, y0: usize, x1: usize, y1: usize, mut f: F)
    where F: FnMut(usize, usize, u32)
{
    let (fixed, start, lo, hi, flo, fhi) = match span.orientation {
        Orientation::Horizontal => (span.y, span.x, x0, x1, y0, y1),
        Orientation::Vertical => (span.x, span.y, y0, y1, x0, x1),
    };
    if fixed < flo as i64 || fixed >= fhi as i64 {
        return;
    }
    let first = (lo as i64).max(start);
    let last = (hi as i64).min(start + span.len() as i64);
    for p in first..last {
        let c = span.colors[(p - start) as usize];
        match span.orientation {
            Orientation::Horizontal => f(p as usize - x0, fixed as usize - y0, c),
            Orientation::Vertical => f(fixed as usize - x0, p as usize - y0, c),
        }
    }
}

impl RasterBuffer {
    /// Create a new transparent buffer of width x height pixels
    pub fn new(width: usize, height: usize) -> Self {
        RasterBuffer { width, height, data: vec![0u32; width * height] }
    }
    /// Number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Whole buffer in pixel units
    pub fn bounds(&self) -> BoundingRectangle {
        BoundingRectangle::new(0.0, 0.0, self.width as f64, self.height as f64)
    }
    /// Set every pixel to `color`
    pub fn clear(&mut self, color: u32) {
        self.data.iter_mut().for_each(|v| *v = color);
    }
    #[inline]
    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }
    /// Pixel at (`x`,`y`), None outside the buffer
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<u32> {
        self.offset(x, y).map(|i| self.data[i])
    }
    /// Overwrite the pixel, locations outside of the buffer are ignored
    pub fn set_pixel(&mut self, x: i64, y: i64, color: u32) {
        if let Some(i) = self.offset(x, y) {
            self.data[i] = color;
        }
    }
    /// Composite `color` over the pixel
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: u32) {
        if let Some(i) = self.offset(x, y) {
            self.data[i] = blend(self.data[i], color);
        }
    }
    /// Index of the first visible pixel of a span, the stride and count
    fn span_range(&self, span: &PixelSpan) -> Option<(usize, usize, usize, usize)> {
        let (w, h) = (self.width as i64, self.height as i64);
        let n = span.len() as i64;
        let (skip, count, stride) = match span.orientation {
            Orientation::Horizontal => {
                if span.y < 0 || span.y >= h {
                    return None;
                }
                let skip = (-span.x).max(0);
                (skip, (w - span.x).min(n) - skip, 1)
            }
            Orientation::Vertical => {
                if span.x < 0 || span.x >= w {
                    return None;
                }
                let skip = (-span.y).max(0);
                (skip, (h - span.y).min(n) - skip, self.width)
            }
        };
        if count <= 0 {
            return None;
        }
        let (x, y) = span.position(skip as usize);
        let start = y as usize * self.width + x as usize;
        Some((start, stride, skip as usize, count as usize))
    }
    /// Overwrite pixels with the span colors
    pub fn set_span(&mut self, span: &PixelSpan) {
        if let Some((start, stride, skip, count)) = self.span_range(span) {
            for (k, &c) in span.colors[skip..skip + count].iter().enumerate() {
                self.data[start + k * stride] = c;
            }
        }
    }
    /// Composite the span colors over the pixels
    ///
    /// Horizontal spans advance by one pixel, vertical spans by one row
    pub fn blend_span(&mut self, span: &PixelSpan) {
        if let Some((start, stride, skip, count)) = self.span_range(span) {
            for (k, &c) in span.colors[skip..skip + count].iter().enumerate() {
                let i = start + k * stride;
                self.data[i] = blend(self.data[i], c);
            }
        }
    }
    /// Split into disjoint mutable views, `cols` x `rows` of them
    ///
    /// Views are returned row by row. Each view owns its own pixels so
    /// views can be drawn into from different threads.
    pub fn split_grid_mut(&mut self, cols: usize, rows: usize) -> Vec<BandView<'_>> {
        assert!(cols > 0 && rows > 0, "grid needs at least one band");
        let (w, h) = (self.width, self.height);
        let xs: Vec<usize> = (0..=cols).map(|i| i * w / cols).collect();
        let ys: Vec<usize> = (0..=rows).map(|i| i * h / rows).collect();
        let mut views: Vec<BandView<'_>> = Vec::with_capacity(cols * rows);
        for r in 0..rows {
            for c in 0..cols {
                views.push(BandView {
                    x0: xs[c], y0: ys[r], x1: xs[c + 1], y1: ys[r + 1],
                    rows: Vec::with_capacity(ys[r + 1] - ys[r]),
                });
            }
        }
        if w == 0 {
            return views;
        }
        let mut band_row = 0;
        for (y, line) in self.data.chunks_mut(w).enumerate() {
            while y >= ys[band_row + 1] {
                band_row += 1;
            }
            let mut rest = line;
            for c in 0..cols {
                let (head, tail) = std::mem::take(&mut rest).split_at_mut(xs[c + 1] - xs[c]);
                views[band_row * cols + c].rows.push(head);
                rest = tail;
            }
        }
        views
    }
    /// Copy into an [`image::RgbaImage`]
    pub fn to_image(&self) -> image::RgbaImage {
        let mut img = image::RgbaImage::new(self.width as u32, self.height as u32);
        for (px, &v) in img.pixels_mut().zip(self.data.iter()) {
            let c = Argb8::from_u32(v);
            *px = image::Rgba([c.r, c.g, c.b, c.a]);
        }
        img
    }
    /// Write the buffer to an image file, format from the extension
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> RasterResult<()> {
        self.to_image().save(filename)?;
        Ok(())
    }
}

impl Index<(usize, usize)> for RasterBuffer {
    type Output = u32;
    fn index(&self, index: (usize, usize)) -> &u32 {
        assert!(index.0 < self.width, "request {} >= {} width :: index", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index", index.1, self.height);
        &self.data[index.1 * self.width + index.0]
    }
}
impl IndexMut<(usize, usize)> for RasterBuffer {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut u32 {
        assert!(index.0 < self.width, "request {} >= {} width :: index_mut", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index_mut", index.1, self.height);
        &mut self.data[index.1 * self.width + index.0]
    }
}

/// Mutable rectangular part of a [`RasterBuffer`]
///
/// Coordinates passed in are those of the whole buffer; anything outside
/// the band is ignored.
#[derive(Debug)]
pub struct BandView<'a> {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    rows: Vec<&'a mut [u32]>,
}

impl<'a> BandView<'a> {
    /// Band in pixel units of the whole buffer
    pub fn bounds(&self) -> BoundingRectangle {
        BoundingRectangle::new(self.x0 as f64, self.y0 as f64, self.x1 as f64, self.y1 as f64)
    }
    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }
    pub fn blend_span(&mut self, span: &PixelSpan) {
        let rows = &mut self.rows;
        clip_span(span, self.x0, self.y0, self.x1, self.y1, |x, y, c| {
            rows[y][x] = blend(rows[y][x], c);
        });
    }
    pub fn set_span(&mut self, span: &PixelSpan) {
        let rows = &mut self.rows;
        clip_span(span, self.x0, self.y0, self.x1, self.y1, |x, y, c| rows[y][x] = c);
    }
}

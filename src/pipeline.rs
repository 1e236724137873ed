//! Rendering Pipeline
//!
//! Drives span generation for a stream of shapes into one buffer.
//!
//! In [`ParallelizationLevel::Single`] every shape is rasterized and
//! blended as soon as it is handed in. The other levels cut the buffer into
//! 2 or 4 bands; shapes are queued and a [`flush`](RenderingPipeline::flush)
//! renders the whole queue, one band per worker thread. Each worker visits
//! the queue in order, so overlapping shapes composite in submission order
//! within every band and the image matches the single threaded one.
//!
//! # Example
//!
//!     use georaster::*;
//!
//!     let mut buf = RasterBuffer::new(64, 64);
//!     {
//!         let mut pipe = RenderingPipeline::new(&mut buf);
//!         pipe.set_parallelization_level(ParallelizationLevel::Quad).unwrap();
//!         let disc = Circle::new(Coordinate::new(32.0, 32.0), 20.0);
//!         pipe.render(disc, Fill::solid(0xFF00_00FF)).unwrap();
//!         pipe.flush().unwrap();
//!     }
//!     assert_eq!(buf.get_pixel(32, 32), Some(0xFF00_00FF));
//!     assert_eq!(buf.get_pixel(0, 0), Some(0));

use crate::buffer::{BandView, RasterBuffer};
use crate::circle::Circle;
use crate::error::{RasterError, RasterResult};
use crate::fill::Fill;
use crate::geometry::{Geometry, InteriorFillMode, Polygon};
use crate::polygonize::Polygonizer;
use crate::region::Region;
use crate::scan::{Orientation, Scannable, Shape};
use crate::span::{PixelSpan, SpanGenerator};
use crate::stroke::StrokeSequence;
use crate::transform::{Affine, CoordinateTransform};

use rayon::prelude::*;
use tracing::debug;

/// Number of bands the buffer is cut into
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ParallelizationLevel {
    /// Render on the calling thread, no queue
    Single,
    /// Top and bottom halves
    Duo,
    /// Four quadrants
    Quad,
}

impl Default for ParallelizationLevel {
    fn default() -> Self {
        ParallelizationLevel::Single
    }
}

impl ParallelizationLevel {
    /// Band grid as (columns, rows)
    pub fn grid(self) -> (usize, usize) {
        match self {
            ParallelizationLevel::Single => (1, 1),
            ParallelizationLevel::Duo => (1, 2),
            ParallelizationLevel::Quad => (2, 2),
        }
    }
    pub fn bands(self) -> usize {
        let (c, r) = self.grid();
        c * r
    }
}

/// Queued shape and its fill
#[derive(Debug,Clone)]
pub struct RenderJob {
    pub shape: Shape,
    pub fill: Fill,
}

/// Outline part of a [`Style`]
#[derive(Debug,Clone)]
pub struct StrokeStyle {
    pub fill: Fill,
    pub pen: Polygonizer,
    /// Applied to lines before they are outlined
    pub sequence: StrokeSequence,
}

impl StrokeStyle {
    pub fn new(fill: Fill, pen: Polygonizer) -> Self {
        Self { fill, pen, sequence: StrokeSequence::new() }
    }
}

/// Map style of a feature
#[derive(Debug,Clone)]
pub struct Style {
    /// Interior of contours, polygons and points
    pub fill: Option<Fill>,
    /// Outline of paths, contours and polygons
    pub stroke: Option<StrokeStyle>,
    /// Radius of point markers in pixels
    pub point_radius: f64,
}

impl Default for Style {
    fn default() -> Self {
        Style { fill: None, stroke: None, point_radius: 3.0 }
    }
}

/// Scanline renderer for one buffer
pub struct RenderingPipeline<'a> {
    buffer: &'a mut RasterBuffer,
    generator: SpanGenerator,
    level: ParallelizationLevel,
    pool_size: usize,
    unlimited_pool: bool,
    jobs: Vec<RenderJob>,
    workers: Option<rayon::ThreadPool>,
    view: Option<Affine>,
    spans: Vec<PixelSpan>,
    /// Work done by each band worker on a flush
    band_renderer: BandRenderer,
}

type BandRenderer = fn(&mut BandView<'_>, &[RenderJob], &SpanGenerator);

fn build_worker_pool(threads: usize) -> RasterResult<rayon::ThreadPool> {
    debug!(threads, "building band worker pool");
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("georaster-band-{}", i))
        .build()
        .map_err(|e| RasterError::thread_pool(format!("failed to build band worker pool: {e}")))
}

fn worker_pool(slot: &mut Option<rayon::ThreadPool>, threads: usize)
               -> RasterResult<&rayon::ThreadPool> {
    let pool = match slot.take() {
        Some(pool) => pool,
        None => build_worker_pool(threads)?,
    };
    Ok(slot.insert(pool))
}

/// Render every queued job that touches `band`
fn render_band(band: &mut BandView<'_>, jobs: &[RenderJob], generator: &SpanGenerator) {
    if band.is_empty() {
        return;
    }
    let clip = band.bounds();
    let mut spans = vec![];
    for job in jobs {
        let bounds = job.shape.bounds();
        if !bounds.intersects(&clip) {
            continue;
        }
        let mut shape = job.shape.fork();
        spans.clear();
        generator.generate(&mut shape, &job.fill, &clip, Orientation::for_bounds(&bounds), &mut spans);
        for span in &spans {
            band.blend_span(span);
        }
    }
}

impl<'a> RenderingPipeline<'a> {
    /// Single threaded pipeline with the default span generator
    pub fn new(buffer: &'a mut RasterBuffer) -> Self {
        Self {
            buffer,
            generator: SpanGenerator::new(),
            level: ParallelizationLevel::Single,
            pool_size: 100,
            unlimited_pool: false,
            jobs: vec![],
            workers: None,
            view: None,
            spans: vec![],
            band_renderer: render_band,
        }
    }
    pub fn parallelization_level(&self) -> ParallelizationLevel {
        self.level
    }
    /// Change the band layout
    ///
    /// Queued jobs are flushed with the previous layout first.
    pub fn set_parallelization_level(&mut self, level: ParallelizationLevel) -> RasterResult<()> {
        if level == self.level {
            return Ok(());
        }
        self.flush()?;
        if level.bands() != self.level.bands() {
            self.workers = None;
        }
        debug!(from = ?self.level, to = ?level, "parallelization level");
        self.level = level;
        Ok(())
    }
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }
    /// Queue length that triggers an automatic flush, at least 1
    pub fn set_pool_size(&mut self, size: usize) -> RasterResult<()> {
        if size == 0 {
            return Err(RasterError::config("pool size must be >= 1"));
        }
        self.pool_size = size;
        Ok(())
    }
    pub fn unlimited_pool(&self) -> bool {
        self.unlimited_pool
    }
    /// Queue without bound, only explicit flushes render
    pub fn set_unlimited_pool(&mut self, unlimited: bool) {
        self.unlimited_pool = unlimited;
    }
    pub fn span_generator(&self) -> &SpanGenerator {
        &self.generator
    }
    pub fn span_generator_mut(&mut self) -> &mut SpanGenerator {
        &mut self.generator
    }
    /// Map to pixel transform used by [`render_geometry`](Self::render_geometry)
    pub fn set_view(&mut self, view: Option<Affine>) {
        self.view = view;
    }
    pub fn view(&self) -> Option<&Affine> {
        self.view.as_ref()
    }
    /// Jobs waiting for the next flush
    pub fn pending_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Render a shape with a fill
    ///
    /// Single level draws immediately, otherwise the shape is queued and
    /// the queue is flushed once it holds `pool_size` jobs.
    pub fn render<S: Into<Shape>>(&mut self, shape: S, fill: Fill) -> RasterResult<()> {
        let shape = shape.into();
        if self.level == ParallelizationLevel::Single {
            self.render_now(shape, &fill);
            return Ok(());
        }
        self.jobs.push(RenderJob { shape, fill });
        if !self.unlimited_pool && self.jobs.len() >= self.pool_size {
            self.flush()?;
        }
        Ok(())
    }

    fn render_now(&mut self, mut shape: Shape, fill: &Fill) {
        let clip = self.buffer.bounds();
        let orientation = Orientation::for_bounds(&shape.bounds());
        self.spans.clear();
        self.generator.generate(&mut shape, fill, &clip, orientation, &mut self.spans);
        for span in &self.spans {
            self.buffer.blend_span(span);
        }
    }

    /// Render all queued jobs and wait for the workers
    #[tracing::instrument(level = "debug", skip(self), fields(level = ?self.level))]
    pub fn flush(&mut self) -> RasterResult<()> {
        if self.jobs.is_empty() {
            return Ok(());
        }
        let (cols, rows) = self.level.grid();
        let pool = worker_pool(&mut self.workers, cols * rows)?;
        // Taken out so a panicking worker leaves an empty queue behind
        let mut jobs = std::mem::take(&mut self.jobs);
        let generator = &self.generator;
        let render = self.band_renderer;
        let bands = self.buffer.split_grid_mut(cols, rows);
        debug!(jobs = jobs.len(), bands = bands.len(), "flushing render queue");
        pool.install(|| {
            bands.into_par_iter().for_each(|mut band| render(&mut band, &jobs, generator));
        });
        jobs.clear();
        self.jobs = jobs;
        Ok(())
    }

    /// Render a map feature with a style
    ///
    /// Points become circles, paths are outlined, contours and polygons are
    /// filled and then outlined. The view transform, when set, is applied
    /// to the feature first.
    #[tracing::instrument(level = "trace", skip_all, fields(kind = geometry.kind()))]
    pub fn render_geometry(&mut self, geometry: &Geometry, style: &Style) -> RasterResult<()> {
        let projected;
        let g = match &self.view {
            Some(view) => {
                projected = view.transform_geometry(geometry)?;
                &projected
            }
            None => geometry,
        };
        match g {
            Geometry::Point(p) => {
                if let Some(fill) = &style.fill {
                    self.render(Circle::new(*p, style.point_radius), fill.clone())?;
                }
            }
            Geometry::Path(_) => self.render_outline(g, style)?,
            Geometry::Contour(c) => {
                if let Some(fill) = &style.fill {
                    let poly = Polygon::from_contour(c.clone(), InteriorFillMode::Alternate);
                    self.render(Region::new(poly), fill.clone())?;
                }
                self.render_outline(g, style)?;
            }
            Geometry::Polygon(p) => {
                if let Some(fill) = &style.fill {
                    self.render(Region::new(p.clone()), fill.clone())?;
                }
                for c in &p.contours {
                    self.render_outline(&Geometry::Contour(c.clone()), style)?;
                }
            }
        }
        Ok(())
    }

    fn render_outline(&mut self, line: &Geometry, style: &Style) -> RasterResult<()> {
        let Some(stroke) = &style.stroke else {
            return Ok(());
        };
        for poly in stroke.sequence.stroke(line, &stroke.pen)? {
            self.render(Region::new(poly), stroke.fill.clone())?;
        }
        Ok(())
    }
}

impl Drop for RenderingPipeline<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, dropped = self.jobs.len(), "render queue lost on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;

    use std::panic::{self, AssertUnwindSafe};

    fn failing_band(_: &mut BandView<'_>, _: &[RenderJob], _: &SpanGenerator) {
        panic!("band worker failed");
    }

    fn disc() -> Circle {
        Circle::new(Coordinate::new(8.0, 8.0), 4.0)
    }

    #[test]
    fn worker_panic_leaves_an_empty_queue() {
        let mut buf = RasterBuffer::new(16, 16);
        {
            let mut pipe = RenderingPipeline::new(&mut buf);
            pipe.set_parallelization_level(ParallelizationLevel::Quad).unwrap();
            pipe.band_renderer = failing_band;
            pipe.render(disc(), Fill::solid(0xFF00_0000)).unwrap();
            assert_eq!(pipe.pending_jobs(), 1);

            let result = panic::catch_unwind(AssertUnwindSafe(|| pipe.flush()));
            assert!(result.is_err());
            assert_eq!(pipe.pending_jobs(), 0);

            // The pool survives the failed flush
            pipe.band_renderer = render_band;
            pipe.render(disc(), Fill::solid(0xFF00_0000)).unwrap();
            pipe.flush().unwrap();
            assert_eq!(pipe.pending_jobs(), 0);
        }
        assert_eq!(buf.get_pixel(8, 8), Some(0xFF00_0000));
    }

    #[test]
    fn drop_after_worker_panic_does_not_panic() {
        let mut buf = RasterBuffer::new(16, 16);
        let dropped = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut pipe = RenderingPipeline::new(&mut buf);
            pipe.set_parallelization_level(ParallelizationLevel::Duo).unwrap();
            pipe.band_renderer = failing_band;
            pipe.render(disc(), Fill::solid(0xFF00_0000)).unwrap();
            let result = panic::catch_unwind(AssertUnwindSafe(|| pipe.flush()));
            assert!(result.is_err());
            drop(pipe);
        }));
        assert!(dropped.is_ok());
        assert_eq!(buf.get_pixel(8, 8), Some(0));
    }
}

//! Anti-Aliased Scanline Rasterizer for Map Features
//!
//! Vector features (points, paths, contours and polygons) are rendered
//! into a packed ARGB pixel buffer without a platform drawing API.
//!
//! How does this work
//!
//! ```text
//!     Geometry
//!       Polygonizer            -- paths/contours to outline polygons
//!         (StrokeSequence)     -- optional reproject / dash first
//!       Region / Circle        -- Scannable shapes
//!     SpanGenerator
//!       init_scan()            -- edge table for the clip window
//!       compute_intersections()
//!         per sub-scanline     -- inside intervals
//!       coverage -> alpha      -- gamma table
//!       Fill::color_at()       -- solid, pattern or hatch
//!     Output: PixelSpans
//!     RenderingPipeline
//!       Single: blend spans now
//!       Duo/Quad: queue, flush() one band per worker
//!         RasterBuffer::blend_span()
//! ```
//!
//! # Example
//!
//!     use georaster::*;
//!
//!     let mut buf = RasterBuffer::new(40, 20);
//!     {
//!         let mut pipe = RenderingPipeline::new(&mut buf);
//!
//!         let mut pen = Polygonizer::new();
//!         pen.set_width(4.0).unwrap();
//!         pen.set_start_cap(LineCap::Round);
//!         pen.set_end_cap(LineCap::Round);
//!
//!         let style = Style {
//!             stroke: Some(StrokeStyle::new(Fill::solid(0xFF00_0000), pen)),
//!             ..Style::default()
//!         };
//!         let line = LinePath::from_xy(&[(5.0, 10.0), (35.0, 10.0)]);
//!         pipe.render_geometry(&line.into(), &style).unwrap();
//!     }
//!     assert_eq!(buf.get_pixel(20, 10), Some(0xFF00_0000));
//!     assert_eq!(buf.get_pixel(20, 2), Some(0));

pub mod error;
pub mod geometry;
pub mod color;
pub mod fill;
pub mod transform;
pub mod polygonize;
pub mod stroke;
pub mod scan;
pub mod circle;
pub mod region;
pub mod span;
pub mod buffer;
pub mod pipeline;

pub use error::*;
pub use geometry::*;
pub use color::*;
pub use fill::*;
pub use transform::*;
pub use polygonize::*;
pub use stroke::*;
pub use scan::*;
pub use circle::*;
pub use region::*;
pub use span::*;
pub use buffer::*;
pub use pipeline::*;

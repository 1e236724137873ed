//! Fills
//!
//! A fill maps a pixel location to a packed ARGB color. Pattern and hatch
//! fills repeat a table anchored at an origin pixel.
//!
//!     use georaster::Fill;
//!
//!     let checker = Fill::hatch(vec![vec![true, false],
//!                                    vec![false, true]],
//!                               0xFF000000, 0xFFFFFFFF, 0, 0).unwrap();
//!     assert_eq!(checker.color_at(0, 0), 0xFF000000);
//!     assert_eq!(checker.color_at(1, 0), 0xFFFFFFFF);
//!     assert_eq!(checker.color_at(3, 1), 0xFF000000);

use crate::error::{RasterError, RasterResult};

/// Pixel color function
#[derive(Debug,Clone,PartialEq)]
pub enum Fill {
    /// Constant color
    Solid(u32),
    /// Repeating table of colors
    Pattern(Table<u32>),
    /// Repeating table choosing between two colors
    Hatch {
        table: Table<bool>,
        /// Color where the table is `true`
        color1: u32,
        /// Color where the table is `false`
        color2: u32,
    },
}

/// Rectangular table repeated over the plane from an origin
#[derive(Debug,Clone,PartialEq)]
pub struct Table<T> {
    cells: Vec<T>,
    rows: usize,
    cols: usize,
    origin_x: i64,
    origin_y: i64,
}

impl<T: Copy> Table<T> {
    /// Build from rows; rows must be non-empty and of equal length
    pub fn new(rows: Vec<Vec<T>>, origin_x: i64, origin_y: i64) -> RasterResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return Err(RasterError::config("fill table must not be empty"));
        }
        if rows.iter().any(|r| r.len() != ncols) {
            return Err(RasterError::config("fill table rows must have equal length"));
        }
        let cells = rows.into_iter().flatten().collect();
        Ok(Self { cells, rows: nrows, cols: ncols, origin_x, origin_y })
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Cell at `(|y-origin_y| mod rows, |x-origin_x| mod cols)`
    pub fn get(&self, x: i64, y: i64) -> T {
        let row = ((y - self.origin_y).unsigned_abs() % self.rows as u64) as usize;
        let col = ((x - self.origin_x).unsigned_abs() % self.cols as u64) as usize;
        self.cells[row * self.cols + col]
    }
}

impl Fill {
    pub fn solid(color: u32) -> Fill {
        Fill::Solid(color)
    }
    pub fn pattern(rows: Vec<Vec<u32>>, origin_x: i64, origin_y: i64) -> RasterResult<Fill> {
        Ok(Fill::Pattern(Table::new(rows, origin_x, origin_y)?))
    }
    pub fn hatch(rows: Vec<Vec<bool>>, color1: u32, color2: u32,
                 origin_x: i64, origin_y: i64) -> RasterResult<Fill> {
        Ok(Fill::Hatch { table: Table::new(rows, origin_x, origin_y)?, color1, color2 })
    }
    /// Color of the fill at pixel (`x`,`y`)
    #[inline]
    pub fn color_at(&self, x: i64, y: i64) -> u32 {
        match self {
            Fill::Solid(c) => *c,
            Fill::Pattern(t) => t.get(x, y),
            Fill::Hatch { table, color1, color2 } => {
                if table.get(x, y) { *color1 } else { *color2 }
            }
        }
    }
}

impl From<u32> for Fill {
    fn from(c: u32) -> Fill {
        Fill::Solid(c)
    }
}

//! Polygon Region
//!
//! Scanline intersections of a polygon through an edge table. At the start
//! of a scan session every contour edge overlapping the clip rectangle along
//! the scan axis enters the table, sorted by its lowest scan coordinate.
//! As the scanline advances, edges whose range has been reached move to the
//! active list and edges that are behind the scanline are dropped.
//!
//! An edge spanning `[lo, hi)` along the scan axis crosses every scanline
//! in that half open range. A scanline through a shared vertex therefore
//! counts the vertex once when the contour passes through it, and twice or
//! not at all at a local extremum.

use crate::geometry::{BoundingRectangle, Coordinate, InteriorFillMode, Polygon};
use crate::scan::{clip_intervals, Orientation, Scannable};

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{trace, warn};

/// Edge of the polygon relevant to the current scan session
#[derive(Debug,Copy,Clone)]
struct EdgeTableEntry {
    v1: Coordinate,
    v2: Coordinate,
    /// Contour the edge belongs to
    contour: usize,
    /// Index of the edge within its contour
    index: usize,
    /// Scan coordinate range
    lo: f64,
    hi: f64,
}

impl EdgeTableEntry {
    /// Cross coordinate where the edge meets scanline `pos`
    #[inline]
    fn cross_at(&self, o: Orientation, pos: f64) -> f64 {
        let (s1, c1) = o.axes(&self.v1);
        let (s2, c2) = o.axes(&self.v2);
        c1 + (pos - s1) * (c2 - c1) / (s2 - s1)
    }
    /// +1 when the edge runs towards increasing scan coordinate
    #[inline]
    fn direction(&self, o: Orientation) -> i8 {
        let (s1, _) = o.axes(&self.v1);
        let (s2, _) = o.axes(&self.v2);
        if s2 > s1 { 1 } else { -1 }
    }
}

/// Signed scanline crossing of one contour
#[derive(Debug,Copy,Clone)]
struct Crossing {
    contour: usize,
    at: f64,
    dir: i8,
}

/// Filled polygon
///
/// The polygon itself is shared and immutable; the edge table is private
/// to each instance and rebuilt by `init_scan`.
#[derive(Debug,Clone)]
pub struct Region {
    polygon: Arc<Polygon>,
    bounds: BoundingRectangle,
    orientation: Orientation,
    clip: BoundingRectangle,
    /// Edges sorted by `lo`; `next` is the first one not yet active
    table: Vec<EdgeTableEntry>,
    next: usize,
    active: Vec<EdgeTableEntry>,
    last_pos: f64,
    crossings: Vec<Crossing>,
    scratch: Vec<f64>,
}

impl Region {
    pub fn new(polygon: Polygon) -> Self {
        Self::from_shared(Arc::new(polygon))
    }
    pub fn from_shared(polygon: Arc<Polygon>) -> Self {
        let bounds = polygon.bounds();
        Self {
            polygon,
            bounds,
            orientation: Orientation::Horizontal,
            clip: BoundingRectangle::EMPTY,
            table: vec![],
            next: 0,
            active: vec![],
            last_pos: f64::NEG_INFINITY,
            crossings: vec![],
            scratch: vec![],
        }
    }
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
    pub fn fill_mode(&self) -> InteriorFillMode {
        self.polygon.fill_mode
    }
    /// Number of edges in the current scan session, active or pending
    pub fn edge_count(&self) -> usize {
        self.table.len() - self.next + self.active.len()
    }

    fn advance_to(&mut self, pos: f64) {
        debug_assert!(pos >= self.last_pos,
                      "scanline moved backwards: {} after {}", pos, self.last_pos);
        self.last_pos = pos;
        while self.next < self.table.len() && self.table[self.next].lo <= pos {
            self.active.push(self.table[self.next]);
            self.next += 1;
        }
        self.active.retain(|e| e.hi > pos);
    }

    /// Even-odd intervals
    fn alternate(&mut self, pos: f64, out: &mut Vec<f64>) {
        let o = self.orientation;
        let xs = &mut self.scratch;
        xs.clear();
        xs.extend(self.active.iter().map(|e| e.cross_at(o, pos)));
        xs.sort_by(f64::total_cmp);

        // Equal neighbours enter and leave at the same point
        let mut k = 0;
        let mut i = 0;
        while i < xs.len() {
            if i + 1 < xs.len() && xs[i] == xs[i + 1] {
                i += 2;
            } else {
                xs[k] = xs[i];
                k += 1;
                i += 1;
            }
        }
        xs.truncate(k);

        let (lo, hi) = o.cross_range(&self.clip);
        if xs.len() % 2 == 1 {
            // Resolve the open end with a containment probe at the clip edge
            let (ph, pl) = (o.point(pos, hi), o.point(pos, lo));
            if self.polygon.contains(ph.x, ph.y) {
                xs.push(hi);
            } else if self.polygon.contains(pl.x, pl.y) {
                xs.insert(0, lo);
            } else {
                warn!(pos, crossings = xs.len(), "odd crossing count could not be resolved");
                return;
            }
        }
        clip_intervals(&xs[..], lo, hi, out);
    }

    /// Non-zero intervals per contour, merged as a union
    fn winding(&mut self, pos: f64, out: &mut Vec<f64>) {
        let o = self.orientation;
        self.crossings.clear();
        self.crossings.extend(self.active.iter().map(|e| Crossing {
            contour: e.contour,
            at: e.cross_at(o, pos),
            dir: e.direction(o),
        }));
        self.crossings.sort_by(|a, b| {
            a.contour.cmp(&b.contour).then(a.at.total_cmp(&b.at))
        });

        // Pair crossings per contour; the first crossing of a contour on
        // this scanline decides which direction enters it
        let mut events: Vec<(f64, i32)> = Vec::with_capacity(self.crossings.len());
        let mut stack: Vec<Crossing> = vec![];
        let mut current = None;
        for c in &self.crossings {
            if current != Some(c.contour) {
                if !stack.is_empty() {
                    trace!(pos, open = stack.len(), "unpaired crossings dropped");
                }
                stack.clear();
                current = Some(c.contour);
            }
            match stack.last() {
                Some(top) if top.dir != c.dir => {
                    let start = top.at;
                    stack.pop();
                    events.push((start, 1));
                    events.push((c.at, -1));
                }
                _ => stack.push(*c),
            }
        }

        // Union: begins sort before ends at the same position
        events.sort_by(|a, b| match a.0.total_cmp(&b.0) {
            Ordering::Equal => b.1.cmp(&a.1),
            ord => ord,
        });
        let xs = &mut self.scratch;
        xs.clear();
        let mut count = 0;
        for (at, delta) in events {
            let was = count;
            count += delta;
            if (was == 0) != (count == 0) {
                xs.push(at);
            }
        }
        let (lo, hi) = o.cross_range(&self.clip);
        clip_intervals(&xs[..], lo, hi, out);
    }
}

impl Scannable for Region {
    fn bounds(&self) -> BoundingRectangle {
        self.bounds
    }
    fn init_scan(&mut self, clip: &BoundingRectangle, orientation: Orientation) {
        self.orientation = orientation;
        self.clip = *clip;
        self.table.clear();
        self.active.clear();
        self.next = 0;
        self.last_pos = f64::NEG_INFINITY;

        let (slo, shi) = orientation.scan_range(clip);
        for (ci, contour) in self.polygon.contours.iter().enumerate() {
            let n = contour.len();
            if n < 2 {
                continue;
            }
            for i in 0..n {
                let (v1, v2) = contour.edge(i);
                let (s1, _) = orientation.axes(&v1);
                let (s2, _) = orientation.axes(&v2);
                let (lo, hi) = if s1 < s2 { (s1, s2) } else { (s2, s1) };
                // Edges along the scanline never cross it
                if lo == hi || hi < slo || lo > shi {
                    continue;
                }
                self.table.push(EdgeTableEntry { v1, v2, contour: ci, index: i, lo, hi });
            }
        }
        self.table.sort_by(|a, b| {
            a.lo.total_cmp(&b.lo)
                .then(a.contour.cmp(&b.contour))
                .then(a.index.cmp(&b.index))
        });
        trace!(edges = self.table.len(), ?orientation, "region scan session");
    }
    fn compute_intersections(&mut self, pos: f64, out: &mut Vec<f64>) {
        out.clear();
        self.advance_to(pos);
        if self.active.is_empty() {
            return;
        }
        match self.polygon.fill_mode {
            InteriorFillMode::Alternate => self.alternate(pos, out),
            InteriorFillMode::Winding => self.winding(pos, out),
        }
    }
    fn orientation(&self) -> Orientation {
        self.orientation
    }
    fn fork(&self) -> Region {
        Region::from_shared(Arc::clone(&self.polygon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Contour;

    #[test]
    fn edge_table_keeps_contour_order() {
        let a = Contour::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let b = Contour::from_xy(&[(6.0, 0.0), (6.0, 4.0), (9.0, 4.0), (9.0, 0.0)]);
        let mut region = Region::new(Polygon::new(vec![a, b], InteriorFillMode::Winding));
        region.init_scan(&BoundingRectangle::new(0.0, 0.0, 10.0, 10.0), Orientation::Horizontal);
        let order: Vec<(usize, usize)> = region.table.iter().map(|e| (e.contour, e.index)).collect();
        // Horizontal edges never enter the table
        assert_eq!(order, vec![(0, 1), (0, 3), (1, 0), (1, 2)]);
        assert_eq!(region.edge_count(), 4);
    }
}

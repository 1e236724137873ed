//! Geometry Primitives
//!
//! Coordinates, bounding rectangles, open line paths, closed contours and
//! polygons. These are plain values; nothing here knows about pixels.

/// Point in the plane
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Distance between two points
pub fn len(a: &Coordinate, b: &Coordinate) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Cross product of (p2 - p1) and (p - p2)
///
/// Sign tells which side of the line p1 -> p2 the point p is on
pub fn cross(p1: &Coordinate, p2: &Coordinate, p: &Coordinate) -> f64 {
    (p.x - p2.x) * (p2.y - p1.y) - (p.y - p2.y) * (p2.x - p1.x)
}

/// Axis aligned rectangle
///
/// An empty rectangle has `min > max`; it intersects nothing and joining
/// it with another rectangle returns the other rectangle.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct BoundingRectangle {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for BoundingRectangle {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingRectangle {
    pub const EMPTY: BoundingRectangle = BoundingRectangle {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Create a rectangle, ordering the corners if needed
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }
    pub fn is_empty(&self) -> bool {
        !(self.min_x <= self.max_x && self.min_y <= self.max_y)
    }
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }
    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
    /// Grow the rectangle to include the point
    pub fn expand(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
    /// Smallest rectangle containing both rectangles
    pub fn join(&self, other: &BoundingRectangle) -> BoundingRectangle {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        BoundingRectangle {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
    /// Common part of both rectangles, possibly empty
    pub fn intersection(&self, other: &BoundingRectangle) -> BoundingRectangle {
        let r = BoundingRectangle {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        if r.is_empty() {
            BoundingRectangle::EMPTY
        } else {
            r
        }
    }
    /// Rectangles share at least a boundary point
    pub fn intersects(&self, other: &BoundingRectangle) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

fn bounds_of(pts: &[Coordinate]) -> BoundingRectangle {
    let mut r = BoundingRectangle::EMPTY;
    for p in pts {
        r.expand(p.x, p.y);
    }
    r
}

/// Direction a closed ring is traversed in
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ContourOrientation {
    Clockwise,
    CounterClockwise,
}

/// Closed ring of vertices
///
/// The closing edge from the last vertex back to the first is implied and
/// not stored.
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Contour {
    pub vertices: Vec<Coordinate>,
}

impl Contour {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }
    pub fn from_xy(pts: &[(f64, f64)]) -> Self {
        Self::new(pts.iter().map(|&p| p.into()).collect())
    }
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    pub fn bounds(&self) -> BoundingRectangle {
        bounds_of(&self.vertices)
    }
    /// Edge `i` runs from vertex `i` to vertex `i+1 mod n`
    pub fn edge(&self, i: usize) -> (Coordinate, Coordinate) {
        let n = self.vertices.len();
        (self.vertices[i], self.vertices[(i + 1) % n])
    }
    /// Shoelace area, positive when counter-clockwise with y pointing up
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let (p1, p2) = self.edge(i);
            area += p1.x * p2.y - p1.y * p2.x;
        }
        area / 2.0
    }
    pub fn orientation(&self) -> ContourOrientation {
        if self.signed_area() < 0.0 {
            ContourOrientation::Clockwise
        } else {
            ContourOrientation::CounterClockwise
        }
    }
    pub fn reversed(&self) -> Contour {
        let mut v = self.vertices.clone();
        v.reverse();
        Contour::new(v)
    }
    /// Signed count of edges crossing the ray from (x,y) towards +x
    pub fn winding_number(&self, x: f64, y: f64) -> i32 {
        let n = self.vertices.len();
        let mut wn = 0;
        for i in 0..n {
            let (a, b) = self.edge(i);
            if a.y <= y && b.y > y {
                if cross(&a, &b, &Coordinate::new(x, y)) < 0.0 {
                    wn += 1;
                }
            } else if b.y <= y && a.y > y && cross(&a, &b, &Coordinate::new(x, y)) > 0.0 {
                wn -= 1;
            }
        }
        wn
    }
}

/// Open chain of vertices
#[derive(Debug,Default,Clone,PartialEq)]
pub struct LinePath {
    pub vertices: Vec<Coordinate>,
}

impl LinePath {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }
    pub fn from_xy(pts: &[(f64, f64)]) -> Self {
        Self::new(pts.iter().map(|&p| p.into()).collect())
    }
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    pub fn bounds(&self) -> BoundingRectangle {
        bounds_of(&self.vertices)
    }
    /// Sum of the segment lengths
    pub fn length(&self) -> f64 {
        self.vertices.windows(2).map(|w| len(&w[0], &w[1])).sum()
    }
}

/// Rule deciding which regions of a polygon are inside
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum InteriorFillMode {
    /// Even-odd rule; nested contours produce holes
    Alternate,
    /// Non-zero rule, evaluated per contour and merged as a union
    Winding,
}

impl Default for InteriorFillMode {
    fn default() -> InteriorFillMode {
        InteriorFillMode::Alternate
    }
}

/// Set of contours sharing one fill rule
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Polygon {
    pub contours: Vec<Contour>,
    pub fill_mode: InteriorFillMode,
}

impl Polygon {
    pub fn new(contours: Vec<Contour>, fill_mode: InteriorFillMode) -> Self {
        Self { contours, fill_mode }
    }
    pub fn from_contour(contour: Contour, fill_mode: InteriorFillMode) -> Self {
        Self::new(vec![contour], fill_mode)
    }
    pub fn bounds(&self) -> BoundingRectangle {
        self.contours
            .iter()
            .fold(BoundingRectangle::EMPTY, |r, c| r.join(&c.bounds()))
    }
    /// Total number of vertices over all contours
    pub fn vertex_count(&self) -> usize {
        self.contours.iter().map(|c| c.len()).sum()
    }
    /// Point in polygon test honouring the fill mode
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self.fill_mode {
            InteriorFillMode::Alternate => {
                let crossings: i32 = self
                    .contours
                    .iter()
                    .map(|c| c.winding_number(x, y).abs() % 2)
                    .sum();
                crossings % 2 == 1
            }
            InteriorFillMode::Winding => self.contours.iter().any(|c| c.winding_number(x, y) != 0),
        }
    }
}

/// Any vector feature the renderer accepts
#[derive(Debug,Clone,PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    Path(LinePath),
    Contour(Contour),
    Polygon(Polygon),
}

impl Geometry {
    pub fn bounds(&self) -> BoundingRectangle {
        match self {
            Geometry::Point(p) => BoundingRectangle::new(p.x, p.y, p.x, p.y),
            Geometry::Path(p) => p.bounds(),
            Geometry::Contour(c) => c.bounds(),
            Geometry::Polygon(p) => p.bounds(),
        }
    }
    /// Short name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "point",
            Geometry::Path(_) => "path",
            Geometry::Contour(_) => "contour",
            Geometry::Polygon(_) => "polygon",
        }
    }
}

impl From<LinePath> for Geometry {
    fn from(p: LinePath) -> Self {
        Geometry::Path(p)
    }
}
impl From<Contour> for Geometry {
    fn from(c: Contour) -> Self {
        Geometry::Contour(c)
    }
}
impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}
impl From<Coordinate> for Geometry {
    fn from(p: Coordinate) -> Self {
        Geometry::Point(p)
    }
}

/// Remove repeated vertices
///
/// Repeated vertices are defined with a distance < 1e-6. When `closed`
/// the last vertex is also dropped while it repeats the first.
pub(crate) fn clean_vertices(v: &[Coordinate], closed: bool) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(v.len());
    for p in v {
        match out.last() {
            Some(last) if len(last, p) < 1e-6 => {}
            _ => out.push(*p),
        }
    }
    if closed {
        while out.len() > 1 && len(&out[0], &out[out.len() - 1]) < 1e-6 {
            out.pop();
        }
    }
    out
}

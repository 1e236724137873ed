
use georaster::{alpha, Contour, Fill, InteriorFillMode, Polygon, RasterBuffer, Region,
                RenderingPipeline};

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
    Contour::from_xy(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

fn render(poly: Polygon, w: usize, h: usize) -> RasterBuffer {
    let mut buf = RasterBuffer::new(w, h);
    {
        let mut pipe = RenderingPipeline::new(&mut buf);
        pipe.render(Region::new(poly), Fill::solid(0xFF00_00FF)).unwrap();
    }
    buf
}

fn a(buf: &RasterBuffer, x: i64, y: i64) -> u8 {
    alpha(buf.get_pixel(x, y).unwrap())
}

#[test]
fn t06_overlap() {
    let contours = vec![square(0.0, 0.0, 4.0, 4.0), square(2.0, 2.0, 6.0, 6.0)];

    let alt = render(Polygon::new(contours.clone(), InteriorFillMode::Alternate), 8, 8);
    assert_eq!(a(&alt, 1, 1), 255);
    assert_eq!(a(&alt, 5, 5), 255);
    assert_eq!(a(&alt, 3, 3), 0);

    let wind = render(Polygon::new(contours, InteriorFillMode::Winding), 8, 8);
    assert_eq!(a(&wind, 1, 1), 255);
    assert_eq!(a(&wind, 5, 5), 255);
    assert_eq!(a(&wind, 3, 3), 255);
    assert_eq!(a(&wind, 6, 1), 0);
}

#[test]
fn t06_overlap_opposite_directions() {
    let contours = vec![square(0.0, 0.0, 4.0, 4.0), square(2.0, 2.0, 6.0, 6.0).reversed()];
    let wind = render(Polygon::new(contours, InteriorFillMode::Winding), 8, 8);
    assert_eq!(a(&wind, 3, 3), 255);
    assert_eq!(a(&wind, 1, 3), 255);
    assert_eq!(a(&wind, 4, 5), 255);
}

#[test]
fn t06_disjoint_and_nested() {
    let disjoint = vec![square(1.0, 1.0, 3.0, 3.0), square(5.0, 1.0, 7.0, 3.0)];
    let buf = render(Polygon::new(disjoint, InteriorFillMode::Alternate), 8, 4);
    assert_eq!(a(&buf, 1, 1), 255);
    assert_eq!(a(&buf, 6, 2), 255);
    assert_eq!(a(&buf, 4, 2), 0);
    assert_eq!(a(&buf, 0, 2), 0);

    let nested = vec![square(0.0, 0.0, 8.0, 8.0), square(2.0, 2.0, 6.0, 6.0)];
    let hole = render(Polygon::new(nested.clone(), InteriorFillMode::Alternate), 8, 8);
    assert_eq!(a(&hole, 1, 1), 255);
    assert_eq!(a(&hole, 4, 4), 0);
    assert_eq!(a(&hole, 7, 4), 255);

    // Each contour is filled on its own, inner contours do not cut holes
    let union = render(Polygon::new(nested, InteriorFillMode::Winding), 8, 8);
    assert_eq!(a(&union, 4, 4), 255);
}

#[test]
fn t06_bowtie() {
    let bowtie = Contour::from_xy(&[(0.0, 0.0), (8.0, 8.0), (8.0, 0.0), (0.0, 8.0)]);
    for mode in [InteriorFillMode::Winding, InteriorFillMode::Alternate] {
        let buf = render(Polygon::from_contour(bowtie.clone(), mode), 8, 8);
        assert_eq!(a(&buf, 1, 4), 255, "{:?}", mode);
        assert_eq!(a(&buf, 6, 3), 255, "{:?}", mode);
        assert_eq!(a(&buf, 4, 0), 0, "{:?}", mode);
        assert_eq!(a(&buf, 3, 7), 0, "{:?}", mode);
    }
}

#[test]
fn t06_triangle_edges_are_antialiased() {
    let tri = Contour::from_xy(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
    let buf = render(Polygon::from_contour(tri, InteriorFillMode::Alternate), 10, 10);
    assert_eq!(a(&buf, 1, 1), 255);
    assert_eq!(a(&buf, 9, 9), 0);
    // The diagonal cuts pixel (4,5) in half
    let d = a(&buf, 4, 5);
    assert!(d > 96 && d < 160, "diagonal alpha {}", d);
}

#[test]
fn t06_containment() {
    let nested = vec![square(0.0, 0.0, 8.0, 8.0), square(2.0, 2.0, 6.0, 6.0)];
    let alt = Polygon::new(nested.clone(), InteriorFillMode::Alternate);
    assert!(alt.contains(1.0, 1.0));
    assert!(!alt.contains(4.0, 4.0));
    let wind = Polygon::new(nested, InteriorFillMode::Winding);
    assert!(wind.contains(4.0, 4.0));
    assert!(!wind.contains(9.0, 4.0));
}

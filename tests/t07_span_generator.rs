
use georaster::{alpha, BoundingRectangle, Circle, Contour, Coordinate, Fill, InteriorFillMode,
                Orientation, PixelSpan, Polygon, Region, SpanGenerator};

fn two_squares() -> Region {
    let a = Contour::from_xy(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
    let b = Contour::from_xy(&[(6.0, 1.0), (8.0, 1.0), (8.0, 3.0), (6.0, 3.0)]);
    Region::new(Polygon::new(vec![a, b], InteriorFillMode::Alternate))
}

#[test]
fn t07_defaults_and_validation() {
    let mut gen = SpanGenerator::new();
    assert_eq!(gen.subpixel_level(), 4);
    assert_eq!(gen.antialiasing_gamma(), 1.0);
    assert!(gen.set_subpixel_level(0).is_err());
    assert_eq!(gen.subpixel_level(), 4);
    assert!(gen.set_antialiasing_gamma(-1.0).is_err());
    assert!(gen.set_antialiasing_gamma(f64::INFINITY).is_err());
    assert_eq!(gen.antialiasing_gamma(), 1.0);
    gen.set_subpixel_level(16).unwrap();
    assert_eq!(gen.coverage_alpha(16.0), 255);
    assert_eq!(gen.coverage_alpha(0.0), 0);
}

#[test]
fn t07_spans_split_at_uncovered_pixels() {
    let gen = SpanGenerator::new();
    let clip = BoundingRectangle::new(0.0, 0.0, 10.0, 10.0);
    let mut spans = vec![];
    gen.generate(&mut two_squares(), &Fill::solid(0xFF11_2233), &clip,
                 Orientation::Horizontal, &mut spans);

    let expected: Vec<PixelSpan> = [(1, 1), (6, 1), (1, 2), (6, 2)].iter()
        .map(|&(x, y)| PixelSpan::new(Orientation::Horizontal, x, y, vec![0xFF11_2233; 2]))
        .collect();
    assert_eq!(spans, expected);
}

#[test]
fn t07_vertical_spans() {
    let gen = SpanGenerator::new();
    let clip = BoundingRectangle::new(0.0, 0.0, 10.0, 10.0);
    let mut spans = vec![];
    gen.generate(&mut two_squares(), &Fill::solid(0xFF00_0000), &clip,
                 Orientation::Vertical, &mut spans);
    // Columns 1, 2, 6 and 7, each covering rows 1 and 2
    assert_eq!(spans.len(), 4);
    for s in &spans {
        assert_eq!(s.orientation, Orientation::Vertical);
        assert_eq!(s.y, 1);
        assert_eq!(s.len(), 2);
    }
    let xs: Vec<i64> = spans.iter().map(|s| s.x).collect();
    assert_eq!(xs, vec![1, 2, 6, 7]);
    let px: Vec<(i64, i64, u32)> = spans[0].pixels().collect();
    assert_eq!(px, vec![(1, 1, 0xFF00_0000), (1, 2, 0xFF00_0000)]);
}

#[test]
fn t07_partial_coverage() {
    let gen = SpanGenerator::new();
    // Half a pixel wide along x, two rows high
    let rect = Contour::from_xy(&[(2.5, 0.0), (4.0, 0.0), (4.0, 2.0), (2.5, 2.0)]);
    let mut region = Region::new(Polygon::from_contour(rect, InteriorFillMode::Alternate));
    let clip = BoundingRectangle::new(0.0, 0.0, 8.0, 8.0);
    let mut spans = vec![];
    gen.generate(&mut region, &Fill::solid(0xFFFF_FFFF), &clip, Orientation::Horizontal, &mut spans);
    assert_eq!(spans.len(), 2);
    for s in &spans {
        assert_eq!(s.x, 2);
        let alphas: Vec<u8> = s.colors.iter().map(|&c| alpha(c)).collect();
        assert_eq!(alphas, vec![128, 255]);
    }
}

#[test]
fn t07_gamma_changes_edges_only() {
    let mut gen = SpanGenerator::new();
    gen.set_antialiasing_gamma(2.0).unwrap();
    let rect = Contour::from_xy(&[(2.5, 0.0), (4.0, 0.0), (4.0, 1.0), (2.5, 1.0)]);
    let mut region = Region::new(Polygon::from_contour(rect, InteriorFillMode::Alternate));
    let clip = BoundingRectangle::new(0.0, 0.0, 8.0, 8.0);
    let mut spans = vec![];
    gen.generate(&mut region, &Fill::solid(0xFF00_0000), &clip, Orientation::Horizontal, &mut spans);
    let alphas: Vec<u8> = spans[0].colors.iter().map(|&c| alpha(c)).collect();
    assert_eq!(alphas, vec![64, 255]);
}

#[test]
fn t07_fill_alpha_scales_coverage() {
    let gen = SpanGenerator::new();
    let rect = Contour::from_xy(&[(2.5, 0.0), (4.0, 0.0), (4.0, 1.0), (2.5, 1.0)]);
    let mut region = Region::new(Polygon::from_contour(rect, InteriorFillMode::Alternate));
    let clip = BoundingRectangle::new(0.0, 0.0, 8.0, 8.0);
    let mut spans = vec![];
    gen.generate(&mut region, &Fill::solid(0x8000_00FF), &clip, Orientation::Horizontal, &mut spans);
    assert_eq!(spans[0].colors, vec![0x4000_00FF, 0x8000_00FF]);

    // No alpha at all counts as opaque
    spans.clear();
    let mut region = region.clone();
    gen.generate(&mut region, &Fill::solid(0x0000_00FF), &clip, Orientation::Horizontal, &mut spans);
    assert_eq!(spans[0].colors, vec![0x8000_00FF, 0xFF00_00FF]);
}

#[test]
fn t07_clip_window() {
    let gen = SpanGenerator::new();
    let clip = BoundingRectangle::new(4.0, 4.0, 8.0, 8.0);
    let mut spans = vec![];
    let mut disc = Circle::new(Coordinate::new(4.0, 4.0), 3.0);
    gen.generate(&mut disc, &Fill::solid(0xFF00_0000), &clip, Orientation::Horizontal, &mut spans);
    assert!(!spans.is_empty());
    for s in &spans {
        for (x, y, _) in s.pixels() {
            assert!((4..8).contains(&x) && (4..8).contains(&y), "({},{})", x, y);
        }
    }
    // Nothing to draw outside the window
    spans.clear();
    let mut far = Circle::new(Coordinate::new(20.0, 20.0), 3.0);
    gen.generate(&mut far, &Fill::solid(0xFF00_0000), &clip, Orientation::Horizontal, &mut spans);
    assert!(spans.is_empty());
}

#[test]
fn t07_fractional_clip_edge() {
    let gen = SpanGenerator::new();
    let square = Contour::from_xy(&[(0.0, 0.0), (8.0, 0.0), (8.0, 8.0), (0.0, 8.0)]);
    let region = Region::new(Polygon::from_contour(square, InteriorFillMode::Alternate));

    // Only the lower half of row 2 lies inside the clip
    let clip = BoundingRectangle::new(0.0, 2.5, 8.0, 8.0);
    let mut spans = vec![];
    gen.generate(&mut region.clone(), &Fill::solid(0xFF00_0000), &clip, Orientation::Horizontal, &mut spans);
    assert_eq!(spans.len(), 6);
    assert_eq!((spans[0].x, spans[0].y, spans[0].len()), (0, 2, 8));
    assert!(spans[0].colors.iter().all(|&c| alpha(c) == 128));
    assert!(spans[1].colors.iter().all(|&c| alpha(c) == 255));

    let clip = BoundingRectangle::new(2.5, 0.0, 8.0, 8.0);
    spans.clear();
    gen.generate(&mut region.clone(), &Fill::solid(0xFF00_0000), &clip, Orientation::Vertical, &mut spans);
    assert_eq!(spans.len(), 6);
    assert_eq!((spans[0].x, spans[0].y), (2, 0));
    assert!(spans[0].colors.iter().all(|&c| alpha(c) == 128));
}

#[test]
fn t07_hatch_fill() {
    let gen = SpanGenerator::new();
    let rect = Contour::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 1.0), (0.0, 1.0)]);
    let mut region = Region::new(Polygon::from_contour(rect, InteriorFillMode::Alternate));
    let clip = BoundingRectangle::new(0.0, 0.0, 8.0, 8.0);
    let fill = Fill::hatch(vec![vec![true, false]], 0xFFFF_0000, 0xFF00_00FF, 0, 0).unwrap();
    let mut spans = vec![];
    gen.generate(&mut region, &fill, &clip, Orientation::Horizontal, &mut spans);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].colors, vec![0xFFFF_0000, 0xFF00_00FF, 0xFFFF_0000, 0xFF00_00FF]);
}


use georaster::{BoundingRectangle, Orientation, PixelSpan, RasterBuffer};

#[test]
fn t01_raster_buffer() {
    let mut buf = RasterBuffer::new(4, 3);
    assert_eq!(buf.len(), 12);
    assert_eq!(buf.bounds(), BoundingRectangle::new(0.0, 0.0, 4.0, 3.0));
    assert!(buf.data.iter().all(|&v| v == 0));

    buf.clear(0xFFFF_FFFF);
    assert_eq!(buf.get_pixel(3, 2), Some(0xFFFF_FFFF));

    buf.set_pixel(1, 2, 0xFF00_00FF);
    assert_eq!(buf.get_pixel(1, 2), Some(0xFF00_00FF));
    assert_eq!(buf[(1, 2)], 0xFF00_00FF);
    assert_eq!(buf.data[2 * 4 + 1], 0xFF00_00FF);

    // Outside the buffer
    buf.set_pixel(-1, 0, 0);
    buf.set_pixel(4, 0, 0);
    buf.blend_pixel(0, 3, 0);
    assert_eq!(buf.get_pixel(-1, 0), None);
    assert_eq!(buf.get_pixel(0, 3), None);
    assert!(buf.data.iter().filter(|&&v| v == 0).count() == 0);
}

#[test]
fn t01_spans_are_clipped() {
    let mut buf = RasterBuffer::new(4, 3);
    let red = 0xFFFF_0000;
    // Hangs off both sides of row 1
    buf.set_span(&PixelSpan::new(Orientation::Horizontal, -2, 1, vec![red; 8]));
    for x in 0..4 {
        assert_eq!(buf.get_pixel(x, 1), Some(red));
        assert_eq!(buf.get_pixel(x, 0), Some(0));
    }
    // Column 3, starting above the buffer
    let blue = 0xFF00_00FF;
    buf.blend_span(&PixelSpan::new(Orientation::Vertical, 3, -1, vec![blue; 3]));
    assert_eq!(buf.get_pixel(3, 0), Some(blue));
    assert_eq!(buf.get_pixel(3, 1), Some(blue));
    assert_eq!(buf.get_pixel(3, 2), Some(0));

    // Entirely outside
    buf.set_span(&PixelSpan::new(Orientation::Horizontal, 0, 5, vec![blue; 3]));
    buf.set_span(&PixelSpan::new(Orientation::Vertical, 9, 0, vec![blue; 3]));
    assert_eq!(buf.data.iter().filter(|&&v| v == blue).count(), 2);
}

#[test]
fn t01_opaque_blend_matches_set() {
    let mut a = RasterBuffer::new(6, 6);
    a.clear(0x8012_3456);
    let mut b = a.clone();
    let colors = vec![0xFFAA_0000, 0xFF00_BB00, 0xFF00_00CC, 0xFF10_2030];
    for s in [PixelSpan::new(Orientation::Horizontal, 1, 2, colors.clone()),
              PixelSpan::new(Orientation::Vertical, 4, 3, colors.clone())] {
        a.set_span(&s);
        b.blend_span(&s);
    }
    assert_eq!(a, b);

    // Transparent spans leave the buffer alone
    let before = b.clone();
    b.blend_span(&PixelSpan::new(Orientation::Horizontal, 0, 0, vec![0x00FF_FFFF; 6]));
    assert_eq!(b, before);
}

#[test]
fn t01_split_grid() {
    let mut buf = RasterBuffer::new(5, 3);
    {
        let mut bands = buf.split_grid_mut(2, 2);
        assert_eq!(bands.len(), 4);
        assert_eq!(bands[0].bounds(), BoundingRectangle::new(0.0, 0.0, 2.0, 1.0));
        assert_eq!(bands[1].bounds(), BoundingRectangle::new(2.0, 0.0, 5.0, 1.0));
        assert_eq!(bands[2].bounds(), BoundingRectangle::new(0.0, 1.0, 2.0, 3.0));
        assert_eq!(bands[3].bounds(), BoundingRectangle::new(2.0, 1.0, 5.0, 3.0));

        // The same row handed to every band, each keeps its own part
        let span = PixelSpan::new(Orientation::Horizontal, 0, 2, vec![1, 2, 3, 4, 5]);
        for band in bands.iter_mut() {
            band.set_span(&span);
        }
        let col = PixelSpan::new(Orientation::Vertical, 4, 0, vec![7, 8, 9]);
        for band in bands.iter_mut() {
            band.set_span(&col);
        }
    }
    assert_eq!(&buf.data[10..15], &[1, 2, 3, 4, 9]);
    assert_eq!(buf.get_pixel(4, 0), Some(7));
    assert_eq!(buf.get_pixel(4, 1), Some(8));
    assert_eq!(buf.get_pixel(3, 1), Some(0));
}

#[test]
fn t01_png_round_trip() {
    let mut buf = RasterBuffer::new(3, 2);
    buf.set_pixel(0, 0, 0xFFFF_0000);
    buf.set_pixel(2, 1, 0x8000_FF00);

    let img = buf.to_image();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);

    let path = std::env::temp_dir().join(format!("georaster_t01_{}.png", std::process::id()));
    buf.to_file(&path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    let _ = std::fs::remove_file(&path);

    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(back.get_pixel(2, 1).0, [0, 255, 0, 128]);
    assert_eq!(back.get_pixel(1, 0).0, [0, 0, 0, 0]);
}

#[test]
fn t01_unknown_extension_is_an_error() {
    let buf = RasterBuffer::new(2, 2);
    let path = std::env::temp_dir().join("georaster_t01.not-an-image-format");
    let err = buf.to_file(&path).unwrap_err();
    assert!(matches!(err, georaster::RasterError::Image(_)));
}

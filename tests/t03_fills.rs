
use georaster::{Fill, RasterError};

#[test]
fn t03_solid() {
    let f = Fill::solid(0xFF11_2233);
    assert_eq!(f.color_at(-100, 7), 0xFF11_2233);
    assert_eq!(Fill::from(5u32), Fill::Solid(5));
}

#[test]
fn t03_pattern_repeats_from_origin() {
    let f = Fill::pattern(vec![vec![1, 2, 3],
                               vec![4, 5, 6]], 0, 0).unwrap();
    assert_eq!(f.color_at(0, 0), 1);
    assert_eq!(f.color_at(2, 1), 6);
    assert_eq!(f.color_at(4, 0), 2);
    assert_eq!(f.color_at(3, 3), 4);

    // Origin shifts the table
    let g = Fill::pattern(vec![vec![1, 2, 3],
                               vec![4, 5, 6]], 1, 1).unwrap();
    assert_eq!(g.color_at(1, 1), 1);
    assert_eq!(g.color_at(2, 1), 2);
    assert_eq!(g.color_at(1, 2), 4);
    // Distance from the origin is taken as absolute
    assert_eq!(g.color_at(0, 1), 2);
}

#[test]
fn t03_hatch() {
    let f = Fill::hatch(vec![vec![true, false, false]], 0xFF00_0000, 0xFFFF_FFFF, 0, 0).unwrap();
    let row: Vec<u32> = (0..6).map(|x| f.color_at(x, 9)).collect();
    assert_eq!(row, vec![0xFF00_0000, 0xFFFF_FFFF, 0xFFFF_FFFF,
                         0xFF00_0000, 0xFFFF_FFFF, 0xFFFF_FFFF]);
}

#[test]
fn t03_bad_tables() {
    let err = Fill::pattern(vec![], 0, 0).unwrap_err();
    assert!(matches!(err, RasterError::Config(_)));
    let err = Fill::pattern(vec![vec![]], 0, 0).unwrap_err();
    assert!(matches!(err, RasterError::Config(_)));
    let err = Fill::hatch(vec![vec![true, false], vec![true]], 0, 0, 0, 0).unwrap_err();
    assert!(matches!(err, RasterError::Config(_)));
    assert!(err.is_precondition());
}

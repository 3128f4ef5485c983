pub const TOLERANCE: f64 = 1e-9;

pub fn assert_float_is_close(x: f64, y: f64) {
    assert!((x - y).abs() < TOLERANCE, "{} {}", x, y)
}

pub fn assert_all_close(xs: &[f64], ys: &[f64]) {
    assert_eq!(xs.len(), ys.len());
    for (x, y) in xs.iter().zip(ys) {
        assert_float_is_close(*x, *y);
    }
}

// grid.rs - Temperature grids for scan drivers

/// `n` evenly spaced temperatures from `lo` to `hi` inclusive.
pub fn linear(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    assert!(n >= 1, "grid needs at least one point");
    if n == 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

/// `n` log-spaced temperatures from `lo` to `hi` inclusive. Resolves the
/// low-temperature end of a scan much more finely than a linear grid, which
/// is where the interesting structure sits.
pub fn geometric(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    assert!(n >= 1, "grid needs at least one point");
    assert!(lo > 0.0 && hi > 0.0, "geometric grid needs positive bounds");
    if n == 1 {
        return vec![lo];
    }
    let ratio = (hi / lo).powf(1.0 / (n - 1) as f64);
    (0..n).map(|i| lo * ratio.powi(i as i32)).collect()
}

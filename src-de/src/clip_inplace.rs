use ndarray::Array1;

/// Boundary repair: clamp every component of `x` into its configured range.
pub(crate) fn clip_inplace(x: &mut Array1<f64>, lower: &Array1<f64>, upper: &Array1<f64>) {
    for i in 0..x.len() {
        if x[i] < lower[i] {
            x[i] = lower[i];
        }
        if x[i] > upper[i] {
            x[i] = upper[i];
        }
    }
}

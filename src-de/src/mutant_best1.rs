use ndarray::{Array1, Array2};

/// v = b + F * (x_r1 - x_r2)
pub(crate) fn mutant_best1(
    best: &Array1<f64>,
    pop: &Array2<f64>,
    donors: &[usize],
    f: f64,
) -> Array1<f64> {
    let (r1, r2) = (donors[0], donors[1]);
    best + &((pop.row(r1).to_owned() - pop.row(r2).to_owned()) * f)
}

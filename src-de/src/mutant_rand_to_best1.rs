use ndarray::{Array1, Array2};

/// v = x_r2 + F * (x_r3 - x_r4) + F2 * (b - x_r1)
pub(crate) fn mutant_rand_to_best1(
    best: &Array1<f64>,
    pop: &Array2<f64>,
    donors: &[usize],
    f: f64,
    f2: f64,
) -> Array1<f64> {
    let (r1, r2, r3, r4) = (donors[0], donors[1], donors[2], donors[3]);
    pop.row(r2).to_owned()
        + &((pop.row(r3).to_owned() - pop.row(r4).to_owned()) * f)
        + &((best - &pop.row(r1).to_owned()) * f2)
}

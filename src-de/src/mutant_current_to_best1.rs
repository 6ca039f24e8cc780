use ndarray::{Array1, Array2};

/// v = x_p + F * (x_r1 - x_r2) + F2 * (b - x_p)
pub(crate) fn mutant_current_to_best1(
    p: usize,
    best: &Array1<f64>,
    pop: &Array2<f64>,
    donors: &[usize],
    f: f64,
    f2: f64,
) -> Array1<f64> {
    let (r1, r2) = (donors[0], donors[1]);
    let current = pop.row(p).to_owned();
    &current
        + &((pop.row(r1).to_owned() - pop.row(r2).to_owned()) * f)
        + &((best - &current) * f2)
}

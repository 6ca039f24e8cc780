use ndarray::{Array1, Array2};

/// v = x_p + F * (x_r2 - x_r3) + F2 * (x_r1 - x_p)
pub(crate) fn mutant_current_to_rand1(
    p: usize,
    pop: &Array2<f64>,
    donors: &[usize],
    f: f64,
    f2: f64,
) -> Array1<f64> {
    let (r1, r2, r3) = (donors[0], donors[1], donors[2]);
    let current = pop.row(p).to_owned();
    &current
        + &((pop.row(r2).to_owned() - pop.row(r3).to_owned()) * f)
        + &((pop.row(r1).to_owned() - &current) * f2)
}

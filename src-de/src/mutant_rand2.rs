use ndarray::{Array1, Array2};

/// v = x_r1 + F * (x_r2 - x_r3 + x_r4 - x_r5)
pub(crate) fn mutant_rand2(pop: &Array2<f64>, donors: &[usize], f: f64) -> Array1<f64> {
    let (r1, r2, r3, r4, r5) = (donors[0], donors[1], donors[2], donors[3], donors[4]);
    pop.row(r1).to_owned()
        + &((pop.row(r2).to_owned() - pop.row(r3).to_owned() + pop.row(r4).to_owned()
            - pop.row(r5).to_owned())
            * f)
}

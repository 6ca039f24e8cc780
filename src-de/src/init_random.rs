use ndarray::{Array1, Array2};
use rand::Rng;

/// Sample an initial population uniformly inside `[lower, upper)` per
/// component. Rows are individuals.
pub(crate) fn init_random<R: Rng + ?Sized>(
    n: usize,
    npop: usize,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    rng: &mut R,
) -> Array2<f64> {
    let mut pop = Array2::<f64>::zeros((npop, n));
    for i in 0..npop {
        for j in 0..n {
            pop[[i, j]] = lower[j] + rng.random::<f64>() * (upper[j] - lower[j]);
        }
    }
    pop
}

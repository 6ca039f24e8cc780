use ndarray::{Array1, ArrayView1};
use rand::Rng;

/// Exponential crossover.
///
/// Copies a contiguous (wrapping) run of mutant components starting at a
/// random dimension j*; the run continues while the crossover draw succeeds
/// and fewer than D components have been copied. j* itself is always copied.
pub(crate) fn exponential_crossover<R: Rng + ?Sized>(
    parent: ArrayView1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let n = parent.len();
    let mut j = rng.random_range(0..n);
    let mut trial = parent.to_owned();
    let mut copied = 0usize;
    loop {
        trial[j] = mutant[j];
        copied += 1;
        j = (j + 1) % n;
        if copied >= n || rng.random::<f64>() > cr {
            break;
        }
    }
    trial
}

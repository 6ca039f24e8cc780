use ndarray::{Array1, ArrayView1};
use rand::Rng;

/// Binomial (uniform) crossover.
///
/// One dimension j* is drawn per call and always taken from the mutant, so
/// the trial differs from the parent in at least one component.
pub(crate) fn binomial_crossover<R: Rng + ?Sized>(
    parent: ArrayView1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let n = parent.len();
    let forced = rng.random_range(0..n);
    let mut trial = parent.to_owned();
    for j in 0..n {
        if rng.random::<f64>() <= cr || j == forced {
            trial[j] = mutant[j];
        }
    }
    trial
}

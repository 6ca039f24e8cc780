use crate::{DEConfig, DEError, DEReport, DifferentialEvolution, ObjectiveError};
use ndarray::Array1;

/// Convenience function mirroring SciPy's API shape (simplified):
/// - `func`: objective function mapping x -> f(x)
/// - `bounds`: vector of (lower, upper) pairs
/// - `config`: DE configuration
///
/// For objectives that can fail, build a `DifferentialEvolution` directly
/// with a `Result`-returning closure.
pub fn differential_evolution<F>(
	func: &F,
	bounds: &[(f64, f64)],
	config: DEConfig,
) -> Result<DEReport, DEError>
where
	F: Fn(&Array1<f64>) -> f64,
{
	let n = bounds.len();
	let mut lower = Array1::<f64>::zeros(n);
	let mut upper = Array1::<f64>::zeros(n);
	for (i, (lo, hi)) in bounds.iter().enumerate() {
		lower[i] = *lo;
		upper[i] = *hi;
	}
	let wrapped = |x: &Array1<f64>| -> Result<f64, ObjectiveError> { Ok(func(x)) };
	let mut de = DifferentialEvolution::new(&wrapped, lower, upper);
	*de.config_mut() = config;
	de.solve()
}

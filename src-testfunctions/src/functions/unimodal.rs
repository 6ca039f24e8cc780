//! Unimodal test functions
//!
//! Single-optimum functions used to test the exploitation behavior and
//! convergence speed of optimization algorithms.

use ndarray::Array1;

/// Sphere function - the simplest bowl shape
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi.powi(2)).sum()
}

/// Convex quadratic bowl, kept separate from sphere for tests that want a
/// generic "easy" objective
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5, 5]
pub fn quadratic(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}

/// Rosenbrock function - narrow curved valley
/// Global minimum: f(x) = 0 at x = (1, 1, ..., 1)
/// Bounds: x_i in [-2.048, 2.048]
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    let n = x.len();
    let mut sum = 0.0;
    for i in 0..n - 1 {
        sum += 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (1.0 - x[i]).powi(2);
    }
    sum
}

//! Optimization test functions library
//!
//! A small collection of benchmark functions for exercising and validating
//! the optimizers, organized by category:
//!
//! - **Unimodal**: single global optimum (sphere, quadratic, rosenbrock)
//! - **Multimodal**: many local minima (rastrigin, ackley, griewank, schwefel)
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use globopt_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![0.0, 0.0]);
//! assert_eq!(sphere(&x), 0.0);
//!
//! let bounds = get_function_bounds_vec("sphere", (-5.0, 5.0));
//! assert_eq!(bounds.len(), 2);
//! ```

use ndarray::Array1;
use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Metadata for a test function: bounds, known minima, shape
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
    /// Bounds for each dimension (min, max)
    pub bounds: Vec<(f64, f64)>,
    /// Global minima locations and values
    pub global_minima: Vec<(Vec<f64>, f64)>,
    /// Whether the function is multimodal
    pub multimodal: bool,
    /// Typical dimension(s) for the function
    pub dimensions: Vec<usize>,
}

/// Create a bounds vector with the same (lower, upper) pair in every dimension
pub fn create_bounds(n: usize, lower: f64, upper: f64) -> Vec<(f64, f64)> {
    vec![(lower, upper); n]
}

/// Get metadata for all available test functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let mut metadata = HashMap::new();

    metadata.insert(
        "sphere".to_string(),
        FunctionMetadata {
            name: "sphere".to_string(),
            bounds: vec![(-5.12, 5.12); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: false,
            dimensions: vec![2, 5, 10],
        },
    );

    metadata.insert(
        "quadratic".to_string(),
        FunctionMetadata {
            name: "quadratic".to_string(),
            bounds: vec![(-5.0, 5.0); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: false,
            dimensions: vec![2, 5, 10],
        },
    );

    metadata.insert(
        "rosenbrock".to_string(),
        FunctionMetadata {
            name: "rosenbrock".to_string(),
            bounds: vec![(-2.048, 2.048); 2],
            global_minima: vec![(vec![1.0, 1.0], 0.0)],
            multimodal: false,
            dimensions: vec![2, 5, 10],
        },
    );

    metadata.insert(
        "rastrigin".to_string(),
        FunctionMetadata {
            name: "rastrigin".to_string(),
            bounds: vec![(-5.12, 5.12); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: true,
            dimensions: vec![2, 5, 10],
        },
    );

    metadata.insert(
        "ackley".to_string(),
        FunctionMetadata {
            name: "ackley".to_string(),
            bounds: vec![(-32.768, 32.768); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: true,
            dimensions: vec![2, 5, 10],
        },
    );

    metadata.insert(
        "griewank".to_string(),
        FunctionMetadata {
            name: "griewank".to_string(),
            bounds: vec![(-600.0, 600.0); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            multimodal: true,
            dimensions: vec![2, 5, 10],
        },
    );

    metadata.insert(
        "schwefel".to_string(),
        FunctionMetadata {
            name: "schwefel".to_string(),
            bounds: vec![(-500.0, 500.0); 2],
            global_minima: vec![(vec![420.9687, 420.9687], 0.0)],
            multimodal: true,
            dimensions: vec![2, 5, 10],
        },
    );

    metadata
}

/// Get the bounds for a named function, or `None` if unknown
pub fn get_function_bounds(name: &str) -> Option<Vec<(f64, f64)>> {
    get_function_metadata().get(name).map(|m| m.bounds.clone())
}

/// Get 2D bounds for a named function, with a fallback pair for unknown names
pub fn get_function_bounds_vec(name: &str, fallback: (f64, f64)) -> Vec<(f64, f64)> {
    get_function_bounds(name).unwrap_or_else(|| vec![fallback; 2])
}

/// Evaluate a named function at a point, or `None` if unknown
pub fn evaluate_by_name(name: &str, x: &Array1<f64>) -> Option<f64> {
    match name {
        "sphere" => Some(sphere(x)),
        "quadratic" => Some(quadratic(x)),
        "rosenbrock" => Some(rosenbrock(x)),
        "rastrigin" => Some(rastrigin(x)),
        "ackley" => Some(ackley(x)),
        "griewank" => Some(griewank(x)),
        "schwefel" => Some(schwefel(x)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_minima_evaluate_to_known_values() {
        for (name, meta) in get_function_metadata() {
            for (location, value) in &meta.global_minima {
                let x = Array1::from(location.clone());
                let f = evaluate_by_name(&name, &x).expect("registered function");
                assert!(
                    (f - value).abs() < 1e-2,
                    "{} at {:?} should be {} but was {}",
                    name,
                    location,
                    value,
                    f
                );
            }
        }
    }

    #[test]
    fn test_bounds_helpers() {
        assert_eq!(create_bounds(4, -1.0, 1.0), vec![(-1.0, 1.0); 4]);
        assert_eq!(get_function_bounds("ackley").unwrap()[0], (-32.768, 32.768));
        assert_eq!(get_function_bounds_vec("no_such_function", (-2.0, 2.0)), vec![(-2.0, 2.0); 2]);
    }
}

//! Fail-fast configuration validation: every configuration defect must be
//! reported before the objective is evaluated even once.

use std::cell::Cell;

use globopt_de::{
    DEConfigBuilder, DEError, DifferentialEvolution, Mutation, ObjectiveError, Strategy,
    differential_evolution,
};
use ndarray::Array1;

fn run_counted(
    bounds: &[(f64, f64)],
    config: globopt_de::DEConfig,
) -> (Result<globopt_de::DEReport, DEError>, usize) {
    let calls = Cell::new(0usize);
    let objective = |x: &Array1<f64>| -> f64 {
        calls.set(calls.get() + 1);
        x.iter().map(|&xi| xi * xi).sum()
    };
    let result = differential_evolution(&objective, bounds, config);
    (result, calls.get())
}

#[test]
fn test_empty_bounds_fail_fast() {
    let (result, calls) = run_counted(&[], DEConfigBuilder::new().build());
    assert!(matches!(result, Err(DEError::EmptyBounds)));
    assert_eq!(calls, 0);
}

#[test]
fn test_inverted_bound_fails_fast() {
    let bounds = vec![(-1.0, 1.0), (2.0, -2.0)];
    let (result, calls) = run_counted(&bounds, DEConfigBuilder::new().build());
    assert!(matches!(result, Err(DEError::InvalidBound { index: 1, .. })));
    assert_eq!(calls, 0);
}

#[test]
fn test_mismatched_bound_arrays_fail_fast() {
    let objective = |_x: &Array1<f64>| -> Result<f64, ObjectiveError> { Ok(0.0) };
    let lower = Array1::from(vec![-1.0, -1.0]);
    let upper = Array1::from(vec![1.0]);
    let mut de = DifferentialEvolution::new(&objective, lower, upper);
    assert!(matches!(de.solve(), Err(DEError::BoundsMismatch { lower: 2, upper: 1 })));
}

#[test]
fn test_zero_popsize_fails_fast() {
    let bounds = vec![(-1.0, 1.0)];
    let (result, calls) = run_counted(&bounds, DEConfigBuilder::new().popsize(0).build());
    assert!(matches!(result, Err(DEError::InvalidPopulationSize)));
    assert_eq!(calls, 0);
}

#[test]
fn test_zero_generations_fails_fast() {
    let bounds = vec![(-1.0, 1.0)];
    let (result, calls) = run_counted(&bounds, DEConfigBuilder::new().generations(0).build());
    assert!(matches!(result, Err(DEError::InvalidGenerations)));
    assert_eq!(calls, 0);
}

#[test]
fn test_crossover_probability_outside_unit_interval_fails_fast() {
    let bounds = vec![(-1.0, 1.0)];
    for bad in [-0.1, 1.5, f64::NAN] {
        let (result, calls) =
            run_counted(&bounds, DEConfigBuilder::new().recombination(bad).build());
        assert!(matches!(result, Err(DEError::InvalidRecombination { .. })));
        assert_eq!(calls, 0);
    }
}

#[test]
fn test_invalid_dithering_range_fails_fast() {
    let bounds = vec![(-1.0, 1.0)];
    let config =
        DEConfigBuilder::new().mutation(Mutation::Range { min: 0.9, max: 0.9 }).build();
    let (result, calls) = run_counted(&bounds, config);
    assert!(matches!(result, Err(DEError::InvalidMutation { .. })));
    assert_eq!(calls, 0);
}

#[test]
fn test_single_member_population_cannot_supply_donors() {
    // N=1 with any k>=2 strategy must fail deterministically instead of
    // silently producing a degenerate mutant.
    let bounds = vec![(-1.0, 1.0), (-1.0, 1.0)];
    let config = DEConfigBuilder::new().popsize(1).strategy(Strategy::Rand1Bin).build();
    let (result, calls) = run_counted(&bounds, config);
    match result {
        Err(DEError::InsufficientDonors { required, available, .. }) => {
            assert_eq!(required, 3);
            assert_eq!(available, 1);
        }
        other => panic!("expected InsufficientDonors, got {:?}", other.map(|r| r.fun)),
    }
    assert_eq!(calls, 0);
}

#[test]
fn test_exclude_self_raises_the_donor_requirement() {
    // popsize == k is fine with self-donation but one short without it.
    let bounds = vec![(-1.0, 1.0)];
    let ok = DEConfigBuilder::new()
        .popsize(3)
        .generations(5)
        .strategy(Strategy::Rand1Bin)
        .seed(1)
        .build();
    assert!(run_counted(&bounds, ok).0.is_ok());

    let short = DEConfigBuilder::new()
        .popsize(3)
        .generations(5)
        .strategy(Strategy::Rand1Bin)
        .exclude_self(true)
        .build();
    let (result, calls) = run_counted(&bounds, short);
    assert!(matches!(result, Err(DEError::InsufficientDonors { .. })));
    assert_eq!(calls, 0);
}

#[test]
fn test_rand2_needs_five_donors() {
    let bounds = vec![(-1.0, 1.0)];
    let config = DEConfigBuilder::new().popsize(4).strategy(Strategy::Rand2Bin).build();
    let (result, calls) = run_counted(&bounds, config);
    assert!(matches!(
        result,
        Err(DEError::InsufficientDonors { required: 5, available: 4, .. })
    ));
    assert_eq!(calls, 0);
}

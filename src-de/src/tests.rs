use std::sync::{Arc, Mutex};

use ndarray::Array1;

use crate::{
    DEConfigBuilder, DEIntermediate, OptimizationRecorder, RunMetadata,
    differential_evolution, run_recorded_differential_evolution,
};
use globopt_testfunctions::quadratic;

#[test]
fn test_optimization_recorder() {
    let recorder = OptimizationRecorder::new("test_function".to_string());

    let mut callback = recorder.create_callback();

    let intermediate1 = DEIntermediate {
        x: Array1::from(vec![1.0, 2.0]),
        fun: 5.0,
        convergence: 0.1,
        iter: 1,
    };
    callback(&intermediate1);

    let intermediate2 = DEIntermediate {
        x: Array1::from(vec![0.5, 1.0]),
        fun: 1.25,
        convergence: 0.05,
        iter: 2,
    };
    callback(&intermediate2);

    let records = recorder.get_records();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].iteration, 1);
    assert_eq!(records[0].x, vec![1.0, 2.0]);
    assert_eq!(records[0].best_result, 5.0);
    assert!(records[0].is_improvement);

    assert_eq!(records[1].iteration, 2);
    assert_eq!(records[1].x, vec![0.5, 1.0]);
    assert_eq!(records[1].best_result, 1.25);
    assert!(records[1].is_improvement);

    assert_eq!(recorder.get_best_solution(), Some((vec![0.5, 1.0], 1.25)));

    recorder.clear();
    assert_eq!(recorder.num_iterations(), 0);
}

#[test]
fn test_recorded_optimization() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output_dir = dir.path().to_str().unwrap();

    let bounds = vec![(-5.0, 5.0), (-5.0, 5.0)];
    let config = DEConfigBuilder::new().seed(42).generations(50).popsize(20).build();

    let result =
        run_recorded_differential_evolution("quadratic", quadratic, &bounds, config, output_dir);

    assert!(result.is_ok());
    let (report, csv_path) = result.unwrap();
    assert_eq!(report.nit, 50);

    assert!(std::path::Path::new(&csv_path).exists());

    let csv_content = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    let lines: Vec<&str> = csv_content.trim().split('\n').collect();
    // Header plus one row per generation
    assert_eq!(lines.len(), 51);
    assert!(lines[0].starts_with("iteration,x0,x1,best_result,convergence,is_improvement"));

    let meta_path = dir.path().join("quadratic.meta.json");
    let metadata = RunMetadata::load_json(&meta_path).expect("metadata should parse back");
    assert_eq!(metadata.function_name, "quadratic");
    assert_eq!(metadata.strategy, "rand1bin");
    assert_eq!(metadata.popsize, 20);
    assert_eq!(metadata.generations, 50);
    assert_eq!(metadata.seed, Some(42));
    assert_eq!(metadata.best_f, report.fun);
    assert_eq!(metadata.nfev, report.nfev);
}

#[test]
fn test_best_fitness_is_monotonic_over_generations() {
    let history: Arc<Mutex<Vec<f64>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = history.clone();

    let bounds = vec![(-5.0, 5.0), (-5.0, 5.0), (-5.0, 5.0)];
    let config = DEConfigBuilder::new()
        .seed(9)
        .generations(80)
        .popsize(25)
        .callback(Box::new(move |intermediate: &DEIntermediate| {
            sink.lock().unwrap().push(intermediate.fun);
        }))
        .build();

    let report = differential_evolution(&quadratic, &bounds, config).unwrap();

    let history = history.lock().unwrap();
    assert_eq!(history.len(), 80);
    for pair in history.windows(2) {
        assert!(pair[1] <= pair[0], "best fitness must never regress: {:?}", pair);
    }
    assert_eq!(*history.last().unwrap(), report.fun);
}

#[test]
fn test_report_best_matches_population() {
    let bounds = vec![(-5.0, 5.0), (-5.0, 5.0)];
    let config = DEConfigBuilder::new().seed(21).generations(60).popsize(20).build();
    let report = differential_evolution(&quadratic, &bounds, config).unwrap();

    // The returned best is exactly the fittest surviving member.
    let min_energy =
        report.population_energies.iter().cloned().fold(f64::INFINITY, f64::min);
    assert_eq!(report.fun, min_energy);
    assert!(report.population_energies.iter().all(|&e| e >= report.fun));
}

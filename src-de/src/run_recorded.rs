//! Recording wrapper for differential evolution for testing and analysis

use std::fs::create_dir_all;
use std::path::Path;

use ndarray::Array1;

use crate::metadata::RunMetadata;
use crate::recorder::OptimizationRecorder;
use crate::{DEConfig, DEReport, differential_evolution};

/// Run differential evolution while recording per-generation progress.
///
/// Writes `<output_dir>/<name>.csv` with the convergence trace and
/// `<output_dir>/<name>.meta.json` with the configuration and outcome.
/// Returns the DE report and the CSV path.
pub fn run_recorded_differential_evolution<F>(
    function_name: &str,
    func: F,
    bounds: &[(f64, f64)],
    mut config: DEConfig,
    output_dir: &str,
) -> Result<(DEReport, String), Box<dyn std::error::Error>>
where
    F: Fn(&Array1<f64>) -> f64,
{
    create_dir_all(output_dir)?;

    let recorder = OptimizationRecorder::new(function_name.to_string());
    config.callback = Some(recorder.create_callback());

    let mut metadata = RunMetadata::from_config(function_name, &config);

    let report = differential_evolution(&func, bounds, config)?;

    let csv_path = recorder.save_to_csv(output_dir)?;
    metadata.record_outcome(&report);
    let meta_path = Path::new(output_dir).join(format!("{}.meta.json", function_name));
    metadata.save_json(&meta_path)?;

    Ok((report, csv_path))
}

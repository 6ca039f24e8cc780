use std::fs::create_dir_all;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::DEIntermediate;

/// Records optimization progress via the per-generation observer callback
#[derive(Debug)]
pub struct OptimizationRecorder {
    /// Function name (used for the CSV filename)
    function_name: String,
    /// Shared records storage
    records: Arc<Mutex<Vec<OptimizationRecord>>>,
    /// Best function value seen so far
    best_value: Arc<Mutex<Option<f64>>>,
}

/// A single optimization generation record
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationRecord {
    /// Generation number
    pub iteration: usize,
    /// Best x found so far
    pub x: Vec<f64>,
    /// Best function result so far
    pub best_result: f64,
    /// Convergence measure (standard deviation of population energies)
    pub convergence: f64,
    /// Whether this generation improved the best known result
    pub is_improvement: bool,
}

impl OptimizationRecorder {
    /// Create a new optimization recorder for the given function
    pub fn new(function_name: String) -> Self {
        Self {
            function_name,
            records: Arc::new(Mutex::new(Vec::new())),
            best_value: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a callback that records optimization progress
    pub fn create_callback(&self) -> Box<dyn FnMut(&DEIntermediate) + Send> {
        let records = self.records.clone();
        let best_value = self.best_value.clone();

        Box::new(move |intermediate: &DEIntermediate| {
            let mut best_guard = best_value.lock().unwrap();
            let is_improvement = match *best_guard {
                Some(best) => intermediate.fun < best,
                None => true,
            };
            if is_improvement {
                *best_guard = Some(intermediate.fun);
            }
            drop(best_guard);

            let mut records_guard = records.lock().unwrap();
            records_guard.push(OptimizationRecord {
                iteration: intermediate.iter,
                x: intermediate.x.to_vec(),
                best_result: intermediate.fun,
                convergence: intermediate.convergence,
                is_improvement,
            });
        })
    }

    /// Save all recorded generations to a CSV file, one row per generation
    /// with one `x<i>` column per decision dimension.
    pub fn save_to_csv(&self, output_dir: &str) -> Result<String, Box<dyn std::error::Error>> {
        create_dir_all(output_dir)?;

        let filename = format!("{}/{}.csv", output_dir, self.function_name);
        let records_guard = self.records.lock().unwrap();

        let mut writer = csv::Writer::from_path(&filename)?;
        if let Some(first) = records_guard.first() {
            let mut header = vec!["iteration".to_string()];
            for i in 0..first.x.len() {
                header.push(format!("x{}", i));
            }
            header.push("best_result".to_string());
            header.push("convergence".to_string());
            header.push("is_improvement".to_string());
            writer.write_record(&header)?;

            for record in records_guard.iter() {
                let mut row = vec![record.iteration.to_string()];
                for &xi in &record.x {
                    row.push(format!("{:.16}", xi));
                }
                row.push(format!("{:.16}", record.best_result));
                row.push(format!("{:.16}", record.convergence));
                row.push(record.is_improvement.to_string());
                writer.write_record(&row)?;
            }
        }
        writer.flush()?;

        Ok(filename)
    }

    /// Get a copy of all recorded generations
    pub fn get_records(&self) -> Vec<OptimizationRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Get the number of generations recorded
    pub fn num_iterations(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Clear all recorded generations
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
        *self.best_value.lock().unwrap() = None;
    }

    /// Get the final best solution if any generations were recorded
    pub fn get_best_solution(&self) -> Option<(Vec<f64>, f64)> {
        let records_guard = self.records.lock().unwrap();
        records_guard.last().map(|last| (last.x.clone(), last.best_result))
    }
}

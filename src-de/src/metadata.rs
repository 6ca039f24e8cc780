//! Run metadata sidecar written next to recorded optimization traces.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DEConfig, DEReport};

/// Summary of a recorded run: the configuration that produced it plus the
/// outcome, serialized as JSON next to the CSV trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub function_name: String,
    pub strategy: String,
    pub popsize: usize,
    pub generations: usize,
    pub mutation: String,
    pub mutation_secondary: f64,
    pub recombination: f64,
    pub exclude_self: bool,
    pub seed: Option<u64>,
    pub best_f: f64,
    pub best_x: Vec<f64>,
    pub nfev: usize,
}

impl RunMetadata {
    /// Capture the configuration surface before a run starts.
    pub fn from_config(function_name: &str, config: &DEConfig) -> Self {
        Self {
            function_name: function_name.to_string(),
            strategy: config.strategy.to_string(),
            popsize: config.popsize,
            generations: config.generations,
            mutation: format!("{:?}", config.mutation),
            mutation_secondary: config.mutation_secondary,
            recombination: config.recombination,
            exclude_self: config.exclude_self,
            seed: config.seed,
            best_f: f64::INFINITY,
            best_x: Vec::new(),
            nfev: 0,
        }
    }

    /// Fill in the outcome fields from a finished run.
    pub fn record_outcome(&mut self, report: &DEReport) {
        self.best_f = report.fun;
        self.best_x = report.x.to_vec();
        self.nfev = report.nfev;
    }

    pub fn save_json(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let metadata = serde_json::from_reader(File::open(path)?)?;
        Ok(metadata)
    }
}

//! Differential Evolution (DE) global optimizer in pure Rust using ndarray
//!
//! Classic fixed-budget DE over box constraints, covering the rand/best
//! strategy families with binomial and exponential crossover.
//!
//! Supported features:
//! - Box constraints (lower/upper bounds)
//! - Strategies: rand1, rand2, best1, best2 (bin/exp each), plus
//!   rand-to-best, current-to-best and current-to-rand (binomial)
//! - Mutation as a fixed factor or dithering in a range [min,max)
//! - Per-individual greedy selection with an immediately updated global best
//! - Seedable RNG for reproducible runs
//! - Optional per-generation observer callback and CSV convergence recording
//!
//! The run budget is fixed: a run always performs `generations` full sweeps
//! over the population. There is no convergence-based early exit.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub mod clip_inplace;
pub mod donor_indices;
pub mod init_random;

pub mod mutant_best1;
pub mod mutant_best2;
pub mod mutant_current_to_best1;
pub mod mutant_current_to_rand1;
pub mod mutant_rand1;
pub mod mutant_rand2;
pub mod mutant_rand_to_best1;

pub mod crossover_binomial;
pub mod crossover_exponential;

pub mod differential_evolution;
pub mod metadata;
pub mod recorder;
pub mod run_recorded;

#[cfg(test)]
mod tests;

pub use differential_evolution::differential_evolution;
pub use metadata::RunMetadata;
pub use recorder::{OptimizationRecord, OptimizationRecorder};
pub use run_recorded::run_recorded_differential_evolution;

pub(crate) fn argmin(v: &Array1<f64>) -> (usize, f64) {
	let mut best_i = 0usize;
	let mut best_v = v[0];
	for (i, &val) in v.iter().enumerate() {
		if val < best_v {
			best_v = val;
			best_i = i;
		}
	}
	(best_i, best_v)
}

/// Differential Evolution strategy
///
/// The tag selects both the mutant formula and the crossover style; exactly
/// one formula executes per individual update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
	/// v = x_r1 + F * (x_r2 - x_r3)
	Rand1Bin,
	Rand1Exp,
	/// v = x_r1 + F * (x_r2 - x_r3 + x_r4 - x_r5)
	Rand2Bin,
	Rand2Exp,
	/// v = b + F * (x_r1 - x_r2)
	Best1Bin,
	Best1Exp,
	/// v = b + F * (x_r1 - x_r2 + x_r3 - x_r4)
	Best2Bin,
	Best2Exp,
	/// v = x_r2 + F * (x_r3 - x_r4) + F2 * (b - x_r1)
	RandToBest1Bin,
	/// v = x_p + F * (x_r1 - x_r2) + F2 * (b - x_p)
	CurrentToBest1Bin,
	/// v = x_p + F * (x_r2 - x_r3) + F2 * (x_r1 - x_p)
	CurrentToRand1Bin,
}

impl Strategy {
	/// Number of donor indices consumed from the shuffled pool per update.
	pub fn donors_required(&self) -> usize {
		match self {
			Strategy::Best1Bin | Strategy::Best1Exp => 2,
			Strategy::CurrentToBest1Bin => 2,
			Strategy::Rand1Bin | Strategy::Rand1Exp => 3,
			Strategy::CurrentToRand1Bin => 3,
			Strategy::Best2Bin | Strategy::Best2Exp => 4,
			Strategy::RandToBest1Bin => 4,
			Strategy::Rand2Bin | Strategy::Rand2Exp => 5,
		}
	}

	/// Whether the mutant formula reads the running best vector.
	pub fn uses_best(&self) -> bool {
		matches!(
			self,
			Strategy::Best1Bin
				| Strategy::Best1Exp
				| Strategy::Best2Bin
				| Strategy::Best2Exp
				| Strategy::RandToBest1Bin
				| Strategy::CurrentToBest1Bin
		)
	}

	/// Crossover style implied by the strategy tag.
	pub fn crossover(&self) -> Crossover {
		match self {
			Strategy::Rand1Exp | Strategy::Rand2Exp | Strategy::Best1Exp | Strategy::Best2Exp => {
				Crossover::Exponential
			}
			_ => Crossover::Binomial,
		}
	}

	/// Canonical lowercase tag, the form accepted back by `FromStr`.
	pub fn name(&self) -> &'static str {
		match self {
			Strategy::Rand1Bin => "rand1bin",
			Strategy::Rand1Exp => "rand1exp",
			Strategy::Rand2Bin => "rand2bin",
			Strategy::Rand2Exp => "rand2exp",
			Strategy::Best1Bin => "best1bin",
			Strategy::Best1Exp => "best1exp",
			Strategy::Best2Bin => "best2bin",
			Strategy::Best2Exp => "best2exp",
			Strategy::RandToBest1Bin => "randtobest1bin",
			Strategy::CurrentToBest1Bin => "currenttobest1bin",
			Strategy::CurrentToRand1Bin => "currenttorand1bin",
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Strategy {
	type Err = String;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let t = s.to_lowercase();
		match t.as_str() {
			"rand1bin" | "rand1" => Ok(Strategy::Rand1Bin),
			"rand1exp" => Ok(Strategy::Rand1Exp),
			"rand2bin" | "rand2" => Ok(Strategy::Rand2Bin),
			"rand2exp" => Ok(Strategy::Rand2Exp),
			"best1bin" | "best1" => Ok(Strategy::Best1Bin),
			"best1exp" => Ok(Strategy::Best1Exp),
			"best2bin" | "best2" => Ok(Strategy::Best2Bin),
			"best2exp" => Ok(Strategy::Best2Exp),
			"randtobest1bin" | "rand-to-best1bin" | "rand_to_best1bin" => {
				Ok(Strategy::RandToBest1Bin)
			}
			"currenttobest1bin" | "current-to-best1bin" | "current_to_best1bin" => {
				Ok(Strategy::CurrentToBest1Bin)
			}
			"currenttorand1bin" | "current-to-rand1bin" | "current_to_rand1bin" => {
				Ok(Strategy::CurrentToRand1Bin)
			}
			_ => Err(format!("unknown strategy: {}", s)),
		}
	}
}

/// Crossover type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
	/// Binomial (uniform) crossover
	Binomial,
	/// Exponential crossover
	Exponential,
}

/// Mutation setting: either a fixed factor or a uniform range (dithering)
#[derive(Debug, Clone, Copy)]
pub enum Mutation {
	/// Fixed mutation factor F in [0, 2)
	Factor(f64),
	/// Dithering range [min, max) with 0 <= min < max <= 2
	Range { min: f64, max: f64 },
}

impl Default for Mutation {
	fn default() -> Self {
		Mutation::Factor(0.5)
	}
}

impl Mutation {
	fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		match *self {
			Mutation::Factor(f) => f,
			Mutation::Range { min, max } => rng.random_range(min..max),
		}
	}
}

/// Error raised by a fallible objective function; opaque to the optimizer.
pub type ObjectiveError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong before or during a DE run.
///
/// Configuration errors are raised by validation before any objective
/// evaluation; `Objective` aborts the run at the failing evaluation.
#[derive(Debug, Error)]
pub enum DEError {
	#[error("bounds must contain at least one dimension")]
	EmptyBounds,
	#[error("lower/upper bounds have mismatched lengths: {lower} vs {upper}")]
	BoundsMismatch { lower: usize, upper: usize },
	#[error("bound[{index}] has min {min} > max {max}")]
	InvalidBound { index: usize, min: f64, max: f64 },
	#[error("population size must be positive")]
	InvalidPopulationSize,
	#[error("generation count must be positive")]
	InvalidGenerations,
	#[error("crossover probability {value} is outside [0, 1]")]
	InvalidRecombination { value: f64 },
	#[error("invalid mutation setting: {reason}")]
	InvalidMutation { reason: String },
	#[error(
		"strategy {strategy} needs {required} donors but only {available} indices are available"
	)]
	InsufficientDonors { strategy: Strategy, required: usize, available: usize },
	#[error("objective evaluation failed: {0}")]
	Objective(ObjectiveError),
}

/// Configuration for the Differential Evolution optimizer
pub struct DEConfig {
	/// Population size N
	pub popsize: usize,
	/// Number of full generation sweeps G
	pub generations: usize,
	/// Primary mutation factor F
	pub mutation: Mutation,
	/// Secondary factor F2, read by the rand-to-best and current-to-* strategies
	pub mutation_secondary: f64,
	/// Crossover probability CR in [0, 1]
	pub recombination: f64,
	pub strategy: Strategy,
	/// Skip the parent's own index when picking donors
	pub exclude_self: bool,
	pub seed: Option<u64>,
	/// Print objective best at each generation
	pub disp: bool,
	/// Optional per-generation observer; cannot stop the run
	pub callback: Option<Box<dyn FnMut(&DEIntermediate)>>,
}

impl Default for DEConfig {
	fn default() -> Self {
		Self {
			popsize: 100,
			generations: 1000,
			mutation: Mutation::default(),
			mutation_secondary: 0.5,
			recombination: 0.85,
			strategy: Strategy::Rand1Bin,
			exclude_self: false,
			seed: None,
			disp: false,
			callback: None,
		}
	}
}

/// Fluent builder for `DEConfig` for ergonomic configuration.
pub struct DEConfigBuilder {
	cfg: DEConfig,
}

impl DEConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: DEConfig::default() }
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.popsize = v;
		self
	}
	pub fn generations(mut self, v: usize) -> Self {
		self.cfg.generations = v;
		self
	}
	pub fn mutation(mut self, v: Mutation) -> Self {
		self.cfg.mutation = v;
		self
	}
	pub fn mutation_secondary(mut self, v: f64) -> Self {
		self.cfg.mutation_secondary = v;
		self
	}
	pub fn recombination(mut self, v: f64) -> Self {
		self.cfg.recombination = v;
		self
	}
	pub fn strategy(mut self, v: Strategy) -> Self {
		self.cfg.strategy = v;
		self
	}
	pub fn exclude_self(mut self, v: bool) -> Self {
		self.cfg.exclude_self = v;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn disp(mut self, v: bool) -> Self {
		self.cfg.disp = v;
		self
	}
	pub fn callback(mut self, cb: Box<dyn FnMut(&DEIntermediate)>) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	pub fn build(self) -> DEConfig {
		self.cfg
	}
}

impl Default for DEConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Result/Report of a DE optimization run
#[derive(Clone)]
pub struct DEReport {
	/// Best vector found
	pub x: Array1<f64>,
	/// Objective value of `x`
	pub fun: f64,
	/// Generations completed
	pub nit: usize,
	/// Objective evaluations performed, initialization included
	pub nfev: usize,
	pub population: Array2<f64>,
	pub population_energies: Array1<f64>,
}

impl fmt::Debug for DEReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DEReport")
			.field("x", &format!("len={}", self.x.len()))
			.field("fun", &self.fun)
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field(
				"population",
				&format!("{}x{}", self.population.nrows(), self.population.ncols()),
			)
			.field("population_energies", &format!("len={}", self.population_energies.len()))
			.finish()
	}
}

/// Information passed to the observer callback after each generation
pub struct DEIntermediate {
	pub x: Array1<f64>,
	pub fun: f64,
	/// Spread of the population energies, measured as std(pop_f)
	pub convergence: f64,
	pub iter: usize,
}

/// Differential Evolution optimizer
pub struct DifferentialEvolution<'a, F>
where
	F: Fn(&Array1<f64>) -> Result<f64, ObjectiveError>,
{
	func: &'a F,
	lower: Array1<f64>,
	upper: Array1<f64>,
	config: DEConfig,
}

impl<'a, F> DifferentialEvolution<'a, F>
where
	F: Fn(&Array1<f64>) -> Result<f64, ObjectiveError>,
{
	/// Create a new DE optimizer with objective `func` and bounds [lower, upper]
	pub fn new(func: &'a F, lower: Array1<f64>, upper: Array1<f64>) -> Self {
		Self { func, lower, upper, config: DEConfig::default() }
	}

	/// Mutable access to configuration
	pub fn config_mut(&mut self) -> &mut DEConfig {
		&mut self.config
	}

	fn validate(&self) -> Result<(), DEError> {
		if self.lower.len() != self.upper.len() {
			return Err(DEError::BoundsMismatch {
				lower: self.lower.len(),
				upper: self.upper.len(),
			});
		}
		if self.lower.is_empty() {
			return Err(DEError::EmptyBounds);
		}
		for i in 0..self.lower.len() {
			if !(self.lower[i] <= self.upper[i]) {
				return Err(DEError::InvalidBound {
					index: i,
					min: self.lower[i],
					max: self.upper[i],
				});
			}
		}
		if self.config.popsize == 0 {
			return Err(DEError::InvalidPopulationSize);
		}
		if self.config.generations == 0 {
			return Err(DEError::InvalidGenerations);
		}
		let cr = self.config.recombination;
		if !(0.0..=1.0).contains(&cr) {
			return Err(DEError::InvalidRecombination { value: cr });
		}
		match self.config.mutation {
			Mutation::Factor(f) if !f.is_finite() => {
				return Err(DEError::InvalidMutation {
					reason: format!("factor {} is not finite", f),
				});
			}
			Mutation::Range { min, max } if !(min.is_finite() && max.is_finite() && min < max) => {
				return Err(DEError::InvalidMutation {
					reason: format!("range [{}, {}) is not a valid dithering range", min, max),
				});
			}
			_ => {}
		}
		if !self.config.mutation_secondary.is_finite() {
			return Err(DEError::InvalidMutation {
				reason: format!(
					"secondary factor {} is not finite",
					self.config.mutation_secondary
				),
			});
		}
		let required = self.config.strategy.donors_required();
		let available = self.config.popsize - usize::from(self.config.exclude_self);
		if available < required {
			return Err(DEError::InsufficientDonors {
				strategy: self.config.strategy,
				required,
				available,
			});
		}
		Ok(())
	}

	/// Run the optimization and return a report
	pub fn solve(&mut self) -> Result<DEReport, DEError> {
		use clip_inplace::clip_inplace;
		use crossover_binomial::binomial_crossover;
		use crossover_exponential::exponential_crossover;
		use donor_indices::DonorPool;
		use init_random::init_random;
		use mutant_best1::mutant_best1;
		use mutant_best2::mutant_best2;
		use mutant_current_to_best1::mutant_current_to_best1;
		use mutant_current_to_rand1::mutant_current_to_rand1;
		use mutant_rand1::mutant_rand1;
		use mutant_rand2::mutant_rand2;
		use mutant_rand_to_best1::mutant_rand_to_best1;

		self.validate()?;

		let n = self.lower.len();
		let npop = self.config.popsize;

		if self.config.disp {
			eprintln!(
				"DE Init: {} dimensions, population={}, generations={}",
				n, npop, self.config.generations
			);
			eprintln!(
				"  Strategy: {}, Mutation: {:?}, Crossover: CR={:.3}",
				self.config.strategy, self.config.mutation, self.config.recombination
			);
		}

		// RNG
		let mut rng: StdRng = match self.config.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => {
				let mut thread_rng = rand::rng();
				StdRng::from_rng(&mut thread_rng)
			}
		};

		// Initialize population in [lower, upper)
		let mut pop = init_random(n, npop, &self.lower, &self.upper, &mut rng);

		let mut nfev: usize = 0;
		let mut energies = Array1::<f64>::zeros(npop);
		for i in 0..npop {
			let xi = pop.row(i).to_owned();
			energies[i] = (self.func)(&xi).map_err(DEError::Objective)?;
			nfev += 1;
		}

		// The running best is seeded from the fittest initial member before
		// generation 1; best-seeking strategies always read a defined vector.
		let (best_idx, mut best_f) = argmin(&energies);
		let mut best_x = pop.row(best_idx).to_owned();

		if self.config.disp {
			let pop_mean = energies.mean().unwrap_or(0.0);
			let pop_std = energies.std(0.0);
			eprintln!("  Initial population: mean={:.6e}, std={:.6e}", pop_mean, pop_std);
			eprintln!("  Initial best: fitness={:.6e} at index {}", best_f, best_idx);
		}

		let f2 = self.config.mutation_secondary;
		let k = self.config.strategy.donors_required();
		let mut donors = DonorPool::new(npop, self.config.exclude_self);

		let mut nit = 0;
		for iter in 1..=self.config.generations {
			nit = iter;
			let mut accepted = 0usize;

			for p in 0..npop {
				let idx = donors.pick(p, k, &mut rng);
				let f = self.config.mutation.sample(&mut rng);

				let mutant = match self.config.strategy {
					Strategy::Rand1Bin | Strategy::Rand1Exp => mutant_rand1(&pop, idx, f),
					Strategy::Rand2Bin | Strategy::Rand2Exp => mutant_rand2(&pop, idx, f),
					Strategy::Best1Bin | Strategy::Best1Exp => mutant_best1(&best_x, &pop, idx, f),
					Strategy::Best2Bin | Strategy::Best2Exp => mutant_best2(&best_x, &pop, idx, f),
					Strategy::RandToBest1Bin => mutant_rand_to_best1(&best_x, &pop, idx, f, f2),
					Strategy::CurrentToBest1Bin => {
						mutant_current_to_best1(p, &best_x, &pop, idx, f, f2)
					}
					Strategy::CurrentToRand1Bin => mutant_current_to_rand1(p, &pop, idx, f, f2),
				};

				let mut trial = match self.config.strategy.crossover() {
					Crossover::Binomial => binomial_crossover(
						pop.row(p),
						&mutant,
						self.config.recombination,
						&mut rng,
					),
					Crossover::Exponential => exponential_crossover(
						pop.row(p),
						&mutant,
						self.config.recombination,
						&mut rng,
					),
				};

				clip_inplace(&mut trial, &self.lower, &self.upper);

				let f_trial = (self.func)(&trial).map_err(DEError::Objective)?;
				nfev += 1;

				// Greedy selection: strict improvement only, ties keep the parent
				if f_trial < energies[p] {
					pop.row_mut(p).assign(&trial);
					energies[p] = f_trial;
					accepted += 1;
					if f_trial < best_f {
						best_f = f_trial;
						best_x.assign(&trial);
					}
				}
			}

			let pop_std = energies.std(0.0);
			if self.config.disp {
				eprintln!(
					"DE iter {:4}  best_f={:.6e}  std={:.3e}  accepted={}/{}",
					iter, best_f, pop_std, accepted, npop
				);
			}

			if let Some(ref mut cb) = self.config.callback {
				cb(&DEIntermediate { x: best_x.clone(), fun: best_f, convergence: pop_std, iter });
			}
		}

		if self.config.disp {
			eprintln!("DE finished after {} generations: best_f={:.6e}", nit, best_f);
		}

		Ok(DEReport {
			x: best_x,
			fun: best_f,
			nit,
			nfev,
			population: pop,
			population_energies: energies,
		})
	}
}

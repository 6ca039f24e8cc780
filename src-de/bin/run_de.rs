use clap::Parser;
use ndarray::Array1;

use globopt_de::{DEConfigBuilder, Mutation, Strategy, differential_evolution};
use globopt_testfunctions::{
    ackley, get_function_metadata, griewank, quadratic, rastrigin, rosenbrock, schwefel, sphere,
};

/// CLI arguments for running the DE solver on a benchmark function
#[derive(Parser)]
#[command(name = "run_globopt_de")]
#[command(about = "Run the differential evolution solver on a named benchmark function")]
struct Args {
    /// Benchmark function name (sphere, quadratic, rosenbrock, rastrigin, ackley, griewank, schwefel)
    #[arg(short, long, default_value = "sphere")]
    function: String,

    /// DE strategy tag, e.g. rand1bin, best1exp, currenttobest1bin
    #[arg(short, long, default_value = "rand1bin")]
    strategy: String,

    /// Problem dimensionality
    #[arg(short, long, default_value = "2")]
    dimensions: usize,

    /// Population size
    #[arg(short, long, default_value = "50")]
    popsize: usize,

    /// Number of generations
    #[arg(short, long, default_value = "500")]
    generations: usize,

    /// Mutation factor F
    #[arg(long = "f", default_value = "0.7")]
    mutation: f64,

    /// Secondary mutation factor F2 (rand-to-best and current-to-* strategies)
    #[arg(long = "f2", default_value = "0.7")]
    mutation_secondary: f64,

    /// Crossover probability CR
    #[arg(long = "cr", default_value = "0.9")]
    recombination: f64,

    /// Exclude the parent's own index from donor selection
    #[arg(long)]
    exclude_self: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print per-generation progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let strategy: Strategy = match args.strategy.parse() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let func: fn(&Array1<f64>) -> f64 = match args.function.as_str() {
        "sphere" => sphere,
        "quadratic" => quadratic,
        "rosenbrock" => rosenbrock,
        "rastrigin" => rastrigin,
        "ackley" => ackley,
        "griewank" => griewank,
        "schwefel" => schwefel,
        other => {
            eprintln!("unknown function: {}", other);
            std::process::exit(2);
        }
    };

    // Per-function default box, replicated over the requested dimensionality.
    let metadata = get_function_metadata();
    let (lo, hi) = metadata
        .get(&args.function)
        .and_then(|m| m.bounds.first().copied())
        .unwrap_or((-5.0, 5.0));
    let bounds = vec![(lo, hi); args.dimensions];

    let mut builder = DEConfigBuilder::new()
        .popsize(args.popsize)
        .generations(args.generations)
        .mutation(Mutation::Factor(args.mutation))
        .mutation_secondary(args.mutation_secondary)
        .recombination(args.recombination)
        .strategy(strategy)
        .exclude_self(args.exclude_self)
        .disp(args.verbose);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    match differential_evolution(&func, &bounds, builder.build()) {
        Ok(report) => {
            println!(
                "{} ({}D, {}): f = {:.6e} after {} evaluations",
                args.function, args.dimensions, strategy, report.fun, report.nfev
            );
            let components: Vec<String> =
                report.x.iter().map(|xi| format!("{:.6}", xi)).collect();
            println!("x = [{}]", components.join(", "));
        }
        Err(e) => {
            eprintln!("optimization failed: {}", e);
            std::process::exit(1);
        }
    }
}

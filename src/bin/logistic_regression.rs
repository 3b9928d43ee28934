use std::path::PathBuf;
use std::process;

use clap::Parser;

use regpipe::regressors::LogisticRegression;
use regpipe::runner;

/// Train a logistic regression model on one dataset, test it on another and
/// write the per-sample predictions and targets to a CSV file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Training data filename
    training_file: PathBuf,
    /// Test data filename
    test_file: PathBuf,
    /// Results filename
    #[arg(long, default_value = "LogisticRegressionResultsData.csv")]
    output: PathBuf,
    /// Seed for the random weight initialisation
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn run(args: &Args) -> runner::Result<()> {
    let params = LogisticRegression::<f64>::params()
        .learning_rate(0.2)
        .min_change(1e-8)
        .batch_size(20)
        .max_epochs(1000)
        .scale_inputs(true)
        .rng_seed(args.seed);

    println!("Training Logistic Regression model ...");
    runner::run_driver(params, &args.training_file, &args.test_file, &args.output)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("ERROR: {err}");
        process::exit(1);
    }
}

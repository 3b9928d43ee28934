use std::path::PathBuf;
use std::process;

use clap::Parser;

use regpipe::regressors::{Activation, Mlp};
use regpipe::runner;

/// Train a multi layer perceptron on one dataset, test it on another and
/// write the per-sample predictions and targets to a CSV file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Training data filename
    training_file: PathBuf,
    /// Test data filename
    test_file: PathBuf,
    /// Results filename
    #[arg(long, default_value = "mlp_results.csv")]
    output: PathBuf,
    /// Number of neurons in the hidden layer
    #[arg(long, default_value_t = 2)]
    hidden_neurons: usize,
    /// Seed for the random weight initialisation
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn run(args: &Args) -> runner::Result<()> {
    let params = Mlp::<f64>::params()
        .n_hidden_neurons(args.hidden_neurons)
        .input_activation(Activation::Linear)
        .hidden_activation(Activation::Tanh)
        .output_activation(Activation::Linear)
        .max_epochs(1000)
        .min_change(1e-10)
        .learning_rate(0.1)
        .momentum(0.5)
        .n_restarts(1)
        .validation_ratio(None)
        .shuffle(false)
        .scale_data(true)
        .rng_seed(args.seed);

    println!("Training MLP model ...");
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

//! The train-and-test driver shared by the command line binaries.
//!
//! A driver run loads a training and a test dataset, verifies that their
//! dimensionalities agree, trains a pipeline around the supplied algorithm
//! configuration, evaluates it on the test data and writes the per-sample
//! predictions next to their targets as CSV.

mod error;

#[cfg(test)]
mod tests;

pub use error::{DriverError, Result};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::datasets::RegressionData;
use crate::pipeline::{RegressionPipeline, TestResult};
use crate::regressors::traits::{Fit, Regressor};
use crate::Float;

/// This function loads the training and test datasets and checks that they
/// describe the same problem shape.
pub fn load_datasets<F: Float>(
    training_path: &Path,
    test_path: &Path,
) -> Result<(RegressionData<F>, RegressionData<F>)> {
    let training = RegressionData::load(training_path).map_err(|source| {
        DriverError::LoadTraining {
            path: training_path.to_path_buf(),
            source,
        }
    })?;
    let test =
        RegressionData::load(test_path).map_err(|source| DriverError::LoadTest {
            path: test_path.to_path_buf(),
            source,
        })?;

    if training.n_input_dimensions() != test.n_input_dimensions() {
        return Err(DriverError::InputDimensionMismatch {
            training: training.n_input_dimensions(),
            test: test.n_input_dimensions(),
        });
    }
    if training.n_target_dimensions() != test.n_target_dimensions() {
        return Err(DriverError::TargetDimensionMismatch {
            training: training.n_target_dimensions(),
            test: test.n_target_dimensions(),
        });
    }

    Ok((training, test))
}

/// This function writes the test predictions as CSV: for every test sample,
/// in dataset order, one row with the predicted vector followed by one row
/// with the target vector. No header row is written.
pub fn write_results<F, P, W>(
    pipeline: &RegressionPipeline<F, P>,
    data: &RegressionData<F>,
    writer: W,
) -> Result<()>
where
    F: Float,
    P: Fit<F>,
    P::Object: Regressor<F>,
    W: Write,
{
    let mut csv = csv::Writer::from_writer(writer);
    for sample in data.iter() {
        let prediction = pipeline.predict(sample.input())?;
        csv.write_record(prediction.iter().map(|value| value.to_string()))?;
        csv.write_record(sample.target().iter().map(|value| value.to_string()))?;
    }
    csv.flush()?;
    Ok(())
}

/// This function runs one complete driver pass: load both datasets, train
/// the pipeline, test it and write the results file. It returns the test
/// metrics so callers can report them.
pub fn run_driver<F, P>(
    params: P,
    training_path: &Path,
    test_path: &Path,
    output_path: &Path,
) -> Result<TestResult<F>>
where
    F: Float,
    P: Fit<F>,
    P::Object: Regressor<F>,
{
    let (training, test) = load_datasets::<F>(training_path, test_path)?;
    println!("Training and Test datasets loaded");
    println!("Training data stats:");
    print!("{}", training.stats());
    println!("Test data stats:");
    print!("{}", test.stats());

    let mut pipeline = RegressionPipeline::new(params);
    pipeline.train(&training)?;
    println!("Model trained");

    let result = pipeline.test(&test)?;
    println!("Test complete. Test RMS error: {}", result.rms_error);

    let file = File::create(output_path)?;
    write_results(&pipeline, &test, BufWriter::new(file))?;
    log::info!("results written to {}", output_path.display());

    Ok(result)
}

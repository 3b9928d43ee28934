use std::path::PathBuf;

use thiserror::Error;

use crate::datasets::DatasetError;
use crate::pipeline::PipelineError;

/// Simplified `Result` using [`DriverError`] as error type
pub type Result<T> = std::result::Result<T, DriverError>;

/// Error variants from a train-and-test driver run
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to load the training data from {path}: {source}")]
    LoadTraining {
        path: PathBuf,
        source: DatasetError,
    },
    #[error("failed to load the test data from {path}: {source}")]
    LoadTest {
        path: PathBuf,
        source: DatasetError,
    },
    #[error(
        "the number of input dimensions in the training data ({training}) \
         does not match that of the test data ({test})"
    )]
    InputDimensionMismatch { training: usize, test: usize },
    #[error(
        "the number of target dimensions in the training data ({training}) \
         does not match that of the test data ({test})"
    )]
    TargetDimensionMismatch { training: usize, test: usize },
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("failed to write the results file: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

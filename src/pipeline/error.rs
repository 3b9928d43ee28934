use thiserror::Error;

use crate::regressors::RegressionError;

/// Simplified `Result` using [`PipelineError`] as error type
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error variants from the pipeline state machine
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("the pipeline has not been trained")]
    NotTrained,
    #[error("the pipeline has not been tested")]
    NotTested,
    #[error("the model expects {expected} input dimensions but the dataset has {found}")]
    InputDimensionMismatch { expected: usize, found: usize },
    #[error("the model expects {expected} target dimensions but the dataset has {found}")]
    TargetDimensionMismatch { expected: usize, found: usize },
    #[error("failed to train the model: {0}")]
    Train(#[source] RegressionError),
    #[error("failed to test the model: {0}")]
    Test(#[source] RegressionError),
    #[error("failed to compute a prediction: {0}")]
    Predict(#[source] RegressionError),
}

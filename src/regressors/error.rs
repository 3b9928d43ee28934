use thiserror::Error;

/// Simplified `Result` using [`RegressionError`] as error type
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Error variants from hyperparameter construction or model fitting
#[derive(Debug, Clone, Error)]
pub enum RegressionError {
    #[error("invalid learning rate {0}")]
    InvalidLearningRate(f32),
    #[error("invalid min change {0}")]
    InvalidMinChange(f32),
    #[error("max epochs must be positive")]
    InvalidMaxEpochs,
    #[error("batch size must be positive")]
    InvalidBatchSize,
    #[error("invalid momentum {0}, expected a value in [0, 1)")]
    InvalidMomentum(f32),
    #[error("invalid validation ratio {0}, expected a value in (0, 1)")]
    InvalidValidationRatio(f32),
    #[error("the hidden layer must contain at least one neuron")]
    InvalidHiddenLayerSize,
    #[error("the number of restarts must be positive")]
    InvalidNumRestarts,
    #[error("cannot fit a model to an empty dataset")]
    EmptyDataset,
    #[error("expected a 1-dimensional target, the dataset has {0} target dimensions")]
    UnsupportedTargetDimension(usize),
    #[error("input dimensionality mismatch: the model expects {expected}, got {found}")]
    InputDimensionMismatch { expected: usize, found: usize },
    #[error("the validation holdout left no training samples")]
    EmptyTrainingSplit,
}

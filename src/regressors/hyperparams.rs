use super::error::{RegressionError, Result};
use super::mlp::Activation;
use crate::param_guard::ParamGuard;
use crate::Float;

/// A verified hyperparameter set ready for the fitting of a linear regression model
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionValidParams<F> {
    learning_rate: F,
    min_change: F,
    max_epochs: usize,
    scale_inputs: bool,
    rng_seed: u64,
}

impl<F: Float> LinearRegressionValidParams<F> {
    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn min_change(&self) -> F {
        self.min_change
    }

    pub fn max_epochs(&self) -> usize {
        self.max_epochs
    }

    pub fn scale_inputs(&self) -> bool {
        self.scale_inputs
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// A hyper-parameter set during construction
///
/// Configures gradient-descent minimization of the squared error
/// ```ignore
/// 1 / n_samples * sum_i (y_i - w^T x_i - b)^2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionParams<F>(LinearRegressionValidParams<F>);

impl<F: Float> Default for LinearRegressionParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure and fit a linear regression model
impl<F: Float> LinearRegressionParams<F> {
    /// Create default linear regression hyper parameters
    pub fn new() -> LinearRegressionParams<F> {
        Self(LinearRegressionValidParams {
            learning_rate: F::cast(0.01),
            min_change: F::cast(1e-5),
            max_epochs: 500,
            scale_inputs: false,
            rng_seed: 42,
        })
    }

    /// Set the rate at which the descent updates the weights.
    /// Defaults to `0.01` if not set.
    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Set the minimum change in training error between two epochs under
    /// which training stops.
    /// Defaults to `1e-5` if not set.
    pub fn min_change(mut self, min_change: F) -> Self {
        self.0.min_change = min_change;
        self
    }

    /// Set the maximum number of epochs (one epoch is one complete pass over
    /// the training data).
    /// Defaults to `500` if not set.
    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.0.max_epochs = max_epochs;
        self
    }

    /// Enables min-max scaling of the inputs to [0, 1] using the training
    /// ranges, applied again at prediction time.
    /// Defaults to `false` if not set.
    pub fn scale_inputs(mut self, scale_inputs: bool) -> Self {
        self.0.scale_inputs = scale_inputs;
        self
    }

    /// Set the seed for the random weight initialisation. Runs with the same
    /// seed, data and hyperparameters are reproducible.
    /// Defaults to `42` if not set.
    pub fn rng_seed(mut self, rng_seed: u64) -> Self {
        self.0.rng_seed = rng_seed;
        self
    }
}

impl<F: Float> ParamGuard for LinearRegressionParams<F> {
    type Checked = LinearRegressionValidParams<F>;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.learning_rate <= F::zero() {
            Err(RegressionError::InvalidLearningRate(
                self.0.learning_rate.to_f32().unwrap(),
            ))
        } else if self.0.min_change.is_negative() {
            Err(RegressionError::InvalidMinChange(
                self.0.min_change.to_f32().unwrap(),
            ))
        } else if self.0.max_epochs == 0 {
            Err(RegressionError::InvalidMaxEpochs)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for the fitting of a logistic regression model
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegressionValidParams<F> {
    learning_rate: F,
    min_change: F,
    batch_size: usize,
    max_epochs: usize,
    scale_inputs: bool,
    rng_seed: u64,
}

impl<F: Float> LogisticRegressionValidParams<F> {
    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn min_change(&self) -> F {
        self.min_change
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn max_epochs(&self) -> usize {
        self.max_epochs
    }

    pub fn scale_inputs(&self) -> bool {
        self.scale_inputs
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// A hyper-parameter set during construction
///
/// Configures mini-batch gradient-descent minimization of the squared error of
/// a sigmoid output unit
/// ```ignore
/// 1 / n_samples * sum_i (y_i - sigmoid(w^T x_i + b))^2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegressionParams<F>(LogisticRegressionValidParams<F>);

impl<F: Float> Default for LogisticRegressionParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure and fit a logistic regression model
impl<F: Float> LogisticRegressionParams<F> {
    /// Create default logistic regression hyper parameters
    pub fn new() -> LogisticRegressionParams<F> {
        Self(LogisticRegressionValidParams {
            learning_rate: F::cast(0.01),
            min_change: F::cast(1e-5),
            batch_size: 1,
            max_epochs: 500,
            scale_inputs: true,
            rng_seed: 42,
        })
    }

    /// Set the rate at which the descent updates the weights.
    /// Defaults to `0.01` if not set.
    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Set the minimum change in training error between two epochs under
    /// which training stops.
    /// Defaults to `1e-5` if not set.
    pub fn min_change(mut self, min_change: F) -> Self {
        self.0.min_change = min_change;
        self
    }

    /// Set the number of samples accumulated into one weight update.
    /// Defaults to `1` (fully online updates) if not set.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.0.batch_size = batch_size;
        self
    }

    /// Set the maximum number of epochs (one epoch is one complete pass over
    /// the training data).
    /// Defaults to `500` if not set.
    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.0.max_epochs = max_epochs;
        self
    }

    /// Enables min-max scaling of the inputs to [0, 1] using the training
    /// ranges, applied again at prediction time.
    /// Defaults to `true` if not set.
    pub fn scale_inputs(mut self, scale_inputs: bool) -> Self {
        self.0.scale_inputs = scale_inputs;
        self
    }

    /// Set the seed for the random weight initialisation.
    /// Defaults to `42` if not set.
    pub fn rng_seed(mut self, rng_seed: u64) -> Self {
        self.0.rng_seed = rng_seed;
        self
    }
}

impl<F: Float> ParamGuard for LogisticRegressionParams<F> {
    type Checked = LogisticRegressionValidParams<F>;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.learning_rate <= F::zero() {
            Err(RegressionError::InvalidLearningRate(
                self.0.learning_rate.to_f32().unwrap(),
            ))
        } else if self.0.min_change.is_negative() {
            Err(RegressionError::InvalidMinChange(
                self.0.min_change.to_f32().unwrap(),
            ))
        } else if self.0.batch_size == 0 {
            Err(RegressionError::InvalidBatchSize)
        } else if self.0.max_epochs == 0 {
            Err(RegressionError::InvalidMaxEpochs)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for the fitting of an MLP regression model
#[derive(Debug, Clone, PartialEq)]
pub struct MlpValidParams<F> {
    n_hidden_neurons: usize,
    input_activation: Activation,
    hidden_activation: Activation,
    output_activation: Activation,
    learning_rate: F,
    momentum: F,
    min_change: F,
    max_epochs: usize,
    n_restarts: usize,
    validation_ratio: Option<F>,
    shuffle: bool,
    scale_data: bool,
    rng_seed: u64,
}

impl<F: Float> MlpValidParams<F> {
    pub fn n_hidden_neurons(&self) -> usize {
        self.n_hidden_neurons
    }

    pub fn input_activation(&self) -> Activation {
        self.input_activation
    }

    pub fn hidden_activation(&self) -> Activation {
        self.hidden_activation
    }

    pub fn output_activation(&self) -> Activation {
        self.output_activation
    }

    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    pub fn momentum(&self) -> F {
        self.momentum
    }

    pub fn min_change(&self) -> F {
        self.min_change
    }

    pub fn max_epochs(&self) -> usize {
        self.max_epochs
    }

    pub fn n_restarts(&self) -> usize {
        self.n_restarts
    }

    pub fn validation_ratio(&self) -> Option<F> {
        self.validation_ratio
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn scale_data(&self) -> bool {
        self.scale_data
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// A hyper-parameter set during construction
///
/// Configures backpropagation training of a fully-connected network with one
/// hidden layer, mapping an N-dimensional input to a K-dimensional output.
#[derive(Debug, Clone, PartialEq)]
pub struct MlpParams<F>(MlpValidParams<F>);

impl<F: Float> Default for MlpParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure and fit an MLP regression model
impl<F: Float> MlpParams<F> {
    /// Create default MLP hyper parameters
    pub fn new() -> MlpParams<F> {
        Self(MlpValidParams {
            n_hidden_neurons: 10,
            input_activation: Activation::Linear,
            hidden_activation: Activation::Sigmoid,
            output_activation: Activation::Linear,
            learning_rate: F::cast(0.1),
            momentum: F::cast(0.5),
            min_change: F::cast(1e-5),
            max_epochs: 100,
            n_restarts: 1,
            validation_ratio: None,
            shuffle: true,
            scale_data: false,
            rng_seed: 42,
        })
    }

    /// Set the number of neurons in the hidden layer.
    /// Defaults to `10` if not set.
    pub fn n_hidden_neurons(mut self, n_hidden_neurons: usize) -> Self {
        self.0.n_hidden_neurons = n_hidden_neurons;
        self
    }

    /// Set the activation function applied to the input values.
    /// Defaults to [`Activation::Linear`] if not set.
    pub fn input_activation(mut self, input_activation: Activation) -> Self {
        self.0.input_activation = input_activation;
        self
    }

    /// Set the activation function of the hidden layer.
    /// Defaults to [`Activation::Sigmoid`] if not set.
    pub fn hidden_activation(mut self, hidden_activation: Activation) -> Self {
        self.0.hidden_activation = hidden_activation;
        self
    }

    /// Set the activation function of the output layer.
    /// Defaults to [`Activation::Linear`] if not set.
    pub fn output_activation(mut self, output_activation: Activation) -> Self {
        self.0.output_activation = output_activation;
        self
    }

    /// Set the rate at which backpropagation updates the weights.
    /// Defaults to `0.1` if not set.
    pub fn learning_rate(mut self, learning_rate: F) -> Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Set the fraction of the previous weight update added to the current
    /// one.
    /// Defaults to `0.5` if not set.
    pub fn momentum(mut self, momentum: F) -> Self {
        self.0.momentum = momentum;
        self
    }

    /// Set the minimum change in training error between two epochs under
    /// which training stops.
    /// Defaults to `1e-5` if not set.
    pub fn min_change(mut self, min_change: F) -> Self {
        self.0.min_change = min_change;
        self
    }

    /// Set the maximum number of epochs (one epoch is one complete pass over
    /// the training data).
    /// Defaults to `100` if not set.
    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.0.max_epochs = max_epochs;
        self
    }

    /// Set the number of training runs, each starting from new random
    /// weights; the best run is kept.
    /// Defaults to `1` if not set.
    pub fn n_restarts(mut self, n_restarts: usize) -> Self {
        self.0.n_restarts = n_restarts;
        self
    }

    /// Hold out this fraction of the training data as a validation set; the
    /// epoch with the lowest validation error is kept to mitigate
    /// overfitting.
    /// Defaults to `None` (no holdout) if not set.
    pub fn validation_ratio(mut self, validation_ratio: Option<F>) -> Self {
        self.0.validation_ratio = validation_ratio;
        self
    }

    /// Randomise the order of the training samples at every epoch so that
    /// training does not bias towards the sample ordering.
    /// Defaults to `true` if not set.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.0.shuffle = shuffle;
        self
    }

    /// Enables min-max scaling of both inputs and targets to [0, 1] using
    /// the training ranges; predictions are mapped back to the target range.
    /// Defaults to `false` if not set.
    pub fn scale_data(mut self, scale_data: bool) -> Self {
        self.0.scale_data = scale_data;
        self
    }

    /// Set the seed for weight initialisation, restarts, shuffling and the
    /// validation split.
    /// Defaults to `42` if not set.
    pub fn rng_seed(mut self, rng_seed: u64) -> Self {
        self.0.rng_seed = rng_seed;
        self
    }
}

impl<F: Float> ParamGuard for MlpParams<F> {
    type Checked = MlpValidParams<F>;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_hidden_neurons == 0 {
            Err(RegressionError::InvalidHiddenLayerSize)
        } else if self.0.learning_rate <= F::zero() {
            Err(RegressionError::InvalidLearningRate(
                self.0.learning_rate.to_f32().unwrap(),
            ))
        } else if self.0.momentum.is_negative() || self.0.momentum >= F::one() {
            Err(RegressionError::InvalidMomentum(
                self.0.momentum.to_f32().unwrap(),
            ))
        } else if self.0.min_change.is_negative() {
            Err(RegressionError::InvalidMinChange(
                self.0.min_change.to_f32().unwrap(),
            ))
        } else if self.0.max_epochs == 0 {
            Err(RegressionError::InvalidMaxEpochs)
        } else if self.0.n_restarts == 0 {
            Err(RegressionError::InvalidNumRestarts)
        } else if let Some(ratio) = self.0.validation_ratio {
            if ratio <= F::zero() || ratio >= F::one() {
                Err(RegressionError::InvalidValidationRatio(
                    ratio.to_f32().unwrap(),
                ))
            } else {
                Ok(&self.0)
            }
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

use ndarray::{Array1, ArrayBase, ArrayView1, Ix1, OwnedRepr, ViewRepr};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::{RegressionError, Result};
use super::hyperparams::{LogisticRegressionParams, LogisticRegressionValidParams};
use super::linear::{init_weights, prepare_single_target};
use super::traits::{Fit, Regressor};
use crate::datasets::RegressionData;
use crate::preprocessing::MinMaxScaler;
use crate::Float;

/// The logistic sigmoid, squashing any real value into (0, 1).
pub fn sigmoid<F: Float>(z: F) -> F {
    F::one() / (F::one() + (-z).exp())
}

/// The logistic regression estimator
///
/// Maps an N-dimensional input vector to a 1-dimensional output through a
/// sigmoid unit, trained by mini-batch gradient descent on the squared error.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression<F> {
    weights: ArrayBase<OwnedRepr<F>, Ix1>,
    bias: F,
    scaler: Option<MinMaxScaler<F>>,
    rms_training_error: F,
    n_epochs: usize,
}

impl<F: Float> LogisticRegression<F> {
    /// This method instantiates a logistic regression estimator with default
    /// parameters for the mini-batch training routine.
    pub fn params() -> LogisticRegressionParams<F> {
        LogisticRegressionParams::new()
    }

    /// This method is a getter for the weights vector.
    pub fn weights(&self) -> ArrayBase<ViewRepr<&F>, Ix1> {
        self.weights.view()
    }

    /// This method is a getter for the bias term.
    pub fn bias(&self) -> F {
        self.bias
    }

    /// The root-mean-square error over the training data at the last epoch.
    pub fn rms_training_error(&self) -> F {
        self.rms_training_error
    }

    /// The number of epochs the training routine actually ran.
    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }
}

impl<F: Float> Regressor<F> for LogisticRegression<F> {
    fn n_input_dimensions(&self) -> usize {
        self.weights.len()
    }

    fn n_target_dimensions(&self) -> usize {
        1
    }

    fn predict(&self, input: ArrayView1<F>) -> Result<Array1<F>> {
        if input.len() != self.weights.len() {
            return Err(RegressionError::InputDimensionMismatch {
                expected: self.weights.len(),
                found: input.len(),
            });
        }
        let input = match &self.scaler {
            Some(scaler) => scaler.transform(input),
            None => input.to_owned(),
        };
        let output = sigmoid(self.weights.dot(&input) + self.bias);
        Ok(Array1::from_elem(1, output))
    }
}

/// This implements the mini-batch gradient-descent training procedure for the
/// logistic regression model.
impl<F: Float> Fit<F> for LogisticRegressionValidParams<F> {
    /// If successful, the output of the training routine is an instance of
    /// [`LogisticRegression`] containing the fitted weights.
    type Object = LogisticRegression<F>;

    /// This method fits a [`LogisticRegression`] instance to a dataset with a
    /// 1-dimensional target.
    fn fit(&self, dataset: &RegressionData<F>) -> Result<Self::Object> {
        let (inputs, targets, scaler) = prepare_single_target(dataset, self.scale_inputs())?;
        let n_samples = F::cast(inputs.len());
        let n_features = dataset.n_input_dimensions();

        let mut rng = StdRng::seed_from_u64(self.rng_seed());
        let mut weights = init_weights(n_features, &mut rng);
        let mut bias = F::cast(rng.gen_range(-0.1..0.1));

        let indices: Vec<usize> = (0..inputs.len()).collect();
        let mut last_error = F::zero();
        let mut rms_error = F::zero();
        let mut n_epochs = 0;

        for epoch in 0..self.max_epochs() {
            let mut total_squared_error = F::zero();

            for batch in indices.chunks(self.batch_size()) {
                let mut weight_gradient = Array1::<F>::zeros(n_features);
                let mut bias_gradient = F::zero();

                for &i in batch {
                    let output = sigmoid(weights.dot(&inputs[i]) + bias);
                    let error = targets[i] - output;
                    total_squared_error += error * error;

                    weight_gradient.scaled_add(error, &inputs[i]);
                    bias_gradient += error;
                }

                let step = self.learning_rate() / F::cast(batch.len());
                weights.scaled_add(step, &weight_gradient);
                bias += step * bias_gradient;
            }

            rms_error = (total_squared_error / n_samples).sqrt();
            n_epochs = epoch + 1;
            log::trace!(
                "logistic regression epoch {} :: sum squared error {}",
                epoch,
                total_squared_error
            );

            if epoch > 0 && (last_error - total_squared_error).abs() < self.min_change() {
                break;
            }
            last_error = total_squared_error;
        }

        log::debug!(
            "logistic regression trained in {} epochs, rms training error {}",
            n_epochs,
            rms_error
        );

        Ok(LogisticRegression {
            weights,
            bias,
            scaler,
            rms_training_error: rms_error,
            n_epochs,
        })
    }
}

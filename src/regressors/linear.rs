use ndarray::{Array1, ArrayBase, ArrayView1, Ix1, OwnedRepr, ViewRepr};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::{RegressionError, Result};
use super::hyperparams::{LinearRegressionParams, LinearRegressionValidParams};
use super::traits::{Fit, Regressor};
use crate::datasets::RegressionData;
use crate::preprocessing::MinMaxScaler;
use crate::Float;

/// The linear regression estimator
///
/// Maps an N-dimensional input vector to a 1-dimensional output through a
/// weighted sum plus bias, trained by batch gradient descent on the squared
/// error.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression<F> {
    weights: ArrayBase<OwnedRepr<F>, Ix1>,
    bias: F,
    scaler: Option<MinMaxScaler<F>>,
    rms_training_error: F,
    n_epochs: usize,
}

impl<F: Float> LinearRegression<F> {
    /// This method instantiates a linear regression estimator with default
    /// parameters for the gradient-descent training routine.
    pub fn params() -> LinearRegressionParams<F> {
        LinearRegressionParams::new()
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

impl<F: Float> Regressor<F> for LinearRegression<F> {
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
        let output = self.weights.dot(&input) + self.bias;
        Ok(Array1::from_elem(1, output))
    }
}

/// This implements the gradient-descent training procedure for the linear
/// regression model.
impl<F: Float> Fit<F> for LinearRegressionValidParams<F> {
    /// If successful, the output of the training routine is an instance of
    /// [`LinearRegression`] containing the fitted weights.
    type Object = LinearRegression<F>;

    /// This method fits a [`LinearRegression`] instance to a dataset with a
    /// 1-dimensional target.
    fn fit(&self, dataset: &RegressionData<F>) -> Result<Self::Object> {
        let (inputs, targets, scaler) = prepare_single_target(dataset, self.scale_inputs())?;
        let n_samples = F::cast(inputs.len());
        let n_features = dataset.n_input_dimensions();

        let mut rng = StdRng::seed_from_u64(self.rng_seed());
        let mut weights = init_weights(n_features, &mut rng);
        let mut bias = F::cast(rng.gen_range(-0.1..0.1));

        let mut last_error = F::zero();
        let mut rms_error = F::zero();
        let mut n_epochs = 0;

        for epoch in 0..self.max_epochs() {
            let mut total_squared_error = F::zero();

            for (input, &target) in inputs.iter().zip(targets.iter()) {
                let output = weights.dot(input) + bias;
                let error = target - output;
                total_squared_error += error * error;

                let step = self.learning_rate() * error;
                weights.scaled_add(step, input);
                bias += step;
            }

            rms_error = (total_squared_error / n_samples).sqrt();
            n_epochs = epoch + 1;
            log::trace!(
                "linear regression epoch {} :: sum squared error {}",
                epoch,
                total_squared_error
            );

            if epoch > 0 && (last_error - total_squared_error).abs() < self.min_change() {
                break;
            }
            last_error = total_squared_error;
        }

        log::debug!(
            "linear regression trained in {} epochs, rms training error {}",
            n_epochs,
            rms_error
        );

        Ok(LinearRegression {
            weights,
            bias,
            scaler,
            rms_training_error: rms_error,
            n_epochs,
        })
    }
}

/// This function validates a single-target dataset and returns its inputs
/// (scaled when requested), its flattened targets and the fitted scaler.
pub(super) fn prepare_single_target<F: Float>(
    dataset: &RegressionData<F>,
    scale_inputs: bool,
) -> Result<(Vec<Array1<F>>, Vec<F>, Option<MinMaxScaler<F>>)> {
    if dataset.n_samples() == 0 {
        return Err(RegressionError::EmptyDataset);
    }
    if dataset.n_target_dimensions() != 1 {
        return Err(RegressionError::UnsupportedTargetDimension(
            dataset.n_target_dimensions(),
        ));
    }

    let scaler = scale_inputs.then(|| MinMaxScaler::from_ranges(dataset.input_ranges()));
    let inputs: Vec<Array1<F>> = dataset
        .iter()
        .map(|sample| match &scaler {
            Some(scaler) => scaler.transform(sample.input()),
            None => sample.input().to_owned(),
        })
        .collect();
    let targets: Vec<F> = dataset.iter().map(|sample| sample.target()[0]).collect();

    Ok((inputs, targets, scaler))
}

/// Random weights uniformly drawn from [-0.1, 0.1].
pub(super) fn init_weights<F: Float>(n_features: usize, rng: &mut StdRng) -> Array1<F> {
    Array1::from_iter((0..n_features).map(|_| F::cast(rng.gen_range(-0.1..0.1))))
}

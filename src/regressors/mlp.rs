use ndarray::{s, Array1, Array2, ArrayView1, Axis};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::error::{RegressionError, Result};
use super::hyperparams::{MlpParams, MlpValidParams};
use super::logistic::sigmoid;
use super::traits::{Fit, Regressor};
use crate::datasets::RegressionData;
use crate::preprocessing::MinMaxScaler;
use crate::Float;

/// Neuron activation functions available to the MLP layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Linear,
    Sigmoid,
    Tanh,
}

impl Activation {
    pub fn apply<F: Float>(self, z: F) -> F {
        match self {
            Activation::Linear => z,
            Activation::Sigmoid => sigmoid(z),
            Activation::Tanh => z.tanh(),
        }
    }

    /// The derivative expressed in terms of the activated output, which is
    /// what backpropagation has at hand.
    pub fn derivative<F: Float>(self, output: F) -> F {
        match self {
            Activation::Linear => F::one(),
            Activation::Sigmoid => output * (F::one() - output),
            Activation::Tanh => F::one() - output * output,
        }
    }
}

/// The activation function of each layer of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Activations {
    input: Activation,
    hidden: Activation,
    output: Activation,
}

/// The weight matrices of the network. Each matrix carries the bias of its
/// layer as a trailing column, so a layer computes `W * [x, 1]`.
#[derive(Debug, Clone, PartialEq)]
struct Layers<F> {
    hidden: Array2<F>,
    output: Array2<F>,
}

impl<F: Float> Layers<F> {
    /// Random initialisation with weights uniformly drawn from
    /// [-1/sqrt(fan_in), 1/sqrt(fan_in)].
    fn init(n_inputs: usize, n_hidden: usize, n_outputs: usize, rng: &mut StdRng) -> Self {
        Layers {
            hidden: random_matrix(n_hidden, n_inputs + 1, rng),
            output: random_matrix(n_outputs, n_hidden + 1, rng),
        }
    }

    /// One forward pass; returns the activated input, the hidden layer
    /// output and the network output.
    fn forward(
        &self,
        activations: &Activations,
        input: ArrayView1<F>,
    ) -> (Array1<F>, Array1<F>, Array1<F>) {
        let activated_input = input.map(|&value| activations.input.apply(value));
        let hidden_out = self
            .hidden
            .dot(&augment(activated_input.view()))
            .map(|&z| activations.hidden.apply(z));
        let output = self
            .output
            .dot(&augment(hidden_out.view()))
            .map(|&z| activations.output.apply(z));
        (activated_input, hidden_out, output)
    }
}

fn random_matrix<F: Float>(n_rows: usize, n_cols: usize, rng: &mut StdRng) -> Array2<F> {
    let bound = 1. / (n_cols as f64).sqrt();
    Array2::from_shape_fn((n_rows, n_cols), |_| F::cast(rng.gen_range(-bound..bound)))
}

/// Appends the constant bias input to a vector.
fn augment<F: Float>(values: ArrayView1<F>) -> Array1<F> {
    Array1::from_iter(values.iter().copied().chain(std::iter::once(F::one())))
}

fn outer<F: Float>(column: ArrayView1<F>, row: ArrayView1<F>) -> Array2<F> {
    let column = column.insert_axis(Axis(1));
    let row = row.insert_axis(Axis(0));
    column.dot(&row)
}

/// The multi layer perceptron estimator
///
/// A fully-connected network with one hidden layer mapping an N-dimensional
/// input to a K-dimensional output, trained by backpropagation with momentum.
/// Training can hold out a validation set to mitigate overfitting and can be
/// restarted from several random initialisations, keeping the best run.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp<F> {
    layers: Layers<F>,
    activations: Activations,
    input_scaler: Option<MinMaxScaler<F>>,
    target_scaler: Option<MinMaxScaler<F>>,
    rms_training_error: F,
    n_epochs: usize,
}

impl<F: Float> Mlp<F> {
    /// This method instantiates an MLP estimator with default parameters for
    /// the backpropagation training routine.
    pub fn params() -> MlpParams<F> {
        MlpParams::new()
    }

    pub fn n_hidden_neurons(&self) -> usize {
        self.layers.hidden.nrows()
    }

    /// The root-mean-square error the kept training run reached, measured on
    /// the validation set when a holdout was used and on the training data
    /// otherwise.
    pub fn rms_training_error(&self) -> F {
        self.rms_training_error
    }

    /// The number of epochs the kept training run actually ran.
    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }
}

impl<F: Float> Regressor<F> for Mlp<F> {
    fn n_input_dimensions(&self) -> usize {
        self.layers.hidden.ncols() - 1
    }

    fn n_target_dimensions(&self) -> usize {
        self.layers.output.nrows()
    }

    fn predict(&self, input: ArrayView1<F>) -> Result<Array1<F>> {
        let n_inputs = self.n_input_dimensions();
        if input.len() != n_inputs {
            return Err(RegressionError::InputDimensionMismatch {
                expected: n_inputs,
                found: input.len(),
            });
        }
        let input = match &self.input_scaler {
            Some(scaler) => scaler.transform(input),
            None => input.to_owned(),
        };
        let (_, _, output) = self.layers.forward(&self.activations, input.view());
        Ok(match &self.target_scaler {
            Some(scaler) => scaler.inverse_transform(output.view()),
            None => output,
        })
    }
}

/// The outcome of one training run, scored on the validation set when a
/// holdout is used and on the training data otherwise.
struct TrainingRun<F> {
    layers: Layers<F>,
    mean_squared_error: F,
    n_epochs: usize,
}

/// This implements the backpropagation training procedure for the MLP.
impl<F: Float> Fit<F> for MlpValidParams<F> {
    /// If successful, the output of the training routine is an instance of
    /// [`Mlp`] containing the fitted layer weights.
    type Object = Mlp<F>;

    /// This method fits an [`Mlp`] instance to a dataset.
    fn fit(&self, dataset: &RegressionData<F>) -> Result<Self::Object> {
        if dataset.n_samples() == 0 {
            return Err(RegressionError::EmptyDataset);
        }
        if dataset.n_target_dimensions() == 0 {
            return Err(RegressionError::UnsupportedTargetDimension(0));
        }

        let input_scaler = self
            .scale_data()
            .then(|| MinMaxScaler::from_ranges(dataset.input_ranges()));
        let target_scaler = self
            .scale_data()
            .then(|| MinMaxScaler::from_ranges(dataset.target_ranges()));

        let inputs: Vec<Array1<F>> = dataset
            .iter()
            .map(|sample| match &input_scaler {
                Some(scaler) => scaler.transform(sample.input()),
                None => sample.input().to_owned(),
            })
            .collect();
        let targets: Vec<Array1<F>> = dataset
            .iter()
            .map(|sample| match &target_scaler {
                Some(scaler) => scaler.transform(sample.target()),
                None => sample.target().to_owned(),
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(self.rng_seed());

        // Hold out the validation samples once, shared by every restart.
        let mut train_indices: Vec<usize> = (0..inputs.len()).collect();
        let mut validation_indices = Vec::new();
        if let Some(ratio) = self.validation_ratio() {
            train_indices.shuffle(&mut rng);
            let n_validation = (ratio * F::cast(train_indices.len())).as_();
            validation_indices = train_indices.split_off(train_indices.len() - n_validation);
            if train_indices.is_empty() {
                return Err(RegressionError::EmptyTrainingSplit);
            }
        }

        let mut best: Option<TrainingRun<F>> = None;
        for restart in 0..self.n_restarts() {
            let run = self.train_once(
                &inputs,
                &targets,
                &train_indices,
                &validation_indices,
                &mut rng,
            );
            log::debug!(
                "mlp restart {} :: mean squared error {} after {} epochs",
                restart,
                run.mean_squared_error,
                run.n_epochs
            );
            let improved = match &best {
                Some(best_run) => run.mean_squared_error < best_run.mean_squared_error,
                None => true,
            };
            if improved {
                best = Some(run);
            }
        }

        // n_restarts is validated to be positive, so a run always exists.
        let run = best.ok_or(RegressionError::InvalidNumRestarts)?;

        Ok(Mlp {
            layers: run.layers,
            activations: Activations {
                input: self.input_activation(),
                hidden: self.hidden_activation(),
                output: self.output_activation(),
            },
            input_scaler,
            target_scaler,
            rms_training_error: run.mean_squared_error.sqrt(),
            n_epochs: run.n_epochs,
        })
    }
}

impl<F: Float> MlpValidParams<F> {
    /// One full backpropagation run from a fresh random initialisation.
    fn train_once(
        &self,
        inputs: &[Array1<F>],
        targets: &[Array1<F>],
        train_indices: &[usize],
        validation_indices: &[usize],
        rng: &mut StdRng,
    ) -> TrainingRun<F> {
        let n_inputs = inputs[0].len();
        let n_outputs = targets[0].len();
        let activations = Activations {
            input: self.input_activation(),
            hidden: self.hidden_activation(),
            output: self.output_activation(),
        };

        let mut layers = Layers::init(n_inputs, self.n_hidden_neurons(), n_outputs, rng);
        let mut hidden_momentum = Array2::<F>::zeros(layers.hidden.dim());
        let mut output_momentum = Array2::<F>::zeros(layers.output.dim());

        let mut order = train_indices.to_vec();
        let n_train = F::cast(order.len());
        let use_validation = !validation_indices.is_empty();

        let mut best_score = F::infinity();
        let mut best_layers = layers.clone();
        let mut best_epoch = 0;
        let mut last_error = F::zero();

        for epoch in 0..self.max_epochs() {
            if self.shuffle() {
                order.shuffle(rng);
            }

            let mut total_squared_error = F::zero();
            for &i in &order {
                let (activated_input, hidden_out, output) =
                    layers.forward(&activations, inputs[i].view());
                let error = &targets[i] - &output;
                total_squared_error += error.iter().map(|&e| e * e).sum::<F>();

                let output_delta = Array1::from_iter(
                    error
                        .iter()
                        .zip(output.iter())
                        .map(|(&e, &y)| e * activations.output.derivative(y)),
                );
                let back_propagated = layers
                    .output
                    .slice(s![.., ..hidden_out.len()])
                    .t()
                    .dot(&output_delta);
                let hidden_delta = Array1::from_iter(
                    back_propagated
                        .iter()
                        .zip(hidden_out.iter())
                        .map(|(&b, &y)| b * activations.hidden.derivative(y)),
                );

                let output_gradient =
                    outer(output_delta.view(), augment(hidden_out.view()).view());
                let hidden_gradient =
                    outer(hidden_delta.view(), augment(activated_input.view()).view());

                output_momentum =
                    output_gradient * self.learning_rate() + &output_momentum * self.momentum();
                layers.output += &output_momentum;
                hidden_momentum =
                    hidden_gradient * self.learning_rate() + &hidden_momentum * self.momentum();
                layers.hidden += &hidden_momentum;
            }

            let train_error = total_squared_error / n_train;
            let score = if use_validation {
                mean_squared_error(&layers, &activations, inputs, targets, validation_indices)
            } else {
                train_error
            };
            log::trace!(
                "mlp epoch {} :: train error {} :: score {}",
                epoch,
                train_error,
                score
            );

            if score < best_score {
                best_score = score;
                best_layers = layers.clone();
                best_epoch = epoch + 1;
            }

            if epoch > 0 && (last_error - total_squared_error).abs() < self.min_change() {
                break;
            }
            last_error = total_squared_error;
        }

        TrainingRun {
            layers: best_layers,
            mean_squared_error: best_score,
            n_epochs: best_epoch,
        }
    }
}

fn mean_squared_error<F: Float>(
    layers: &Layers<F>,
    activations: &Activations,
    inputs: &[Array1<F>],
    targets: &[Array1<F>],
    indices: &[usize],
) -> F {
    let mut total = F::zero();
    for &i in indices {
        let (_, _, output) = layers.forward(activations, inputs[i].view());
        total += (&targets[i] - &output).iter().map(|&e| e * e).sum::<F>();
    }
    total / F::cast(indices.len())
}

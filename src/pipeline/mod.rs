mod error;


pub use error::{PipelineError, Result};

use ndarray::{Array1, ArrayView1};

use crate::datasets::RegressionData;
use crate::regressors::traits::{Fit, Regressor};
use crate::Float;

/// The error metrics accumulated over one test run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult<F> {
    pub n_samples: usize,
    pub total_squared_error: F,
    pub rms_error: F,
}

/// A pipeline wrapping a single regression algorithm behind a
/// train/test/predict state machine.
///
/// The pipeline is built from an (unchecked) hyperparameter set. Training
/// fits the model; testing and prediction are rejected until a training run
/// has succeeded. Dimensionality mismatches between the fitted model and a
/// dataset or query are detected before any model call.
pub struct RegressionPipeline<F: Float, P: Fit<F>> {
    params: P,
    model: Option<P::Object>,
    test_result: Option<TestResult<F>>,
}

impl<F: Float, P: Fit<F>> RegressionPipeline<F, P>
where
    P::Object: Regressor<F>,
{
    /// This method instantiates a pipeline around a regression algorithm
    /// configuration.
    pub fn new(params: P) -> Self {
        RegressionPipeline {
            params,
            model: None,
            test_result: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// This method is a getter for the fitted model, if training succeeded.
    pub fn model(&self) -> Option<&P::Object> {
        self.model.as_ref()
    }

    /// This method fits the wrapped algorithm to the training dataset. A
    /// failed training run leaves the pipeline untrained and clears any
    /// previous test result.
    pub fn train(&mut self, data: &RegressionData<F>) -> Result<()> {
        self.model = None;
        self.test_result = None;
        let model = self.params.fit(data).map_err(PipelineError::Train)?;
        self.model = Some(model);
        Ok(())
    }

    /// This method runs prediction over every sample of the test dataset and
    /// accumulates the squared error against the targets.
    pub fn test(&mut self, data: &RegressionData<F>) -> Result<TestResult<F>> {
        self.test_result = None;
        let model = self.model.as_ref().ok_or(PipelineError::NotTrained)?;
        check_dimensions(model, data)?;

        let mut total_squared_error = F::zero();
        for sample in data.iter() {
            let prediction = model.predict(sample.input()).map_err(PipelineError::Test)?;
            total_squared_error += (&prediction - &sample.target())
                .iter()
                .map(|&e| e * e)
                .sum::<F>();
        }

        let n_samples = data.n_samples();
        let rms_error = if n_samples == 0 {
            F::zero()
        } else {
            (total_squared_error / F::cast(n_samples)).sqrt()
        };
        let result = TestResult {
            n_samples,
            total_squared_error,
            rms_error,
        };
        self.test_result = Some(result);
        Ok(result)
    }

    /// This method maps an input vector through the trained model.
    pub fn predict(&self, input: ArrayView1<F>) -> Result<Array1<F>> {
        let model = self.model.as_ref().ok_or(PipelineError::NotTrained)?;
        model.predict(input).map_err(PipelineError::Predict)
    }

    /// The root-mean-square error of the last successful test run.
    pub fn test_rms_error(&self) -> Result<F> {
        self.test_result
            .map(|result| result.rms_error)
            .ok_or(PipelineError::NotTested)
    }

    /// The total squared error of the last successful test run.
    pub fn test_ss_error(&self) -> Result<F> {
        self.test_result
            .map(|result| result.total_squared_error)
            .ok_or(PipelineError::NotTested)
    }
}

fn check_dimensions<F: Float, R: Regressor<F>>(
    model: &R,
    data: &RegressionData<F>,
) -> Result<()> {
    if data.n_input_dimensions() != model.n_input_dimensions() {
        return Err(PipelineError::InputDimensionMismatch {
            expected: model.n_input_dimensions(),
            found: data.n_input_dimensions(),
        });
    }
    if data.n_target_dimensions() != model.n_target_dimensions() {
        return Err(PipelineError::TargetDimensionMismatch {
            expected: model.n_target_dimensions(),
            found: data.n_target_dimensions(),
        });
    }
    Ok(())
}

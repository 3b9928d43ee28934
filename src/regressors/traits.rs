use ndarray::{Array1, ArrayView1};

use super::error::Result;
use crate::datasets::RegressionData;
use crate::Float;

/// Fit trait
///
/// The fittable trait allows an estimator to be fitted to a dataset of paired
/// input and target vectors. More formally, the model estimates weights that
/// minimize an empirical risk (loss function) over the dataset.
pub trait Fit<F: Float> {
    type Object;

    fn fit(&self, dataset: &RegressionData<F>) -> Result<Self::Object>;
}

/// A fitted regression model mapping an input vector to an output vector.
///
/// Implementors carry their own input and target dimensionality, which the
/// pipeline uses to validate datasets and queries before any model call.
pub trait Regressor<F: Float> {
    fn n_input_dimensions(&self) -> usize;

    fn n_target_dimensions(&self) -> usize;

    fn predict(&self, input: ArrayView1<F>) -> Result<Array1<F>>;
}

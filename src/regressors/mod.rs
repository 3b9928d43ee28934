#[cfg(test)]
mod tests;

pub mod error;
pub mod hyperparams;
pub mod linear;
pub mod logistic;
pub mod mlp;
pub mod traits;

pub use error::{RegressionError, Result};
pub use hyperparams::{
    LinearRegressionParams, LinearRegressionValidParams, LogisticRegressionParams,
    LogisticRegressionValidParams, MlpParams, MlpValidParams,
};
pub use linear::LinearRegression;
pub use logistic::LogisticRegression;
pub use mlp::{Activation, Mlp};
pub use traits::{Fit, Regressor};

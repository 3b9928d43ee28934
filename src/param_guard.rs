use crate::datasets::RegressionData;
use crate::regressors::error::Result;
use crate::regressors::traits::Fit;
use crate::Float;

/// A set of hyperparameters whose values have not been checked for validity. A reference to the
/// checked hyperparameters can only be obtained after checking has completed. If the
/// `Fit` trait has been implemented on the checked hyperparameters, it will also be
/// implemented on the unchecked hyperparameters with the checking step done automatically.
///
/// The hyperparameter validation done in `check_ref()` and `check()` should be identical.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;

    /// Checks the hyperparameters and returns a reference to the checked hyperparameters if
    /// successful
    fn check_ref(&self) -> Result<&Self::Checked>;

    /// Checks the hyperparameters and returns the checked hyperparameters if successful
    fn check(self) -> Result<Self::Checked>;

    /// Calls `check()` and unwraps the result
    fn check_unwrap(self) -> Self::Checked
    where
        Self: Sized,
    {
        self.check().unwrap()
    }
}

/// Performs checking step and calls `fit` on the checked hyperparameters. If checking failed, the
/// checking error is returned in place of the fitting result.
impl<F: Float, P: ParamGuard> Fit<F> for P
where
    P::Checked: Fit<F>,
{
    type Object = <<P as ParamGuard>::Checked as Fit<F>>::Object;

    fn fit(&self, dataset: &RegressionData<F>) -> Result<Self::Object> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}

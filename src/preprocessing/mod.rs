
use ndarray::{Array1, ArrayView1};

use crate::datasets::DimensionRange;
use crate::Float;

/// Per-dimension min-max scaler mapping values into the unit range.
///
/// The regressors fit a scaler on the training ranges and apply it to every
/// input (and, for the MLP, every target) before touching the model, so that
/// prediction-time inputs are mapped exactly like the data the model was
/// trained on. Values outside the fitted range scale outside [0, 1]; no
/// clamping is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler<F> {
    ranges: Vec<DimensionRange<F>>,
}

impl<F: Float> MinMaxScaler<F> {
    pub fn from_ranges(ranges: Vec<DimensionRange<F>>) -> Self {
        MinMaxScaler { ranges }
    }

    pub fn n_dimensions(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[DimensionRange<F>] {
        &self.ranges
    }

    /// This method maps each value into [0, 1] relative to its fitted range.
    /// A dimension with a collapsed range maps onto zero.
    pub fn transform(&self, values: ArrayView1<F>) -> Array1<F> {
        Array1::from_iter(self.ranges.iter().zip(values.iter()).map(|(range, &value)| {
            let width = range.width();
            if width == F::zero() {
                F::zero()
            } else {
                (value - range.min) / width
            }
        }))
    }

    /// This method maps unit-range values back into the fitted range. It is
    /// the inverse of [`MinMaxScaler::transform`] for non-collapsed ranges.
    pub fn inverse_transform(&self, values: ArrayView1<F>) -> Array1<F> {
        Array1::from_iter(
            self.ranges
                .iter()
                .zip(values.iter())
                .map(|(range, &value)| range.min + value * range.width()),
        )
    }
}

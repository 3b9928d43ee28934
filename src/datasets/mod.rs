mod error;
mod format;

#[cfg(test)]
mod tests;

pub use error::{DatasetError, Result};

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::slice::Iter;

use ndarray::{Array1, ArrayView1};

use crate::Float;

/// The observed minimum and maximum of a single dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionRange<F> {
    pub min: F,
    pub max: F,
}

impl<F: Float> DimensionRange<F> {
    pub fn new(min: F, max: F) -> Self {
        DimensionRange { min, max }
    }

    /// A range collapsed onto a single value.
    pub fn degenerate(value: F) -> Self {
        DimensionRange {
            min: value,
            max: value,
        }
    }

    /// Grows the range so that it covers `value`.
    pub fn expand(&mut self, value: F) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    pub fn width(&self) -> F {
        self.max - self.min
    }
}

/// One paired observation: an input vector and the target vector it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionSample<F> {
    input: Array1<F>,
    target: Array1<F>,
}

impl<F: Float> RegressionSample<F> {
    pub fn new(input: Array1<F>, target: Array1<F>) -> Self {
        RegressionSample { input, target }
    }

    pub fn input(&self) -> ArrayView1<F> {
        self.input.view()
    }

    pub fn target(&self) -> ArrayView1<F> {
        self.target.view()
    }
}

/// External min/max ranges stored alongside a dataset. When present, they
/// override the ranges observed from the stored samples, which lets a dataset
/// be scaled consistently with data recorded elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalRanges<F> {
    pub input: Vec<DimensionRange<F>>,
    pub target: Vec<DimensionRange<F>>,
}

/// An in-memory collection of paired (input vector, target vector) samples.
///
/// Datasets are usually loaded from a file with [`RegressionData::load`] and
/// fed to a [`RegressionPipeline`](crate::pipeline::RegressionPipeline) for
/// training or testing.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionData<F> {
    name: String,
    info: String,
    n_input_dimensions: usize,
    n_target_dimensions: usize,
    samples: Vec<RegressionSample<F>>,
    external_ranges: Option<ExternalRanges<F>>,
}

impl<F: Float> RegressionData<F> {
    /// This method instantiates an empty dataset with the given input and
    /// target dimensionalities.
    pub fn new(n_input_dimensions: usize, n_target_dimensions: usize) -> Self {
        RegressionData {
            name: String::from("NOT_SET"),
            info: String::new(),
            n_input_dimensions,
            n_target_dimensions,
            samples: Vec::new(),
            external_ranges: None,
        }
    }

    /// This method loads a dataset from a file in the labelled regression
    /// data format.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        format::read_from(BufReader::new(file))
    }

    /// This method writes the dataset back out in the labelled regression
    /// data format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        format::write_to(self, BufWriter::new(file))
    }

    /// This method appends a sample after checking its dimensionality.
    pub fn add_sample(&mut self, input: Array1<F>, target: Array1<F>) -> Result<()> {
        if input.len() != self.n_input_dimensions {
            return Err(DatasetError::DimensionMismatch {
                expected: self.n_input_dimensions,
                found: input.len(),
            });
        }
        if target.len() != self.n_target_dimensions {
            return Err(DatasetError::DimensionMismatch {
                expected: self.n_target_dimensions,
                found: target.len(),
            });
        }
        self.samples.push(RegressionSample::new(input, target));
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    /// Overrides the observed ranges with externally supplied ones. The
    /// supplied vectors must cover every input and target dimension.
    pub fn set_external_ranges(
        &mut self,
        input: Vec<DimensionRange<F>>,
        target: Vec<DimensionRange<F>>,
    ) -> Result<()> {
        if input.len() != self.n_input_dimensions {
            return Err(DatasetError::DimensionMismatch {
                expected: self.n_input_dimensions,
                found: input.len(),
            });
        }
        if target.len() != self.n_target_dimensions {
            return Err(DatasetError::DimensionMismatch {
                expected: self.n_target_dimensions,
                found: target.len(),
            });
        }
        self.external_ranges = Some(ExternalRanges { input, target });
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn n_input_dimensions(&self) -> usize {
        self.n_input_dimensions
    }

    pub fn n_target_dimensions(&self) -> usize {
        self.n_target_dimensions
    }

    pub fn sample(&self, index: usize) -> Option<&RegressionSample<F>> {
        self.samples.get(index)
    }

    pub fn samples(&self) -> &[RegressionSample<F>] {
        &self.samples
    }

    pub fn iter(&self) -> Iter<'_, RegressionSample<F>> {
        self.samples.iter()
    }

    pub fn uses_external_ranges(&self) -> bool {
        self.external_ranges.is_some()
    }

    pub(crate) fn external_ranges(&self) -> Option<&ExternalRanges<F>> {
        self.external_ranges.as_ref()
    }

    /// This method returns the per-dimension input ranges: the external ones
    /// when set, otherwise the ranges observed from the stored samples.
    pub fn input_ranges(&self) -> Vec<DimensionRange<F>> {
        match &self.external_ranges {
            Some(ranges) => ranges.input.clone(),
            None => observed_ranges(&self.samples, self.n_input_dimensions, |s| s.input()),
        }
    }

    /// This method returns the per-dimension target ranges: the external ones
    /// when set, otherwise the ranges observed from the stored samples.
    pub fn target_ranges(&self) -> Vec<DimensionRange<F>> {
        match &self.external_ranges {
            Some(ranges) => ranges.target.clone(),
            None => observed_ranges(&self.samples, self.n_target_dimensions, |s| s.target()),
        }
    }

    /// This method computes the summary statistics printed by the drivers
    /// after loading a dataset.
    pub fn stats(&self) -> DatasetStats<F> {
        DatasetStats {
            name: self.name.clone(),
            n_samples: self.n_samples(),
            n_input_dimensions: self.n_input_dimensions,
            n_target_dimensions: self.n_target_dimensions,
            input_ranges: self.input_ranges(),
            target_ranges: self.target_ranges(),
        }
    }

    /// This method builds a new dataset from the samples at the given indices,
    /// preserving the order of `indices`. Out-of-bounds indices are skipped.
    pub fn subset(&self, indices: &[usize]) -> RegressionData<F> {
        let mut subset = RegressionData::new(self.n_input_dimensions, self.n_target_dimensions);
        subset.name = self.name.clone();
        subset.info = self.info.clone();
        subset.external_ranges = self.external_ranges.clone();
        for &index in indices {
            if let Some(sample) = self.samples.get(index) {
                subset.samples.push(sample.clone());
            }
        }
        subset
    }

    /// This method splits the dataset in two, the first part holding
    /// `fraction` of the samples (rounded down) in their original order.
    pub fn split_at_fraction(&self, fraction: F) -> (RegressionData<F>, RegressionData<F>) {
        let n_first = (fraction * F::cast(self.n_samples())).as_();
        let n_first = usize::min(n_first, self.n_samples());
        let first: Vec<usize> = (0..n_first).collect();
        let second: Vec<usize> = (n_first..self.n_samples()).collect();
        (self.subset(&first), self.subset(&second))
    }
}

fn observed_ranges<F: Float>(
    samples: &[RegressionSample<F>],
    n_dimensions: usize,
    accessor: impl Fn(&RegressionSample<F>) -> ArrayView1<F>,
) -> Vec<DimensionRange<F>> {
    let mut ranges = vec![DimensionRange::degenerate(F::zero()); n_dimensions];
    for (index, sample) in samples.iter().enumerate() {
        let values = accessor(sample);
        for (range, &value) in ranges.iter_mut().zip(values.iter()) {
            if index == 0 {
                *range = DimensionRange::degenerate(value);
            } else {
                range.expand(value);
            }
        }
    }
    ranges
}

/// Summary statistics for a dataset, with a human-readable `Display`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats<F> {
    pub name: String,
    pub n_samples: usize,
    pub n_input_dimensions: usize,
    pub n_target_dimensions: usize,
    pub input_ranges: Vec<DimensionRange<F>>,
    pub target_ranges: Vec<DimensionRange<F>>,
}

impl<F: Float> fmt::Display for DatasetStats<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DatasetName: {}", self.name)?;
        writeln!(f, "NumSamples: {}", self.n_samples)?;
        writeln!(f, "NumInputDimensions: {}", self.n_input_dimensions)?;
        writeln!(f, "NumTargetDimensions: {}", self.n_target_dimensions)?;
        for (j, range) in self.input_ranges.iter().enumerate() {
            writeln!(f, "Input {} range: [{}, {}]", j, range.min, range.max)?;
        }
        for (k, range) in self.target_ranges.iter().enumerate() {
            writeln!(f, "Target {} range: [{}, {}]", k, range.min, range.max)?;
        }
        Ok(())
    }
}

/// This module contains helpers functions to efficiently write tests.
pub mod test_helpers {
    use approx::AbsDiffEq;
    use ndarray::{array, Array1, ArrayView1};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    use crate::datasets::RegressionData;
    use crate::Float;

    pub fn assert_array_all_close<F>(x: ArrayView1<F>, y: ArrayView1<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.len(), y.len());
        for i in 0..x.len() {
            if x[i].abs_diff_ne(&y[i], delta) {
                panic!("x: {}, y: {} ; with precision level {}", x[i], y[i], delta);
            }
        }
    }

    /// The four-corner xor dataset, the classic small MLP benchmark.
    pub fn xor_dataset() -> RegressionData<f64> {
        let mut data = RegressionData::new(2, 1);
        data.set_name("xor");
        data.add_sample(array![0., 0.], array![0.]).unwrap();
        data.add_sample(array![0., 1.], array![1.]).unwrap();
        data.add_sample(array![1., 0.], array![1.]).unwrap();
        data.add_sample(array![1., 1.], array![0.]).unwrap();
        data
    }

    /// Generates a dataset whose target is a fixed linear function of inputs
    /// drawn uniformly from [0, 1), plus Gaussian noise. Returns the dataset
    /// together with the true weights and bias.
    pub fn generate_linear_dataset(
        n_samples: usize,
        n_features: usize,
        noise_level: f64,
    ) -> (RegressionData<f64>, Array1<f64>, f64) {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = Normal::new(0., 1.).unwrap();

        let true_weights = Array1::from_iter((0..n_features).map(|_| rng.gen_range(-1.0..1.0)));
        let true_bias = rng.gen_range(-1.0..1.0);

        let mut data = RegressionData::new(n_features, 1);
        data.set_name("synthetic_linear");
        for _ in 0..n_samples {
            let input = Array1::from_iter((0..n_features).map(|_| rng.gen_range(0.0..1.0)));
            let target =
                true_weights.dot(&input) + true_bias + noise_level * normal.sample(&mut rng);
            data.add_sample(input, array![target]).unwrap();
        }

        (data, true_weights, true_bias)
    }

    /// Generates a 1-dimensional threshold dataset: the target is 1 when the
    /// input is above 0.5 and 0 otherwise.
    pub fn generate_threshold_dataset(n_samples: usize) -> RegressionData<f64> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut data = RegressionData::new(1, 1);
        data.set_name("synthetic_threshold");
        for _ in 0..n_samples {
            let x: f64 = rng.gen_range(0.0..1.0);
            let t = if x > 0.5 { 1. } else { 0. };
            data.add_sample(array![x], array![t]).unwrap();
        }
        data
    }
}

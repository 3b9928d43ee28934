use ndarray::array;

use super::mlp::Activation;
use super::{
    Fit, LinearRegression, LogisticRegression, Mlp, RegressionError, Regressor,
};
use crate::datasets::RegressionData;
use crate::helpers::test_helpers::{
    assert_array_all_close, generate_linear_dataset, generate_threshold_dataset, xor_dataset,
};
use crate::param_guard::ParamGuard;

#[test]
fn linear_recovers_linear_function() {
    let (data, true_weights, true_bias) = generate_linear_dataset(200, 3, 0.);

    let model = LinearRegression::params()
        .learning_rate(0.05)
        .max_epochs(2000)
        .min_change(0.)
        .fit(&data)
        .unwrap();

    let input = array![0.2, 0.5, 0.8];
    let expected = true_weights.dot(&input) + true_bias;
    let prediction = model.predict(input.view()).unwrap();
    assert!(
        (prediction[0] - expected).abs() < 0.05,
        "prediction {} too far from {}",
        prediction[0],
        expected
    );
    assert!(model.rms_training_error() < 0.05);
}

#[test]
fn linear_fit_is_deterministic() {
    let (data, _, _) = generate_linear_dataset(50, 2, 0.1);

    let first = LinearRegression::params().rng_seed(7).fit(&data).unwrap();
    let second = LinearRegression::params().rng_seed(7).fit(&data).unwrap();
    assert_eq!(first.weights(), second.weights());
    assert_eq!(first.bias(), second.bias());

    let other_seed = LinearRegression::params().rng_seed(8).fit(&data).unwrap();
    assert_ne!(first.weights(), other_seed.weights());
}

#[test]
fn linear_rejects_empty_dataset() {
    let data = RegressionData::<f64>::new(2, 1);
    let result = LinearRegression::params().fit(&data);
    assert!(matches!(result, Err(RegressionError::EmptyDataset)));
}

#[test]
fn linear_rejects_multi_dimensional_target() {
    let mut data = RegressionData::<f64>::new(1, 2);
    data.add_sample(array![1.], array![1., 2.]).unwrap();
    let result = LinearRegression::params().fit(&data);
    assert!(matches!(
        result,
        Err(RegressionError::UnsupportedTargetDimension(2))
    ));
}

#[test]
fn linear_predict_checks_input_dimensions() {
    let (data, _, _) = generate_linear_dataset(20, 3, 0.);
    let model = LinearRegression::params().fit(&data).unwrap();
    let result = model.predict(array![1., 2.].view());
    assert!(matches!(
        result,
        Err(RegressionError::InputDimensionMismatch {
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn linear_params_are_validated() {
    let result = LinearRegression::<f64>::params().learning_rate(-0.1).check();
    assert!(matches!(
        result,
        Err(RegressionError::InvalidLearningRate(_))
    ));

    let result = LinearRegression::<f64>::params().max_epochs(0).check();
    assert!(matches!(result, Err(RegressionError::InvalidMaxEpochs)));

    let result = LinearRegression::<f64>::params().min_change(-1.).check();
    assert!(matches!(result, Err(RegressionError::InvalidMinChange(_))));
}

#[test]
fn logistic_learns_threshold_function() {
    let data = generate_threshold_dataset(200);

    let model = LogisticRegression::params()
        .learning_rate(1.)
        .max_epochs(1000)
        .min_change(0.)
        .scale_inputs(false)
        .fit(&data)
        .unwrap();

    let low = model.predict(array![0.1].view()).unwrap();
    let high = model.predict(array![0.9].view()).unwrap();
    assert!(low[0] < 0.5, "prediction below the threshold was {}", low[0]);
    assert!(
        high[0] > 0.5,
        "prediction above the threshold was {}",
        high[0]
    );
}

#[test]
fn logistic_outputs_stay_in_unit_interval() {
    let data = generate_threshold_dataset(50);
    let model = LogisticRegression::params().fit(&data).unwrap();

    for x in [-100., -1., 0., 0.5, 1., 100.] {
        let prediction = model.predict(array![x].view()).unwrap();
        assert!(prediction[0] > 0. && prediction[0] < 1.);
    }
}

#[test]
fn logistic_params_are_validated() {
    let result = LogisticRegression::<f64>::params().batch_size(0).check();
    assert!(matches!(result, Err(RegressionError::InvalidBatchSize)));
}

#[test]
fn logistic_batched_fit_is_deterministic() {
    let data = generate_threshold_dataset(60);

    let first = LogisticRegression::params()
        .batch_size(20)
        .fit(&data)
        .unwrap();
    let second = LogisticRegression::params()
        .batch_size(20)
        .fit(&data)
        .unwrap();
    assert_eq!(first.weights(), second.weights());
    assert_eq!(first.bias(), second.bias());
}

#[test]
fn mlp_learns_xor() {
    let data = xor_dataset();

    let model = Mlp::params()
        .n_hidden_neurons(4)
        .hidden_activation(Activation::Tanh)
        .output_activation(Activation::Linear)
        .learning_rate(0.1)
        .momentum(0.5)
        .max_epochs(3000)
        .min_change(0.)
        .n_restarts(3)
        .shuffle(false)
        .fit(&data)
        .unwrap();

    assert!(
        model.rms_training_error() < 0.45,
        "xor rms error was {}",
        model.rms_training_error()
    );
}

#[test]
fn mlp_with_linear_activations_fits_linear_map() {
    let (data, true_weights, true_bias) = generate_linear_dataset(100, 2, 0.);

    let model = Mlp::params()
        .n_hidden_neurons(3)
        .hidden_activation(Activation::Linear)
        .learning_rate(0.05)
        .max_epochs(1000)
        .min_change(0.)
        .fit(&data)
        .unwrap();

    let input = array![0.3, 0.7];
    let expected = true_weights.dot(&input) + true_bias;
    let prediction = model.predict(input.view()).unwrap();
    assert!(
        (prediction[0] - expected).abs() < 0.1,
        "prediction {} too far from {}",
        prediction[0],
        expected
    );
}

#[test]
fn mlp_supports_multi_dimensional_targets() {
    let mut data = RegressionData::<f64>::new(1, 2);
    for i in 0..50 {
        let x = i as f64 / 50.;
        data.add_sample(array![x], array![x, 1. - x]).unwrap();
    }

    let model = Mlp::params()
        .n_hidden_neurons(3)
        .hidden_activation(Activation::Linear)
        .learning_rate(0.05)
        .max_epochs(1000)
        .min_change(0.)
        .fit(&data)
        .unwrap();

    assert_eq!(model.n_target_dimensions(), 2);
    let prediction = model.predict(array![0.4].view()).unwrap();
    assert_array_all_close(prediction.view(), array![0.4, 0.6].view(), 0.1);
}

#[test]
fn mlp_scales_inputs_and_targets() {
    let mut data = RegressionData::<f64>::new(1, 1);
    for i in 0..100 {
        let x = i as f64 * 10.;
        data.add_sample(array![x], array![100. * x]).unwrap();
    }

    let model = Mlp::params()
        .n_hidden_neurons(2)
        .hidden_activation(Activation::Linear)
        .scale_data(true)
        .learning_rate(0.1)
        .max_epochs(1000)
        .min_change(0.)
        .fit(&data)
        .unwrap();

    let prediction = model.predict(array![500.].view()).unwrap();
    assert!(
        (prediction[0] - 50_000.).abs() < 5_000.,
        "prediction was {}",
        prediction[0]
    );
}

#[test]
fn mlp_fit_is_deterministic() {
    let data = xor_dataset();
    let params = || {
        Mlp::params()
            .n_hidden_neurons(3)
            .hidden_activation(Activation::Tanh)
            .max_epochs(50)
            .shuffle(true)
            .rng_seed(13)
    };

    let first = params().fit(&data).unwrap();
    let second = params().fit(&data).unwrap();
    let input = array![0., 1.];
    assert_eq!(
        first.predict(input.view()).unwrap(),
        second.predict(input.view()).unwrap()
    );
}

#[test]
fn mlp_validation_holdout_trains() {
    let (data, _, _) = generate_linear_dataset(80, 2, 0.05);

    let model = Mlp::params()
        .n_hidden_neurons(3)
        .hidden_activation(Activation::Linear)
        .validation_ratio(Some(0.25))
        .learning_rate(0.05)
        .max_epochs(200)
        .fit(&data)
        .unwrap();

    assert!(model.rms_training_error().is_finite());
}

#[test]
fn mlp_params_are_validated() {
    let result = Mlp::<f64>::params().n_hidden_neurons(0).check();
    assert!(matches!(
        result,
        Err(RegressionError::InvalidHiddenLayerSize)
    ));

    let result = Mlp::<f64>::params().momentum(1.).check();
    assert!(matches!(result, Err(RegressionError::InvalidMomentum(_))));

    let result = Mlp::<f64>::params().validation_ratio(Some(1.5)).check();
    assert!(matches!(
        result,
        Err(RegressionError::InvalidValidationRatio(_))
    ));

    let result = Mlp::<f64>::params().n_restarts(0).check();
    assert!(matches!(result, Err(RegressionError::InvalidNumRestarts)));
}

#[test]
fn mlp_rejects_empty_dataset() {
    let data = RegressionData::<f64>::new(2, 1);
    let result = Mlp::params().fit(&data);
    assert!(matches!(result, Err(RegressionError::EmptyDataset)));
}

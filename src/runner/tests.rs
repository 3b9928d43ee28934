use ndarray::array;

use super::{load_datasets, run_driver, write_results, DriverError};
use crate::datasets::RegressionData;
use crate::helpers::test_helpers::generate_linear_dataset;
use crate::pipeline::RegressionPipeline;
use crate::regressors::{LinearRegression, Mlp};

#[test]
fn results_alternate_prediction_and_target_rows() {
    let (data, _, _) = generate_linear_dataset(10, 2, 0.);
    let mut pipeline = RegressionPipeline::new(LinearRegression::params());
    pipeline.train(&data).unwrap();

    let mut buffer = Vec::new();
    write_results(&pipeline, &data, &mut buffer).unwrap();

    let written = String::from_utf8(buffer).unwrap();
    let rows: Vec<&str> = written.lines().collect();
    assert_eq!(rows.len(), 2 * data.n_samples());

    for (pair, sample) in rows.chunks(2).zip(data.iter()) {
        let prediction: f64 = pair[0].parse().unwrap();
        let target: f64 = pair[1].parse().unwrap();
        assert!(prediction.is_finite());
        assert_eq!(target, sample.target()[0]);
    }
}

#[test]
fn multi_column_targets_are_written_as_csv_fields() {
    let mut data = RegressionData::<f64>::new(1, 2);
    for i in 0..20 {
        let x = i as f64 / 20.;
        data.add_sample(array![x], array![x, 1. - x]).unwrap();
    }

    let mut pipeline =
        RegressionPipeline::new(Mlp::params().n_hidden_neurons(2).max_epochs(10));
    pipeline.train(&data).unwrap();

    let mut buffer = Vec::new();
    write_results(&pipeline, &data, &mut buffer).unwrap();

    let written = String::from_utf8(buffer).unwrap();
    for row in written.lines() {
        assert_eq!(row.split(',').count(), 2);
    }
}

#[test]
fn load_reports_missing_training_file() {
    let dir = tempfile::tempdir().unwrap();
    let test_path = dir.path().join("test.grt");
    let (data, _, _) = generate_linear_dataset(5, 2, 0.);
    data.save(&test_path).unwrap();

    let missing = dir.path().join("missing.grt");
    let result = load_datasets::<f64>(&missing, &test_path);
    assert!(matches!(result, Err(DriverError::LoadTraining { .. })));
}

#[test]
fn load_rejects_mismatched_input_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let training_path = dir.path().join("training.grt");
    let test_path = dir.path().join("test.grt");

    let (training, _, _) = generate_linear_dataset(5, 2, 0.);
    let (test, _, _) = generate_linear_dataset(5, 3, 0.);
    training.save(&training_path).unwrap();
    test.save(&test_path).unwrap();

    let result = load_datasets::<f64>(&training_path, &test_path);
    assert!(matches!(
        result,
        Err(DriverError::InputDimensionMismatch {
            training: 2,
            test: 3
        })
    ));
}

#[test]
fn driver_trains_tests_and_writes_results() {
    let dir = tempfile::tempdir().unwrap();
    let training_path = dir.path().join("training.grt");
    let test_path = dir.path().join("test.grt");
    let output_path = dir.path().join("results.csv");

    let (training, _, _) = generate_linear_dataset(60, 2, 0.);
    let (_, test) = training.split_at_fraction(0.8);
    training.save(&training_path).unwrap();
    test.save(&test_path).unwrap();

    let result = run_driver::<f64, _>(
        LinearRegression::params()
            .learning_rate(0.05)
            .max_epochs(1000)
            .min_change(0.),
        &training_path,
        &test_path,
        &output_path,
    )
    .unwrap();

    assert!(result.rms_error.is_finite());
    assert_eq!(result.n_samples, test.n_samples());

    let written = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(written.lines().count(), 2 * test.n_samples());
}

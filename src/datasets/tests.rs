use std::io::Cursor;

use ndarray::array;

use super::format;
use super::{DatasetError, DimensionRange, RegressionData};

const XOR_FILE: &str = "\
GRT_LABELLED_REGRESSION_DATA_FILE_V1.0
DatasetName: xor
InfoText: four corner samples
NumInputDimensions: 2
NumTargetDimensions: 1
TotalNumTrainingExamples: 4
UseExternalRanges: 0
RegressionData:
0 0 0
0 1 1
1 0 1
1 1 0
";

fn xor_dataset() -> RegressionData<f64> {
    format::read_from(Cursor::new(XOR_FILE)).unwrap()
}

#[test]
fn parses_header_and_samples() {
    let data = xor_dataset();
    assert_eq!(data.name(), "xor");
    assert_eq!(data.info(), "four corner samples");
    assert_eq!(data.n_samples(), 4);
    assert_eq!(data.n_input_dimensions(), 2);
    assert_eq!(data.n_target_dimensions(), 1);
    assert!(!data.uses_external_ranges());

    let sample = data.sample(2).unwrap();
    assert_eq!(sample.input(), array![1., 0.]);
    assert_eq!(sample.target(), array![1.]);
}

#[test]
fn round_trip_preserves_dataset() {
    let data = xor_dataset();
    let mut buffer = Vec::new();
    format::write_to(&data, &mut buffer).unwrap();
    let reloaded: RegressionData<f64> = format::read_from(Cursor::new(buffer)).unwrap();
    assert_eq!(data, reloaded);
}

#[test]
fn save_and_load_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xor.grt");

    let data = xor_dataset();
    data.save(&path).unwrap();
    let reloaded = RegressionData::<f64>::load(&path).unwrap();
    assert_eq!(data, reloaded);
}

#[test]
fn load_reports_missing_file() {
    let result = RegressionData::<f64>::load("no/such/file.grt");
    assert!(matches!(result, Err(DatasetError::Io(_))));
}

#[test]
fn rejects_unknown_header() {
    let file = XOR_FILE.replace("GRT_LABELLED_REGRESSION_DATA_FILE_V1.0", "NOT_A_DATA_FILE");
    let result: Result<RegressionData<f64>, _> = format::read_from(Cursor::new(file));
    assert!(matches!(result, Err(DatasetError::UnsupportedHeader(_))));
}

#[test]
fn rejects_sample_count_mismatch() {
    let file = XOR_FILE.replace("TotalNumTrainingExamples: 4", "TotalNumTrainingExamples: 5");
    let result: Result<RegressionData<f64>, _> = format::read_from(Cursor::new(file));
    assert!(matches!(
        result,
        Err(DatasetError::SampleCountMismatch {
            declared: 5,
            found: 4
        })
    ));
}

#[test]
fn rejects_short_row() {
    let file = XOR_FILE.replace("1 0 1", "1 0");
    let result: Result<RegressionData<f64>, _> = format::read_from(Cursor::new(file));
    assert!(matches!(
        result,
        Err(DatasetError::WrongRowLength {
            expected: 3,
            found: 2,
            ..
        })
    ));
}

#[test]
fn rejects_non_numeric_token() {
    let file = XOR_FILE.replace("1 1 0", "1 one 0");
    let result: Result<RegressionData<f64>, _> = format::read_from(Cursor::new(file));
    assert!(matches!(result, Err(DatasetError::InvalidNumber { .. })));
}

#[test]
fn rejects_truncated_header() {
    let file = "GRT_LABELLED_REGRESSION_DATA_FILE_V1.0\nDatasetName: xor\n";
    let result: Result<RegressionData<f64>, _> = format::read_from(Cursor::new(file));
    assert!(matches!(result, Err(DatasetError::UnexpectedEof(_))));
}

#[test]
fn parses_external_ranges() {
    let file = "\
GRT_LABELLED_REGRESSION_DATA_FILE_V1.0
DatasetName: scaled
InfoText:
NumInputDimensions: 2
NumTargetDimensions: 1
TotalNumTrainingExamples: 1
UseExternalRanges: 1
-1 1
0 10
0 100
RegressionData:
0.5 5 50
";
    let data: RegressionData<f64> = format::read_from(Cursor::new(file)).unwrap();
    assert!(data.uses_external_ranges());
    assert_eq!(
        data.input_ranges(),
        vec![DimensionRange::new(-1., 1.), DimensionRange::new(0., 10.)]
    );
    assert_eq!(data.target_ranges(), vec![DimensionRange::new(0., 100.)]);

    let mut buffer = Vec::new();
    format::write_to(&data, &mut buffer).unwrap();
    let reloaded: RegressionData<f64> = format::read_from(Cursor::new(buffer)).unwrap();
    assert_eq!(data, reloaded);
}

#[test]
fn empty_dataset_round_trips() {
    let data = RegressionData::<f64>::new(3, 2);
    let mut buffer = Vec::new();
    format::write_to(&data, &mut buffer).unwrap();
    let reloaded: RegressionData<f64> = format::read_from(Cursor::new(buffer)).unwrap();
    assert_eq!(reloaded.n_samples(), 0);
    assert_eq!(reloaded.n_input_dimensions(), 3);
    assert_eq!(reloaded.n_target_dimensions(), 2);
}

#[test]
fn add_sample_checks_dimensions() {
    let mut data = RegressionData::<f64>::new(2, 1);
    let result = data.add_sample(array![1.], array![0.]);
    assert!(matches!(
        result,
        Err(DatasetError::DimensionMismatch {
            expected: 2,
            found: 1
        })
    ));
    let result = data.add_sample(array![1., 2.], array![0., 1.]);
    assert!(matches!(
        result,
        Err(DatasetError::DimensionMismatch {
            expected: 1,
            found: 2
        })
    ));
    assert_eq!(data.n_samples(), 0);
}

#[test]
fn observed_ranges_track_samples() {
    let data = xor_dataset();
    assert_eq!(
        data.input_ranges(),
        vec![DimensionRange::new(0., 1.), DimensionRange::new(0., 1.)]
    );
    assert_eq!(data.target_ranges(), vec![DimensionRange::new(0., 1.)]);
}

#[test]
fn stats_report_shape() {
    let stats = xor_dataset().stats();
    assert_eq!(stats.n_samples, 4);
    assert_eq!(stats.n_input_dimensions, 2);
    assert_eq!(stats.n_target_dimensions, 1);

    let rendered = stats.to_string();
    assert!(rendered.contains("DatasetName: xor"));
    assert!(rendered.contains("NumSamples: 4"));
}

#[test]
fn split_preserves_order() {
    let data = xor_dataset();
    let (first, second) = data.split_at_fraction(0.5);
    assert_eq!(first.n_samples(), 2);
    assert_eq!(second.n_samples(), 2);
    assert_eq!(first.sample(0), data.sample(0));
    assert_eq!(second.sample(0), data.sample(2));
}

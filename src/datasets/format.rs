//! Reader and writer for the labelled regression data file format.
//!
//! The format is a plain-text header followed by one whitespace-separated row
//! per sample, input values first and target values last:
//!
//! ```text
//! GRT_LABELLED_REGRESSION_DATA_FILE_V1.0
//! DatasetName: xor
//! InfoText: four corner samples
//! NumInputDimensions: 2
//! NumTargetDimensions: 1
//! TotalNumTrainingExamples: 4
//! UseExternalRanges: 0
//! RegressionData:
//! 0 0 0
//! 0 1 1
//! 1 0 1
//! 1 1 0
//! ```
//!
//! When `UseExternalRanges` is `1`, one `min max` pair per input dimension and
//! then per target dimension follows the flag line, before the
//! `RegressionData:` marker.

use std::io::{BufRead, Write};

use ndarray::Array1;

use super::error::{DatasetError, Result};
use super::{DimensionRange, RegressionData};
use crate::Float;

pub(super) const FILE_HEADER: &str = "GRT_LABELLED_REGRESSION_DATA_FILE_V1.0";

const DATA_MARKER: &str = "RegressionData:";

/// A cursor over the non-blank lines of the file, tracking 1-based line
/// numbers for error reporting.
struct Lines {
    lines: Vec<(usize, String)>,
    position: usize,
}

impl Lines {
    fn collect<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if !line.trim().is_empty() {
                lines.push((index + 1, line));
            }
        }
        Ok(Lines { lines, position: 0 })
    }

    fn next(&mut self, context: &'static str) -> Result<(usize, &str)> {
        match self.lines.get(self.position) {
            Some((number, line)) => {
                self.position += 1;
                Ok((*number, line.as_str()))
            }
            None => Err(DatasetError::UnexpectedEof(context)),
        }
    }

    fn remaining(&self) -> &[(usize, String)] {
        &self.lines[self.position..]
    }
}

fn field_value<'a>(line: &'a str, number: usize, field: &'static str) -> Result<&'a str> {
    line.strip_prefix(field)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(str::trim)
        .ok_or(DatasetError::MissingField {
            line: number,
            expected: field,
        })
}

fn usize_field(line: &str, number: usize, field: &'static str) -> Result<usize> {
    let value = field_value(line, number, field)?;
    value.parse().map_err(|_| DatasetError::InvalidField {
        line: number,
        field,
        value: value.to_string(),
    })
}

fn parse_value<F: Float>(token: &str, number: usize) -> Result<F> {
    token
        .parse::<f64>()
        .map(F::cast)
        .map_err(|_| DatasetError::InvalidNumber {
            line: number,
            token: token.to_string(),
        })
}

fn parse_range<F: Float>(line: &str, number: usize) -> Result<DimensionRange<F>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(DatasetError::WrongRowLength {
            line: number,
            expected: 2,
            found: tokens.len(),
        });
    }
    Ok(DimensionRange::new(
        parse_value(tokens[0], number)?,
        parse_value(tokens[1], number)?,
    ))
}

pub(super) fn read_from<F: Float, R: BufRead>(reader: R) -> Result<RegressionData<F>> {
    let mut lines = Lines::collect(reader)?;

    let (_, header) = lines.next("file header")?;
    if header.trim() != FILE_HEADER {
        return Err(DatasetError::UnsupportedHeader(header.trim().to_string()));
    }

    let (number, line) = lines.next("DatasetName")?;
    let name = field_value(line, number, "DatasetName")?.to_string();
    let (number, line) = lines.next("InfoText")?;
    let info = field_value(line, number, "InfoText")?.to_string();
    let (number, line) = lines.next("NumInputDimensions")?;
    let n_input_dimensions = usize_field(line, number, "NumInputDimensions")?;
    let (number, line) = lines.next("NumTargetDimensions")?;
    let n_target_dimensions = usize_field(line, number, "NumTargetDimensions")?;
    let (number, line) = lines.next("TotalNumTrainingExamples")?;
    let declared_samples = usize_field(line, number, "TotalNumTrainingExamples")?;

    let (number, line) = lines.next("UseExternalRanges")?;
    let use_external_ranges = match field_value(line, number, "UseExternalRanges")? {
        "0" => false,
        "1" => true,
        other => {
            return Err(DatasetError::InvalidField {
                line: number,
                field: "UseExternalRanges",
                value: other.to_string(),
            })
        }
    };

    let mut data = RegressionData::new(n_input_dimensions, n_target_dimensions);
    data.set_name(name);
    data.set_info(info);

    if use_external_ranges {
        let mut input_ranges = Vec::with_capacity(n_input_dimensions);
        for _ in 0..n_input_dimensions {
            let (number, line) = lines.next("external input range")?;
            input_ranges.push(parse_range(line, number)?);
        }
        let mut target_ranges = Vec::with_capacity(n_target_dimensions);
        for _ in 0..n_target_dimensions {
            let (number, line) = lines.next("external target range")?;
            target_ranges.push(parse_range(line, number)?);
        }
        data.set_external_ranges(input_ranges, target_ranges)?;
    }

    let (number, line) = lines.next(DATA_MARKER)?;
    if line.trim() != DATA_MARKER {
        return Err(DatasetError::MissingField {
            line: number,
            expected: "RegressionData",
        });
    }

    let row_length = n_input_dimensions + n_target_dimensions;
    let found_samples = lines.remaining().len();
    if found_samples != declared_samples {
        return Err(DatasetError::SampleCountMismatch {
            declared: declared_samples,
            found: found_samples,
        });
    }

    for (number, line) in lines.remaining() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != row_length {
            return Err(DatasetError::WrongRowLength {
                line: *number,
                expected: row_length,
                found: tokens.len(),
            });
        }
        let mut values = Vec::with_capacity(row_length);
        for token in tokens {
            values.push(parse_value::<F>(token, *number)?);
        }
        let target = Array1::from_vec(values.split_off(n_input_dimensions));
        let input = Array1::from_vec(values);
        data.add_sample(input, target)?;
    }

    Ok(data)
}

pub(super) fn write_to<F: Float, W: Write>(data: &RegressionData<F>, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", FILE_HEADER)?;
    writeln!(writer, "DatasetName: {}", data.name())?;
    writeln!(writer, "InfoText: {}", data.info())?;
    writeln!(writer, "NumInputDimensions: {}", data.n_input_dimensions())?;
    writeln!(writer, "NumTargetDimensions: {}", data.n_target_dimensions())?;
    writeln!(writer, "TotalNumTrainingExamples: {}", data.n_samples())?;
    writeln!(
        writer,
        "UseExternalRanges: {}",
        if data.uses_external_ranges() { 1 } else { 0 }
    )?;
    if let Some(ranges) = data.external_ranges() {
        for range in ranges.input.iter().chain(ranges.target.iter()) {
            writeln!(writer, "{} {}", range.min, range.max)?;
        }
    }
    writeln!(writer, "{}", DATA_MARKER)?;
    for sample in data.iter() {
        let row: Vec<String> = sample
            .input()
            .iter()
            .chain(sample.target().iter())
            .map(|value| value.to_string())
            .collect();
        writeln!(writer, "{}", row.join(" "))?;
    }
    writer.flush()?;
    Ok(())
}

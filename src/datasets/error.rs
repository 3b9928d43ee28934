use thiserror::Error;

/// Simplified `Result` using [`DatasetError`] as error type
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Error variants from dataset construction or file parsing
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported file header `{0}`")]
    UnsupportedHeader(String),
    #[error("line {line}: expected `{expected}` field")]
    MissingField { line: usize, expected: &'static str },
    #[error("line {line}: invalid value `{value}` for `{field}`")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: invalid numeric value `{token}`")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: expected {expected} values per row, found {found}")]
    WrongRowLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("dataset declares {declared} samples but contains {found}")]
    SampleCountMismatch { declared: usize, found: usize },
    #[error("sample dimensionality mismatch: expected {expected} values, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("unexpected end of file while reading {0}")]
    UnexpectedEof(&'static str),
}

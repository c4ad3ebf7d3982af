//! Error types for the field visualizer core.

use thiserror::Error;

/// Errors produced by core operations.
///
/// None of these are fatal: callers report them and keep the previous state.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Viewport width or height was zero.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A charge index did not refer to an existing charge.
    #[error("charge index {index} out of range for {len} charges")]
    ChargeIndex { index: usize, len: usize },

    /// Charge editor input could not be parsed as a finite number.
    #[error("cannot parse {field} from '{value}'")]
    ChargeParse { field: &'static str, value: String },

    /// Charge editor magnitude was outside the allowed range.
    #[error("magnitude {value} outside [-{limit}, {limit}]")]
    MagnitudeOutOfRange { value: f32, limit: f32 },

    /// A charge list file could not be decoded.
    #[error("invalid charge list: {0}")]
    InvalidChargeList(String),

    /// A grid spacing argument was not of the form `<W>x<H>`.
    #[error("invalid grid spacing '{0}', expected <W>x<H>")]
    InvalidGridSpacing(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FieldError {
    fn from(e: std::io::Error) -> Self {
        FieldError::Io(e.to_string())
    }
}

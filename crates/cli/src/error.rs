//! Exit codes for `efield`.
//!
//! - 0:  success
//! - 2:  bad command line (reported by clap)
//! - 10: rejected session state: zero-sized viewport, malformed charge list
//! - 11: file I/O failed (PNG output, charge list read or write)
//! - 12: malformed user input: `--params`, `--at`, `--grid`, charge text
//! - 13: JSON output failed

use efield_core::FieldError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Core(FieldError),
    /// Reading or writing a file failed.
    Io(String),
    /// A flag value could not be parsed.
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Core(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            FieldError::ChargeParse { .. } | FieldError::InvalidGridSpacing(_) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Core(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

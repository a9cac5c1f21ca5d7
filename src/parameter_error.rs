//! Error handling for the rig file reader

use std::io;

use thiserror::Error;

/// Unified error to report failures while reading the rig configuration.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("IO Error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("Missing Field: {0}")]
    MissingField(String),

    #[error("Wrong angle representation: {0}")]
    WrongAngle(String),

    #[error("Invalid Length of {field}: expected {expected}, found {found}")]
    InvalidLength { field: String, expected: usize, found: usize },
}

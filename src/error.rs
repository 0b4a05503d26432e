//! Error handling for .PRO decoding and grid resampling.
//!
//! Every failure carries enough context (file, field code, line index) for the
//! caller to diagnose a malformed file without re-reading it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnowgridError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Unknown field code: {code}")]
    UnknownCode { code: String },

    #[error("No field code is registered for name: {name}")]
    UnknownName { name: String },

    #[error(
        "Variable not recognised: '{input}' (aliases: {}; field names: {})",
        .valid_aliases.join(", "),
        .valid_names.join(", ")
    )]
    UnrecognizedVariable {
        input: String,
        valid_aliases: Vec<String>,
        valid_names: Vec<String>,
    },

    #[error("Malformed timestamp '{value}' in field {code}, line {line_index}")]
    MalformedTimestamp {
        code: String,
        line_index: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Cannot convert '{token}' to a number in field {code}, line {line_index}")]
    ValueConversion {
        code: String,
        line_index: usize,
        token: String,
    },

    #[error("Malformed record in field {code}, line {line_index}: {reason}")]
    MalformedLine {
        code: String,
        line_index: usize,
        reason: String,
    },

    #[error("Field {field} has no data in {path}")]
    MissingField { path: PathBuf, field: String },

    #[error("Profile has no column '{column}'")]
    MissingColumn { column: String },

    #[error(
        "Snapshot {index}: column '{column}' has {found} layers, expected {expected}"
    )]
    InconsistentLayerCount {
        index: usize,
        column: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "Field {code} has {found} records in {path}, expected {expected} (one per date)"
    )]
    InconsistentTimeSeries {
        path: PathBuf,
        code: String,
        expected: usize,
        found: usize,
    },

    #[error("Snapshot {index} has no decoded fields")]
    EmptySnapshot { index: usize },

    #[error("Cannot build a grid from an empty profile sequence")]
    EmptyProfileSequence,

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Grids cannot be combined: {reason}")]
    GridMismatch { reason: String },
}

impl SnowgridError {
    /// Wrap an I/O failure with the path that triggered it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnowgridError>;

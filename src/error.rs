// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for deepSpring I/O and computation.
//!
//! All loader and normalizer errors use [`Error`], with variants for each
//! failure mode. No external error crates — zero-dependency error type.

use std::fmt;
use std::path::PathBuf;

/// Errors produced by deepSpring loaders and the sample normalizer.
#[derive(Debug)]
pub enum Error {
    /// File I/O error with path context.
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// JSON deserialization error for a sample batch file.
    Json {
        /// Path that caused the error.
        path: PathBuf,
        /// Underlying serde message.
        message: String,
    },
    /// A tracked metal carried a negative concentration under the
    /// reject policy.
    NegativeConcentration {
        /// Metal symbol (e.g. "As").
        metal: &'static str,
        /// Offending value, in the unit it was supplied in.
        value: f64,
    },
    /// A tracked metal carried NaN or an infinity.
    NonFinite {
        /// Metal symbol (e.g. "As").
        metal: &'static str,
    },
    /// A declared concentration unit label could not be parsed.
    UnknownUnit(String),
    /// Invalid input parameters (ranges, constraints).
    InvalidInput(String),
}

/// Result type alias for deepSpring operations.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Json { path, message } => {
                write!(f, "{}: JSON parse error: {message}", path.display())
            }
            Self::NegativeConcentration { metal, value } => {
                write!(f, "negative concentration for {metal}: {value}")
            }
            Self::NonFinite { metal } => {
                write!(f, "non-finite concentration for {metal}")
            }
            Self::UnknownUnit(label) => write!(f, "unknown concentration unit: {label:?}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { .. }
            | Self::NegativeConcentration { .. }
            | Self::NonFinite { .. }
            | Self::UnknownUnit(_)
            | Self::InvalidInput(_) => None,
        }
    }
}

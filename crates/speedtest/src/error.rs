// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Speedtest error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required argument was empty or missing.
    #[error("invalid argument `{field}`: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    /// A numeric argument was outside its allowed range.
    #[error("argument `{field}` out of range ({value}): {message}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        message: String,
    },

    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn out_of_range(field: &'static str, value: i64, message: impl Into<String>) -> Self {
        Error::OutOfRange {
            field,
            value,
            message: message.into(),
        }
    }

    /// Name of the offending field for argument errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::InvalidArgument { field, .. } | Error::OutOfRange { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type using speedtest Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes for the speedtest binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// All benchmarks ran
    Success = 0,
    /// One or more runs failed (only with --fail-on-error)
    BenchmarkFailed = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::InvalidArgument { .. } | Error::OutOfRange { .. } => ExitCode::ConfigError,
            Error::Io { .. } => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

//! Error types for supermag-data.

use std::path::PathBuf;

/// Error type for all fallible operations in the supermag-data crate.
///
/// Covers container-invariant violations (time-axis ordering, shared
/// series length) and failures while reading or writing the tagged-ASCII
/// and NetCDF serializations.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a time axis is not strictly increasing.
    #[error("time axis not strictly increasing at index {index}")]
    NonMonotonicTime {
        /// Index of the first sample that breaks the ordering.
        index: usize,
    },

    /// Returned when a series does not match the time-axis length.
    #[error("series '{name}' length {got} != time axis length {expected}")]
    LengthMismatch {
        /// Name of the offending series.
        name: String,
        /// Length of the time axis.
        expected: usize,
        /// Length of the rejected series.
        got: usize,
    },

    /// Returned when a tagged-ASCII header or row cannot be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number of the offending input.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an I/O error from the filesystem.
    #[error("io error: {reason}")]
    Io {
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io {
            reason: e.to_string(),
        }
    }
}

impl From<netcdf::Error> for DataError {
    fn from(e: netcdf::Error) -> Self {
        DataError::Netcdf {
            reason: e.to_string(),
        }
    }
}

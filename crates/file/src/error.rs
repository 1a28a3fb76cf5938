//! Error types for supermag-file.

use std::path::PathBuf;

/// Error type for all fallible operations in the supermag-file crate.
///
/// Parse failures always carry the 1-based line number of the offending
/// input so a bad file can be diagnosed directly.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an I/O error from the filesystem.
    #[error("io error: {reason}")]
    Io {
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when a header or data row cannot be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number of the offending input.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a data row ends before all declared values.
    #[error("truncated row at line {line}: {reason}")]
    Truncated {
        /// 1-based line number of the offending input.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Wraps a container-construction failure.
    #[error(transparent)]
    Data(#[from] supermag_data::DataError),
}

impl From<std::io::Error> for FileError {
    fn from(e: std::io::Error) -> Self {
        FileError::Io {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = FileError::FileNotFound {
            path: PathBuf::from("/data/missing.txt"),
        };
        assert_eq!(err.to_string(), "file not found: /data/missing.txt");
    }

    #[test]
    fn display_parse() {
        let err = FileError::Parse {
            line: 42,
            reason: "expected 8 values, got 7".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "parse error at line 42: expected 8 values, got 7"
        );
    }

    #[test]
    fn display_truncated() {
        let err = FileError::Truncated {
            line: 99,
            reason: "station row has 4 columns".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "truncated row at line 99: station row has 4 columns"
        );
    }

    #[test]
    fn data_error_is_transparent() {
        let inner = supermag_data::DataError::NonMonotonicTime { index: 5 };
        let err: FileError = inner.into();
        assert_eq!(
            err.to_string(),
            "time axis not strictly increasing at index 5"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<FileError>();
    }
}

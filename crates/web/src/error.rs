//! Error types for supermag-web.

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the supermag-web crate.
///
/// Every failure surfaces to the caller immediately; the client never
/// retries internally. An empty-but-valid result is not an error.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Returned when the query window is inverted.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested window start.
        start: NaiveDateTime,
        /// Requested window end.
        end: NaiveDateTime,
    },

    /// Returned when the remote service rejects the logon.
    #[error("authentication rejected: {reason}")]
    Auth {
        /// What the service reported.
        reason: String,
    },

    /// Returned on a network or HTTP failure. Not retried; the caller
    /// decides whether to re-invoke.
    #[error("transport error: {reason}")]
    Transport {
        /// Description of the underlying transport failure.
        reason: String,
    },

    /// Returned when the response payload cannot be interpreted.
    #[error("parse error: {reason}")]
    Parse {
        /// Description of the problem, including the offending field.
        reason: String,
    },

    /// Returned when series lengths disagree within one response.
    #[error("incomplete response: series '{name}' length {got} != expected {expected}")]
    IncompleteResponse {
        /// Name of the offending series.
        name: String,
        /// Expected sample count for the request window.
        expected: usize,
        /// Sample count actually assembled.
        got: usize,
    },

    /// Returned when the fetch configuration is inconsistent.
    #[error("invalid fetch configuration: {reason}")]
    Config {
        /// Description of the configuration problem.
        reason: String,
    },

    /// Wraps a container-construction failure.
    #[error(transparent)]
    Data(#[from] supermag_data::DataError),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport {
            reason: e.to_string(),
        }
    }
}

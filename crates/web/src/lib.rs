//! # supermag-web
//!
//! Blocking client for the SuperMAG index web services. One call to
//! [`fetch_index`] issues the windowed HTTP requests, reshapes the JSON
//! response onto a common minute-cadence time axis, and returns a single
//! [`SmData`](supermag_data::SmData) container with provenance attributes.
//!
//! The service is rate-limited and slow; the intended workflow is to fetch
//! a range once and persist the container locally rather than re-query.
//! Accordingly the client never retries, paginates only to honour the
//! service's maximum window length, and issues sub-requests strictly in
//! sequence.

mod config;
mod error;
mod fetch;
mod request;
mod response;

pub use config::{CADENCE_SECS, DEFAULT_BASE_URL, FetchConfig};
pub use error::FetchError;
pub use fetch::fetch_index;

//! # supermag-file
//!
//! Readers for the ASCII formats served by the SuperMAG website: index
//! files, per-station magnetometer files, and the station-information
//! table. Both data readers produce the same
//! [`SmData`](supermag_data::SmData) container as the web fetcher, using
//! the same key-derivation and missing-value conventions, so the two
//! sources are interchangeable downstream.

mod error;
mod index_file;
mod options;
mod statinfo;
mod station_file;

pub use error::FileError;
pub use index_file::read_index_file;
pub use options::ReadOptions;
pub use statinfo::{StationInfo, read_statinfo};
pub use station_file::read_supermag_file;

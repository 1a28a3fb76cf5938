//! Reader options shared by the vendor-format readers.

use std::path::{Path, PathBuf};

/// Options for the vendor ASCII readers.
///
/// Use the builder methods (`with_*`) to customise behaviour. Defaults:
/// strict parsing, no station metadata.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Drop an incomplete trailing row with a warning instead of failing.
    tolerant: bool,
    /// Station-information file used to attach station metadata and derive
    /// local-time series.
    station_info: Option<PathBuf>,
}

impl ReadOptions {
    /// Creates the default (strict) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable tolerant handling of an incomplete trailing row.
    pub fn with_tolerant(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }

    /// Attach station metadata from the given station-information file.
    pub fn with_station_info(mut self, path: impl Into<PathBuf>) -> Self {
        self.station_info = Some(path.into());
        self
    }

    /// Returns whether tolerant mode is enabled.
    pub fn tolerant(&self) -> bool {
        self.tolerant
    }

    /// Returns the station-information path, if any.
    pub fn station_info(&self) -> Option<&Path> {
        self.station_info.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let opts = ReadOptions::new();
        assert!(!opts.tolerant());
        assert!(opts.station_info().is_none());
    }

    #[test]
    fn builder_methods() {
        let opts = ReadOptions::new()
            .with_tolerant(true)
            .with_station_info("/data/station_info.txt");
        assert!(opts.tolerant());
        assert_eq!(
            opts.station_info(),
            Some(Path::new("/data/station_info.txt"))
        );
    }
}

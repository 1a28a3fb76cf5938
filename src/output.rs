//! Writing fetched or converted containers to disk.

use std::path::Path;

use anyhow::{Context, Result};

use supermag_data::{SmData, write_ascii, write_netcdf};

use crate::cli::OutputFormat;

/// Write `data` to `path` in the selected format.
pub fn write(path: &Path, format: OutputFormat, data: &SmData) -> Result<()> {
    match format {
        OutputFormat::Ascii => write_ascii(path, data)
            .with_context(|| format!("failed to write tagged ASCII: {}", path.display())),
        OutputFormat::Netcdf => write_netcdf(path, data)
            .with_context(|| format!("failed to write NetCDF: {}", path.display())),
    }
}

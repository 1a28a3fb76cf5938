//! Convert command: vendor ASCII file -> tagged ASCII or NetCDF.

use anyhow::{Context, Result};
use tracing::info;

use supermag_file::{ReadOptions, read_index_file, read_supermag_file};

use crate::cli::{ConvertArgs, InputKind};
use crate::output;

/// Run the conversion pipeline: read the vendor file, write the container.
pub fn run(args: ConvertArgs) -> Result<()> {
    let mut options = ReadOptions::new().with_tolerant(args.tolerant);
    if let Some(path) = &args.station_info {
        options = options.with_station_info(path);
    }

    info!(path = %args.input.display(), kind = ?args.kind, "reading vendor file");
    let data = match args.kind {
        InputKind::Index => read_index_file(&args.input, &options),
        InputKind::Stations => read_supermag_file(&args.input, &options),
    }
    .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!(
        n_samples = data.len(),
        n_vars = data.n_vars(),
        "file loaded"
    );

    output::write(&args.output, args.format, &data)?;
    info!(path = %args.output.display(), "output written");
    Ok(())
}

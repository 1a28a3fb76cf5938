//! Fetch command: query the SuperMAG service and persist the result.

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use tracing::info;

use supermag_web::fetch_index;

use crate::cli::FetchArgs;
use crate::config::SupermagConfig;
use crate::convert;
use crate::output;

/// Accepted timestamp formats for `--start`/`--end`.
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Run the fetch pipeline: load config, query the service, write the file.
pub fn run(args: FetchArgs) -> Result<()> {
    // 1. Load project TOML, if given.
    let config = match &args.config {
        Some(path) => {
            let toml_str = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            toml::from_str(&toml_str).context("failed to parse TOML config")?
        }
        None => SupermagConfig::default(),
    };
    let fetch_cfg = convert::build_fetch_config(&config, &args);

    // 2. Parse the query window.
    let start = parse_time(&args.start)?;
    let end = parse_time(&args.end)?;

    // 3. Fetch. The service is slow and rate-limited: one fetch, persisted
    // locally, is the intended workflow.
    let data = fetch_index(start, end, &args.logon, &fetch_cfg).context("fetch failed")?;
    info!(
        n_samples = data.len(),
        n_vars = data.n_vars(),
        "fetch complete"
    );
    if data.is_empty() {
        info!("service returned no data for this range");
    }

    // 4. Persist.
    output::write(&args.output, args.format, &data)?;
    info!(path = %args.output.display(), "output written");
    Ok(())
}

/// Parse a CLI timestamp, trying each accepted format in order.
fn parse_time(raw: &str) -> Result<NaiveDateTime> {
    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(t);
        }
    }
    bail!("unrecognized timestamp '{raw}': expected YYYY-MM-DDTHH:MM[:SS]")
}

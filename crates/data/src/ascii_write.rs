//! Tagged-ASCII writer: a self-describing JSON header plus data rows.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::container::SmData;
use crate::error::DataError;

/// Timestamp format used in the first column of every data row.
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// JSON header carried in the `#`-prefixed lines at the top of the file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AsciiHeader {
    /// Global container attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Per-variable attributes, keyed by variable name.
    #[serde(default)]
    pub vars: BTreeMap<String, BTreeMap<String, String>>,
    /// Column order of the data rows; the first column is always `time`.
    pub columns: Vec<String>,
}

/// Write `data` to `path` in the tagged-ASCII format.
///
/// The header is one JSON object spread over `#`-prefixed lines, naming the
/// column order plus every global and per-variable attribute. Data rows
/// follow, whitespace-separated, one row per time sample with an ISO-8601
/// timestamp in the first column. Values use Rust's shortest round-trip
/// float formatting, so [`read_ascii`](crate::read_ascii) reproduces them
/// exactly; missing samples are spelled `NaN`.
///
/// # Errors
///
/// Returns [`DataError::Io`] on any filesystem failure.
pub fn write_ascii(path: &Path, data: &SmData) -> Result<(), DataError> {
    let mut columns = vec!["time".to_string()];
    columns.extend(data.var_names().map(str::to_string));

    let header = AsciiHeader {
        attrs: data.attrs().clone(),
        vars: data
            .iter()
            .map(|(name, series)| (name.to_string(), series.attrs().clone()))
            .collect(),
        columns,
    };

    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    let json = serde_json::to_string_pretty(&header).map_err(|e| DataError::Io {
        reason: format!("failed to encode header: {e}"),
    })?;
    for line in json.lines() {
        writeln!(w, "# {line}")?;
    }

    for (i, stamp) in data.time().iter().enumerate() {
        write!(w, "{}", stamp.format(TIME_FORMAT))?;
        for (_, series) in data.iter() {
            write!(w, " {}", series.values()[i])?;
        }
        writeln!(w)?;
    }

    w.flush()?;
    Ok(())
}

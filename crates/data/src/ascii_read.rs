//! Tagged-ASCII reader.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::ascii_write::{AsciiHeader, TIME_FORMAT};
use crate::container::SmData;
use crate::error::DataError;
use crate::series::Series;

/// Read a tagged-ASCII file written by [`write_ascii`](crate::write_ascii).
///
/// # Errors
///
/// Returns [`DataError::FileNotFound`] if `path` does not exist, or
/// [`DataError::Parse`] naming the offending line for a malformed header,
/// timestamp, value, or a row with the wrong number of columns.
pub fn read_ascii(path: &Path) -> Result<SmData, DataError> {
    if !path.exists() {
        return Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;

    // The leading '#' lines hold one JSON header object.
    let mut json = String::new();
    let mut n_header = 0usize;
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix('#') {
            json.push_str(rest);
            json.push('\n');
            n_header += 1;
        } else {
            break;
        }
    }
    if n_header == 0 {
        return Err(DataError::Parse {
            line: 1,
            reason: "missing '#'-prefixed JSON header".to_string(),
        });
    }
    let header: AsciiHeader = serde_json::from_str(&json).map_err(|e| DataError::Parse {
        line: 1,
        reason: format!("invalid JSON header: {e}"),
    })?;

    if header.columns.first().map(String::as_str) != Some("time") {
        return Err(DataError::Parse {
            line: 1,
            reason: "first column must be 'time'".to_string(),
        });
    }
    let var_names = &header.columns[1..];

    let mut time = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); var_names.len()];

    for (idx, line) in text.lines().enumerate().skip(n_header) {
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != header.columns.len() {
            return Err(DataError::Parse {
                line: lineno,
                reason: format!(
                    "expected {} columns, got {}",
                    header.columns.len(),
                    parts.len()
                ),
            });
        }

        let stamp =
            NaiveDateTime::parse_from_str(parts[0], TIME_FORMAT).map_err(|e| DataError::Parse {
                line: lineno,
                reason: format!("bad timestamp '{}': {e}", parts[0]),
            })?;
        time.push(stamp);

        for (c, raw) in parts[1..].iter().enumerate() {
            let value: f64 = raw.parse().map_err(|e| DataError::Parse {
                line: lineno,
                reason: format!("bad value '{raw}': {e}"),
            })?;
            columns[c].push(value);
        }
    }

    debug!(
        n_samples = time.len(),
        n_vars = var_names.len(),
        "tagged ASCII parsed"
    );

    let mut data = SmData::new(time)?;
    for (key, value) in header.attrs {
        data.set_attr(key, value);
    }
    for (name, values) in var_names.iter().zip(columns) {
        let mut series = Series::new(values);
        if let Some(attrs) = header.vars.get(name) {
            for (key, value) in attrs {
                series.set_attr(key.clone(), value.clone());
            }
        }
        data.insert(name.clone(), series)?;
    }
    Ok(data)
}

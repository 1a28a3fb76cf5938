//! Reader for the SuperMAG station-information table.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::FileError;

/// Metadata for one ground station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationInfo {
    /// Human-readable station name.
    pub name: String,
    /// Geographic latitude in degrees.
    pub geolat: f64,
    /// Geographic longitude in degrees.
    pub geolon: f64,
}

/// Read a station-information file into a map keyed by station code.
///
/// The file is tab-delimited: a free-form header terminated by a `===`
/// rule, a column-name line, then one row per station. Quoted fields are
/// unquoted; numeric fields are parsed as floats. Repeated tabs are
/// collapsed, matching the vendor's uneven formatting.
///
/// # Errors
///
/// Returns [`FileError::FileNotFound`] if `path` does not exist, or
/// [`FileError::Parse`] naming the 1-based line of a missing column or a
/// malformed row.
pub fn read_statinfo(path: &Path) -> Result<BTreeMap<String, StationInfo>, FileError> {
    if !path.exists() {
        return Err(FileError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;

    let mut lines = text.lines().enumerate();
    let mut found_rule = false;
    for (_, line) in lines.by_ref() {
        if line.contains("===") {
            found_rule = true;
            break;
        }
    }
    if !found_rule {
        return Err(FileError::Parse {
            line: text.lines().count(),
            reason: "no '===' header rule found".to_string(),
        });
    }

    let (head_idx, head) = lines.next().ok_or_else(|| FileError::Parse {
        line: text.lines().count(),
        reason: "file ends before the column-name line".to_string(),
    })?;
    let header: Vec<String> = head
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let position = |name: &str| header.iter().position(|h| h == name);
    let name_col = position("station-name").ok_or_else(|| FileError::Parse {
        line: head_idx + 1,
        reason: "missing 'station-name' column".to_string(),
    })?;
    let lat_col = position("geolat").ok_or_else(|| FileError::Parse {
        line: head_idx + 1,
        reason: "missing 'geolat' column".to_string(),
    })?;
    let lon_col = position("geolon").ok_or_else(|| FileError::Parse {
        line: head_idx + 1,
        reason: "missing 'geolon' column".to_string(),
    })?;
    let max_col = name_col.max(lat_col).max(lon_col);

    let mut stations = BTreeMap::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let lineno = idx + 1;

        // Tab-separated; some rows carry double tabs that yield empty fields.
        let parts: Vec<&str> = line
            .split('\t')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() <= max_col {
            return Err(FileError::Parse {
                line: lineno,
                reason: format!("expected at least {} fields, got {}", max_col + 1, parts.len()),
            });
        }

        let code = unquote(parts[0]);
        stations.insert(
            code.to_string(),
            StationInfo {
                name: unquote(parts[name_col]).to_string(),
                geolat: parse_float(parts[lat_col], lineno)?,
                geolon: parse_float(parts[lon_col], lineno)?,
            },
        );
    }
    Ok(stations)
}

/// Strip surrounding double quotes from a field.
fn unquote(field: &str) -> &str {
    field.trim_matches('"')
}

/// Parse a numeric field, reporting the offending line on failure.
fn parse_float(raw: &str, lineno: usize) -> Result<f64, FileError> {
    raw.parse().map_err(|e| FileError::Parse {
        line: lineno,
        reason: format!("bad numeric field '{raw}': {e}"),
    })
}

//! Reader for SuperMAG geomagnetic index files.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use supermag_data::{Series, SmData, from_vendor};

use crate::error::FileError;
use crate::options::ReadOptions;

/// Number of leading whitespace-separated date-time columns in a data row.
const TIME_COLUMNS: usize = 6;

/// One parsed `<name (unit)>` column token from the header line.
#[derive(Debug)]
struct ColumnToken {
    name: String,
    unit: Option<String>,
}

/// Read a SuperMAG index file into a container.
///
/// The free-form header is skipped up to and including the `====` rule.
/// The next line names the columns as `<name (unit)>` tokens, the first
/// six being the date-time parts; the remaining tokens become container
/// variables with the parenthesised unit attached as a `units` attribute.
/// Data rows follow as `YYYY MM DD HH MM SS v1 v2 ...`. Vendor fill
/// values become NaN.
///
/// # Errors
///
/// Returns [`FileError::FileNotFound`] if `path` does not exist, or
/// [`FileError::Parse`] naming the 1-based line of any malformed header
/// or row. A row with the wrong number of values is always fatal, except
/// that in tolerant mode a short trailing row is dropped with a warning.
pub fn read_index_file(path: &Path, options: &ReadOptions) -> Result<SmData, FileError> {
    if !path.exists() {
        return Err(FileError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines().enumerate();

    // Skip the descriptive header, up to and including the '====' rule.
    let mut rule_line = None;
    for (idx, line) in lines.by_ref() {
        if line.contains("====") {
            rule_line = Some(idx + 1);
            break;
        }
    }
    let rule_line = rule_line.ok_or_else(|| FileError::Parse {
        line: text.lines().count(),
        reason: "no '====' header rule found".to_string(),
    })?;

    // The column-name line follows the rule.
    let (head_idx, head) = lines.next().ok_or_else(|| FileError::Parse {
        line: rule_line,
        reason: "file ends before the column-name line".to_string(),
    })?;
    let tokens = parse_column_tokens(head, head_idx + 1)?;
    if tokens.len() <= TIME_COLUMNS {
        return Err(FileError::Parse {
            line: head_idx + 1,
            reason: format!(
                "expected more than {TIME_COLUMNS} column tokens, got {}",
                tokens.len()
            ),
        });
    }
    let vars = &tokens[TIME_COLUMNS..];
    let row_width = TIME_COLUMNS + vars.len();

    let mut time = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); vars.len()];

    // Collect the remaining non-empty rows so the trailing one is known.
    let rows: Vec<(usize, &str)> = lines.filter(|(_, l)| !l.trim().is_empty()).collect();
    let n_rows = rows.len();

    for (row_i, (idx, line)) in rows.into_iter().enumerate() {
        let lineno = idx + 1;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != row_width {
            if options.tolerant() && row_i == n_rows - 1 && parts.len() < row_width {
                warn!(line = lineno, "dropping incomplete trailing row");
                continue;
            }
            return Err(FileError::Parse {
                line: lineno,
                reason: format!("expected {row_width} values, got {}", parts.len()),
            });
        }

        time.push(parse_row_time(&parts[..TIME_COLUMNS], lineno)?);
        for (c, raw) in parts[TIME_COLUMNS..].iter().enumerate() {
            let value: f64 = raw.parse().map_err(|e| FileError::Parse {
                line: lineno,
                reason: format!("bad value '{raw}': {e}"),
            })?;
            columns[c].push(from_vendor(value));
        }
    }

    let mut data = SmData::new(time)?;
    for (var, values) in vars.iter().zip(columns) {
        let mut series = Series::new(values);
        if let Some(unit) = &var.unit {
            series.set_attr("units", unit.clone());
        }
        data.insert(var.name.clone(), series)?;
    }
    Ok(data)
}

/// Parse a header line of `<name (unit)>` tokens.
fn parse_column_tokens(line: &str, lineno: usize) -> Result<Vec<ColumnToken>, FileError> {
    let mut tokens = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find('<') {
        let Some(close_rel) = rest[open..].find('>') else {
            return Err(FileError::Parse {
                line: lineno,
                reason: "unterminated '<' column token".to_string(),
            });
        };
        let inner = rest[open + 1..open + close_rel].trim();
        rest = &rest[open + close_rel + 1..];

        if inner.is_empty() {
            return Err(FileError::Parse {
                line: lineno,
                reason: "empty column token".to_string(),
            });
        }
        let (name, unit) = match inner.find('(') {
            Some(p) => {
                let unit = inner[p..].trim_start_matches('(').trim_end_matches(')').trim();
                (
                    inner[..p].trim(),
                    (!unit.is_empty()).then(|| unit.to_string()),
                )
            }
            None => (inner, None),
        };
        tokens.push(ColumnToken {
            name: name.to_string(),
            unit,
        });
    }

    if tokens.is_empty() {
        return Err(FileError::Parse {
            line: lineno,
            reason: "no '<...>' column tokens found".to_string(),
        });
    }
    Ok(tokens)
}

/// Parse the six leading date-time columns of a data row.
fn parse_row_time(parts: &[&str], lineno: usize) -> Result<NaiveDateTime, FileError> {
    let mut nums = [0u32; TIME_COLUMNS];
    for (slot, raw) in nums.iter_mut().zip(parts) {
        *slot = raw.parse().map_err(|e| FileError::Parse {
            line: lineno,
            reason: format!("bad date-time field '{raw}': {e}"),
        })?;
    }

    NaiveDate::from_ymd_opt(nums[0] as i32, nums[1], nums[2])
        .and_then(|d| d.and_hms_opt(nums[3], nums[4], nums[5]))
        .ok_or_else(|| FileError::Parse {
            line: lineno,
            reason: format!("invalid date-time {parts:?}"),
        })
}

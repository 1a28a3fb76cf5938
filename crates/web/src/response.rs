//! Response parsing: vendor JSON records onto the cadence-aligned grid.

use serde_json::Value;

use supermag_data::from_vendor;

use crate::config::CADENCE_SECS;
use crate::error::FetchError;
use crate::request::Window;

/// Per-variable samples for one sub-window, aligned to its cadence grid.
#[derive(Debug)]
pub(crate) struct WindowSeries {
    /// One vector per planned variable, each `window.n_samples()` long.
    pub columns: Vec<Vec<f64>>,
    /// Number of records the service actually returned.
    pub n_records: usize,
}

/// Parse the JSON array `body` for `window`, extracting the `vars` fields.
///
/// Records are placed on the grid by their `tval` (Unix-epoch seconds).
/// Grid points the service skipped, and record fields the service omitted,
/// stay NaN — later samples are never shifted. Vendor fill values become
/// NaN as well.
///
/// # Errors
///
/// Returns [`FetchError::Auth`] when the body is the service's logon
/// rejection text, [`FetchError::Parse`] for any other malformed payload
/// (non-object records, missing or off-grid `tval`, duplicate samples).
pub(crate) fn parse_window(
    body: &str,
    window: &Window,
    vars: &[String],
) -> Result<WindowSeries, FetchError> {
    let records: Vec<Value> =
        serde_json::from_str(body).map_err(|e| classify_body_error(body, &e))?;

    let n = window.n_samples();
    let mut columns = vec![vec![f64::NAN; n]; vars.len()];
    let mut seen = vec![false; n];
    let start_epoch = window.start.and_utc().timestamp();

    for (i, record) in records.iter().enumerate() {
        let obj = record.as_object().ok_or_else(|| FetchError::Parse {
            reason: format!("record {i} is not a JSON object"),
        })?;

        let tval = obj
            .get("tval")
            .and_then(Value::as_f64)
            .ok_or_else(|| FetchError::Parse {
                reason: format!("record {i} has no numeric 'tval'"),
            })?;

        let offset = tval as i64 - start_epoch;
        if offset < 0 || offset % CADENCE_SECS != 0 || (offset / CADENCE_SECS) as usize >= n {
            return Err(FetchError::Parse {
                reason: format!(
                    "record {i}: tval {tval} is off the {CADENCE_SECS} s grid of the window \
                     starting {}",
                    window.start
                ),
            });
        }
        let idx = (offset / CADENCE_SECS) as usize;
        if seen[idx] {
            return Err(FetchError::Parse {
                reason: format!("record {i}: duplicate sample at tval {tval}"),
            });
        }
        seen[idx] = true;

        for (c, name) in vars.iter().enumerate() {
            if let Some(value) = obj.get(name).and_then(Value::as_f64) {
                columns[c][idx] = from_vendor(value);
            }
        }
    }

    Ok(WindowSeries {
        columns,
        n_records: records.len(),
    })
}

/// Decide whether an unparseable body is an authentication rejection or
/// plain garbage.
fn classify_body_error(body: &str, err: &serde_json::Error) -> FetchError {
    let head: String = body.trim_start().chars().take(200).collect();
    let lower = head.to_lowercase();
    if lower.contains("logon") || lower.contains("unauthorized") || lower.contains("invalid user") {
        FetchError::Auth { reason: head }
    } else {
        FetchError::Parse {
            reason: format!("{err}; body starts: {head:?}"),
        }
    }
}

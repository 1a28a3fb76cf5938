//! Index fetching: issue the windowed requests and assemble the container.

use chrono::{Duration, NaiveDateTime, Utc};
use tracing::{debug, info};

use supermag_data::{Series, SmData};

use crate::config::{CADENCE_SECS, FetchConfig};
use crate::error::FetchError;
use crate::request::{self, Window};
use crate::response::{self, WindowSeries};

/// Timestamp format used in provenance attributes.
const ATTR_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fetch SuperMAG geomagnetic indices for the inclusive `[start, end]`
/// range.
///
/// Splits the range into sub-windows no longer than the service's window
/// cap, issues one blocking request per sub-window strictly in sequence,
/// and reshapes the JSON records onto one minute-cadence time axis. Grid
/// points or fields the service omitted hold NaN. The returned container
/// carries `units`/`description` attributes per variable and global
/// attributes recording the exact query and the fetch time.
///
/// A range with no data at all yields a container with zero-length series
/// under every planned key — a normal outcome, distinct from failure.
///
/// # Errors
///
/// Returns [`FetchError::InvalidRange`] when `start` is after `end`,
/// [`FetchError::Auth`] when the service rejects the logon,
/// [`FetchError::Transport`] on network or HTTP failure (never retried),
/// [`FetchError::Parse`] on a malformed payload, and
/// [`FetchError::IncompleteResponse`] when series lengths disagree.
pub fn fetch_index(
    start: NaiveDateTime,
    end: NaiveDateTime,
    logon: &str,
    config: &FetchConfig,
) -> Result<SmData, FetchError> {
    config.validate()?;
    let windows = request::split_windows(start, end, config.max_window_secs())?;
    let vars = request::planned_vars(config);

    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout())
        .build()?;

    info!(
        %start,
        %end,
        n_windows = windows.len(),
        n_expected = request::expected_samples(start, end),
        n_vars = vars.len(),
        "fetching SuperMAG indices"
    );

    let mut pieces: Vec<WindowSeries> = Vec::with_capacity(windows.len());
    for window in &windows {
        let url = request::build_url(config, window, logon);
        debug!(window_start = %window.start, window_end = %window.end, "requesting sub-window");

        let resp = client.get(&url).send()?;
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Auth {
                reason: format!("service returned HTTP {status}"),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Transport {
                reason: format!("service returned HTTP {status}"),
            });
        }

        let body = resp.text()?;
        pieces.push(response::parse_window(&body, window, &vars)?);
    }

    let mut data = assemble(&windows, &vars, pieces)?;

    data.set_attr("start", start.format(ATTR_TIME_FORMAT).to_string());
    data.set_attr("end", end.format(ATTR_TIME_FORMAT).to_string());
    data.set_attr("logon", logon);
    data.set_attr("indices", request::request_keys(config));
    data.set_attr("base_url", config.base_url());
    data.set_attr(
        "fetched_at",
        Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    );

    info!(n_samples = data.len(), "fetch complete");
    Ok(data)
}

/// Merge per-window series into one container on the full request axis.
///
/// When no sub-window returned any record, the result is the empty-but-
/// valid container: a zero-length axis with zero-length series under every
/// planned key.
pub(crate) fn assemble(
    windows: &[Window],
    vars: &[String],
    pieces: Vec<WindowSeries>,
) -> Result<SmData, FetchError> {
    let total_records: usize = pieces.iter().map(|p| p.n_records).sum();
    if total_records == 0 {
        let mut data = SmData::new(Vec::new())?;
        for name in vars {
            data.insert(name.clone(), decorated(name, Vec::new()))?;
        }
        return Ok(data);
    }

    let expected: usize = windows.iter().map(Window::n_samples).sum();
    let mut time = Vec::with_capacity(expected);
    for window in windows {
        let mut t = window.start;
        while t <= window.end {
            time.push(t);
            t += Duration::seconds(CADENCE_SECS);
        }
    }
    let mut data = SmData::new(time)?;

    for (c, name) in vars.iter().enumerate() {
        let mut values = Vec::with_capacity(expected);
        for piece in &pieces {
            values.extend_from_slice(&piece.columns[c]);
        }
        if values.len() != expected {
            return Err(FetchError::IncompleteResponse {
                name: name.clone(),
                expected,
                got: values.len(),
            });
        }
        data.insert(name.clone(), decorated(name, values))?;
    }
    Ok(data)
}

/// Build a series with the standard attributes for a known variable name.
fn decorated(name: &str, values: Vec<f64>) -> Series {
    Series::new(values)
        .with_attr("units", units_for(name))
        .with_attr("description", describe(name))
}

/// Units for a container key, derived from its suffix.
fn units_for(name: &str) -> &'static str {
    if name.ends_with("mlat") || name.ends_with("glat") || name.ends_with("glon") {
        "degrees"
    } else if name.ends_with("mlt") {
        "hours"
    } else {
        "nT"
    }
}

/// Human-readable description for a container key.
fn describe(name: &str) -> String {
    match name {
        "SME" => "auroral electrojet strength index (SMU - SML)".to_string(),
        "SML" => "westward auroral electrojet index".to_string(),
        "SMU" => "eastward auroral electrojet index".to_string(),
        "smr" => "partial ring current index".to_string(),
        _ => {
            let (base, field) = split_suffix(name);
            format!("{field} of the station contributing to {base}")
        }
    }
}

/// Split a compound key into its base index name and station-field suffix.
fn split_suffix(name: &str) -> (&str, &'static str) {
    for (suffix, field) in [
        ("mlat", "magnetic latitude"),
        ("mlt", "magnetic local time"),
        ("glat", "geographic latitude"),
        ("glon", "geographic longitude"),
    ] {
        if let Some(base) = name.strip_suffix(suffix) {
            return (base, field);
        }
    }
    (name, "station field")
}

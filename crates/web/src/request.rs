//! Request construction: variable planning, window arithmetic, URL building.

use chrono::{Duration, NaiveDateTime};

use supermag_data::index_keys;

use crate::config::{CADENCE_SECS, FetchConfig};
use crate::error::FetchError;

/// Vendor request keys for the auroral-electrojet family, as they appear
/// in the `indices=` query parameter.
const SME_REQUEST_KEYS: [&str; 8] = ["sme", "sml", "smu", "mlat", "mlt", "glat", "glon", "num"];

/// Vendor request keys for the ring-current family.
const SMR_REQUEST_KEYS: [&str; 3] = ["smr", "ltsmr", "ltnum"];

/// One inclusive sub-window of the full query range, on the cadence grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    /// Number of cadence samples in this inclusive window.
    pub fn n_samples(&self) -> usize {
        ((self.end - self.start).num_seconds() / CADENCE_SECS) as usize + 1
    }

    /// Query extent in seconds, as encoded in the request URL.
    pub fn extent_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// Expected number of cadence samples across the full inclusive range.
pub(crate) fn expected_samples(start: NaiveDateTime, end: NaiveDateTime) -> usize {
    ((end - start).num_seconds() / CADENCE_SECS) as usize + 1
}

/// Split the inclusive `[start, end]` range into sub-windows of at most
/// `max_window_secs`.
///
/// Each sub-window starts one cadence step after the previous end, so the
/// concatenated responses cover every grid sample exactly once, with no
/// boundary duplication and no gaps.
///
/// # Errors
///
/// Returns [`FetchError::InvalidRange`] if `start` is after `end`.
pub(crate) fn split_windows(
    start: NaiveDateTime,
    end: NaiveDateTime,
    max_window_secs: i64,
) -> Result<Vec<Window>, FetchError> {
    if start > end {
        return Err(FetchError::InvalidRange { start, end });
    }

    let mut windows = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        let window_end = (cursor + Duration::seconds(max_window_secs)).min(end);
        windows.push(Window {
            start: cursor,
            end: window_end,
        });
        cursor = window_end + Duration::seconds(CADENCE_SECS);
    }
    Ok(windows)
}

/// Response-field names extracted for the configured index families, which
/// double as the flat container keys (`tval` is handled separately as the
/// time axis).
pub(crate) fn planned_vars(config: &FetchConfig) -> Vec<String> {
    let mut vars = Vec::new();
    if config.include_sme() {
        vars.push("SME".to_string());
        vars.extend(index_keys("SML"));
        vars.extend(index_keys("SMU"));
    }
    if config.include_smr() {
        vars.push("smr".to_string());
    }
    vars
}

/// Vendor request-key list for the `indices=` query parameter.
pub(crate) fn request_keys(config: &FetchConfig) -> String {
    let mut keys: Vec<&str> = Vec::new();
    if config.include_sme() {
        keys.extend(SME_REQUEST_KEYS);
    }
    if config.include_smr() {
        keys.extend(SMR_REQUEST_KEYS);
    }
    keys.join(",")
}

/// Build the query URL for one sub-window.
///
/// The layout mirrors the service's `indices.php` interface: start stamp,
/// zero-padded extent in seconds, logon, and the requested index keys.
pub(crate) fn build_url(config: &FetchConfig, window: &Window, logon: &str) -> String {
    format!(
        "{base}indices.php?fmt=json&nohead&start={start}&extent={extent:012}&logon={logon}&indices={keys}",
        base = config.base_url(),
        start = window.start.format("%Y-%m-%dT%H:%M"),
        extent = window.extent_secs(),
        keys = request_keys(config),
    )
}

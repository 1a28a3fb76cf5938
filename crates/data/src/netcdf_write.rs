//! NetCDF writer for [`SmData`] containers.

use std::path::Path;

use tracing::debug;

use crate::container::SmData;
use crate::error::DataError;

/// CF-style units attached to the `time` coordinate variable.
const TIME_UNITS: &str = "seconds since 1970-01-01 00:00:00";

/// Write `data` to a NetCDF file at `path`.
///
/// Produces one `time` dimension, a `time` coordinate variable holding
/// Unix-epoch seconds with a CF `units` attribute, and one `f64` variable
/// per container key. Per-variable and global attributes are carried over
/// as strings. Missing samples stay NaN.
///
/// # Errors
///
/// Returns [`DataError::Netcdf`] on any failure in the underlying library.
pub fn write_netcdf(path: &Path, data: &SmData) -> Result<(), DataError> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", data.len())?;

    for (key, value) in data.attrs() {
        file.add_attribute(key, value.as_str())?;
    }

    let seconds: Vec<f64> = data
        .time()
        .iter()
        .map(|t| t.and_utc().timestamp() as f64)
        .collect();
    let mut time_var = file.add_variable::<f64>("time", &["time"])?;
    time_var.put_values(&seconds, ..)?;
    time_var.put_attribute("units", TIME_UNITS)?;

    for (name, series) in data.iter() {
        let mut var = file.add_variable::<f64>(name, &["time"])?;
        var.put_values(series.values(), ..)?;
        for (key, value) in series.attrs() {
            var.put_attribute(key, value.as_str())?;
        }
    }

    debug!(path = %path.display(), n_vars = data.n_vars(), "netcdf written");
    Ok(())
}

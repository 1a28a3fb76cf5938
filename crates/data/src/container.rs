//! The labeled output container shared by every data source.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::DataError;
use crate::series::Series;

/// Labeled container of synchronized SuperMAG series.
///
/// Holds one strictly increasing time axis, a name-keyed map of [`Series`]
/// that all share the axis length, and a global attribute map used for
/// query provenance. A container is constructed fresh by each fetch or
/// read call and handed to the caller, who owns it outright.
#[derive(Debug, Clone, Default)]
pub struct SmData {
    time: Vec<NaiveDateTime>,
    vars: BTreeMap<String, Series>,
    attrs: BTreeMap<String, String>,
}

impl SmData {
    /// Creates a container over the given time axis.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NonMonotonicTime`] if the axis is not strictly
    /// increasing.
    pub fn new(time: Vec<NaiveDateTime>) -> Result<Self, DataError> {
        for (i, pair) in time.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(DataError::NonMonotonicTime { index: i + 1 });
            }
        }
        Ok(Self {
            time,
            vars: BTreeMap::new(),
            attrs: BTreeMap::new(),
        })
    }

    /// Insert or replace a variable.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::LengthMismatch`] if the series length differs
    /// from the time-axis length; every sequence in a container shares one
    /// length, always.
    pub fn insert(&mut self, name: impl Into<String>, series: Series) -> Result<(), DataError> {
        let name = name.into();
        if series.len() != self.time.len() {
            return Err(DataError::LengthMismatch {
                name,
                expected: self.time.len(),
                got: series.len(),
            });
        }
        self.vars.insert(name, series);
        Ok(())
    }

    /// Returns the time axis.
    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    /// Look up a variable by name.
    pub fn var(&self, name: &str) -> Option<&Series> {
        self.vars.get(name)
    }

    /// Look up a variable mutably by name.
    pub fn var_mut(&mut self, name: &str) -> Option<&mut Series> {
        self.vars.get_mut(name)
    }

    /// Enumerates every key in the container: `"time"` first, then the
    /// variable names in map order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once("time").chain(self.var_names())
    }

    /// Enumerates the variable names in map order.
    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Iterates over `(name, series)` pairs in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of time samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if the container holds no time samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns the number of variables (excluding the time axis).
    pub fn n_vars(&self) -> usize {
        self.vars.len()
    }

    /// Set or replace a global attribute.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Look up a global attribute by key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Returns the full global attribute map.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }
}

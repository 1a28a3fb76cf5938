//! Attribute-carrying numeric series.

use std::collections::BTreeMap;

/// Samples of one named variable plus its attribute map.
///
/// Attributes are free-form string pairs (units, description, source
/// station). The series itself carries no time information; alignment to
/// the time axis is enforced by [`SmData`](crate::SmData) on insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    attrs: BTreeMap<String, String>,
}

impl Series {
    /// Creates a series with no attributes.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            attrs: BTreeMap::new(),
        }
    }

    /// Attach an attribute, builder-style.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Set or replace an attribute.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Look up an attribute by key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Returns the full attribute map.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Returns the sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series contains no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes self and returns the sample vector.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

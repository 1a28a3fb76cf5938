//! Fetch configuration.

use std::time::Duration;

use crate::error::FetchError;

/// Default SuperMAG web-service root.
pub const DEFAULT_BASE_URL: &str = "https://supermag.jhuapl.edu/services/";

/// Native sample cadence of the index services, in seconds.
pub const CADENCE_SECS: i64 = 60;

/// Configuration for [`fetch_index`](crate::fetch_index).
///
/// Use the builder methods (`with_*`) to customise the endpoint, the
/// requested index families, and the window cap. The [`Default`]
/// implementation targets the public SuperMAG service with both families
/// enabled and a one-day window cap.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Root URL of the web services, with a trailing slash.
    base_url: String,
    /// Request the auroral-electrojet family (SME, SML, SMU + station fields).
    include_sme: bool,
    /// Request the ring-current family (SMR).
    include_smr: bool,
    /// Maximum extent of a single request, in seconds.
    max_window_secs: i64,
    /// Transport timeout for each request.
    timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            include_sme: true,
            include_smr: true,
            max_window_secs: 86_400,
            timeout: Duration::from_secs(60),
        }
    }
}

impl FetchConfig {
    /// Set the service root URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Enable or disable the auroral-electrojet family.
    pub fn with_sme(mut self, include: bool) -> Self {
        self.include_sme = include;
        self
    }

    /// Enable or disable the ring-current family.
    pub fn with_smr(mut self, include: bool) -> Self {
        self.include_smr = include;
        self
    }

    /// Set the maximum single-request extent in seconds.
    pub fn with_max_window_secs(mut self, secs: i64) -> Self {
        self.max_window_secs = secs;
        self
    }

    /// Set the per-request transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the service root URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns whether the auroral-electrojet family is requested.
    pub fn include_sme(&self) -> bool {
        self.include_sme
    }

    /// Returns whether the ring-current family is requested.
    pub fn include_smr(&self) -> bool {
        self.include_smr
    }

    /// Returns the maximum single-request extent in seconds.
    pub fn max_window_secs(&self) -> i64 {
        self.max_window_secs
    }

    /// Returns the per-request transport timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Config`] if the base URL is empty, both index
    /// families are disabled, or the window cap is not a positive multiple
    /// of the service cadence.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.base_url.is_empty() {
            return Err(FetchError::Config {
                reason: "base_url must not be empty".to_string(),
            });
        }
        if !self.include_sme && !self.include_smr {
            return Err(FetchError::Config {
                reason: "at least one index family must be requested".to_string(),
            });
        }
        if self.max_window_secs < CADENCE_SECS || self.max_window_secs % CADENCE_SECS != 0 {
            return Err(FetchError::Config {
                reason: format!(
                    "max_window_secs must be a positive multiple of the {CADENCE_SECS} s cadence, \
                     got {}",
                    self.max_window_secs
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert!(cfg.include_sme());
        assert!(cfg.include_smr());
        assert_eq!(cfg.max_window_secs(), 86_400);
        assert_eq!(cfg.timeout(), Duration::from_secs(60));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = FetchConfig::default()
            .with_base_url("http://localhost:8080/services/")
            .with_sme(false)
            .with_max_window_secs(3_600)
            .with_timeout(Duration::from_secs(5));

        assert_eq!(cfg.base_url(), "http://localhost:8080/services/");
        assert!(!cfg.include_sme());
        assert!(cfg.include_smr());
        assert_eq!(cfg.max_window_secs(), 3_600);
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let cfg = FetchConfig::default().with_base_url("");
        assert!(matches!(
            cfg.validate().unwrap_err(),
            FetchError::Config { .. }
        ));
    }

    #[test]
    fn validate_rejects_no_families() {
        let cfg = FetchConfig::default().with_sme(false).with_smr(false);
        assert!(matches!(
            cfg.validate().unwrap_err(),
            FetchError::Config { .. }
        ));
    }

    #[test]
    fn validate_rejects_bad_window_cap() {
        for secs in [0, -60, 30, 90] {
            let cfg = FetchConfig::default().with_max_window_secs(secs);
            assert!(
                matches!(cfg.validate().unwrap_err(), FetchError::Config { .. }),
                "window cap {secs} should be rejected"
            );
        }
    }
}

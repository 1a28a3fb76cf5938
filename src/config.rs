use serde::Deserialize;

/// Top-level supermag configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupermagConfig {
    /// Remote-service settings.
    #[serde(default)]
    pub service: ServiceToml,

    /// Fetch settings.
    #[serde(default)]
    pub fetch: FetchToml,
}

/// `[service]` section: remote endpoint parameters.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceToml {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_window_hours")]
    pub max_window_hours: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceToml {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_window_hours: default_max_window_hours(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    supermag_web::DEFAULT_BASE_URL.to_string()
}
fn default_max_window_hours() -> u32 {
    24
}
fn default_timeout_secs() -> u64 {
    60
}

/// `[fetch]` section: which index families to request.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchToml {
    #[serde(default = "default_true")]
    pub sme: bool,
    #[serde(default = "default_true")]
    pub smr: bool,
}

impl Default for FetchToml {
    fn default() -> Self {
        Self {
            sme: true,
            smr: true,
        }
    }
}

fn default_true() -> bool {
    true
}

//! Pure conversion functions: TOML config structs -> crate API config types.

use std::time::Duration;

use supermag_web::FetchConfig;

use crate::cli::FetchArgs;
use crate::config::SupermagConfig;

/// Builds a [`FetchConfig`] from the TOML configuration with CLI overrides
/// applied on top.
pub fn build_fetch_config(config: &SupermagConfig, args: &FetchArgs) -> FetchConfig {
    FetchConfig::default()
        .with_base_url(config.service.base_url.clone())
        .with_max_window_secs(i64::from(config.service.max_window_hours) * 3_600)
        .with_timeout(Duration::from_secs(config.service.timeout_secs))
        .with_sme(config.fetch.sme && !args.no_sme)
        .with_smr(config.fetch.smr && !args.no_smr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args() -> FetchArgs {
        FetchArgs {
            start: "2024-05-10T00:00".to_string(),
            end: "2024-05-15T00:00".to_string(),
            logon: "testuser".to_string(),
            output: "out.txt".into(),
            format: OutputFormat::Ascii,
            config: None,
            no_sme: false,
            no_smr: false,
        }
    }

    #[test]
    fn defaults_pass_through() {
        let cfg = build_fetch_config(&SupermagConfig::default(), &args());
        assert_eq!(cfg.base_url(), supermag_web::DEFAULT_BASE_URL);
        assert_eq!(cfg.max_window_secs(), 86_400);
        assert_eq!(cfg.timeout(), Duration::from_secs(60));
        assert!(cfg.include_sme());
        assert!(cfg.include_smr());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn cli_flags_override_toml() {
        let mut a = args();
        a.no_smr = true;
        let cfg = build_fetch_config(&SupermagConfig::default(), &a);
        assert!(cfg.include_sme());
        assert!(!cfg.include_smr());
    }

    #[test]
    fn window_hours_convert_to_seconds() {
        let mut config = SupermagConfig::default();
        config.service.max_window_hours = 6;
        let cfg = build_fetch_config(&config, &args());
        assert_eq!(cfg.max_window_secs(), 21_600);
    }
}

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

use crate::poller::OverlapPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Filled from LUSHFIN_API_URL, never from the toml file.
    #[serde(skip)]
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub overlap_policy: OverlapPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Check that a stats base URL is an absolute http(s) URL.
pub fn validate_base_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw).with_context(|| format!("invalid base URL '{}'", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("invalid base URL '{}': expected an http or https scheme", raw);
    }
    Ok(())
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Path::new("config/default.toml");
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config: Config =
            toml::from_str(&config_str).context("failed to parse config/default.toml")?;

        config.api.base_url = std::env::var("LUSHFIN_API_URL")
            .context("LUSHFIN_API_URL not set in .env or environment")?;
        validate_base_url(&config.api.base_url)?;

        if config.api.poll_interval_secs == 0 {
            bail!("api.poll_interval_secs must be > 0");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let toml_str = r#"
[api]
poll_interval_secs = 30
overlap_policy = "skip"

[ui]
refresh_rate_ms = 250

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.poll_interval_secs, 30);
        assert_eq!(config.api.overlap_policy, OverlapPolicy::Skip);
        assert_eq!(config.ui.refresh_rate_ms, 250);
        assert_eq!(config.logging.level, "debug");
        assert!(config.api.base_url.is_empty());
    }

    #[test]
    fn parse_allow_overlap_policy() {
        let toml_str = r#"
[api]
poll_interval_secs = 30
overlap_policy = "allow"

[ui]
refresh_rate_ms = 250

[logging]
level = "info"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.overlap_policy, OverlapPolicy::Allow);
    }

    #[test]
    fn unknown_overlap_policy_is_rejected() {
        let toml_str = r#"
[api]
poll_interval_secs = 30
overlap_policy = "queue"

[ui]
refresh_rate_ms = 250

[logging]
level = "info"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn base_url_validation() {
        assert!(validate_base_url("https://api.example.com").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("ftp://api.example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::ANTHROPIC_API_URL;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Messages endpoint. Overridable so a compatible provider or local proxy can stand in.
    pub llm_api_url: String,
    /// Directory where uploaded render captures are staged during export.
    pub export_staging_dir: PathBuf,
    /// Sessions with no requests for this long are evicted.
    pub session_idle_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_API_URL.to_string()),
            export_staging_dir: std::env::var("EXPORT_STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            session_idle_ttl: parse_idle_ttl(
                &std::env::var("SESSION_IDLE_TTL_SECS").unwrap_or_else(|_| "3600".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_idle_ttl(raw: &str) -> Result<Duration> {
    let secs = raw
        .parse::<u64>()
        .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("SESSION_IDLE_TTL_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_idle_ttl() {
        assert_eq!(parse_idle_ttl("900").unwrap(), Duration::from_secs(900));
        assert!(parse_idle_ttl("0").is_err());
        assert!(parse_idle_ttl("an hour").is_err());
    }
}

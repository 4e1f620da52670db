use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Number of documents analyzed concurrently per batch.
    pub batch_size: usize,
    /// Pause between batches, to stay under the scoring API rate limit.
    pub batch_delay_ms: u64,
    /// Per-document scoring call timeout.
    pub call_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let openai_api_key = require_env("OPENAI_API_KEY")?;
        validate_api_key(&openai_api_key)?;

        Ok(Config {
            openai_api_key,
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            max_tokens: parse_env("OPENAI_MAX_TOKENS", 1000)?,
            temperature: parse_env("OPENAI_TEMPERATURE", 0.1)?,
            batch_size: parse_env("ANALYSIS_BATCH_SIZE", 5)?,
            batch_delay_ms: parse_env("ANALYSIS_BATCH_DELAY_MS", 1000)?,
            call_timeout_secs: parse_env("ANALYSIS_CALL_TIMEOUT_SECS", 60)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Rejects missing or malformed API credentials before any request is attempted.
/// OpenAI keys always begin with `sk-`.
pub fn validate_api_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("OpenAI API key is not configured");
    }
    if !key.starts_with("sk-") {
        bail!("Invalid OpenAI API key format: keys must start with 'sk-'");
    }
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .ok()
            .with_context(|| format!("'{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_api_key_accepted() {
        assert!(validate_api_key("sk-proj-abc123").is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(validate_api_key("").is_err());
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        assert!(validate_api_key("pk-abc123").is_err());
    }
}

use anyhow::{Context, Result};
use chrono::NaiveTime;
use regex::Regex;
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://quest.somnia.network/api";
pub const DEFAULT_ONBOARDING_URL: &str = "https://quest.somnia.network";
pub const DEFAULT_PRIVATE_KEYS_FILE: &str = "pk.txt";
pub const DEFAULT_PROXIES_FILE: &str = "proxy.txt";
pub const DEFAULT_DAILY_CLAIM_TIME: &str = "07:00";

#[derive(Debug, Clone)]
pub struct Env {
    pub api_url: String,
    pub onboarding_url: String,
    pub private_keys_file: String,
    pub proxies_file: String,
    pub request_timeout_ms: u64,
    pub account_delay_secs: u64,
    pub step_delay_secs: u64,
    pub daily_claim_time: NaiveTime,
}

impl Env {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn account_delay(&self) -> Duration {
        Duration::from_secs(self.account_delay_secs)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_secs(self.step_delay_secs)
    }

    /// Build the configuration from any key lookup. `load_env` uses the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_url = get("QUEST_API_URL", DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        validate_http_url("QUEST_API_URL", &api_url)?;

        let onboarding_url = get("QUEST_ONBOARDING_URL", DEFAULT_ONBOARDING_URL);
        validate_http_url("QUEST_ONBOARDING_URL", &onboarding_url)?;

        let request_timeout_ms = get("REQUEST_TIMEOUT_MS", "30000")
            .parse::<u64>()
            .context("Invalid REQUEST_TIMEOUT_MS")?;
        if request_timeout_ms < 1000 {
            anyhow::bail!("Invalid REQUEST_TIMEOUT_MS: must be at least 1000ms");
        }

        let account_delay_secs = get("ACCOUNT_DELAY_SECS", "3")
            .parse::<u64>()
            .context("Invalid ACCOUNT_DELAY_SECS")?;
        let step_delay_secs = get("STEP_DELAY_SECS", "1")
            .parse::<u64>()
            .context("Invalid STEP_DELAY_SECS")?;

        let daily_claim_time = parse_claim_time(&get("DAILY_CLAIM_TIME", DEFAULT_DAILY_CLAIM_TIME))?;

        Ok(Env {
            api_url,
            onboarding_url,
            private_keys_file: get("PRIVATE_KEYS_FILE", DEFAULT_PRIVATE_KEYS_FILE),
            proxies_file: get("PROXIES_FILE", DEFAULT_PROXIES_FILE),
            request_timeout_ms,
            account_delay_secs,
            step_delay_secs,
            daily_claim_time,
        })
    }
}

impl Default for Env {
    fn default() -> Self {
        Env {
            api_url: DEFAULT_API_URL.to_string(),
            onboarding_url: DEFAULT_ONBOARDING_URL.to_string(),
            private_keys_file: DEFAULT_PRIVATE_KEYS_FILE.to_string(),
            proxies_file: DEFAULT_PROXIES_FILE.to_string(),
            request_timeout_ms: 30_000,
            account_delay_secs: 3,
            step_delay_secs: 1,
            daily_claim_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
        }
    }
}

fn validate_http_url(key: &str, value: &str) -> Result<()> {
    let parsed = Url::parse(value).with_context(|| format!("Invalid {}: {}", key, value))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        eprintln!("\n❌ Invalid {}\n", key);
        eprintln!("Current value: {}", value);
        eprintln!("Must start with: http:// or https://\n");
        anyhow::bail!("Invalid {}: must be a valid HTTP/HTTPS URL", key);
    }
    Ok(())
}

/// Parses `HH:MM` (24h) into a time of day.
pub fn parse_claim_time(value: &str) -> Result<NaiveTime> {
    let re = Regex::new(r"^(\d{1,2}):(\d{2})$").context("claim time pattern")?;
    let caps = re
        .captures(value)
        .with_context(|| format!("Invalid DAILY_CLAIM_TIME: {} (expected HH:MM)", value))?;
    let hour: u32 = caps[1].parse().context("Invalid DAILY_CLAIM_TIME hour")?;
    let minute: u32 = caps[2].parse().context("Invalid DAILY_CLAIM_TIME minute")?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .with_context(|| format!("Invalid DAILY_CLAIM_TIME: {} is not a time of day", value))
}

pub fn load_env() -> Result<Env> {
    dotenvy::dotenv().ok(); // Load .env file if it exists
    Env::from_lookup(|key| env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> Result<Env> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Env::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let env = env_from(&[]).unwrap();
        assert_eq!(env.api_url, DEFAULT_API_URL);
        assert_eq!(env.onboarding_url, DEFAULT_ONBOARDING_URL);
        assert_eq!(env.private_keys_file, "pk.txt");
        assert_eq!(env.proxies_file, "proxy.txt");
        assert_eq!(env.request_timeout(), Duration::from_secs(30));
        assert_eq!(env.account_delay(), Duration::from_secs(3));
        assert_eq!(env.step_delay(), Duration::from_secs(1));
        assert_eq!(env.daily_claim_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
    }

    #[test]
    fn trailing_slash_is_trimmed_from_api_url() {
        let env = env_from(&[("QUEST_API_URL", "http://127.0.0.1:9000/api/")]).unwrap();
        assert_eq!(env.api_url, "http://127.0.0.1:9000/api");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(env_from(&[("QUEST_API_URL", "ftp://example.com")]).is_err());
        assert!(env_from(&[("QUEST_ONBOARDING_URL", "not a url")]).is_err());
    }

    #[test]
    fn rejects_short_timeouts_and_garbage_numbers() {
        assert!(env_from(&[("REQUEST_TIMEOUT_MS", "500")]).is_err());
        assert!(env_from(&[("ACCOUNT_DELAY_SECS", "three")]).is_err());
    }

    #[test]
    fn claim_time_parsing() {
        assert_eq!(parse_claim_time("7:05").unwrap(), NaiveTime::from_hms_opt(7, 5, 0).unwrap());
        assert_eq!(parse_claim_time("23:59").unwrap(), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert!(parse_claim_time("24:00").is_err());
        assert!(parse_claim_time("07:60").is_err());
        assert!(parse_claim_time("0700").is_err());
    }
}

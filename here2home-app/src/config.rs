//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use here2home_hex::RatesConfig;

/// `RATES_API_URL` value selecting the built-in fixed rate table.
pub const FIXED_RATES_URL: &str = "fixed://";

const DEFAULT_DATABASE_URL: &str = "sqlite://here2home.db?mode=rwc";
const DEFAULT_RATES_API_URL: &str = "https://open.er-api.com/v6/latest/USD";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub rates_api_url: String,
    pub geocoder_url: String,
    pub rates: RatesConfig,
    pub location_timeout: Duration,
    pub start_offline: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through `lookup`, applying defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = parse_or(&lookup, "PORT", 3000)?;
        let freshness_hours: u64 = parse_or(&lookup, "RATES_FRESHNESS_HOURS", 12)?;
        let refresh_secs: u64 = parse_or(&lookup, "RATES_REFRESH_INTERVAL_SECS", 3600)?;
        let fetch_timeout_secs: u64 = parse_or(&lookup, "FETCH_TIMEOUT_SECS", 10)?;
        let location_timeout_secs: u64 = parse_or(&lookup, "LOCATION_TIMEOUT_SECS", 10)?;
        let start_offline = parse_or(&lookup, "START_OFFLINE", false)?;

        if refresh_secs == 0 {
            anyhow::bail!("RATES_REFRESH_INTERVAL_SECS must be greater than zero");
        }

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some("json") => LogFormat::Json,
            Some("pretty") | Some("") | None => LogFormat::Pretty,
            Some(other) => anyhow::bail!("LOG_FORMAT must be 'json' or 'pretty', got '{}'", other),
        };

        Ok(Self {
            port,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            rates_api_url: lookup("RATES_API_URL").unwrap_or_else(|| DEFAULT_RATES_API_URL.into()),
            geocoder_url: lookup("GEOCODER_URL").unwrap_or_else(|| DEFAULT_GEOCODER_URL.into()),
            rates: RatesConfig {
                freshness_window: Duration::from_secs(freshness_hours * 60 * 60),
                fetch_timeout: Duration::from_secs(fetch_timeout_secs),
                refresh_interval: Duration::from_secs(refresh_secs),
            },
            location_timeout: Duration::from_secs(location_timeout_secs),
            start_offline,
            log_format,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {}", name, raw, e)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.rates_api_url, DEFAULT_RATES_API_URL);
        assert_eq!(config.rates.freshness_window, Duration::from_secs(12 * 3600));
        assert_eq!(config.rates.refresh_interval, Duration::from_secs(3600));
        assert_eq!(config.rates.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.location_timeout, Duration::from_secs(10));
        assert!(!config.start_offline);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "memory://"),
            ("RATES_API_URL", FIXED_RATES_URL),
            ("RATES_FRESHNESS_HOURS", "6"),
            ("START_OFFLINE", "true"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "memory://");
        assert_eq!(config.rates_api_url, FIXED_RATES_URL);
        assert_eq!(config.rates.freshness_window, Duration::from_secs(6 * 3600));
        assert!(config.start_offline);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("START_OFFLINE", "maybe")]).is_err());
        assert!(config_from(&[("RATES_REFRESH_INTERVAL_SECS", "0")]).is_err());
        assert!(config_from(&[("LOG_FORMAT", "xml")]).is_err());
    }
}

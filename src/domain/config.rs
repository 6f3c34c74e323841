//! Run configuration.
//!
//! The defaults are the fixed constants the bot has always run with; an INI
//! file can override them through [`ConfigPort`]. There is no global state —
//! the config is built once and passed down.

use crate::domain::error::LsbotError;
use crate::ports::config_port::ConfigPort;
use std::time::Duration;

pub const DEFAULT_SYMBOLS: [&str; 4] = ["SPY", "QQQ", "IEF", "VT"];
pub const DEFAULT_LOOKBACK_YEARS: u32 = 2;
pub const DEFAULT_NTFY_TOPIC: &str = "LSBot";
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub symbols: Vec<String>,
    pub lookback_years: u32,
    pub ntfy_topic: String,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            lookback_years: DEFAULT_LOOKBACK_YEARS,
            ntfy_topic: DEFAULT_NTFY_TOPIC.to_string(),
            retries: DEFAULT_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl RunConfig {
    /// Build from a config source, falling back to the defaults for any
    /// missing key. Sections: `[data]` symbols / lookback_years / retries /
    /// retry_delay_ms, `[notify]` topic.
    pub fn from_port(port: &dyn ConfigPort) -> Result<Self, LsbotError> {
        let mut config = Self::default();

        if let Some(symbols) = port.get_string("data", "symbols") {
            config.symbols = symbols
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
        config.lookback_years =
            get_u32(port, "data", "lookback_years", config.lookback_years)?;
        config.retries = get_u32(port, "data", "retries", config.retries)?;
        config.retry_delay = Duration::from_millis(get_u64(
            port,
            "data",
            "retry_delay_ms",
            config.retry_delay.as_millis() as u64,
        )?);
        if let Some(topic) = port.get_string("notify", "topic") {
            config.ntfy_topic = topic;
        }

        validate(&config)?;
        Ok(config)
    }
}

fn get_u32(
    port: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: u32,
) -> Result<u32, LsbotError> {
    let value = port.get_int(section, key, default as i64);
    u32::try_from(value).map_err(|_| LsbotError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("{value} is out of range"),
    })
}

fn get_u64(
    port: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: u64,
) -> Result<u64, LsbotError> {
    let value = port.get_int(section, key, default as i64);
    u64::try_from(value).map_err(|_| LsbotError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("{value} is out of range"),
    })
}

pub fn validate(config: &RunConfig) -> Result<(), LsbotError> {
    if config.symbols.is_empty() {
        return Err(LsbotError::ConfigInvalid {
            section: "data".to_string(),
            key: "symbols".to_string(),
            reason: "at least one symbol is required".to_string(),
        });
    }
    if config.lookback_years == 0 {
        return Err(LsbotError::ConfigInvalid {
            section: "data".to_string(),
            key: "lookback_years".to_string(),
            reason: "lookback_years must be at least 1".to_string(),
        });
    }
    if config.ntfy_topic.trim().is_empty() {
        return Err(LsbotError::ConfigInvalid {
            section: "notify".to_string(),
            key: "topic".to_string(),
            reason: "topic must not be empty".to_string(),
        });
    }
    Ok(())
}

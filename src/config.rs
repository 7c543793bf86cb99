//! Ledger configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Only the administrator is mandatory; everything else falls
//! back to a default when missing or unparsable.

use std::str::FromStr;

use crate::domain::{Address, MAX_EVENT_BUS_CAPACITY, RemainderPolicy};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Top-level ledger configuration.
///
/// Loaded once at startup via [`LedgerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Identity that owns the ledger and may change the entrance fee.
    pub administrator: Address,

    /// Where settlement truncation remainders go.
    pub remainder_policy: RemainderPolicy,

    /// Capacity of the EventBus broadcast channel, at most
    /// [`MAX_EVENT_BUS_CAPACITY`].
    pub event_bus_capacity: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl LedgerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LEDGER_ADMINISTRATOR` is missing or is not a
    /// valid address.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `LEDGER_ADMINISTRATOR` is missing or is not a
    /// valid address.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error + Send + Sync>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let administrator: Address = lookup("LEDGER_ADMINISTRATOR")
            .ok_or("LEDGER_ADMINISTRATOR is required")?
            .parse()?;

        let remainder_policy = parse_var(&lookup, "REMAINDER_POLICY", RemainderPolicy::default());
        let event_bus_capacity =
            parse_var(&lookup, "EVENT_BUS_CAPACITY", 10_000usize).clamp(1, MAX_EVENT_BUS_CAPACITY);
        let log_format = parse_var(&lookup, "LOG_FORMAT", LogFormat::default());

        Ok(Self {
            administrator,
            remainder_policy,
            event_bus_capacity,
            log_format,
        })
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

use crate::inline::registry::DEFAULT_TTL_MINUTES;
use crate::services::sweeper::DEFAULT_SWEEP_INTERVAL_SECS;

/// Runtime settings read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot API token, required.
    pub telegram_bot_token: String,
    /// Port of the health server, 3000 by default.
    pub http_port: u16,
    /// Lifetime of a rendered callback button unless it opts out.
    pub callback_ttl_minutes: i64,
    /// Pause between expiry sweeps.
    pub sweep_interval_seconds: u64,
}

impl Config {
    /// Read and validate every setting. Only the bot token is mandatory.
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let callback_ttl_minutes: i64 = parse_or_default("CALLBACK_TTL_MINUTES", DEFAULT_TTL_MINUTES)?;
        if callback_ttl_minutes <= 0 {
            return Err(anyhow!("Invalid CALLBACK_TTL_MINUTES: must be positive"));
        }

        let sweep_interval_seconds: u64 =
            parse_or_default("SWEEP_INTERVAL_SECONDS", DEFAULT_SWEEP_INTERVAL_SECS)?;
        if sweep_interval_seconds == 0 {
            return Err(anyhow!("Invalid SWEEP_INTERVAL_SECONDS: must be positive"));
        }

        Ok(Config {
            telegram_bot_token: token,
            http_port,
            callback_ttl_minutes,
            sweep_interval_seconds,
        })
    }

    /// Default button lifetime.
    pub fn callback_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.callback_ttl_minutes)
    }

    /// Sweep period for the scheduler.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

/// Blank or unset falls back to the default; anything else must parse.
fn parse_or_default<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid {}", key)),
        _ => Ok(default),
    }
}

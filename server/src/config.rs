use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Result, anyhow};
use registry::DEFAULT_PRIZE;
use tracing::info;

pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub session_ttl: Duration,
    pub default_prize: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: try_load("PORT", "8080")?,
            data_dir: try_load("DATA_DIR", "atendente")?,
            session_ttl: session_ttl(try_load("SESSION_TTL_MINUTES", "30")?)?,
            default_prize: try_load("DEFAULT_PRIZE", DEFAULT_PRIZE)?,
        })
    }
}

fn session_ttl(minutes: u64) -> Result<Duration> {
    minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .ok_or_else(|| anyhow!("Invalid SESSION_TTL_MINUTES value: {minutes} is too large"))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value: {e}"))
}

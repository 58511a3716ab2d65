//! Process configuration, read from environment variables.

use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{bail, Context, Result};

use crate::sessions::DEFAULT_WINDOW_CAPACITY;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Readings averaged per live-display session.
    pub window_capacity: usize,
    pub session_idle_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            session_idle_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let window_capacity =
            parse_or(&lookup, "COLORSENSE_WINDOW_SIZE", defaults.window_capacity)?;
        if window_capacity == 0 {
            bail!("COLORSENSE_WINDOW_SIZE must be at least 1");
        }

        Ok(Self {
            host: lookup("COLORSENSE_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            data_dir: lookup("COLORSENSE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            window_capacity,
            session_idle_ttl: Duration::from_secs(parse_or(
                &lookup,
                "COLORSENSE_SESSION_TTL_SECS",
                DEFAULT_SESSION_TTL_SECS,
            )?),
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("colorsense.sqlite3")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: '{raw}'")),
        None => Ok(default),
    }
}

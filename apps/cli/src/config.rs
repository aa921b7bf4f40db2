use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};

use stockfetch_core::constants::{DEFAULT_BATCH_SIZE, STATUS_POLL_INTERVAL_SECS};
use stockfetch_market_data::NASDAQ_LISTED_URL;

use crate::cli::{FetchArgs, StatusArgs};

pub const DEFAULT_DB_PATH: &str = "./stock_data.db";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: String,
    pub catalog_url: String,
    pub batch_size: usize,
    pub status_interval: Duration,
    pub http_timeout: Duration,
}

impl Config {
    /// Load `.env` if present, then read `SF_*` variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("SF_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let catalog_url =
            lookup("SF_CATALOG_URL").unwrap_or_else(|| NASDAQ_LISTED_URL.to_string());
        let batch_size: usize = parse_var(&lookup, "SF_BATCH_SIZE", DEFAULT_BATCH_SIZE)?;
        let interval_secs: u64 =
            parse_var(&lookup, "SF_STATUS_INTERVAL_SECS", STATUS_POLL_INTERVAL_SECS)?;
        let timeout_secs: u64 =
            parse_var(&lookup, "SF_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        let config = Self {
            db_path,
            catalog_url,
            batch_size,
            status_interval: Duration::from_secs(interval_secs),
            http_timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Command-line values win over the environment.
    pub fn apply_fetch_args(&mut self, args: &FetchArgs) -> anyhow::Result<()> {
        if let Some(db) = &args.db {
            self.db_path = db.clone();
        }
        if let Some(batch_size) = args.batch_size {
            self.batch_size = batch_size;
        }
        self.validate()
    }

    pub fn apply_status_args(&mut self, args: &StatusArgs) -> anyhow::Result<()> {
        if let Some(db) = &args.db {
            self.db_path = db.clone();
        }
        if let Some(interval) = args.interval {
            self.status_interval = Duration::from_secs(interval);
        }
        self.validate()
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.db_path.trim().is_empty() {
            bail!("Database path must not be empty");
        }
        if self.batch_size == 0 {
            bail!("Batch size must be at least 1");
        }
        if self.status_interval.is_zero() {
            bail!("Status interval must be at least 1 second");
        }
        if self.http_timeout.is_zero() {
            bail!("HTTP timeout must be at least 1 second");
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: '{}'", key, raw)),
        None => Ok(default),
    }
}

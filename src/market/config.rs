// SPDX-License-Identifier: MIT

//! Server configuration loaded from environment variables

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::hub::{HubError, Result};
use crate::market::tracking::{TrackerConfig, DEFAULT_JITTER};

/// Server configuration
///
/// | Env Var                 | Default     |
/// |-------------------------|-------------|
/// | `HUB_HOST`              | `127.0.0.1` |
/// | `HUB_PORT`              | `8080`      |
/// | `HUB_SEED_FILE`         | built-in    |
/// | `HUB_TRACK_INTERVAL_MS` | `2000`      |
/// | `HUB_TRACK_JITTER`      | `0.01`      |
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub seed_file: Option<PathBuf>,
    pub track_interval: Duration,
    pub track_jitter: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            seed_file: None,
            track_interval: Duration::from_millis(2000),
            track_jitter: DEFAULT_JITTER,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HUB_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = parse_var(&lookup, "HUB_PORT")?.unwrap_or(defaults.port);
        let seed_file = lookup("HUB_SEED_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let track_interval = parse_var::<u64, _>(&lookup, "HUB_TRACK_INTERVAL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.track_interval);
        let track_jitter = parse_var(&lookup, "HUB_TRACK_JITTER")?.unwrap_or(defaults.track_jitter);

        if track_interval.is_zero() {
            return Err(HubError::config("HUB_TRACK_INTERVAL_MS must be positive"));
        }
        if !(track_jitter >= 0.0 && f64::is_finite(track_jitter)) {
            return Err(HubError::config(
                "HUB_TRACK_JITTER must be a non-negative number",
            ));
        }

        Ok(Self {
            host,
            port,
            seed_file,
            track_interval,
            track_jitter,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Tracker settings derived from this config
    pub fn tracker(&self) -> TrackerConfig {
        TrackerConfig {
            interval: self.track_interval,
            jitter: self.track_jitter,
            max_ticks: None,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| HubError::config(format!("{} has invalid value '{}'", key, raw))),
    }
}

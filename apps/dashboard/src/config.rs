use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::dashboard::session::DEFAULT_MAX_SESSIONS;
use crate::timeline::chronology::{NowPolicy, DEFAULT_NOW_OFFSET};

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values; every variable has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile document path. `None` uses the document embedded in the binary.
    pub cv_data_path: Option<PathBuf>,
    pub assets_dir: PathBuf,
    pub now_policy: NowPolicy,
    /// Live sessions kept in memory; the least recently used is evicted beyond this.
    pub max_sessions: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let now_offset = match std::env::var("NOW_OFFSET") {
            Ok(raw) => raw
                .parse::<f64>()
                .context("NOW_OFFSET must be a number")?,
            Err(_) => DEFAULT_NOW_OFFSET,
        };
        let policy_name = std::env::var("NOW_POLICY").unwrap_or_else(|_| "fixed".to_string());

        Ok(Config {
            cv_data_path: optional_env("CV_DATA_PATH").map(PathBuf::from),
            assets_dir: PathBuf::from(
                optional_env("ASSETS_DIR").unwrap_or_else(|| "assets".to_string()),
            ),
            now_policy: NowPolicy::parse(&policy_name, now_offset)
                .context("NOW_POLICY / NOW_OFFSET are invalid")?,
            max_sessions: parse_max_sessions(optional_env("MAX_SESSIONS").as_deref())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_max_sessions(raw: Option<&str>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MAX_SESSIONS);
    };
    let max = raw
        .trim()
        .parse::<usize>()
        .context("MAX_SESSIONS must be a positive integer")?;
    if max == 0 {
        anyhow::bail!("MAX_SESSIONS must be at least 1");
    }
    Ok(max)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

//! Configuration module for the MySlide backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::rotation::{RotationPolicy, DEFAULT_INTERVAL_PERIOD, DEFAULT_WINDOW};
use crate::session::Credentials;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Admin login pair; logins are refused when unset
    pub admin_credentials: Option<Credentials>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log line format
    pub log_format: LogFormat,
    /// How the current quote is chosen
    pub quote_rotation: RotationPolicy,
}

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_credentials = match (
            env::var("MYSLIDE_ADMIN_USERNAME"),
            env::var("MYSLIDE_ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => Some(Credentials::new(username, password)),
            _ => None,
        };

        let db_path = env::var("MYSLIDE_DB_PATH")
            .unwrap_or_else(|_| "./data/myslide.sqlite".to_string())
            .into();

        let bind_addr = env::var("MYSLIDE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid MYSLIDE_BIND_ADDR format");

        let log_level = env::var("MYSLIDE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("MYSLIDE_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let quote_rotation = match env::var("MYSLIDE_QUOTE_ROTATION").as_deref() {
            Ok("interval") => RotationPolicy::Interval {
                period: secs_from_env("MYSLIDE_QUOTE_INTERVAL_SECS", DEFAULT_INTERVAL_PERIOD),
            },
            _ => RotationPolicy::Window {
                window: secs_from_env("MYSLIDE_QUOTE_WINDOW_SECS", DEFAULT_WINDOW),
            },
        };

        Self {
            admin_credentials,
            db_path,
            bind_addr,
            log_level,
            log_format,
            quote_rotation,
        }
    }
}

/// Read a positive number of seconds, falling back to `default`.
fn secs_from_env(key: &str, default: Duration) -> Duration {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(default)
}

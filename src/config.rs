// src/config.rs

use std::env;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use url::Url;

const DEFAULT_DB_PATH: &str = "immo_watch.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "environment variable {name} is not set"),
            ConfigError::InvalidUrl(msg) => write!(f, "IMMO_WATCH_URL is not a valid URL: {msg}"),
        }
    }
}

impl Error for ConfigError {}

/// Everything the job needs from its environment. Read once at startup;
/// nothing else in the program touches `env`.
#[derive(Debug, Clone)]
pub struct Config {
    pub page_url: Url,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub brevo_api_key: String,
    pub sender_email: String,
    pub sender_name: String,
    pub recipient_email: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let page_url = Url::parse(&require("IMMO_WATCH_URL")?)
            .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            page_url,
            data_dir: PathBuf::from(require("IMMO_WATCH_DATA_DIR")?),
            db_path: env::var("IMMO_WATCH_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH)),
            brevo_api_key: require("BREVO_API_KEY")?,
            sender_email: require("IMMO_WATCH_SENDER_EMAIL")?,
            sender_name: env::var("IMMO_WATCH_SENDER_NAME")
                .unwrap_or_else(|_| "Immo Watch".to_string()),
            recipient_email: require("IMMO_WATCH_RECIPIENT")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

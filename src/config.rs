use log::info;
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use crate::error::ConfigError;

pub struct Config {
    pub bind: String,
    pub port: u16,
    pub database_dir: PathBuf,
    pub api_url: String,
    pub download_dir: PathBuf,
    pub export_release: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            bind: try_load("SURVEY_BIND", "127.0.0.1")?,
            port: try_load("SURVEY_PORT", "3000")?,
            database_dir: try_load("SURVEY_DATABASE_DIR", "database")?,
            api_url: try_load("SURVEY_API_URL", "http://127.0.0.1:3000")?,
            download_dir: try_load("SURVEY_DOWNLOAD_DIR", "downloads")?,
            export_release: Duration::from_secs(try_load("SURVEY_EXPORT_RELEASE_SECS", "60")?),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            message: e.to_string(),
        })
}

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_BASE: &str = "https://doomstop-backend.onrender.com";
pub const DEFAULT_API_TOKEN: &str = "doomstop-secret-token";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub api_token: String,
    pub remote_timeout: Duration,
    pub port: u16,
    pub data_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base = env::var("DOOMSTOP_API_BASE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_token = env::var("DOOMSTOP_API_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_TOKEN.to_string());
        let timeout_secs = env::var("DOOMSTOP_REMOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            api_base,
            api_token,
            remote_timeout: Duration::from_secs(timeout_secs),
            port,
            data_path: resolve_data_path(),
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/store.json")
}

use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub fetch_limit: u32,
}

impl Config {
    pub fn load() -> Self {
        Self {
            api_url: try_load("TIL_API_URL", "http://localhost:54321"),
            api_key: load_key(),
            fetch_limit: try_load("TIL_FETCH_LIMIT", "1000"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

// Env var first, mounted secret second. A missing key is allowed for
// anon-access local tables; the client then sends no auth headers.
fn load_key() -> String {
    var("TIL_API_KEY").unwrap_or_else(|_| read_secret("TIL_API_KEY"))
}

fn read_secret(secret_name: &str) -> String {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .unwrap_or_default()
}

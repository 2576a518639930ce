//! Configuration management for playlyzer.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every setting has a default that matches
//! the Playlist Analyzer backend's development setup, so an empty environment
//! still yields a working configuration.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf, time::Duration};

/// Name of the per-user directory under the platform data directory.
pub const APP_DIR: &str = "playlyzer";

/// Storage key the token bundle is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "spotify_tokens";

/// Path the provider redirects the browser to after authorization.
pub const CALLBACK_PATH: &str = "/callback";

/// Delay before moving on to the dashboard after a successful callback.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Delay before returning to the login route after a failed callback.
pub const FAILURE_REDIRECT_DELAY: Duration = Duration::from_secs(3);

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 120;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory when it doesn't exist. A missing `.env` file is not an
/// error since all settings have defaults.
///
/// The file is looked up at:
/// - Linux: `~/.local/share/playlyzer/.env`
/// - macOS: `~/Library/Application Support/playlyzer/.env`
/// - Windows: `%LOCALAPPDATA%/playlyzer/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or if an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the platform data directory for playlyzer.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Returns the base URL of the Playlist Analyzer backend.
///
/// Reads `BACKEND_URL`, defaulting to `http://localhost:8000`. A trailing slash
/// is stripped so paths can be appended directly.
pub fn backend_url() -> String {
    env_or("BACKEND_URL", DEFAULT_BACKEND_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the Spotify Web API base URL used for the profile lookup.
///
/// Reads `SPOTIFY_API_URL`, defaulting to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the address the local callback listener binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:3000`. It has to match the
/// redirect URI the backend registers with Spotify.
pub fn server_addr() -> String {
    env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns how long `login` waits for the browser redirect.
///
/// Reads `LOGIN_TIMEOUT_SECS`; unparsable values fall back to 120 seconds.
pub fn login_timeout() -> Duration {
    let secs = env::var("LOGIN_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_LOGIN_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

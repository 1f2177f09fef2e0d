//! Configuration management for spotistats.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Only the Spotify client ID and the redirect URI have no default; they are
//! needed for the authorization flow and nothing else.

use std::{env, path::PathBuf};

use crate::error::{Result, StatsError};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_STATS_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_SCOPE: &str = "user-top-read user-read-recently-played";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Directory holding the `.env` file and cached credentials.
///
/// - Linux: `~/.local/share/spotistats`
/// - macOS: `~/Library/Application Support/spotistats`
/// - Windows: `%LOCALAPPDATA%/spotistats`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotistats");
    path
}

/// Loads environment variables from `<data dir>/.env`.
///
/// Creates the data directory if needed. A missing `.env` file is not an
/// error; variables may come from the process environment alone. Values
/// already set in the environment are not overridden.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists but
/// cannot be parsed.
pub async fn load_env() -> Result<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map_err(|e| StatsError::config(format!("cannot load {}: {}", path.display(), e)))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn required(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| StatsError::config(format!("{key} must be set")))
}

/// Address of the local OAuth callback server (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Address the statistics HTTP API binds to (`STATS_SERVER_ADDRESS`).
pub fn stats_server_addr() -> String {
    var_or("STATS_SERVER_ADDRESS", DEFAULT_STATS_SERVER_ADDRESS)
}

/// Spotify application client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// OAuth redirect URI registered with the Spotify application
/// (`SPOTIFY_API_REDIRECT_URI`). It must point at the callback server, e.g.
/// `http://127.0.0.1:8888/callback`.
pub fn spotify_redirect_uri() -> Result<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Space-separated scopes requested during authorization
/// (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Frontend origins allowed by CORS (`CORS_ALLOWED_ORIGINS`, comma separated).
pub fn cors_allowed_origins() -> Vec<String> {
    var_or("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGINS)
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

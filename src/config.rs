//! Configuration management for the Deep Cut generator.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API endpoints, OAuth client settings, the
//! server address and the track selection policy.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Error, Res, types::SelectionPolicy};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
pub const DEFAULT_SPOTIFY_SCOPE: &str =
    "playlist-modify-private playlist-modify-public playlist-read-private";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `deepcut/.env` inside the platform-specific
/// local data directory. A missing file is not an error; every setting has
/// either a default or is reported when it is first needed.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/deepcut/.env`
/// - macOS: `~/Library/Application Support/deepcut/.env`
/// - Windows: `%LOCALAPPDATA%/deepcut/.env`
///
/// # Errors
///
/// Returns [`Error::Io`] if the parent directory cannot be created and
/// [`Error::Config`] if an existing `.env` file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    } else {
        log::debug!("No .env file at {}", path.display());
    }

    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("deepcut/.env");
    path
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn required(key: &str) -> Res<String> {
    env::var(key).map_err(|_| Error::Config(format!("{} must be set", key)))
}

/// Returns the address the HTTP server binds to, e.g. `127.0.0.1:8080`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the Spotify API client ID obtained when registering the application.
///
/// # Errors
///
/// Returns [`Error::Config`] if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret, if one is configured.
///
/// The PKCE flow works without it; the `/token` endpoint sends it along when
/// present so that confidential clients can exchange codes too.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET")
        .ok()
        .filter(|secret| !secret.is_empty())
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_SPOTIFY_REDIRECT_URI)
}

/// Returns the Spotify API scope permissions requested during authorization.
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

/// Returns the track selection policy used for server runs.
///
/// Reads `SELECTION_POLICY`, then the older `PROGRAM_MODE` key, and falls
/// back to [`SelectionPolicy::AllButOriginal`] when neither is set.
///
/// # Errors
///
/// Returns [`Error::Config`] for a value that names no known policy, so a
/// misconfigured server refuses to start instead of silently producing
/// empty playlists.
pub fn selection_policy() -> Res<SelectionPolicy> {
    resolve_policy(
        env::var("SELECTION_POLICY").ok(),
        env::var("PROGRAM_MODE").ok(),
    )
}

fn resolve_policy(
    selection_policy: Option<String>,
    program_mode: Option<String>,
) -> Res<SelectionPolicy> {
    match selection_policy.or(program_mode) {
        Some(value) => Ok(value.parse::<SelectionPolicy>()?),
        None => Ok(SelectionPolicy::default()),
    }
}

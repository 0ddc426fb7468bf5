//! Configuration management for the Spotify to Tidal transfer tool.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files: the Spotify and Tidal API credentials, the API
//! endpoints and the address of the local OAuth callback server.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::warning;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `spotidal/.env` inside the platform-specific local
/// data directory. Variables already present in the process environment are
/// not overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotidal/.env`
/// - macOS: `~/Library/Application Support/spotidal/.env`
/// - Windows: `%LOCALAPPDATA%/spotidal/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created. A missing
/// `.env` file only produces a warning, since every value can also come from
/// the process environment.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if let Err(e) = dotenv::from_path(&path) {
        warning!(
            "Could not load {}: {}. Falling back to the process environment.",
            path.display(),
            e
        );
    }
    Ok(())
}

/// Root of everything the tool stores locally (`.env`, token caches).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotidal");
    path
}

fn required(key: &str) -> Result<String, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} must be set", key)),
    }
}

fn with_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address the local OAuth callback server binds to, e.g. `127.0.0.1:8888`.
pub fn server_addr() -> String {
    with_default("SERVER_ADDRESS", "127.0.0.1:8888")
}

/// Client ID of the Spotify application used for the PKCE flow.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Redirect URI registered for the Spotify application.
///
/// Must point at the `/callback` route of [`server_addr`].
pub fn spotify_redirect_uri() -> String {
    with_default("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback")
}

/// Scopes requested from Spotify: liked songs and the user's playlists.
pub fn spotify_scope() -> String {
    with_default(
        "SPOTIFY_API_AUTH_SCOPE",
        "user-library-read playlist-read-private playlist-read-collaborative",
    )
}

pub fn spotify_apiauth_url() -> String {
    with_default(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

pub fn spotify_apitoken_url() -> String {
    with_default(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

/// Client ID of the Tidal application used for the device authorization flow.
pub fn tidal_client_id() -> Result<String, String> {
    required("TIDAL_CLIENT_ID")
}

pub fn tidal_client_secret() -> Result<String, String> {
    required("TIDAL_CLIENT_SECRET")
}

pub fn tidal_apiurl() -> String {
    with_default("TIDAL_API_URL", "https://api.tidal.com/v1")
}

pub fn tidal_auth_url() -> String {
    with_default("TIDAL_AUTH_URL", "https://auth.tidal.com/v1/oauth2")
}

pub fn tidal_scope() -> String {
    with_default("TIDAL_AUTH_SCOPE", "r_usr w_usr w_sub")
}

/// Country code override for Tidal requests. When unset, the country code of
/// the authenticated session is used.
pub fn tidal_country_code() -> Option<String> {
    env::var("TIDAL_COUNTRY_CODE")
        .ok()
        .filter(|v| !v.trim().is_empty())
}

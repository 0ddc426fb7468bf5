//! # Spotify Integration Module
//!
//! Read-only client for the Spotify Web API, the source catalog of a transfer.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: code verifier and challenge, browser launch,
//!   local callback server, token exchange and refresh.
//! - [`tracks`] - the user's liked songs (`GET /me/tracks`).
//! - [`playlists`] - the user's own playlists and their tracks (`GET /me/playlists`,
//!   `GET /playlists/{id}/tracks`).
//!
//! ## Pagination
//!
//! Every listing endpoint is offset-paged. The client follows the absolute `next`
//! URL of each page until it is `null`, so callers always get fully materialized
//! lists.
//!
//! ## Error Handling
//!
//! Requests go through [`crate::http::send`], which honours `Retry-After` on rate
//! limits and retries `502 Bad Gateway`. Payloads are converted into
//! [`TrackDescriptor`](crate::types::TrackDescriptor) and
//! [`PlaylistDescriptor`](crate::types::PlaylistDescriptor) here; entries that
//! cannot be transferred (local files, podcast episodes, removed tracks) are
//! dropped during the conversion.
//!
//! ## Usage
//!
//! ```rust
//! let spotify = SpotifyClient::connect().await?;
//! let liked = spotify.list_favorite_tracks().await?;
//! let playlists = spotify.list_owned_playlists(Some(5)).await?;
//! ```

pub mod auth;
pub mod playlists;
pub mod tracks;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    catalog::{CatalogResult, SourceCatalog},
    config, http,
    management::TokenManager,
    types::{PlaylistDescriptor, Service, SpotifyUser, TrackDescriptor, UserProfile},
};

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: config::spotify_apiurl(),
            tokens: Mutex::new(tokens),
        }
    }

    /// Builds a client from the cached Spotify token.
    pub async fn connect() -> Result<Self, String> {
        let tokens = TokenManager::load(Service::Spotify).await?;
        Ok(Self::new(tokens))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> CatalogResult<T> {
        let token = self.tokens.lock().await.get_valid_token().await;
        let response = http::send(|| self.http.get(url).bearer_auth(&token)).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SourceCatalog for SpotifyClient {
    async fn current_user(&self) -> CatalogResult<UserProfile> {
        let user: SpotifyUser = self.get_json(&self.url("/me")).await?;
        Ok(UserProfile {
            id: user.id,
            display_name: user.display_name,
        })
    }

    async fn list_favorite_tracks(&self) -> CatalogResult<Vec<TrackDescriptor>> {
        tracks::get_liked_tracks(self).await
    }

    async fn list_owned_playlists(
        &self,
        limit: Option<usize>,
    ) -> CatalogResult<Vec<PlaylistDescriptor>> {
        let user = self.current_user().await?;
        playlists::get_owned_playlists(self, &user.id, limit).await
    }

    async fn list_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> CatalogResult<Vec<TrackDescriptor>> {
        playlists::get_playlist_tracks(self, playlist_id).await
    }
}

//! # Tidal Integration Module
//!
//! Client for the Tidal API v1, the destination catalog of a transfer. It
//! implements [`DestinationCatalog`]: track search, playlist creation, adding
//! tracks to a playlist, adding tracks to the favorites, and listing the user's
//! playlists for duplicate detection.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 device authorization flow and token refresh.
//! - [`search`] - `GET /search/tracks`.
//! - [`playlists`] - playlist creation, ETag-guarded item insertion and listing.
//! - [`favorites`] - `POST /users/{id}/favorites/tracks`.
//!
//! ## Session
//!
//! Every user-scoped endpoint needs the Tidal user id, and every request needs a
//! `countryCode`. Both come with the token of the device flow; older caches
//! without them are completed through `GET /sessions` when connecting.
//! `TIDAL_COUNTRY_CODE` overrides the session's country.

pub mod auth;
pub mod favorites;
pub mod playlists;
pub mod search;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    Res,
    catalog::{CatalogResult, DestinationCatalog},
    config, http,
    management::TokenManager,
    types::{DestinationPlaylist, DestinationTrack, Service, TidalSession, UserProfile},
};

pub struct TidalClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
    user_id: String,
    country_code: String,
}

impl TidalClient {
    /// Builds a client from the cached Tidal token.
    pub async fn connect() -> Res<Self> {
        let tokens = TokenManager::load(Service::Tidal).await?;
        let cached = tokens.current_token().clone();

        let mut client = Self {
            http: Client::new(),
            api_url: config::tidal_apiurl(),
            tokens: Mutex::new(tokens),
            user_id: cached.user_id.unwrap_or_default(),
            country_code: cached.country_code.unwrap_or_default(),
        };

        if client.user_id.is_empty() || client.country_code.is_empty() {
            let session = client.session().await?;
            client.user_id = session.user_id.to_string();
            client.country_code = session.country_code;
        }
        if let Some(country_code) = config::tidal_country_code() {
            client.country_code = country_code;
        }

        Ok(client)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// `{api}{path}?countryCode=..` with `query` appended when non-empty.
    pub(crate) fn url(&self, path: &str, query: &str) -> String {
        let mut url = format!(
            "{}{}?countryCode={}",
            self.api_url,
            path,
            urlencoding::encode(&self.country_code)
        );
        if !query.is_empty() {
            url.push('&');
            url.push_str(query);
        }
        url
    }

    async fn access_token(&self) -> String {
        self.tokens.lock().await.get_valid_token().await
    }

    pub(crate) async fn get(&self, url: &str) -> CatalogResult<Response> {
        let token = self.access_token().await;
        http::send(|| self.http.get(url).bearer_auth(&token)).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> CatalogResult<T> {
        Ok(self.get(url).await?.json::<T>().await?)
    }

    pub(crate) async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        etag: Option<&str>,
    ) -> CatalogResult<Response> {
        let token = self.access_token().await;
        http::send(|| {
            let request = self.http.post(url).bearer_auth(&token).form(form);
            match etag {
                Some(etag) => request.header("If-None-Match", etag),
                None => request,
            }
        })
        .await
    }

    async fn session(&self) -> CatalogResult<TidalSession> {
        let token = self.access_token().await;
        let url = format!("{}/sessions", self.api_url);
        let response = http::send(|| self.http.get(&url).bearer_auth(&token)).await?;
        Ok(response.json::<TidalSession>().await?)
    }
}

#[async_trait]
impl DestinationCatalog for TidalClient {
    async fn current_user(&self) -> CatalogResult<UserProfile> {
        let session = self.session().await?;
        Ok(UserProfile {
            id: session.user_id.to_string(),
            display_name: None,
        })
    }

    async fn search_tracks(&self, query: &str) -> CatalogResult<Vec<DestinationTrack>> {
        search::search_tracks(self, query).await
    }

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> CatalogResult<DestinationPlaylist> {
        playlists::create(self, name, description).await
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist: &DestinationPlaylist,
        track_ids: &[String],
    ) -> CatalogResult<()> {
        playlists::add_tracks(self, &playlist.id, track_ids).await
    }

    async fn add_track_to_favorites(&self, track_id: &str) -> CatalogResult<()> {
        favorites::add_track(self, track_id).await
    }

    async fn list_owned_playlists(&self) -> CatalogResult<Vec<DestinationPlaylist>> {
        playlists::list_owned(self).await
    }
}

//! Catalog seams between the transfer core and the streaming services.
//!
//! The transfer core only talks to these two traits. The Spotify client
//! implements [`SourceCatalog`], the Tidal client implements
//! [`DestinationCatalog`], and the integration tests plug in in-memory fakes.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::types::{
    DestinationPlaylist, DestinationTrack, PlaylistDescriptor, TrackDescriptor, UserProfile,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read access to the catalog the tracks come from.
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    async fn current_user(&self) -> CatalogResult<UserProfile>;

    /// All liked songs of the authenticated user, oldest page first.
    async fn list_favorite_tracks(&self) -> CatalogResult<Vec<TrackDescriptor>>;

    /// Playlists owned by the authenticated user, at most `limit` if given.
    async fn list_owned_playlists(
        &self,
        limit: Option<usize>,
    ) -> CatalogResult<Vec<PlaylistDescriptor>>;

    async fn list_playlist_tracks(&self, playlist_id: &str)
    -> CatalogResult<Vec<TrackDescriptor>>;
}

/// Search and write access to the catalog the tracks go to.
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    async fn current_user(&self) -> CatalogResult<UserProfile>;

    async fn search_tracks(&self, query: &str) -> CatalogResult<Vec<DestinationTrack>>;

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> CatalogResult<DestinationPlaylist>;

    async fn add_tracks_to_playlist(
        &self,
        playlist: &DestinationPlaylist,
        track_ids: &[String],
    ) -> CatalogResult<()>;

    async fn add_track_to_favorites(&self, track_id: &str) -> CatalogResult<()>;

    async fn list_owned_playlists(&self) -> CatalogResult<Vec<DestinationPlaylist>>;
}

/// Case-insensitive exact name lookup among the destination's playlists.
pub fn playlist_name_taken(existing: &[DestinationPlaylist], name: &str) -> bool {
    let wanted = name.to_lowercase();
    existing.iter().any(|p| p.name.to_lowercase() == wanted)
}

/// Checks whether a playlist named `name` already exists in the destination.
pub async fn playlist_exists(
    destination: &dyn DestinationCatalog,
    name: &str,
) -> CatalogResult<bool> {
    let existing = destination.list_owned_playlists().await?;
    Ok(playlist_name_taken(&existing, name))
}

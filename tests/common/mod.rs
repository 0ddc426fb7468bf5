#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use spotidal::{
    catalog::{CatalogError, CatalogResult, DestinationCatalog, SourceCatalog},
    progress::{SearchStage, TransferProgress},
    transfer::{Interrupt, TransferOptions},
    types::{
        DestinationPlaylist, DestinationTrack, PlaylistDescriptor, TrackDescriptor, UserProfile,
    },
};

/// Every call a [`FakeDestination`] received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    CreatePlaylist(String),
    AddToPlaylist(String, Vec<String>),
    AddFavorite(String),
    ListPlaylists,
}

/// In-memory destination catalog.
#[derive(Default)]
pub struct FakeDestination {
    /// Search results by exact query; unknown queries return no results.
    pub results: HashMap<String, Vec<DestinationTrack>>,
    pub failing_queries: HashSet<String>,
    pub fail_create: bool,
    /// Rejects playlist additions of more than one id.
    pub fail_batch: bool,
    /// Ids whose single addition (playlist or favorites) fails.
    pub failing_ids: HashSet<String>,
    pub existing: Vec<DestinationPlaylist>,
    pub fail_listing: bool,
    pub calls: Mutex<Vec<Call>>,
    created: AtomicUsize,
}

impl FakeDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, query: &str, tracks: Vec<DestinationTrack>) -> Self {
        self.results.insert(query.to_string(), tracks);
        self
    }

    pub fn with_failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    pub fn with_failing_id(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }

    pub fn with_existing(mut self, name: &str) -> Self {
        self.existing.push(DestinationPlaylist {
            id: format!("existing-{}", self.existing.len()),
            name: name.to_string(),
        });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    pub fn playlist_adds(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::AddToPlaylist(_, ids) => Some(ids),
                _ => None,
            })
            .collect()
    }

    pub fn favorites(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::AddFavorite(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn created_playlists(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreatePlaylist(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DestinationCatalog for FakeDestination {
    async fn current_user(&self) -> CatalogResult<UserProfile> {
        Ok(UserProfile {
            id: "tidal-user".to_string(),
            display_name: None,
        })
    }

    async fn search_tracks(&self, query: &str) -> CatalogResult<Vec<DestinationTrack>> {
        self.record(Call::Search(query.to_string()));
        if self.failing_queries.contains(query) {
            return Err(CatalogError::Api(format!("search for '{}' failed", query)));
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }

    async fn create_playlist(
        &self,
        name: &str,
        _description: &str,
    ) -> CatalogResult<DestinationPlaylist> {
        self.record(Call::CreatePlaylist(name.to_string()));
        if self.fail_create {
            return Err(CatalogError::Api("playlist creation rejected".to_string()));
        }
        let n = self.created.fetch_add(1, Ordering::SeqCst);
        Ok(DestinationPlaylist {
            id: format!("created-{}", n),
            name: name.to_string(),
        })
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist: &DestinationPlaylist,
        track_ids: &[String],
    ) -> CatalogResult<()> {
        self.record(Call::AddToPlaylist(playlist.id.clone(), track_ids.to_vec()));
        if self.fail_batch && track_ids.len() > 1 {
            return Err(CatalogError::Api("batch rejected".to_string()));
        }
        if track_ids.iter().any(|id| self.failing_ids.contains(id)) {
            return Err(CatalogError::Api("unknown track id".to_string()));
        }
        Ok(())
    }

    async fn add_track_to_favorites(&self, track_id: &str) -> CatalogResult<()> {
        self.record(Call::AddFavorite(track_id.to_string()));
        if self.failing_ids.contains(track_id) {
            return Err(CatalogError::Api("unknown track id".to_string()));
        }
        Ok(())
    }

    async fn list_owned_playlists(&self) -> CatalogResult<Vec<DestinationPlaylist>> {
        self.record(Call::ListPlaylists);
        if self.fail_listing {
            return Err(CatalogError::Api("listing failed".to_string()));
        }
        Ok(self.existing.clone())
    }
}

/// In-memory source catalog.
#[derive(Default)]
pub struct FakeSource {
    pub liked: Vec<TrackDescriptor>,
    pub playlists: Vec<PlaylistDescriptor>,
    pub playlist_tracks: HashMap<String, Vec<TrackDescriptor>>,
    pub failing_playlists: HashSet<String>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(mut self, playlist: PlaylistDescriptor, tracks: Vec<TrackDescriptor>) -> Self {
        self.playlist_tracks
            .insert(playlist.source_id.clone(), tracks);
        self.playlists.push(playlist);
        self
    }
}

#[async_trait]
impl SourceCatalog for FakeSource {
    async fn current_user(&self) -> CatalogResult<UserProfile> {
        Ok(UserProfile {
            id: "spotify-user".to_string(),
            display_name: Some("Spotify User".to_string()),
        })
    }

    async fn list_favorite_tracks(&self) -> CatalogResult<Vec<TrackDescriptor>> {
        Ok(self.liked.clone())
    }

    async fn list_owned_playlists(
        &self,
        limit: Option<usize>,
    ) -> CatalogResult<Vec<PlaylistDescriptor>> {
        let limit = limit.unwrap_or(self.playlists.len());
        Ok(self.playlists.iter().take(limit).cloned().collect())
    }

    async fn list_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> CatalogResult<Vec<TrackDescriptor>> {
        if self.failing_playlists.contains(playlist_id) {
            return Err(CatalogError::Api("playlist unavailable".to_string()));
        }
        Ok(self
            .playlist_tracks
            .get(playlist_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Records failed searches and pauses, and triggers an interrupt after a
/// number of started tracks.
#[derive(Default)]
pub struct RecordingProgress {
    pub failed_searches: Mutex<Vec<SearchStage>>,
    pub started: AtomicUsize,
    pub pauses: AtomicUsize,
    pub interrupt_after: Option<(usize, Interrupt)>,
}

impl RecordingProgress {
    pub fn interrupting_after(count: usize, interrupt: &Interrupt) -> Self {
        Self {
            interrupt_after: Some((count, interrupt.clone())),
            ..Self::default()
        }
    }

    pub fn failed_searches(&self) -> Vec<SearchStage> {
        self.failed_searches.lock().unwrap().clone()
    }

    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

impl TransferProgress for RecordingProgress {
    fn track_started(&self, _position: usize, _total: usize, _track: &TrackDescriptor) {
        let started = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((after, interrupt)) = &self.interrupt_after {
            if started >= *after {
                interrupt.trigger();
            }
        }
    }

    fn search_failed(&self, _track: &TrackDescriptor, stage: SearchStage, _error: &CatalogError) {
        self.failed_searches.lock().unwrap().push(stage);
    }

    fn pacing(&self, _delay: Duration) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn track(id: &str, title: &str, artist: &str) -> TrackDescriptor {
    TrackDescriptor::new(id, title, vec![artist.to_string()], "Album").unwrap()
}

pub fn track_with_isrc(id: &str, title: &str, artist: &str, isrc: &str) -> TrackDescriptor {
    track(id, title, artist).with_isrc(Some(isrc.to_string()))
}

pub fn hit(id: &str, title: &str, artist: &str) -> DestinationTrack {
    DestinationTrack {
        id: id.to_string(),
        title: title.to_string(),
        artists: vec![artist.to_string()],
    }
}

pub fn playlist(id: &str, name: &str, track_count: u64) -> PlaylistDescriptor {
    PlaylistDescriptor {
        source_id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        is_public: true,
        is_collaborative: false,
        track_count,
    }
}

/// `count` tracks named "Song {i}" by "Artist {i}", each with one search hit
/// registered in `destination` under id "t{i}".
pub fn matched_tracks(
    count: usize,
    mut destination: FakeDestination,
) -> (Vec<TrackDescriptor>, FakeDestination) {
    let mut tracks = Vec::new();
    for i in 1..=count {
        let title = format!("Song {}", i);
        let artist = format!("Artist {}", i);
        destination = destination.with_result(
            &format!("{} {}", title, artist),
            vec![hit(&format!("t{}", i), &title, &artist)],
        );
        tracks.push(track(&format!("s{}", i), &title, &artist));
    }
    (tracks, destination)
}

/// Real pacing with a 1 ms pause, so tests can count the pauses quickly.
pub fn fast_pacing() -> TransferOptions {
    TransferOptions {
        pace_delay: Duration::from_millis(1),
        playlist_pace_delay: Duration::from_millis(1),
        ..TransferOptions::default()
    }
}

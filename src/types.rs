use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Streaming service the tool holds a session for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Service {
    Spotify,
    Tidal,
}

impl Service {
    pub fn slug(&self) -> &'static str {
        match self {
            Service::Spotify => "spotify",
            Service::Tidal => "tidal",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Spotify => write!(f, "Spotify"),
            Service::Tidal => write!(f, "Tidal"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// A track read from the source catalog.
///
/// Built through [`TrackDescriptor::new`], which rejects tracks without an id,
/// title or artist. The artists keep the source order, primary artist first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    source_id: String,
    title: String,
    artists: Vec<String>,
    album: String,
    isrc: Option<String>,
    duration_ms: Option<u64>,
}

impl TrackDescriptor {
    pub fn new(
        source_id: impl Into<String>,
        title: impl Into<String>,
        artists: Vec<String>,
        album: impl Into<String>,
    ) -> Result<Self, String> {
        let source_id = source_id.into();
        let title = title.into();
        let artists: Vec<String> = artists
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        if source_id.trim().is_empty() {
            return Err(format!("Track '{}' has no id", title));
        }
        if title.trim().is_empty() {
            return Err(format!("Track {} has no title", source_id));
        }
        if artists.is_empty() {
            return Err(format!("Track '{}' has no artists", title));
        }

        Ok(Self {
            source_id,
            title,
            artists,
            album: album.into(),
            isrc: None,
            duration_ms: None,
        })
    }

    pub fn with_isrc(mut self, isrc: Option<String>) -> Self {
        self.isrc = isrc
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: Option<u64>) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn primary_artist(&self) -> &str {
        &self.artists[0]
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn isrc(&self) -> Option<&str> {
        self.isrc.as_deref()
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }

    /// "Title by Artist A, Artist B", used in progress and error messages.
    pub fn label(&self) -> String {
        format!("{} by {}", self.title, self.artists.join(", "))
    }
}

/// A playlist owned by the authenticated source user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDescriptor {
    pub source_id: String,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub is_collaborative: bool,
    pub track_count: u64,
}

/// A search hit in the destination catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationTrack {
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
}

impl DestinationTrack {
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(String::as_str).unwrap_or("Unknown Artist")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlaylist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Found {
        id: String,
        title: String,
        artist: String,
    },
    NotFound,
}

impl MatchResult {
    pub fn found(track: &DestinationTrack) -> Self {
        MatchResult::Found {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.primary_artist().to_string(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            MatchResult::Found { id, .. } => Some(id),
            MatchResult::NotFound => None,
        }
    }
}

/// Counters of a transfer run.
///
/// `total` counts processed tracks, so `total == found + not_found` holds at
/// any point of a run, including an interrupted one. Every write outcome is
/// recorded against a previous match, so `found >= added + failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferStats {
    pub total: usize,
    pub found: usize,
    pub added: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl TransferStats {
    pub fn record_found(&mut self) {
        self.total += 1;
        self.found += 1;
    }

    pub fn record_not_found(&mut self) {
        self.total += 1;
        self.not_found += 1;
    }

    pub fn record_added(&mut self, count: usize) {
        self.added += count;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    pub fn merge(&mut self, other: &TransferStats) {
        self.total += other.total;
        self.found += other.found;
        self.added += other.added;
        self.not_found += other.not_found;
        self.failed += other.failed;
    }

    pub fn is_consistent(&self) -> bool {
        self.total == self.found + self.not_found && self.found >= self.added + self.failed
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransferReport {
    pub stats: TransferStats,
    pub unmatched: Vec<TrackDescriptor>,
    pub interrupted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistState {
    Created,
    Populating,
    Completed,
    PartiallyCompleted,
    Failed,
}

#[derive(Debug, Clone)]
pub struct PlaylistReport {
    pub name: String,
    pub state: PlaylistState,
    pub destination: Option<DestinationPlaylist>,
    pub stats: TransferStats,
    pub unmatched: Vec<TrackDescriptor>,
    pub interrupted: bool,
}

impl PlaylistReport {
    pub fn succeeded(&self) -> bool {
        matches!(
            self.state,
            PlaylistState::Completed | PlaylistState::PartiallyCompleted
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// 1-based positions in the listed playlists.
    Indices(Vec<usize>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicy {
    /// Leave out playlists whose name already exists on Tidal
    Skip,
    /// Create another playlist with the same name
    Duplicate,
    /// Abort the transfer without writing anything
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistPlan {
    pub selection: Selection,
    pub duplicates: DuplicatePolicy,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlaylistBatchSummary {
    pub successful: usize,
    pub failed: usize,
    pub skipped: Vec<String>,
    pub stats: TransferStats,
    pub reports: Vec<PlaylistReport>,
    pub interrupted: bool,
}

#[derive(Debug, Clone)]
pub enum PlaylistBatchOutcome {
    Completed(PlaylistBatchSummary),
    /// Nothing left to transfer after selection and duplicate filtering.
    Nothing,
    Cancelled,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub title: String,
    pub artists: String,
    pub album: String,
    pub length: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub tracks: u64,
    pub visibility: String,
}

// Spotify Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTracksResponse {
    pub items: Vec<TrackItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub album: Option<SpotifyAlbum>,
    pub external_ids: Option<ExternalIds>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyAlbum {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalIds {
    pub isrc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Option<Playlist>>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
    pub owner: PlaylistOwner,
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<TrackItem>,
    pub next: Option<String>,
}

// Tidal API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalSession {
    pub user_id: u64,
    pub country_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalTrackPage {
    pub items: Vec<TidalTrack>,
    pub total_number_of_items: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalTrack {
    pub id: u64,
    pub title: String,
    pub artist: Option<TidalArtist>,
    #[serde(default)]
    pub artists: Vec<TidalArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalPlaylist {
    pub uuid: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub number_of_tracks: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalPlaylistPage {
    pub items: Vec<TidalPlaylist>,
    pub total_number_of_items: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAuthorization {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub verification_uri_complete: Option<String>,
    pub expires_in: u64,
    pub interval: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub scope: Option<String>,
    pub user: Option<TidalTokenUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalTokenUser {
    pub user_id: u64,
    pub country_code: Option<String>,
}

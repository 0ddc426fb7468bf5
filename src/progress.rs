use std::time::Duration;

use crate::{
    catalog::CatalogError,
    types::{
        DestinationPlaylist, MatchResult, PlaylistDescriptor, PlaylistReport, PlaylistState,
        TrackDescriptor,
    },
};

/// Which of the two catalog searches of the matcher failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    Isrc,
    Text,
}

/// Observer of a running transfer.
///
/// The transfer core reports everything it does through this trait and never
/// writes to the terminal itself. Every method defaults to doing nothing.
pub trait TransferProgress: Send + Sync {
    fn track_started(&self, _position: usize, _total: usize, _track: &TrackDescriptor) {}

    fn search_failed(&self, _track: &TrackDescriptor, _stage: SearchStage, _error: &CatalogError) {}

    fn track_matched(&self, _track: &TrackDescriptor, _result: &MatchResult) {}

    fn track_not_found(&self, _track: &TrackDescriptor) {}

    fn track_added(&self, _track: &TrackDescriptor) {}

    fn track_add_failed(&self, _track: &TrackDescriptor, _error: &CatalogError) {}

    fn pacing(&self, _delay: Duration) {}

    fn interrupted(&self, _processed: usize, _total: usize) {}

    fn playlist_started(&self, _position: usize, _total: usize, _playlist: &PlaylistDescriptor) {}

    fn playlist_tracks_failed(&self, _playlist: &PlaylistDescriptor, _error: &CatalogError) {}

    fn playlist_state(&self, _name: &str, _state: PlaylistState) {}

    fn playlist_created(&self, _playlist: &DestinationPlaylist) {}

    fn playlist_creation_failed(&self, _name: &str, _error: &CatalogError) {}

    fn batch_add_failed(
        &self,
        _playlist: &DestinationPlaylist,
        _count: usize,
        _error: &CatalogError,
    ) {
    }

    fn playlist_track_add_failed(
        &self,
        _playlist: &DestinationPlaylist,
        _track_id: &str,
        _error: &CatalogError,
    ) {
    }

    fn playlist_finished(&self, _report: &PlaylistReport) {}

    fn duplicate_check_failed(&self, _error: &CatalogError) {}
}

/// Progress sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl TransferProgress for SilentProgress {}

use crate::{
    catalog::CatalogError,
    info,
    progress::{SearchStage, TransferProgress},
    success,
    types::{
        DestinationPlaylist, MatchResult, PlaylistDescriptor, PlaylistReport, TrackDescriptor,
    },
    warning,
};

use super::summary;

/// Writes transfer events to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl TransferProgress for ConsoleProgress {
    fn track_started(&self, position: usize, total: usize, track: &TrackDescriptor) {
        info!("[{}/{}] Searching: {}", position, total, track.label());
    }

    fn search_failed(&self, track: &TrackDescriptor, stage: SearchStage, error: &CatalogError) {
        let kind = match stage {
            SearchStage::Isrc => "ISRC",
            SearchStage::Text => "Text",
        };
        warning!("{} search failed for {}: {}", kind, track.label(), error);
    }

    fn track_matched(&self, _track: &TrackDescriptor, result: &MatchResult) {
        if let MatchResult::Found { title, artist, .. } = result {
            success!("Found on Tidal: {} by {}", title, artist);
        }
    }

    fn track_not_found(&self, track: &TrackDescriptor) {
        warning!("Not found on Tidal: {}", track.label());
    }

    fn track_add_failed(&self, track: &TrackDescriptor, error: &CatalogError) {
        warning!("Failed to add {} to favorites: {}", track.label(), error);
    }

    fn interrupted(&self, processed: usize, total: usize) {
        warning!(
            "Transfer interrupted after {} of {} tracks.",
            processed,
            total
        );
    }

    fn playlist_started(&self, position: usize, total: usize, playlist: &PlaylistDescriptor) {
        println!();
        info!("[{}/{}] Processing: {}", position, total, playlist.name);
    }

    fn playlist_tracks_failed(&self, playlist: &PlaylistDescriptor, error: &CatalogError) {
        warning!(
            "Failed to fetch the tracks of {} from Spotify: {}",
            playlist.name,
            error
        );
    }

    fn playlist_created(&self, playlist: &DestinationPlaylist) {
        success!("Created playlist {} on Tidal", playlist.name);
    }

    fn playlist_creation_failed(&self, name: &str, error: &CatalogError) {
        warning!("Failed to create playlist {} on Tidal: {}", name, error);
    }

    fn batch_add_failed(&self, playlist: &DestinationPlaylist, count: usize, error: &CatalogError) {
        warning!(
            "Adding {} tracks to {} at once failed ({}). Adding them one by one...",
            count,
            playlist.name,
            error
        );
    }

    fn playlist_track_add_failed(
        &self,
        playlist: &DestinationPlaylist,
        track_id: &str,
        error: &CatalogError,
    ) {
        warning!(
            "Failed to add track {} to {}: {}",
            track_id,
            playlist.name,
            error
        );
    }

    fn playlist_finished(&self, report: &PlaylistReport) {
        summary::print_playlist_report(report);
    }

    fn duplicate_check_failed(&self, error: &CatalogError) {
        warning!("Failed to check for existing playlists on Tidal: {}", error);
    }
}

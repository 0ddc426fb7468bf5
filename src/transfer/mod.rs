//! # Transfer Module
//!
//! Orchestration of the two transfer modes:
//!
//! - [`tracks`] - liked songs: match every track and add it to the Tidal favorites
//!   one by one.
//! - [`playlists`] - playlists: create the playlist on Tidal, match all of its tracks
//!   first, then add the matches in one batched call with a per-track fallback.
//!
//! Both loops are sequential and pace themselves with short sleeps to stay under the
//! Tidal rate limit. A Ctrl-C sets the shared [`Interrupt`]; the track in flight
//! finishes and the partial statistics are returned.

pub mod playlists;
pub mod tracks;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::time::sleep;

use crate::progress::TransferProgress;

pub use playlists::{transfer_playlist, transfer_playlists};
pub use tracks::transfer_tracks;

/// Cooperative cancellation flag shared between the signal handler and the
/// transfer loops. Once triggered it stays triggered.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Pause after this many liked songs.
    pub pace_every: usize,
    pub pace_delay: Duration,
    /// Pause after this many playlist track searches.
    pub playlist_pace_every: usize,
    pub playlist_pace_delay: Duration,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            pace_every: 10,
            pace_delay: Duration::from_secs(1),
            playlist_pace_every: 20,
            playlist_pace_delay: Duration::from_millis(500),
        }
    }
}

impl TransferOptions {
    pub fn without_pacing() -> Self {
        Self {
            pace_delay: Duration::ZERO,
            playlist_pace_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Sleeps after every `every`-th processed item, never after the last one.
pub(crate) async fn pace(
    processed: usize,
    total: usize,
    every: usize,
    delay: Duration,
    progress: &dyn TransferProgress,
) {
    if every == 0 || delay.is_zero() || processed >= total || processed % every != 0 {
        return;
    }

    progress.pacing(delay);
    sleep(delay).await;
}

use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{
    PlaylistDescriptor, PlaylistTableRow, Selection, TrackDescriptor, TrackTableRow,
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Steadily ticking spinner with a message, cleared by the caller.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb
}

/// `"{title} by {artists} (Album: {album})"`
pub fn display_track(track: &TrackDescriptor) -> String {
    format!(
        "{} by {} (Album: {})",
        track.title(),
        track.artists().join(", "),
        track.album()
    )
}

/// `"{name} - {n} tracks - Public|Private"`, plus `" (Collaborative)"` when shared.
pub fn display_playlist(playlist: &PlaylistDescriptor) -> String {
    let mut line = format!(
        "{} - {} tracks - {}",
        playlist.name,
        playlist.track_count,
        visibility(playlist)
    );
    if playlist.is_collaborative {
        line.push_str(" (Collaborative)");
    }
    line
}

fn visibility(playlist: &PlaylistDescriptor) -> &'static str {
    if playlist.is_public { "Public" } else { "Private" }
}

/// Parses the interactive playlist selection.
///
/// Accepts `all` (any case) or comma separated 1-based positions such as
/// `1,3,5`. Positions outside `1..=len` are dropped, so the result may be an
/// empty [`Selection::Indices`].
///
/// # Errors
///
/// Returns an error for empty input or any segment that is not a number.
pub fn parse_selection(input: &str, len: usize) -> Result<Selection, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Selection cannot be empty".to_string());
    }
    if input.eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }

    let mut indices = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        let index: usize = part
            .parse()
            .map_err(|_| format!("Invalid selection '{}'", part))?;
        if (1..=len).contains(&index) && !indices.contains(&index) {
            indices.push(index);
        }
    }

    Ok(Selection::Indices(indices))
}

pub fn track_rows(tracks: &[TrackDescriptor]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            title: t.title().to_string(),
            artists: t.artists().join(", "),
            album: t.album().to_string(),
            length: t.duration_ms().map(format_duration).unwrap_or_default(),
        })
        .collect()
}

/// `"m:ss"`, rounded down to the second.
pub fn format_duration(duration_ms: u64) -> String {
    let secs = duration_ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn playlist_rows(playlists: &[PlaylistDescriptor]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut visibility = visibility(p).to_string();
            if p.is_collaborative {
                visibility.push_str(" (Collaborative)");
            }
            PlaylistTableRow {
                position: i + 1,
                name: p.name.clone(),
                tracks: p.track_count,
                visibility,
            }
        })
        .collect()
}

use tabled::Table;

use crate::{catalog::SourceCatalog, info, utils, warning};

use super::{EXIT_FAILURE, EXIT_SUCCESS, session};

/// Shows the first `count` liked songs without touching Tidal.
pub async fn preview(count: usize) -> i32 {
    let spotify = session::spotify().await;

    info!("Fetching liked songs from Spotify...");
    let tracks = match spotify.list_favorite_tracks().await {
        Ok(tracks) => tracks,
        Err(e) => {
            warning!("Failed to fetch liked songs: {}", e);
            return EXIT_FAILURE;
        }
    };

    if tracks.is_empty() {
        info!("No liked songs found on Spotify.");
        return EXIT_SUCCESS;
    }

    let shown = &tracks[..count.min(tracks.len())];
    info!("Preview of first {} of {} liked songs:", shown.len(), tracks.len());
    println!("{}", Table::new(utils::track_rows(shown)));
    EXIT_SUCCESS
}

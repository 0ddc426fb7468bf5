use crate::{
    catalog::SourceCatalog,
    info, success,
    transfer::{Interrupt, TransferOptions, transfer_tracks},
    warning,
};

use super::{
    EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS, progress::ConsoleProgress, prompt, session,
    signal, summary,
};

/// Transfers the Spotify liked songs into the Tidal favorites.
///
/// Returns the process exit code: success when at least one song was added
/// or there was nothing to transfer, failure when nothing could be added and
/// the interrupted code after a Ctrl-C.
pub async fn likes(limit: Option<usize>, yes: bool) -> i32 {
    transfer_likes(limit, yes, &signal::on_ctrl_c()).await
}

pub(super) async fn transfer_likes(
    limit: Option<usize>,
    yes: bool,
    interrupt: &Interrupt,
) -> i32 {
    let spotify = session::spotify().await;
    let tidal = session::tidal().await;

    info!("Fetching liked songs from Spotify...");
    let mut tracks = match spotify.list_favorite_tracks().await {
        Ok(tracks) => tracks,
        Err(e) => {
            warning!("Failed to fetch liked songs: {}", e);
            return EXIT_FAILURE;
        }
    };

    if let Some(code) = signal::stopped(interrupt) {
        return code;
    }

    if tracks.is_empty() {
        info!("No liked songs found on Spotify.");
        return EXIT_SUCCESS;
    }
    success!("Found {} liked songs", tracks.len());

    if let Some(limit) = limit {
        if limit < tracks.len() {
            tracks.truncate(limit);
            info!("Limited to first {} songs for transfer", limit);
        }
    }

    if !yes
        && !prompt::confirm(&format!(
            "Ready to transfer {} liked songs to Tidal. Do you want to continue?",
            tracks.len()
        ))
    {
        info!("Transfer cancelled.");
        return EXIT_SUCCESS;
    }
    if let Some(code) = signal::stopped(interrupt) {
        return code;
    }

    let report = transfer_tracks(
        &tracks,
        &tidal,
        &TransferOptions::default(),
        interrupt,
        &ConsoleProgress,
    )
    .await;
    summary::print_likes_summary(&report);

    if report.interrupted {
        EXIT_INTERRUPTED
    } else if report.stats.added > 0 || report.stats.total == 0 {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

use tabled::Table;

use crate::{
    catalog::SourceCatalog,
    info,
    transfer::{
        Interrupt, TransferOptions,
        playlists::{existing_names, select_playlists},
        transfer_playlists,
    },
    types::{DuplicatePolicy, PlaylistBatchOutcome, PlaylistPlan, Selection},
    utils, warning,
};

use super::{
    EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS, progress::ConsoleProgress, prompt, session,
    signal, summary,
};

/// Command line choices of a playlist transfer.
#[derive(Debug, Clone, Default)]
pub struct PlaylistArgs {
    pub all: bool,
    pub playlist_limit: Option<usize>,
    pub overwrite: bool,
    pub on_duplicate: Option<DuplicatePolicy>,
    pub yes: bool,
}

/// Interactive playlist transfer.
///
/// Lists the owned Spotify playlists, resolves the selection and the duplicate
/// policy (asking on stdin for whatever the flags leave open), confirms and
/// transfers. Returns the process exit code.
pub async fn playlists(args: PlaylistArgs) -> i32 {
    transfer_selected(args, &signal::on_ctrl_c()).await
}

pub(super) async fn transfer_selected(args: PlaylistArgs, interrupt: &Interrupt) -> i32 {
    let spotify = session::spotify().await;
    let tidal = session::tidal().await;

    info!("Fetching your playlists from Spotify...");
    let playlists = match spotify.list_owned_playlists(args.playlist_limit).await {
        Ok(playlists) => playlists,
        Err(e) => {
            warning!("Failed to fetch playlists: {}", e);
            return EXIT_FAILURE;
        }
    };

    if playlists.is_empty() {
        info!("No playlists found on Spotify.");
        return EXIT_SUCCESS;
    }

    info!("Found {} playlist(s):", playlists.len());
    println!("{}", Table::new(utils::playlist_rows(&playlists)));

    let selection = if args.all {
        Selection::All
    } else {
        println!("Which playlists would you like to transfer?");
        let answer = prompt::ask(
            "Enter playlist numbers separated by commas (e.g., 1,3,5) or 'all':",
        );
        match utils::parse_selection(&answer, playlists.len()) {
            Ok(selection) => selection,
            Err(e) => {
                warning!("{}", e);
                return EXIT_FAILURE;
            }
        }
    };

    let mut selected = select_playlists(&playlists, &selection);
    if selected.is_empty() {
        info!("No valid playlists selected.");
        return EXIT_SUCCESS;
    }

    let mut duplicates = args.on_duplicate.unwrap_or(DuplicatePolicy::Skip);
    if !args.overwrite {
        info!("Checking for existing playlists on Tidal...");
        let existing = match existing_names(&tidal, &selected).await {
            Ok(existing) => existing,
            Err(e) => {
                warning!("Failed to check for existing playlists: {}", e);
                Vec::new()
            }
        };

        if !existing.is_empty() {
            if args.on_duplicate.is_none() {
                duplicates = prompt::duplicate_policy(&existing);
            }

            match duplicates {
                DuplicatePolicy::Cancel => {
                    info!("Transfer cancelled.");
                    return EXIT_SUCCESS;
                }
                DuplicatePolicy::Skip => {
                    selected.retain(|p| !existing.contains(&p.name));
                    if selected.is_empty() {
                        info!("No playlists to transfer after skipping existing ones.");
                        return EXIT_SUCCESS;
                    }
                }
                DuplicatePolicy::Duplicate => {}
            }
        }
    }

    let total_tracks: u64 = selected.iter().map(|p| p.track_count).sum();
    if !args.yes
        && !prompt::confirm(&format!(
            "Ready to transfer {} playlist(s) with approximately {} total tracks. Do you want to continue?",
            selected.len(),
            total_tracks
        ))
    {
        info!("Transfer cancelled.");
        return EXIT_SUCCESS;
    }
    if let Some(code) = signal::stopped(interrupt) {
        return code;
    }

    let plan = PlaylistPlan {
        selection,
        duplicates,
        overwrite: args.overwrite,
    };
    let outcome = transfer_playlists(
        &spotify,
        &tidal,
        &playlists,
        &plan,
        &TransferOptions::default(),
        interrupt,
        &ConsoleProgress,
    )
    .await;

    match outcome {
        PlaylistBatchOutcome::Nothing => {
            info!("No playlists to transfer.");
            EXIT_SUCCESS
        }
        PlaylistBatchOutcome::Cancelled => {
            info!("Transfer cancelled.");
            EXIT_SUCCESS
        }
        PlaylistBatchOutcome::Completed(summary) => {
            summary::print_batch_summary(&summary);
            if summary.interrupted {
                warning!("Transfer interrupted by user.");
                EXIT_INTERRUPTED
            } else if summary.successful > 0 {
                EXIT_SUCCESS
            } else {
                EXIT_FAILURE
            }
        }
    }
}

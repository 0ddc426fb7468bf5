use std::collections::HashSet;

use crate::{
    catalog::{CatalogResult, DestinationCatalog, SourceCatalog, playlist_name_taken},
    matcher::MatchEngine,
    progress::TransferProgress,
    transfer::{Interrupt, TransferOptions, pace},
    types::{
        DestinationPlaylist, DuplicatePolicy, MatchResult, PlaylistBatchOutcome,
        PlaylistBatchSummary, PlaylistDescriptor, PlaylistPlan, PlaylistReport, PlaylistState,
        Selection, TrackDescriptor,
    },
};

/// Transfers one playlist.
///
/// Creates the destination playlist, searches every track, then adds all
/// matches in a single batched call. When the batch is rejected the matches
/// are added one at a time so a single bad id does not lose the rest. A
/// playlist that cannot be created ends in [`PlaylistState::Failed`] without
/// any further write.
pub async fn transfer_playlist(
    destination: &dyn DestinationCatalog,
    playlist: &PlaylistDescriptor,
    tracks: &[TrackDescriptor],
    options: &TransferOptions,
    interrupt: &Interrupt,
    progress: &dyn TransferProgress,
) -> PlaylistReport {
    let mut report = PlaylistReport {
        name: playlist.name.clone(),
        state: PlaylistState::Failed,
        destination: None,
        stats: Default::default(),
        unmatched: Vec::new(),
        interrupted: false,
    };

    let created = match destination
        .create_playlist(&playlist.name, &playlist.description)
        .await
    {
        Ok(created) => created,
        Err(e) => {
            progress.playlist_creation_failed(&playlist.name, &e);
            progress.playlist_state(&playlist.name, PlaylistState::Failed);
            return report;
        }
    };

    progress.playlist_created(&created);
    set_state(&mut report, PlaylistState::Created, progress);
    report.destination = Some(created.clone());

    if tracks.is_empty() {
        set_state(&mut report, PlaylistState::Completed, progress);
        return report;
    }

    set_state(&mut report, PlaylistState::Populating, progress);

    let found_ids = search_all(destination, tracks, options, interrupt, progress, &mut report).await;
    add_all(destination, &created, &found_ids, interrupt, progress, &mut report).await;

    let state = if report.stats.added == 0 {
        PlaylistState::Failed
    } else if report.stats.added == tracks.len() {
        PlaylistState::Completed
    } else {
        PlaylistState::PartiallyCompleted
    };
    set_state(&mut report, state, progress);

    report
}

fn set_state(report: &mut PlaylistReport, state: PlaylistState, progress: &dyn TransferProgress) {
    report.state = state;
    progress.playlist_state(&report.name, state);
}

async fn search_all(
    destination: &dyn DestinationCatalog,
    tracks: &[TrackDescriptor],
    options: &TransferOptions,
    interrupt: &Interrupt,
    progress: &dyn TransferProgress,
    report: &mut PlaylistReport,
) -> Vec<String> {
    let engine = MatchEngine::new(destination, progress);
    let total = tracks.len();
    let mut found_ids = Vec::new();

    for (index, track) in tracks.iter().enumerate() {
        if interrupt.is_triggered() {
            report.interrupted = true;
            progress.interrupted(index, total);
            break;
        }

        let position = index + 1;
        progress.track_started(position, total, track);

        let result = engine.find(track).await;
        match &result {
            MatchResult::Found { id, .. } => {
                report.stats.record_found();
                found_ids.push(id.clone());
                progress.track_matched(track, &result);
            }
            MatchResult::NotFound => {
                report.stats.record_not_found();
                report.unmatched.push(track.clone());
                progress.track_not_found(track);
            }
        }

        pace(
            position,
            total,
            options.playlist_pace_every,
            options.playlist_pace_delay,
            progress,
        )
        .await;
    }

    found_ids
}

async fn add_all(
    destination: &dyn DestinationCatalog,
    playlist: &DestinationPlaylist,
    track_ids: &[String],
    interrupt: &Interrupt,
    progress: &dyn TransferProgress,
    report: &mut PlaylistReport,
) {
    if track_ids.is_empty() {
        return;
    }

    let batch_error = match destination.add_tracks_to_playlist(playlist, track_ids).await {
        Ok(()) => {
            report.stats.record_added(track_ids.len());
            return;
        }
        Err(e) => e,
    };
    progress.batch_add_failed(playlist, track_ids.len(), &batch_error);

    for track_id in track_ids {
        if interrupt.is_triggered() {
            report.interrupted = true;
            break;
        }

        match destination
            .add_tracks_to_playlist(playlist, std::slice::from_ref(track_id))
            .await
        {
            Ok(()) => report.stats.record_added(1),
            Err(e) => {
                report.stats.record_failed();
                progress.playlist_track_add_failed(playlist, track_id, &e);
            }
        }
    }
}

/// Resolves a selection against the listed playlists, in selection order.
/// Out-of-range positions are ignored and repeated positions count once.
pub fn select_playlists(
    playlists: &[PlaylistDescriptor],
    selection: &Selection,
) -> Vec<PlaylistDescriptor> {
    match selection {
        Selection::All => playlists.to_vec(),
        Selection::Indices(positions) => {
            let mut seen = HashSet::new();
            positions
                .iter()
                .filter(|&&p| p >= 1 && p <= playlists.len() && seen.insert(p))
                .map(|&p| playlists[p - 1].clone())
                .collect()
        }
    }
}

/// Names of the given playlists that already exist in the destination.
pub async fn existing_names(
    destination: &dyn DestinationCatalog,
    playlists: &[PlaylistDescriptor],
) -> CatalogResult<Vec<String>> {
    let existing = destination.list_owned_playlists().await?;
    Ok(playlists
        .iter()
        .filter(|p| playlist_name_taken(&existing, &p.name))
        .map(|p| p.name.clone())
        .collect())
}

/// Transfers the playlists chosen by `plan`.
///
/// Applies the selection and the duplicate policy, then transfers each
/// remaining playlist and aggregates the results. The policy only matters when
/// `plan.overwrite` is off and some selected names already exist.
pub async fn transfer_playlists(
    source: &dyn SourceCatalog,
    destination: &dyn DestinationCatalog,
    playlists: &[PlaylistDescriptor],
    plan: &PlaylistPlan,
    options: &TransferOptions,
    interrupt: &Interrupt,
    progress: &dyn TransferProgress,
) -> PlaylistBatchOutcome {
    let mut selected = select_playlists(playlists, &plan.selection);
    if selected.is_empty() {
        return PlaylistBatchOutcome::Nothing;
    }

    let mut summary = PlaylistBatchSummary::default();

    if !plan.overwrite {
        let existing = match existing_names(destination, &selected).await {
            Ok(existing) => existing,
            Err(e) => {
                progress.duplicate_check_failed(&e);
                Vec::new()
            }
        };

        if !existing.is_empty() {
            match plan.duplicates {
                DuplicatePolicy::Cancel => return PlaylistBatchOutcome::Cancelled,
                DuplicatePolicy::Duplicate => {}
                DuplicatePolicy::Skip => {
                    selected.retain(|p| !existing.contains(&p.name));
                    summary.skipped = existing;
                    if selected.is_empty() {
                        return PlaylistBatchOutcome::Nothing;
                    }
                }
            }
        }
    }

    let total = selected.len();
    for (index, playlist) in selected.iter().enumerate() {
        if interrupt.is_triggered() {
            summary.interrupted = true;
            break;
        }

        progress.playlist_started(index + 1, total, playlist);

        let tracks = match source.list_playlist_tracks(&playlist.source_id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                progress.playlist_tracks_failed(playlist, &e);
                summary.failed += 1;
                continue;
            }
        };

        let report =
            transfer_playlist(destination, playlist, &tracks, options, interrupt, progress).await;
        progress.playlist_finished(&report);

        summary.stats.merge(&report.stats);
        if report.succeeded() {
            summary.successful += 1;
        } else {
            summary.failed += 1;
        }

        let interrupted = report.interrupted;
        summary.reports.push(report);
        if interrupted {
            summary.interrupted = true;
            break;
        }
    }

    PlaylistBatchOutcome::Completed(summary)
}

use crate::{
    catalog::DestinationCatalog,
    matcher::MatchEngine,
    progress::TransferProgress,
    transfer::{Interrupt, TransferOptions, pace},
    types::{MatchResult, TrackDescriptor, TransferReport},
};

/// Transfers tracks into the destination favorites.
///
/// Every track is matched and, when a match exists, added to the favorites
/// right away. A failed write is counted and the loop moves on. The interrupt
/// flag is checked before each track, so a stopped run still returns
/// statistics for everything processed up to that point.
pub async fn transfer_tracks(
    tracks: &[TrackDescriptor],
    destination: &dyn DestinationCatalog,
    options: &TransferOptions,
    interrupt: &Interrupt,
    progress: &dyn TransferProgress,
) -> TransferReport {
    let engine = MatchEngine::new(destination, progress);
    let mut report = TransferReport::default();
    let total = tracks.len();

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
                progress.track_matched(track, &result);

                match destination.add_track_to_favorites(id).await {
                    Ok(()) => {
                        report.stats.record_added(1);
                        progress.track_added(track);
                    }
                    Err(e) => {
                        report.stats.record_failed();
                        progress.track_add_failed(track, &e);
                    }
                }
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
            options.pace_every,
            options.pace_delay,
            progress,
        )
        .await;
    }

    report
}

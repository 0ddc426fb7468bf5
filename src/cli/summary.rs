use crate::{
    info, success,
    types::{PlaylistBatchSummary, PlaylistReport, PlaylistState, TransferReport, TransferStats},
    utils, warning,
};

const LIKES_UNMATCHED_SHOWN: usize = 20;
const PLAYLIST_UNMATCHED_SHOWN: usize = 10;

fn print_stats(stats: &TransferStats) {
    info!("Processed:         {}", stats.total);
    info!("Found on Tidal:    {}", stats.found);
    info!("Added:             {}", stats.added);
    info!("Not found:         {}", stats.not_found);
    if stats.failed > 0 {
        info!("Failed to add:     {}", stats.failed);
    }
}

fn rule(title: &str) {
    println!();
    println!("{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

pub fn print_likes_summary(report: &TransferReport) {
    rule("Liked Songs Transfer Summary");
    print_stats(&report.stats);

    if report.unmatched.is_empty() {
        return;
    }

    println!();
    warning!("Songs not found on Tidal:");
    for track in report.unmatched.iter().take(LIKES_UNMATCHED_SHOWN) {
        println!("    - {}", utils::display_track(track));
    }
    if report.unmatched.len() > LIKES_UNMATCHED_SHOWN {
        println!(
            "    ... and {} more",
            report.unmatched.len() - LIKES_UNMATCHED_SHOWN
        );
    }
}

pub fn print_playlist_report(report: &PlaylistReport) {
    match report.state {
        PlaylistState::Completed => success!("{}: all tracks transferred", report.name),
        PlaylistState::PartiallyCompleted => warning!("{}: partially transferred", report.name),
        PlaylistState::Failed => warning!("{}: transfer failed", report.name),
        _ => {}
    }
    print_stats(&report.stats);

    if report.unmatched.is_empty() {
        return;
    }
    if report.unmatched.len() > PLAYLIST_UNMATCHED_SHOWN {
        warning!("{} tracks not found on Tidal", report.unmatched.len());
        return;
    }

    warning!("Tracks not found on Tidal:");
    for track in &report.unmatched {
        println!("    - {}", track.label());
    }
}

pub fn print_batch_summary(summary: &PlaylistBatchSummary) {
    rule("Playlist Transfer Complete!");

    if !summary.skipped.is_empty() {
        info!("Skipped existing: {} playlist(s)", summary.skipped.len());
    }
    success!("Successfully transferred: {} playlist(s)", summary.successful);
    if summary.failed > 0 {
        warning!("Failed: {} playlist(s)", summary.failed);
    }
    print_stats(&summary.stats);
}

mod common;

use common::*;
use spotidal::{
    cli::{EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS, combined_exit_code},
    progress::SilentProgress,
    transfer::{Interrupt, TransferOptions, transfer_playlist, transfer_tracks},
    types::TransferStats,
};

#[tokio::test]
async fn test_liked_song_found_by_isrc_is_added_to_favorites() {
    let destination = FakeDestination::new().with_result(
        "USUG11904206",
        vec![hit("77646117", "Blinding Lights", "The Weeknd")],
    );
    let tracks = vec![track_with_isrc(
        "0VjIjW4GlUZAMYd2vXMi3b",
        "Blinding Lights",
        "The Weeknd",
        "USUG11904206",
    )];

    let report = transfer_tracks(
        &tracks,
        &destination,
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert_eq!(
        report.stats,
        TransferStats {
            total: 1,
            found: 1,
            added: 1,
            not_found: 0,
            failed: 0,
        }
    );
    assert!(report.unmatched.is_empty());
    assert!(!report.interrupted);
    assert_eq!(destination.favorites(), vec!["77646117"]);
}

#[tokio::test]
async fn test_missing_and_failed_tracks_are_counted_separately() {
    let destination = FakeDestination::new()
        .with_result("Found Song Band", vec![hit("ok", "Found Song", "Band")])
        .with_result("Broken Song Band", vec![hit("bad", "Broken Song", "Band")])
        .with_failing_id("bad");
    let tracks = vec![
        track("s1", "Found Song", "Band"),
        track("s2", "Lost Song", "Band"),
        track("s3", "Broken Song", "Band"),
    ];

    let report = transfer_tracks(
        &tracks,
        &destination,
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert_eq!(report.stats.total, 3);
    assert_eq!(report.stats.found, 2);
    assert_eq!(report.stats.added, 1);
    assert_eq!(report.stats.not_found, 1);
    assert_eq!(report.stats.failed, 1);
    assert!(report.stats.is_consistent());
    assert_eq!(report.unmatched.len(), 1);
    assert_eq!(report.unmatched[0].title(), "Lost Song");
    assert_eq!(destination.favorites(), vec!["ok", "bad"]);
}

#[tokio::test]
async fn test_interrupt_stops_after_the_track_in_flight() {
    let (tracks, destination) = matched_tracks(5, FakeDestination::new());
    let interrupt = Interrupt::new();
    let progress = RecordingProgress::interrupting_after(2, &interrupt);

    let report = transfer_tracks(
        &tracks,
        &destination,
        &TransferOptions::without_pacing(),
        &interrupt,
        &progress,
    )
    .await;

    assert!(report.interrupted);
    assert_eq!(report.stats.total, 2);
    assert_eq!(report.stats.added, 2);
    assert_eq!(destination.favorites(), vec!["t1", "t2"]);
    assert!(report.stats.is_consistent());
}

#[tokio::test]
async fn test_triggered_interrupt_processes_nothing() {
    let (tracks, destination) = matched_tracks(3, FakeDestination::new());
    let interrupt = Interrupt::new();
    interrupt.trigger();

    let report = transfer_tracks(
        &tracks,
        &destination,
        &TransferOptions::without_pacing(),
        &interrupt,
        &SilentProgress,
    )
    .await;

    assert!(report.interrupted);
    assert_eq!(report.stats, TransferStats::default());
    assert!(destination.calls().is_empty());
}

#[tokio::test]
async fn test_empty_input_yields_zero_stats() {
    let destination = FakeDestination::new();

    let report = transfer_tracks(
        &[],
        &destination,
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert_eq!(report.stats, TransferStats::default());
    assert!(!report.interrupted);
    assert!(destination.calls().is_empty());
}

#[test]
fn test_stats_merge_adds_every_counter() {
    let mut total = TransferStats::default();
    total.record_found();
    total.record_added(1);

    let mut other = TransferStats::default();
    other.record_found();
    other.record_failed();
    other.record_not_found();

    total.merge(&other);

    assert_eq!(
        total,
        TransferStats {
            total: 3,
            found: 2,
            added: 1,
            not_found: 1,
            failed: 1,
        }
    );
    assert!(total.is_consistent());
}

#[test]
fn test_default_pacing_matches_rate_limit_budget() {
    let options = TransferOptions::default();
    assert_eq!(options.pace_every, 10);
    assert_eq!(options.pace_delay.as_secs(), 1);
    assert_eq!(options.playlist_pace_every, 20);
    assert_eq!(options.playlist_pace_delay.as_millis(), 500);

    let fast = TransferOptions::without_pacing();
    assert!(fast.pace_delay.is_zero());
    assert!(fast.playlist_pace_delay.is_zero());
}

#[tokio::test]
async fn test_liked_songs_pause_after_every_tenth_track_but_not_the_last() {
    for (count, expected) in [(9, 0), (10, 0), (11, 1), (20, 1), (25, 2)] {
        let (tracks, destination) = matched_tracks(count, FakeDestination::new());
        let progress = RecordingProgress::default();

        let report = transfer_tracks(
            &tracks,
            &destination,
            &fast_pacing(),
            &Interrupt::new(),
            &progress,
        )
        .await;

        assert_eq!(report.stats.added, count);
        assert_eq!(progress.pauses(), expected, "{} tracks", count);
    }
}

#[tokio::test]
async fn test_zero_interval_disables_pacing() {
    let (tracks, destination) = matched_tracks(5, FakeDestination::new());
    let progress = RecordingProgress::default();
    let options = TransferOptions {
        pace_every: 0,
        ..fast_pacing()
    };

    transfer_tracks(&tracks, &destination, &options, &Interrupt::new(), &progress).await;

    assert_eq!(progress.pauses(), 0);
}

#[tokio::test]
async fn test_interrupt_during_playlists_stops_the_liked_songs() {
    let (tracks, destination) = matched_tracks(3, FakeDestination::new());
    let interrupt = Interrupt::new();
    let progress = RecordingProgress::interrupting_after(1, &interrupt);

    let playlist_report = transfer_playlist(
        &destination,
        &playlist("p1", "Road Trip", 3),
        &tracks,
        &TransferOptions::without_pacing(),
        &interrupt,
        &progress,
    )
    .await;
    assert!(playlist_report.interrupted);

    // the liked songs step reuses the same interrupt
    let likes_report = transfer_tracks(
        &tracks,
        &destination,
        &TransferOptions::without_pacing(),
        &interrupt,
        &SilentProgress,
    )
    .await;

    assert!(likes_report.interrupted);
    assert_eq!(likes_report.stats, TransferStats::default());
    assert!(destination.favorites().is_empty());
}

#[test]
fn test_combined_exit_code_of_both_steps() {
    assert_eq!(combined_exit_code(EXIT_SUCCESS, EXIT_SUCCESS), EXIT_SUCCESS);
    assert_eq!(combined_exit_code(EXIT_FAILURE, EXIT_SUCCESS), EXIT_FAILURE);
    assert_eq!(combined_exit_code(EXIT_SUCCESS, EXIT_FAILURE), EXIT_FAILURE);
    assert_eq!(combined_exit_code(EXIT_FAILURE, EXIT_INTERRUPTED), EXIT_INTERRUPTED);
}

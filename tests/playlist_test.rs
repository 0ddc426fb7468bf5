mod common;

use common::*;
use spotidal::{
    catalog::playlist_exists,
    progress::SilentProgress,
    transfer::{
        Interrupt, TransferOptions,
        playlists::{existing_names, select_playlists},
        transfer_playlist, transfer_playlists,
    },
    types::{
        DuplicatePolicy, PlaylistBatchOutcome, PlaylistPlan, PlaylistState, Selection,
    },
};

fn plan(selection: Selection, duplicates: DuplicatePolicy) -> PlaylistPlan {
    PlaylistPlan {
        selection,
        duplicates,
        overwrite: false,
    }
}

#[tokio::test]
async fn test_empty_playlist_is_created_and_completed() {
    let destination = FakeDestination::new();

    let report = transfer_playlist(
        &destination,
        &playlist("p1", "Empty", 0),
        &[],
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert_eq!(report.state, PlaylistState::Completed);
    assert!(report.succeeded());
    assert_eq!(destination.created_playlists(), vec!["Empty"]);
    assert!(destination.playlist_adds().is_empty());
}

#[tokio::test]
async fn test_creation_failure_performs_no_further_writes() {
    let (tracks, mut destination) = matched_tracks(3, FakeDestination::new());
    destination.fail_create = true;

    let report = transfer_playlist(
        &destination,
        &playlist("p1", "Road Trip", 3),
        &tracks,
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert_eq!(report.state, PlaylistState::Failed);
    assert!(!report.succeeded());
    assert!(report.destination.is_none());
    assert_eq!(destination.calls(), vec![Call::CreatePlaylist("Road Trip".to_string())]);
}

#[tokio::test]
async fn test_all_matches_are_added_in_one_batch() {
    let (tracks, destination) = matched_tracks(10, FakeDestination::new());

    let report = transfer_playlist(
        &destination,
        &playlist("p1", "Road Trip", 10),
        &tracks,
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert_eq!(report.state, PlaylistState::Completed);
    assert_eq!(report.stats.total, 10);
    assert_eq!(report.stats.added, 10);

    let adds = destination.playlist_adds();
    assert_eq!(adds.len(), 1);
    let expected: Vec<String> = (1..=10).map(|i| format!("t{}", i)).collect();
    assert_eq!(adds[0], expected);
}

#[tokio::test]
async fn test_rejected_batch_falls_back_to_single_additions() {
    let (tracks, mut destination) = matched_tracks(10, FakeDestination::new());
    destination.fail_batch = true;
    destination = destination
        .with_failing_id("t2")
        .with_failing_id("t5")
        .with_failing_id("t9");

    let report = transfer_playlist(
        &destination,
        &playlist("p1", "Road Trip", 10),
        &tracks,
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert_eq!(report.state, PlaylistState::PartiallyCompleted);
    assert!(report.succeeded());
    assert_eq!(report.stats.found, 10);
    assert_eq!(report.stats.added, 7);
    assert_eq!(report.stats.failed, 3);
    assert!(report.stats.is_consistent());

    // one rejected batch, then every id on its own
    let adds = destination.playlist_adds();
    assert_eq!(adds.len(), 11);
    assert_eq!(adds[0].len(), 10);
    assert!(adds[1..].iter().all(|ids| ids.len() == 1));
}

#[tokio::test]
async fn test_playlist_without_matches_fails() {
    let destination = FakeDestination::new();
    let tracks = vec![track("s1", "Unknown", "Nobody"), track("s2", "Lost", "Nobody")];

    let report = transfer_playlist(
        &destination,
        &playlist("p1", "Rarities", 2),
        &tracks,
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert_eq!(report.state, PlaylistState::Failed);
    assert_eq!(report.stats.not_found, 2);
    assert_eq!(report.unmatched.len(), 2);
    assert!(destination.playlist_adds().is_empty());
}

#[tokio::test]
async fn test_interrupted_search_adds_what_was_found() {
    let (tracks, destination) = matched_tracks(5, FakeDestination::new());
    let interrupt = Interrupt::new();
    let progress = RecordingProgress::interrupting_after(3, &interrupt);

    let report = transfer_playlist(
        &destination,
        &playlist("p1", "Road Trip", 5),
        &tracks,
        &TransferOptions::without_pacing(),
        &interrupt,
        &progress,
    )
    .await;

    assert!(report.interrupted);
    assert_eq!(report.stats.total, 3);
    assert_eq!(report.stats.added, 3);
    assert_eq!(report.state, PlaylistState::PartiallyCompleted);
}

#[tokio::test]
async fn test_playlist_search_pauses_after_every_twentieth_track() {
    for (count, expected) in [(19, 0), (20, 0), (21, 1), (40, 1), (45, 2)] {
        let (tracks, destination) = matched_tracks(count, FakeDestination::new());
        let progress = RecordingProgress::default();

        let report = transfer_playlist(
            &destination,
            &playlist("p1", "Road Trip", count as u64),
            &tracks,
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
async fn test_existing_names_compare_case_insensitively() {
    let destination = FakeDestination::new().with_existing("road trip");
    let playlists = vec![playlist("p1", "Road Trip", 3), playlist("p2", "Focus", 4)];

    let existing = existing_names(&destination, &playlists).await.unwrap();

    assert_eq!(existing, vec!["Road Trip"]);
    assert!(playlist_exists(&destination, "ROAD TRIP").await.unwrap());
    assert!(!playlist_exists(&destination, "Road Trip 2").await.unwrap());
}

fn road_trip_source() -> (FakeSource, FakeDestination) {
    let (road_trip, destination) = matched_tracks(2, FakeDestination::new().with_existing("road trip"));
    let source = FakeSource::new()
        .with_playlist(playlist("p1", "Road Trip", 2), road_trip.clone())
        .with_playlist(playlist("p2", "Focus", 2), road_trip);
    (source, destination)
}

#[tokio::test]
async fn test_skip_policy_leaves_out_existing_playlists() {
    let (source, destination) = road_trip_source();

    let outcome = transfer_playlists(
        &source,
        &destination,
        &source.playlists,
        &plan(Selection::All, DuplicatePolicy::Skip),
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    let PlaylistBatchOutcome::Completed(summary) = outcome else {
        panic!("expected a completed batch");
    };
    assert_eq!(summary.skipped, vec!["Road Trip"]);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.stats.added, 2);
    assert_eq!(destination.created_playlists(), vec!["Focus"]);
}

#[tokio::test]
async fn test_skip_policy_with_only_existing_playlists_transfers_nothing() {
    let (source, destination) = road_trip_source();

    let outcome = transfer_playlists(
        &source,
        &destination,
        &source.playlists,
        &plan(Selection::Indices(vec![1]), DuplicatePolicy::Skip),
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert!(matches!(outcome, PlaylistBatchOutcome::Nothing));
    assert!(destination.created_playlists().is_empty());
}

#[tokio::test]
async fn test_cancel_policy_writes_nothing() {
    let (source, destination) = road_trip_source();

    let outcome = transfer_playlists(
        &source,
        &destination,
        &source.playlists,
        &plan(Selection::All, DuplicatePolicy::Cancel),
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert!(matches!(outcome, PlaylistBatchOutcome::Cancelled));
    assert_eq!(destination.calls(), vec![Call::ListPlaylists]);
}

#[tokio::test]
async fn test_duplicate_policy_creates_same_named_playlist() {
    let (source, destination) = road_trip_source();

    let outcome = transfer_playlists(
        &source,
        &destination,
        &source.playlists,
        &plan(Selection::All, DuplicatePolicy::Duplicate),
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    let PlaylistBatchOutcome::Completed(summary) = outcome else {
        panic!("expected a completed batch");
    };
    assert_eq!(summary.successful, 2);
    assert!(summary.skipped.is_empty());
    assert_eq!(destination.created_playlists(), vec!["Road Trip", "Focus"]);
}

#[tokio::test]
async fn test_overwrite_skips_the_duplicate_check() {
    let (source, destination) = road_trip_source();
    let plan = PlaylistPlan {
        selection: Selection::All,
        duplicates: DuplicatePolicy::Cancel,
        overwrite: true,
    };

    let outcome = transfer_playlists(
        &source,
        &destination,
        &source.playlists,
        &plan,
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert!(matches!(outcome, PlaylistBatchOutcome::Completed(_)));
    assert!(!destination.calls().contains(&Call::ListPlaylists));
}

#[tokio::test]
async fn test_failed_duplicate_check_continues_transfer() {
    let (source, mut destination) = road_trip_source();
    destination.fail_listing = true;

    let outcome = transfer_playlists(
        &source,
        &destination,
        &source.playlists,
        &plan(Selection::All, DuplicatePolicy::Cancel),
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    let PlaylistBatchOutcome::Completed(summary) = outcome else {
        panic!("expected a completed batch");
    };
    assert_eq!(summary.successful, 2);
}

#[tokio::test]
async fn test_unreadable_source_playlist_counts_as_failed() {
    let (source, destination) = road_trip_source();
    let mut source = source;
    source.failing_playlists.insert("p2".to_string());

    let outcome = transfer_playlists(
        &source,
        &destination,
        &source.playlists,
        &plan(Selection::All, DuplicatePolicy::Duplicate),
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    let PlaylistBatchOutcome::Completed(summary) = outcome else {
        panic!("expected a completed batch");
    };
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(destination.created_playlists(), vec!["Road Trip"]);
}

#[tokio::test]
async fn test_out_of_range_selection_transfers_nothing() {
    let (source, destination) = road_trip_source();

    let outcome = transfer_playlists(
        &source,
        &destination,
        &source.playlists,
        &plan(Selection::Indices(vec![0, 7]), DuplicatePolicy::Duplicate),
        &TransferOptions::without_pacing(),
        &Interrupt::new(),
        &SilentProgress,
    )
    .await;

    assert!(matches!(outcome, PlaylistBatchOutcome::Nothing));
    assert!(destination.calls().is_empty());
}

#[test]
fn test_select_playlists_follows_selection_and_ignores_repeats() {
    let playlists = vec![
        playlist("p1", "One", 1),
        playlist("p2", "Two", 2),
        playlist("p3", "Three", 3),
    ];

    let selected = select_playlists(&playlists, &Selection::Indices(vec![3, 1, 3, 9]));
    let names: Vec<&str> = selected.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Three", "One"]);

    assert_eq!(select_playlists(&playlists, &Selection::All).len(), 3);
}

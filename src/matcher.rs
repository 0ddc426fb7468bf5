//! Matching of source tracks against the destination catalog.
//!
//! A track carrying an ISRC is looked up by that code first and the first hit
//! is trusted outright. Otherwise, or when that lookup comes back empty, the
//! catalog is searched for "title primary-artist" and the first of the top five
//! results whose title and artist agree with the source track wins. When none
//! agrees the first result is returned as a best-effort match.

use crate::{
    catalog::DestinationCatalog,
    progress::{SearchStage, TransferProgress},
    types::{DestinationTrack, MatchResult, TrackDescriptor},
};

/// Number of free-text search results that are checked for a confirmed match.
pub const CANDIDATE_WINDOW: usize = 5;

pub struct MatchEngine<'a> {
    catalog: &'a dyn DestinationCatalog,
    progress: &'a dyn TransferProgress,
}

impl<'a> MatchEngine<'a> {
    pub fn new(catalog: &'a dyn DestinationCatalog, progress: &'a dyn TransferProgress) -> Self {
        Self { catalog, progress }
    }

    pub async fn find(&self, track: &TrackDescriptor) -> MatchResult {
        if let Some(isrc) = track.isrc() {
            match self.catalog.search_tracks(isrc).await {
                Ok(results) => {
                    if let Some(first) = results.first() {
                        return MatchResult::found(first);
                    }
                }
                Err(e) => self.progress.search_failed(track, SearchStage::Isrc, &e),
            }
        }

        let results = match self.catalog.search_tracks(&text_query(track)).await {
            Ok(results) => results,
            Err(e) => {
                self.progress.search_failed(track, SearchStage::Text, &e);
                return MatchResult::NotFound;
            }
        };

        match pick_candidate(track, &results) {
            Some(candidate) => MatchResult::found(candidate),
            None => MatchResult::NotFound,
        }
    }
}

/// Free-text query for a track: its title followed by its primary artist.
pub fn text_query(track: &TrackDescriptor) -> String {
    format!("{} {}", track.title(), track.primary_artist())
}

/// Chooses among free-text search results.
///
/// Returns the first confirmed match within the top [`CANDIDATE_WINDOW`]
/// results, else the first result, else `None` when there are no results.
pub fn pick_candidate<'c>(
    track: &TrackDescriptor,
    candidates: &'c [DestinationTrack],
) -> Option<&'c DestinationTrack> {
    candidates
        .iter()
        .take(CANDIDATE_WINDOW)
        .find(|c| titles_match(track.title(), &c.title) && artists_overlap(track.artists(), &c.artists))
        .or_else(|| candidates.first())
}

pub fn titles_match(source: &str, candidate: &str) -> bool {
    source.trim().to_lowercase() == candidate.trim().to_lowercase()
}

/// True when any source artist contains, or is contained in, any candidate artist.
pub fn artists_overlap(source: &[String], candidate: &[String]) -> bool {
    let candidate: Vec<String> = candidate.iter().map(|a| a.to_lowercase()).collect();

    source.iter().map(|a| a.to_lowercase()).any(|s| {
        candidate
            .iter()
            .any(|c| c.contains(s.as_str()) || s.contains(c.as_str()))
    })
}

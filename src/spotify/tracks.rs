use crate::{
    catalog::CatalogResult,
    spotify::SpotifyClient,
    types::{SavedTracksResponse, SpotifyTrack, TrackDescriptor, TrackItem},
    utils,
};

/// Page size of `GET /me/tracks`, the maximum Spotify allows.
const LIKED_PAGE_SIZE: u32 = 50;

/// Retrieves every liked song of the authenticated user.
///
/// Follows the `next` links until the last page and shows a spinner with the
/// running count while doing so. Entries that are not transferable tracks are
/// skipped, see [`descriptor_from`].
///
/// # Errors
///
/// The first failing page aborts the listing; tracks fetched so far are
/// discarded since a partial library would make the transfer look complete.
pub async fn get_liked_tracks(client: &SpotifyClient) -> CatalogResult<Vec<TrackDescriptor>> {
    let pb = utils::spinner("Fetching liked songs from Spotify...");
    let mut liked = Vec::new();
    let mut next = Some(client.url(&format!("/me/tracks?limit={}&offset=0", LIKED_PAGE_SIZE)));

    while let Some(url) = next {
        let page: SavedTracksResponse = match client.get_json(&url).await {
            Ok(page) => page,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        if page.items.is_empty() {
            break;
        }

        liked.extend(descriptors_from(page.items));
        pb.set_message(format!("Fetched {} liked songs so far...", liked.len()));
        next = page.next;
    }

    pb.finish_and_clear();
    Ok(liked)
}

pub fn descriptors_from(items: Vec<TrackItem>) -> Vec<TrackDescriptor> {
    items
        .into_iter()
        .filter_map(|item| item.track)
        .filter_map(descriptor_from)
        .collect()
}

/// Converts a Spotify track payload into a [`TrackDescriptor`].
///
/// Returns `None` for removed tracks, local files (no id), podcast episodes and
/// anything else without a title or artist.
pub fn descriptor_from(track: SpotifyTrack) -> Option<TrackDescriptor> {
    if track.kind.as_deref().is_some_and(|kind| kind != "track") {
        return None;
    }

    let id = track.id?;
    let artists = track.artists.into_iter().map(|a| a.name).collect();
    let album = track.album.map(|a| a.name).unwrap_or_default();
    let isrc = track.external_ids.and_then(|ids| ids.isrc);

    TrackDescriptor::new(id, track.name, artists, album)
        .ok()
        .map(|d| d.with_isrc(isrc).with_duration_ms(track.duration_ms))
}

use crate::{
    catalog::CatalogResult,
    spotify::{SpotifyClient, tracks},
    types::{
        GetUserPlaylistsResponse, Playlist, PlaylistDescriptor, PlaylistTracksResponse,
        TrackDescriptor,
    },
    utils,
};

const PLAYLIST_PAGE_SIZE: u32 = 50;
const PLAYLIST_TRACKS_PAGE_SIZE: u32 = 100;

/// Retrieves the playlists owned by `user_id`.
///
/// `GET /me/playlists` also lists playlists the user merely follows; those are
/// filtered out since they can be followed on Tidal instead. Stops as soon as
/// `limit` owned playlists are collected.
pub async fn get_owned_playlists(
    client: &SpotifyClient,
    user_id: &str,
    limit: Option<usize>,
) -> CatalogResult<Vec<PlaylistDescriptor>> {
    let pb = utils::spinner("Fetching playlists from Spotify...");
    let mut owned = Vec::new();
    let mut next = Some(client.url(&format!(
        "/me/playlists?limit={}&offset=0",
        PLAYLIST_PAGE_SIZE
    )));

    while let Some(url) = next {
        let page: GetUserPlaylistsResponse = match client.get_json(&url).await {
            Ok(page) => page,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        if page.items.is_empty() {
            break;
        }

        owned.extend(owned_descriptors(page.items, user_id));
        pb.set_message(format!("Fetched {} playlists so far...", owned.len()));

        if let Some(limit) = limit {
            if owned.len() >= limit {
                owned.truncate(limit);
                break;
            }
        }
        next = page.next;
    }

    pb.finish_and_clear();
    Ok(owned)
}

pub fn owned_descriptors(items: Vec<Option<Playlist>>, user_id: &str) -> Vec<PlaylistDescriptor> {
    items
        .into_iter()
        .flatten()
        .filter(|p| p.owner.id == user_id)
        .map(|p| PlaylistDescriptor {
            source_id: p.id,
            name: p.name,
            description: p.description.unwrap_or_default(),
            is_public: p.public.unwrap_or(false),
            is_collaborative: p.collaborative,
            track_count: p.tracks.map(|t| t.total).unwrap_or(0),
        })
        .collect()
}

/// Retrieves all transferable tracks of a playlist.
pub async fn get_playlist_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
) -> CatalogResult<Vec<TrackDescriptor>> {
    let mut playlist_tracks = Vec::new();
    let mut next = Some(client.url(&format!(
        "/playlists/{}/tracks?limit={}&offset=0",
        playlist_id, PLAYLIST_TRACKS_PAGE_SIZE
    )));

    while let Some(url) = next {
        let page: PlaylistTracksResponse = client.get_json(&url).await?;
        if page.items.is_empty() {
            break;
        }

        playlist_tracks.extend(tracks::descriptors_from(page.items));
        next = page.next;
    }

    Ok(playlist_tracks)
}

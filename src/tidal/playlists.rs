use crate::{
    catalog::{CatalogError, CatalogResult},
    tidal::TidalClient,
    types::{DestinationPlaylist, TidalPlaylist, TidalPlaylistPage},
};

const PLAYLIST_PAGE_SIZE: u64 = 50;

/// Creates a private playlist for the authenticated user.
pub async fn create(
    client: &TidalClient,
    name: &str,
    description: &str,
) -> CatalogResult<DestinationPlaylist> {
    let url = client.url(&format!("/users/{}/playlists", client.user_id()), "");
    let response = client
        .post_form(&url, &[("title", name), ("description", description)], None)
        .await?;

    let playlist: TidalPlaylist = response.json().await?;
    Ok(DestinationPlaylist {
        id: playlist.uuid,
        name: playlist.title,
    })
}

/// Appends tracks to a playlist in a single request.
///
/// Tidal guards playlist edits with the playlist's ETag, so the playlist is
/// fetched first to read the ETag and the current length used as insert
/// position. Unknown track ids fail the whole request.
pub async fn add_tracks(
    client: &TidalClient,
    playlist_id: &str,
    track_ids: &[String],
) -> CatalogResult<()> {
    if track_ids.is_empty() {
        return Ok(());
    }

    let playlist_url = client.url(&format!("/playlists/{}", playlist_id), "");
    let response = client.get(&playlist_url).await?;
    let etag = response
        .headers()
        .get("etag")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| CatalogError::Api(format!("Playlist {} returned no ETag", playlist_id)))?;
    let playlist: TidalPlaylist = response.json().await?;

    let ids = track_ids.join(",");
    let to_index = playlist.number_of_tracks.to_string();
    let items_url = client.url(&format!("/playlists/{}/items", playlist_id), "");
    client
        .post_form(
            &items_url,
            &[
                ("trackIds", ids.as_str()),
                ("onArtifactNotFound", "FAIL"),
                ("onDupes", "ADD"),
                ("toIndex", to_index.as_str()),
            ],
            Some(&etag),
        )
        .await?;
    Ok(())
}

/// Lists every playlist created by the authenticated user.
pub async fn list_owned(client: &TidalClient) -> CatalogResult<Vec<DestinationPlaylist>> {
    let mut owned = Vec::new();
    let mut offset = 0;

    loop {
        let url = client.url(
            &format!("/users/{}/playlists", client.user_id()),
            &format!("limit={}&offset={}", PLAYLIST_PAGE_SIZE, offset),
        );
        let page: TidalPlaylistPage = client.get_json(&url).await?;
        let fetched = page.items.len() as u64;

        owned.extend(page.items.into_iter().map(|p| DestinationPlaylist {
            id: p.uuid,
            name: p.title,
        }));

        offset += fetched;
        if fetched == 0 || offset >= page.total_number_of_items {
            break;
        }
    }

    Ok(owned)
}

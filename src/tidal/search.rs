use crate::{
    catalog::CatalogResult,
    tidal::TidalClient,
    types::{DestinationTrack, TidalTrack, TidalTrackPage},
};

/// Results requested per search; the matcher looks at the first five.
const SEARCH_LIMIT: u32 = 10;

/// Searches the Tidal catalog for tracks.
///
/// The same endpoint serves ISRC lookups and free-text queries; Tidal ranks an
/// exact ISRC hit first.
pub async fn search_tracks(
    client: &TidalClient,
    query: &str,
) -> CatalogResult<Vec<DestinationTrack>> {
    let url = client.url(
        "/search/tracks",
        &format!(
            "query={}&limit={}&offset=0",
            urlencoding::encode(query),
            SEARCH_LIMIT
        ),
    );

    let page: TidalTrackPage = client.get_json(&url).await?;
    Ok(page.items.into_iter().map(destination_track).collect())
}

/// Converts a Tidal track payload, falling back to the single `artist` field
/// when the `artists` list is missing.
pub fn destination_track(track: TidalTrack) -> DestinationTrack {
    let mut artists: Vec<String> = track.artists.into_iter().map(|a| a.name).collect();
    if artists.is_empty() {
        if let Some(artist) = track.artist {
            artists.push(artist.name);
        }
    }

    DestinationTrack {
        id: track.id.to_string(),
        title: track.title,
        artists,
    }
}

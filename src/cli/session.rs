use crate::{error, spotify::SpotifyClient, tidal::TidalClient};

/// Connects to Spotify with the cached token or exits with a login hint.
pub async fn spotify() -> SpotifyClient {
    match SpotifyClient::connect().await {
        Ok(client) => client,
        Err(e) => error!(
            "Failed to load Spotify token ({}). Please run spotidal auth spotify",
            e
        ),
    }
}

/// Connects to Tidal with the cached token or exits with a login hint.
pub async fn tidal() -> TidalClient {
    match TidalClient::connect().await {
        Ok(client) => client,
        Err(e) => error!(
            "Failed to connect to Tidal ({}). Please run spotidal auth tidal",
            e
        ),
    }
}

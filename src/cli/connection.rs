use crate::{
    catalog::{DestinationCatalog, SourceCatalog},
    info,
    spotify::SpotifyClient,
    success,
    tidal::TidalClient,
    warning,
};

use super::{EXIT_FAILURE, EXIT_SUCCESS};

/// Checks both cached sessions by asking each service for the current user.
pub async fn test_connections() -> i32 {
    info!("Testing Spotify connection...");
    let spotify_ok = match SpotifyClient::connect().await {
        Ok(client) => match SourceCatalog::current_user(&client).await {
            Ok(user) => {
                success!(
                    "Connected to Spotify as {}",
                    user.display_name.unwrap_or(user.id)
                );
                true
            }
            Err(e) => {
                warning!("Spotify connection failed: {}", e);
                false
            }
        },
        Err(e) => {
            warning!("No Spotify session ({}). Run spotidal auth spotify", e);
            false
        }
    };

    info!("Testing Tidal connection...");
    let tidal_ok = match TidalClient::connect().await {
        Ok(client) => match DestinationCatalog::current_user(&client).await {
            Ok(user) => {
                success!("Connected to Tidal as user {}", user.id);
                true
            }
            Err(e) => {
                warning!("Tidal connection failed: {}", e);
                false
            }
        },
        Err(e) => {
            warning!("No Tidal session ({}). Run spotidal auth tidal", e);
            false
        }
    };

    if spotify_ok && tidal_ok {
        success!("All connections successful!");
        EXIT_SUCCESS
    } else {
        warning!("Some connections failed. Please check your credentials.");
        EXIT_FAILURE
    }
}

use crate::{catalog::CatalogResult, tidal::TidalClient};

pub async fn add_track(client: &TidalClient, track_id: &str) -> CatalogResult<()> {
    let url = client.url(
        &format!("/users/{}/favorites/tracks", client.user_id()),
        "",
    );

    client
        .post_form(
            &url,
            &[("trackIds", track_id), ("onArtifactNotFound", "FAIL")],
            None,
        )
        .await?;
    Ok(())
}

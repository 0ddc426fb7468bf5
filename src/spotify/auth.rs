use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res,
    catalog::{CatalogError, CatalogResult},
    config,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Service, SpotifyTokenResponse, Token},
    utils, warning,
};

const TOKEN_WAIT_SECS: u64 = 60;

/// Logs in to Spotify with the authorization code flow and PKCE.
///
/// Spotify redirects the browser to the local callback server, whose handler
/// exchanges the code and drops the token into `shared_state`; this function
/// waits up to a minute for it and caches it for the `spotify` service.
///
/// # Errors
///
/// Fails without a configured client id, without a token before the timeout,
/// or when the cache cannot be written. A browser that does not open only
/// prints the URL.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let client_id = config::spotify_client_id()?;

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = client_id,
        redirect_uri = urlencoding::encode(&config::spotify_redirect_uri()),
        code_challenge = code_challenge,
        scope = urlencoding::encode(&config::spotify_scope())
    );

    // the callback needs the verifier before Spotify redirects
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state)
        .await
        .ok_or("Spotify authentication failed or timed out.")?;

    TokenManager::new(Service::Spotify, token)
        .persist()
        .await
        .map_err(|e| format!("Failed to save token to cache: {}", e))?;

    success!("Spotify authentication successful!");
    Ok(())
}

/// Polls the shared state once a second until the callback handler stored a
/// token, giving up after 60 seconds.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    for _ in 0..TOKEN_WAIT_SECS {
        let token = shared_state
            .lock()
            .await
            .as_ref()
            .and_then(|pkce| pkce.token.clone());
        if token.is_some() {
            return token;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may or may not rotate the refresh token; when the response carries
/// none, the returned token has an empty refresh token and the caller keeps the
/// old one.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id()?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json: SpotifyTokenResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(token_from(json))
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// The code verifier proves that the client completing the flow is the one
/// that started it. The authorization code is single-use and short-lived, so
/// the exchange happens right in the callback handler.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> CatalogResult<Token> {
    let client_id = config::spotify_client_id().map_err(CatalogError::Config)?;
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(CatalogError::Status { status, body });
    }

    let json: SpotifyTokenResponse = res.json().await?;
    Ok(token_from(json))
}

fn token_from(json: SpotifyTokenResponse) -> Token {
    Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
        user_id: None,
        country_code: None,
    }
}

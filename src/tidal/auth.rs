use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::time::sleep;

use crate::{
    Res, config, info,
    management::TokenManager,
    success,
    types::{DeviceAuthorization, Service, TidalTokenResponse, Token},
    utils, warning,
};

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Runs the OAuth 2.0 device authorization flow against Tidal.
///
/// Tidal does not redirect back to a local server. Instead the user opens a
/// short link (opened in the browser automatically when possible), confirms
/// the displayed code, and this function polls the token endpoint at the
/// interval Tidal asks for until the grant is confirmed or the code expires.
///
/// # Errors
///
/// Fails when the client credentials are not configured, when Tidal rejects
/// the device request, when the code expires or is denied, or when the token
/// cannot be cached.
pub async fn auth() -> Res<()> {
    let client_id = config::tidal_client_id()?;
    let client_secret = config::tidal_client_secret()?;
    let scope = config::tidal_scope();
    let client = Client::new();

    let device: DeviceAuthorization = client
        .post(format!("{}/device_authorization", config::tidal_auth_url()))
        .form(&[("client_id", client_id.as_str()), ("scope", scope.as_str())])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let link = verification_link(&device);
    info!(
        "Visit {} and confirm the code {} to authorize spotidal.",
        link, device.user_code
    );
    if webbrowser::open(&link).is_err() {
        warning!("Failed to open browser. Please open the link above manually.");
    }

    let pb = utils::spinner("Waiting for authorization...");
    let deadline = Instant::now() + Duration::from_secs(device.expires_in);
    let mut interval = Duration::from_secs(device.interval.max(1));

    let token = loop {
        if Instant::now() >= deadline {
            pb.finish_and_clear();
            return Err("Tidal authorization code expired. Please run the login again.".into());
        }
        sleep(interval).await;

        let res = client
            .post(format!("{}/token", config::tidal_auth_url()))
            .form(&[
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("device_code", device.device_code.as_str()),
                ("grant_type", DEVICE_CODE_GRANT),
                ("scope", scope.as_str()),
            ])
            .send()
            .await?;

        if res.status().is_success() {
            let json: TidalTokenResponse = res.json().await?;
            break token_from(json);
        }

        let body: Value = res.json().await.unwrap_or(Value::Null);
        match body["error"].as_str() {
            Some("authorization_pending") => continue,
            Some("slow_down") => interval += Duration::from_secs(5),
            other => {
                pb.finish_and_clear();
                return Err(format!(
                    "Tidal authorization failed: {}",
                    other.unwrap_or("unknown error")
                )
                .into());
            }
        }
    };
    pb.finish_and_clear();

    TokenManager::new(Service::Tidal, token)
        .persist()
        .await
        .map_err(|e| format!("Failed to save token to cache: {}", e))?;

    success!("Tidal authentication successful!");
    Ok(())
}

/// Full verification URL; Tidal sends it without a scheme.
pub fn verification_link(device: &DeviceAuthorization) -> String {
    let link = device
        .verification_uri_complete
        .clone()
        .unwrap_or_else(|| device.verification_uri.clone());

    if link.starts_with("http://") || link.starts_with("https://") {
        link
    } else {
        format!("https://{}", link)
    }
}

/// Exchanges a Tidal refresh token for a new access token.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client_id = config::tidal_client_id()?;
    let client_secret = config::tidal_client_secret()?;

    let client = Client::new();
    let res = client
        .post(format!("{}/token", config::tidal_auth_url()))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json: TidalTokenResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(token_from(json))
}

fn token_from(json: TidalTokenResponse) -> Token {
    Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
        user_id: json.user.as_ref().map(|u| u.user_id.to_string()),
        country_code: json.user.and_then(|u| u.country_code),
    }
}

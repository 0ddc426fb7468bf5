use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config, spotify, tidal,
    types::{Service, Token},
};

/// Seconds before the real expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    service: Service,
    token: Token,
}

impl TokenManager {
    pub fn new(service: Service, token: Token) -> Self {
        TokenManager { service, token }
    }

    pub async fn load(service: Service) -> Result<Self, String> {
        let path = Self::token_path(service);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { service, token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path(self.service);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-persisting it first when it
    /// is about to expire. A failed refresh keeps the old token; the API call
    /// using it then reports the authentication error.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Ok(new_token) = self.refresh_token().await {
                self.token = new_token;
                let _ = self.persist().await;
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        let lifetime = self.token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        now >= self.token.obtained_at + lifetime
    }

    async fn refresh_token(&self) -> Result<Token, String> {
        let mut refreshed = match self.service {
            Service::Spotify => spotify::auth::refresh_token(&self.token.refresh_token).await?,
            Service::Tidal => tidal::auth::refresh_token(&self.token.refresh_token).await?,
        };

        // Neither service has to rotate the refresh token or repeat the user.
        if refreshed.refresh_token.is_empty() {
            refreshed.refresh_token = self.token.refresh_token.clone();
        }
        if refreshed.user_id.is_none() {
            refreshed.user_id = self.token.user_id.clone();
        }
        if refreshed.country_code.is_none() {
            refreshed.country_code = self.token.country_code.clone();
        }
        Ok(refreshed)
    }

    pub fn token_path(service: Service) -> PathBuf {
        let mut path = config::data_dir();
        path.push(format!("cache/{}-token.json", service.slug()));
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}

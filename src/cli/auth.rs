use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error, spotify, tidal,
    types::{PkceToken, Service},
};

pub async fn auth(service: Service) {
    let result = match service {
        Service::Spotify => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            spotify::auth::auth(oauth_result).await
        }
        Service::Tidal => tidal::auth::auth().await,
    };

    if let Err(e) = result {
        error!("{} authentication failed: {}", service, e);
    }
}

//! Request sending shared by the Spotify and Tidal clients.
//!
//! Both services answer `429 Too Many Requests` with a `Retry-After` header and
//! occasionally fail with `502 Bad Gateway`. Both are retried a bounded number
//! of times; everything else is turned into a [`CatalogError`].

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    catalog::{CatalogError, CatalogResult},
    warning,
};

/// Longest `Retry-After` the clients are willing to sleep through.
const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRIES: u32 = 3;

/// Sends the request built by `build`, retrying rate limits and bad gateways.
///
/// `build` is called again for every attempt since a sent request cannot be
/// reused.
pub async fn send<F>(build: F) -> CatalogResult<Response>
where
    F: Fn() -> RequestBuilder,
{
    let mut retries = 0;

    loop {
        let response = build().send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = retry_after(&response);
            if retry_after > MAX_RETRY_AFTER_SECS {
                warning!(
                    "Retry after has reached an abnormal high of {} seconds. Try again later.",
                    retry_after
                );
                return Err(CatalogError::RateLimited { retry_after });
            }
            if retries >= MAX_RETRIES {
                return Err(CatalogError::RateLimited { retry_after });
            }
            retries += 1;
            sleep(Duration::from_secs(retry_after.max(1))).await;
            continue;
        }

        if status == StatusCode::BAD_GATEWAY && retries < MAX_RETRIES {
            retries += 1;
            sleep(BAD_GATEWAY_DELAY).await;
            continue;
        }

        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Auth(format!("{} {}", status, body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status { status, body });
        }

        return Ok(response);
    }
}

fn retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the Spotify OAuth
//! callback during `spotidal auth spotify`.
//!
//! - [`callback`] - completes the PKCE flow by exchanging the authorization code
//!   for an access token and handing it to the waiting auth command.
//! - [`health`] - reports status and version, handy to check that the redirect
//!   URI points at the running server.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotidal::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;

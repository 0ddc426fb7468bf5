//! Spotify to Tidal Transfer Library
//!
//! This library provides functionality for moving a user's liked songs and owned
//! playlists from Spotify to Tidal. Tracks are matched against the Tidal catalog by
//! ISRC first and by title and artist second, then added to the Tidal favorites or to
//! a freshly created Tidal playlist.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `catalog` - Source and destination catalog traits and their error type
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `http` - Request sending with rate limit handling shared by both clients
//! - `management` - Token caching and refresh
//! - `matcher` - Matching of source tracks against the destination catalog
//! - `progress` - Observer trait the transfer core reports through
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client (source catalog)
//! - `tidal` - Tidal API client (destination catalog)
//! - `transfer` - Liked songs and playlist transfer orchestration
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotidal::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spotidal::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod http;
pub mod management;
pub mod matcher;
pub mod progress;
pub mod server;
pub mod spotify;
pub mod tidal;
pub mod transfer;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for the command-line glue using a
/// boxed dynamic error trait object. Catalog clients use the more specific
/// [`catalog::CatalogError`], which converts into this type with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching liked songs from Spotify...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. Only the CLI
/// layer uses it, for setup errors that leave nothing to recover (missing
/// credentials, missing tokens). The transfer core never calls it.
///
/// # Example
///
/// ```
/// error!("Failed to load Tidal token. Please run spotidal auth tidal");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a track that could not be found or a
/// single failed write.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

//! # CLI Module
//!
//! The command-line layer of spotidal. Every command connects the catalog clients,
//! talks to the user (tables, prompts, confirmations) and hands the actual work to
//! [`crate::transfer`], reporting progress through [`ConsoleProgress`].
//!
//! ## Commands
//!
//! - [`auth`] - runs the login flow of one service and caches its token.
//! - [`likes`] - transfers the Spotify liked songs into the Tidal favorites.
//! - [`playlists`] - transfers selected Spotify playlists into new Tidal playlists.
//! - [`all`] - playlists first, then liked songs.
//! - [`preview`] - prints the first liked songs without writing anything.
//! - [`test_connections`] - checks both cached sessions.
//!
//! ## Exit Codes
//!
//! The transfer commands return the process exit code instead of exiting
//! themselves: `0` on success or when there was nothing to do, `1` when nothing
//! could be transferred, `130` after a Ctrl-C. Setup errors such as a missing
//! token end the process right away through [`crate::error!`].
//!
//! ## Usage
//!
//! ```bash
//! spotidal auth spotify
//! spotidal auth tidal
//! spotidal test
//! spotidal preview 10
//! spotidal likes --limit 50
//! spotidal playlists --all --on-duplicate skip
//! ```

mod auth;
mod connection;
mod likes;
mod playlists;
mod preview;
mod progress;
mod prompt;
mod session;
mod signal;
mod summary;

pub use auth::auth;
pub use connection::test_connections;
pub use likes::likes;
pub use playlists::{PlaylistArgs, playlists};
pub use preview::preview;
pub use progress::ConsoleProgress;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INTERRUPTED: i32 = 130;

/// Transfers playlists, then liked songs.
///
/// Both steps share one Ctrl-C handler. A Ctrl-C at any point before the liked
/// songs are written stops the command. Otherwise an interrupt wins, then the
/// first failing step decides the exit code.
pub async fn all(playlist_args: PlaylistArgs, limit: Option<usize>) -> i32 {
    let yes = playlist_args.yes;
    let interrupt = signal::on_ctrl_c();

    let playlists_code = playlists::transfer_selected(playlist_args, &interrupt).await;
    if playlists_code == EXIT_INTERRUPTED {
        return playlists_code;
    }
    if let Some(code) = signal::stopped(&interrupt) {
        return code;
    }

    let likes_code = likes::transfer_likes(limit, yes, &interrupt).await;
    combined_exit_code(playlists_code, likes_code)
}

/// Exit code of `all` once both steps ran.
pub fn combined_exit_code(playlists_code: i32, likes_code: i32) -> i32 {
    if playlists_code != EXIT_SUCCESS && likes_code != EXIT_INTERRUPTED {
        playlists_code
    } else {
        likes_code
    }
}

//! # CLI Module
//!
//! User-facing commands of playlyzer. Each command builds a
//! [`SessionManager`] over the file-backed token store, restores or changes the
//! session, and prints the matching view.
//!
//! ## Commands
//!
//! - [`login`] - Restores a stored session, or runs the authorization-code flow:
//!   local callback listener, browser redirect, code exchange, dashboard.
//! - [`logout`] - Forgets the session and the stored tokens.
//! - [`status`] - Dashboard when signed in, login prompt otherwise.
//! - [`playlists`] - Lists the user's playlists through the backend.
//!
//! ## Layering
//!
//! ```text
//! CLI Layer (commands, spinners, colored output)
//!     ↓
//! Session Layer (SessionManager, CallbackHandler)
//!     ↓
//! Gateway Layer (backend + Spotify profile)
//!     ↓
//! Network Layer (reqwest)
//! ```
//!
//! ## Usage Patterns
//!
//! ```bash
//! playlyzer login          # Sign in with Spotify
//! playlyzer status         # Show the dashboard
//! playlyzer playlists      # List playlists
//! playlyzer logout         # Sign out
//! ```

mod login;
mod logout;
mod playlists;
mod status;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{gateway::GatewayClient, management::FileStore, session::SessionManager};

pub use login::login;
pub use logout::logout;
pub use playlists::playlists;
pub use status::status;

fn new_session() -> SessionManager<FileStore> {
    SessionManager::new(GatewayClient::from_config(), FileStore::from_config())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

async fn restore(session: &SessionManager<FileStore>) {
    let pb = spinner("Checking stored session...");
    session.restore_session().await;
    pb.finish_and_clear();
}

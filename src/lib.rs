//! Playlist Analyzer CLI Library
//!
//! This library signs a user in to Spotify through the Playlist Analyzer
//! backend (authorization-code flow), keeps the resulting session on disk and
//! lists the user's playlists through the backend proxy API.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local callback listener
//! - `cli` - Command implementations wired to the binary
//! - `config` - Environment-backed configuration
//! - `error` - Error taxonomy shared by the session and the gateway
//! - `gateway` - Backend and provider HTTP client
//! - `logging` - `tracing` subscriber setup
//! - `management` - Key-value persistence and the token store
//! - `navigation` - Routes, navigators and delayed navigation
//! - `server` - Local HTTP listener for the OAuth redirect
//! - `session` - Session manager and the callback state machine
//! - `types` - Data structures shared across modules
//! - `views` - Terminal presentation of sessions and playlists
//!
//! # Example
//!
//! ```
//! use playlyzer::{config, gateway::GatewayClient, management::FileStore, session::SessionManager};
//!
//! #[tokio::main]
//! async fn main() -> playlyzer::Res<()> {
//!     config::load_env().await?;
//!     let session = SessionManager::new(GatewayClient::from_config(), FileStore::from_config());
//!     session.restore_session().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod management;
pub mod navigation;
pub mod server;
pub mod session;
pub mod types;
pub mod views;

/// A convenient Result type alias for glue code that may fail.
///
/// Library operations with a domain meaning return [`error::AppError`]; this
/// boxed alias is used where errors of several origins are only reported.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Opening the Spotify authorization page...");
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
/// success!("Logged in as {}", name);
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
/// Only for unrecoverable conditions at the CLI level; library code reports
/// failures through return values instead.
///
/// # Example
///
/// ```
/// error!("Failed to bind callback listener: {}", e);
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
/// # Example
///
/// ```
/// warning!("Failed to open browser. Please navigate to:\n{}", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

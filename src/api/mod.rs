//! # API Module
//!
//! HTTP endpoints of the short-lived local listener that receives the OAuth
//! redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /callback?code=..|error=..`. Mounts the
//!   [`crate::session::CallbackHandler`] for the login attempt and renders its
//!   status page. Repeated hits re-render the mounted handler instead of
//!   exchanging the code again.
//! - [`health`] - `GET /health`, reports name and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use playlyzer::api::{CallbackState, callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback::<FileStore>).layer(Extension(state)))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::CallbackState;
pub use callback::callback;
pub use health::health;

//! Terminal and browser presentation.
//!
//! Views are plain functions or small structs that turn session and playlist
//! data into text. They never talk to the store; the playlist view is the only
//! one that issues a request, through [`crate::gateway::GatewayClient`].

pub mod callback;
pub mod dashboard;
pub mod login;
pub mod playlists;

pub use playlists::{PlaylistCard, PlaylistView, PlaylistViewState};

use crate::management::StorageError;

/// Failures of the authentication flow and of the backend calls.
///
/// The `Display` text of each variant is what the views show to the user.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The user or the provider declined the authorization request.
    #[error("Authentication cancelled: {0}")]
    AuthorizationDenied(String),

    /// The redirect carried neither a code nor an error.
    #[error("No authorization code received from Spotify")]
    MissingCode,

    #[error("Failed to exchange authorization code: {0}")]
    ExchangeFailed(String),

    /// Tokens were obtained but the profile lookup failed. The session is
    /// treated as unauthenticated.
    #[error("Failed to fetch user profile: {0}")]
    ProfileFetchFailed(String),

    #[error("Your Spotify access token has expired. Please log in again.")]
    TokenExpired,

    #[error("Unable to connect to Spotify. Please try again later.")]
    UpstreamUnavailable,

    #[error("Failed to fetch playlists: {0}")]
    UnknownFetchError(String),

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),
}

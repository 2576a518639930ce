mod common;

use common::{tokens, user};
use playlyzer::{
    error::AppError,
    navigation::Route,
    session::CallbackStatus,
    types::{SessionState, UserProfile},
    views,
};

#[test]
fn test_dashboard_shows_profile() {
    let state = SessionState::authenticated(user(), tokens("abc"));
    let rendered = views::dashboard::render(&state, Some(true));

    assert!(rendered.contains("Welcome back, Test User!"));
    assert!(rendered.contains("Email: test@example.com"));
    assert!(rendered.contains("Spotify ID: user-1"));
    assert!(rendered.contains("Backend API: Connected"));
}

#[test]
fn test_dashboard_without_session_falls_back_to_login() {
    let state = SessionState::unauthenticated();
    let rendered = views::dashboard::render(&state, None);

    assert!(rendered.contains("playlyzer login"));
    assert!(!rendered.contains("Welcome back"));
}

#[test]
fn test_login_view_while_connecting() {
    let rendered = views::login::render(&SessionState::initial());
    assert!(rendered.contains("Connecting..."));
}

#[test]
fn test_profile_name_falls_back_to_id() {
    let profile = UserProfile {
        id: "user-2".to_string(),
        display_name: None,
        email: None,
        images: Vec::new(),
    };
    assert_eq!(profile.name(), "user-2");
}

#[test]
fn test_session_state_keeps_user_and_tokens_together() {
    let signed_in = SessionState::authenticated(user(), tokens("abc")).with_loading(true);
    assert!(signed_in.is_authenticated());
    assert!(signed_in.user().is_some());
    assert_eq!(signed_in.access_token(), Some("abc"));

    let signed_out = SessionState::unauthenticated();
    assert!(!signed_out.is_authenticated());
    assert!(signed_out.user().is_none());
    assert!(signed_out.access_token().is_none());
}

#[test]
fn test_callback_page_escapes_message() {
    let page = views::callback::render_html(
        CallbackStatus::Error,
        &AppError::AuthorizationDenied("<script>".to_string()).to_string(),
    );

    assert!(page.contains("Authentication cancelled: &lt;script&gt;"));
    assert!(page.contains("redirected to the login page"));
}

#[test]
fn test_error_messages() {
    assert!(AppError::TokenExpired.to_string().contains("expired"));
    assert_eq!(
        AppError::MissingCode.to_string(),
        "No authorization code received from Spotify"
    );
}

#[test]
fn test_route_paths() {
    assert_eq!(Route::Login.path(), "/login");
    assert_eq!(Route::Dashboard.path(), "/dashboard");
    assert_eq!(Route::Playlists.path(), "/playlists");
    assert_eq!(
        Route::External("https://example.com".to_string()).path(),
        "https://example.com"
    );
}

use crate::types::SessionState;

/// Renders the signed-in overview.
///
/// `backend_healthy` is `None` while the probe has not run. Without an
/// authenticated session this falls back to the login view.
pub fn render(session: &SessionState, backend_healthy: Option<bool>) -> String {
    let Some(user) = session.user().filter(|_| session.is_authenticated()) else {
        return super::login::render(session);
    };

    let backend = match backend_healthy {
        Some(true) => "Connected",
        Some(false) => "Failed",
        None => "Testing...",
    };

    let lines = [
        format!("Welcome back, {}!", user.name()),
        String::new(),
        "Authentication Status".to_string(),
        "  Spotify Connected".to_string(),
        "  User Profile Loaded".to_string(),
        "  Access Token Valid".to_string(),
        String::new(),
        "Your Spotify Profile".to_string(),
        format!("  Name: {}", user.name()),
        format!("  Email: {}", user.email.as_deref().unwrap_or("-")),
        format!("  Spotify ID: {}", user.id),
        format!(
            "  Profile Image: {}",
            user.images
                .first()
                .map(|i| i.url.as_str())
                .unwrap_or("None")
        ),
        String::new(),
        format!("Backend API: {backend}"),
        String::new(),
        "Run `playlyzer playlists` to view your playlists.".to_string(),
    ];
    lines.join("\n")
}

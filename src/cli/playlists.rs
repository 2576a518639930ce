use crate::{
    info,
    views::{PlaylistView, PlaylistViewState},
    warning,
};

pub async fn playlists(select: Option<String>) {
    let session = super::new_session();
    super::restore(&session).await;

    let state = session.state();
    let mut view = PlaylistView::new();

    let pb = super::spinner("Loading your playlists...");
    view.sync(&state, session.gateway()).await;
    pb.finish_and_clear();

    if let Some(user) = state.user() {
        info!(
            "Welcome back, {}! Ready to analyze your music taste?",
            user.name()
        );
    }

    match view.state() {
        PlaylistViewState::Error(_) => warning!("{}", view.render()),
        _ => println!("{}", view.render()),
    }

    if let Some(id) = select {
        match view.select(&id) {
            Some(playlist) => info!(
                "Analysis feature coming soon! Selected: {} ({} tracks)",
                playlist.name, playlist.tracks_total
            ),
            None => warning!("No playlist with id {} in the list above.", id),
        }
    }
}

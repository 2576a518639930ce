use crate::types::SessionState;

pub fn render(session: &SessionState) -> String {
    let action = if session.is_loading() {
        "Connecting..."
    } else {
        "Run `playlyzer login` to connect with Spotify."
    };

    format!(
        "Playlist Analyzer\n\
         Discover insights about your musical taste and get personalized recommendations\n\
         \n\
         {action}\n\
         \n\
         We only access your playlist data to provide insights."
    )
}

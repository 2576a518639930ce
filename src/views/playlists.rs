use tabled::{Table, Tabled};

use crate::{
    gateway::GatewayClient,
    types::{PlaylistSummary, SessionState},
};

pub const SIGNED_OUT_MESSAGE: &str = "Please log in to view your playlists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistViewState {
    SignedOut,
    Loading,
    Error(String),
    Empty,
    Loaded(Vec<PlaylistSummary>),
}

/// One rendered playlist card.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct PlaylistCard {
    #[tabled(rename = "Playlist")]
    pub name: String,
    #[tabled(rename = "Tracks")]
    pub tracks: String,
    #[tabled(rename = "Visibility")]
    pub visibility: String,
    #[tabled(rename = "Owner")]
    pub owner: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Link")]
    pub link: String,
}

impl From<&PlaylistSummary> for PlaylistCard {
    fn from(p: &PlaylistSummary) -> Self {
        PlaylistCard {
            name: p.name.clone(),
            tracks: format!("{} tracks", p.tracks_total),
            visibility: if p.is_public { "Public" } else { "Private" }.to_string(),
            owner: if p.owner.is_empty() {
                "Unknown owner".to_string()
            } else {
                format!("by {}", p.owner)
            },
            description: p.description.clone(),
            link: p.external_url.clone(),
        }
    }
}

/// The user's playlists, fetched once per access token.
pub struct PlaylistView {
    state: PlaylistViewState,
    fetched_with: Option<String>,
}

impl PlaylistView {
    pub fn new() -> Self {
        PlaylistView {
            state: PlaylistViewState::Loading,
            fetched_with: None,
        }
    }

    pub fn state(&self) -> &PlaylistViewState {
        &self.state
    }

    /// Brings the view in line with the session.
    ///
    /// Without a signed-in user and access token no request is made. A fetch
    /// only happens when the access token differs from the one the current
    /// contents were loaded with.
    pub async fn sync(&mut self, session: &SessionState, gateway: &GatewayClient) {
        let token = match (session.is_authenticated(), session.access_token()) {
            (true, Some(token)) => token.to_string(),
            _ => {
                self.state = PlaylistViewState::SignedOut;
                self.fetched_with = None;
                return;
            }
        };

        if self.fetched_with.as_deref() == Some(token.as_str()) {
            return;
        }

        self.load(token, gateway).await;
    }

    /// Fetches again with the session's current token.
    pub async fn refresh(&mut self, session: &SessionState, gateway: &GatewayClient) {
        self.fetched_with = None;
        self.sync(session, gateway).await;
    }

    /// Looks up a displayed playlist. Analysis of the selection is not
    /// available yet, so this only identifies it.
    pub fn select(&self, id: &str) -> Option<&PlaylistSummary> {
        match &self.state {
            PlaylistViewState::Loaded(playlists) => playlists.iter().find(|p| p.id == id),
            _ => None,
        }
    }

    pub fn cards(&self) -> Vec<PlaylistCard> {
        match &self.state {
            PlaylistViewState::Loaded(playlists) => {
                playlists.iter().map(PlaylistCard::from).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        match &self.state {
            PlaylistViewState::SignedOut => SIGNED_OUT_MESSAGE.to_string(),
            PlaylistViewState::Loading => "Loading your playlists...".to_string(),
            PlaylistViewState::Error(message) => format!(
                "Unable to Load Playlists\n{message}\nRun `playlyzer playlists` to try again."
            ),
            PlaylistViewState::Empty => {
                "No playlists found\nCreate some playlists in Spotify and they'll appear here!"
                    .to_string()
            }
            PlaylistViewState::Loaded(playlists) => {
                let count = playlists.len();
                let total_tracks: u64 = playlists.iter().map(|p| p.tracks_total).sum();
                format!(
                    "Your Spotify Playlists\nFound {count} playlist{plural}\n{table}\n{total_tracks} tracks across all playlists",
                    plural = if count == 1 { "" } else { "s" },
                    table = Table::new(self.cards()),
                )
            }
        }
    }

    async fn load(&mut self, token: String, gateway: &GatewayClient) {
        self.state = PlaylistViewState::Loading;

        self.state = match gateway.playlists(&token).await {
            Ok(resp) if resp.playlists.is_empty() => PlaylistViewState::Empty,
            Ok(resp) => PlaylistViewState::Loaded(resp.playlists),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load playlists");
                PlaylistViewState::Error(e.to_string())
            }
        };
        self.fetched_with = Some(token);
    }
}

impl Default for PlaylistView {
    fn default() -> Self {
        Self::new()
    }
}

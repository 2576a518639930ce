use crate::{error::AppError, gateway::GatewayClient, types::UserProfile};

impl GatewayClient {
    /// Fetches the current user's profile straight from the Spotify Web API.
    ///
    /// # Errors
    ///
    /// Every failure, including an expired token, is `AppError::ProfileFetchFailed`.
    pub async fn user_profile(&self, access_token: &str) -> Result<UserProfile, AppError> {
        let url = format!("{}/me", self.spotify_api_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| AppError::ProfileFetchFailed(e.to_string()))?;

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| AppError::ProfileFetchFailed(e.to_string()))
    }
}

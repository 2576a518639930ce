use reqwest::StatusCode;
use serde_json::Value;

use crate::{error::AppError, gateway::GatewayClient, types::PlaylistsResponse};

impl GatewayClient {
    /// Lists the user's playlists through the backend proxy.
    ///
    /// # Errors
    ///
    /// - `401` -> `AppError::TokenExpired`
    /// - `503` -> `AppError::UpstreamUnavailable`
    /// - other non-2xx -> `AppError::UnknownFetchError` with the backend's
    ///   `detail` field when it sent one
    /// - transport or decode failures -> `AppError::UnknownFetchError`
    pub async fn playlists(&self, access_token: &str) -> Result<PlaylistsResponse, AppError> {
        let url = format!("{}/api/playlists", self.backend_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::UnknownFetchError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::TokenExpired);
        }
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(AppError::UpstreamUnavailable);
        }
        if !status.is_success() {
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body["detail"].as_str().map(str::to_string))
                .unwrap_or_else(|| status.to_string());
            return Err(AppError::UnknownFetchError(detail));
        }

        let body = response
            .json::<PlaylistsResponse>()
            .await
            .map_err(|e| AppError::UnknownFetchError(e.to_string()))?;

        tracing::debug!(count = body.playlists.len(), total = body.total, "fetched playlists");
        Ok(body)
    }
}

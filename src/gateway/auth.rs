use crate::{
    error::AppError,
    gateway::GatewayClient,
    types::{AuthUrlResponse, TokenBundle, TokenExchangeRequest},
};

impl GatewayClient {
    /// Asks the backend for the Spotify authorization URL.
    ///
    /// The backend builds the URL (client id, scopes and redirect URI), so the
    /// client never needs Spotify credentials.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status or malformed body is reported as
    /// `AppError::UnknownFetchError`.
    pub async fn authorization_url(&self) -> Result<String, AppError> {
        let url = format!("{}/auth/url", self.backend_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| AppError::UnknownFetchError(e.to_string()))?;

        let body = response
            .json::<AuthUrlResponse>()
            .await
            .map_err(|e| AppError::UnknownFetchError(e.to_string()))?;

        Ok(body.auth_url)
    }

    /// Exchanges an authorization code for a token bundle.
    ///
    /// The code is single-use on Spotify's side: a second exchange with the
    /// same code fails.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ExchangeFailed` when the backend rejects the code, is
    /// unreachable, or answers with something that is not a token bundle.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenBundle, AppError> {
        let url = format!("{}/auth/token", self.backend_url);
        let response = self
            .http
            .post(&url)
            .json(&TokenExchangeRequest {
                code: code.to_string(),
            })
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| AppError::ExchangeFailed(e.to_string()))?;

        let tokens = response
            .json::<TokenBundle>()
            .await
            .map_err(|e| AppError::ExchangeFailed(e.to_string()))?;

        if tokens.access_token.is_empty() {
            return Err(AppError::ExchangeFailed(
                "backend returned an empty access token".to_string(),
            ));
        }

        Ok(tokens)
    }
}

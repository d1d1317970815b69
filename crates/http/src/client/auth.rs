//! Authentication API client methods

use super::{ApiClient, ApiRequest, ClientError};
use crate::types::{AuthTokens, LoginRequest, RefreshRequest, User};
use tracing::instrument;

impl ApiClient {
    /// Exchange credentials for a token pair and store it
    ///
    /// Sent without credentials: a rejected login is reported as-is and never
    /// triggers a refresh.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthTokens, ClientError> {
        let body = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
            expires_in_mins: self.token_expires_in_mins,
        };
        body.validate().map_err(ClientError::Validation)?;

        let request = ApiRequest::post("/auth/login").json(&body)?;
        let tokens: AuthTokens = self.execute_public(request).await?;

        self.tokens
            .set_tokens(&tokens.access_token, &tokens.refresh_token)?;
        self.clear_caches();
        info!("Logged in");
        Ok(tokens)
    }

    /// Refresh the token pair now, without waiting for a 401
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthenticated`] and clears the session when no
    /// refresh token is stored or the server rejects it.
    pub async fn refresh(&self) -> Result<AuthTokens, ClientError> {
        let _refresh = self.refresh_lock.lock().await;

        let Some(refresh_token) = self.tokens.refresh_token() else {
            self.end_session();
            return Err(ClientError::unauthenticated(
                ClientError::AuthenticationFailed("No refresh token available".into()),
            ));
        };

        self.refresh_with(&refresh_token).await.map_err(|e| {
            warn!("Token refresh failed, ending session: {e}");
            self.end_session();
            ClientError::unauthenticated(e)
        })
    }

    /// Drop the session and any data cached for it
    pub fn logout(&self) -> Result<(), ClientError> {
        self.clear_caches();
        self.tokens.logout()?;
        Ok(())
    }

    /// Profile of the signed-in operator
    pub async fn current_user(&self) -> Result<User, ClientError> {
        self.execute(ApiRequest::get("/auth/me")).await
    }

    /// Call the refresh endpoint and store the new pair
    ///
    /// Callers must hold `refresh_lock`.
    pub(super) async fn refresh_with(&self, refresh_token: &str) -> Result<AuthTokens, ClientError> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
            expires_in_mins: self.token_expires_in_mins,
        };
        let request = ApiRequest::post("/auth/refresh").json(&body)?;
        let tokens: AuthTokens = self.execute_public(request).await?;

        self.tokens
            .set_tokens(&tokens.access_token, &tokens.refresh_token)?;
        info!("Access token refreshed");
        Ok(tokens)
    }
}

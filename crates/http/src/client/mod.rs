//! Dashboard API client
//!
//! [`ApiClient`] is the single gateway for outbound API calls. It attaches
//! the stored access token as a bearer credential and, when the server
//! answers 401, exchanges the refresh token for a new pair and replays the
//! request once. Refreshes are serialised: callers that hit 401 together
//! share the outcome of a single refresh call.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod products;
pub mod users;

use crate::cache::QueryCache;
use crate::config::ClientConfig;
use crate::guard::RouteGuard;
use crate::stats::DashboardStats;
use crate::storage::{MemoryStorage, TokenStorage};
use crate::tokens::TokenStore;
use crate::types::{ProductPage, UserPage};
use error::ClientError;
use reqwest::{Client, ClientBuilder, Method, Response, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::instrument;

/// An outbound request, kept so it can be replayed after a token refresh
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Why a 401 could not be recovered
enum Recovery {
    /// No refresh token was stored
    NoRefreshToken,
    /// The refresh call failed
    Failed(ClientError),
}

/// Dashboard API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: TokenStore,
    refresh_lock: Arc<Mutex<()>>,
    token_expires_in_mins: Option<u32>,
    stats_cache: QueryCache<DashboardStats>,
    product_pages: QueryCache<ProductPage>,
    user_pages: QueryCache<UserPage>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client with in-memory token storage
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads and updates
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Route guard over this client's session
    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.tokens.clone())
    }

    /// Send a request with the current access token, refreshing and
    /// replaying once if the server rejects it
    ///
    /// Any status other than 401 is returned as-is. A 401 on the replay is
    /// returned as-is as well; there is never a second refresh.
    ///
    /// # Errors
    ///
    /// Transport failures surface as [`ClientError::Request`]. When the 401
    /// cannot be recovered the session is cleared and
    /// [`ClientError::Unauthenticated`] is returned.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<Response, ClientError> {
        let sent_token = self.tokens.access_token();
        let response = self.dispatch(&request, sent_token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("Access token rejected, attempting refresh");
        match self.recover_session(sent_token.as_deref()).await {
            Ok(access_token) => {
                debug!("Replaying request with refreshed token");
                self.dispatch(&request, Some(&access_token)).await
            }
            Err(Recovery::NoRefreshToken) => Err(ClientError::unauthenticated(
                error_from_response(response).await,
            )),
            Err(Recovery::Failed(e)) => Err(ClientError::unauthenticated(e)),
        }
    }

    /// Send a request through [`send`](Self::send) and decode a JSON body
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        decode(response).await
    }

    /// Send a request without credentials or refresh handling
    pub async fn execute_public<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.dispatch(&request, None).await?;
        decode(response).await
    }

    fn request_builder(&self, request: &ApiRequest, token: Option<&str>) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        builder
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let response = self.request_builder(request, token).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Obtain a usable access token after `sent_token` was rejected
    async fn recover_session(&self, sent_token: Option<&str>) -> Result<String, Recovery> {
        let _refresh = self.refresh_lock.lock().await;

        // Another request may have refreshed while this one waited for the lock
        let current = self.tokens.tokens();
        if let Some(access_token) = current
            .access_token
            .filter(|token| Some(token.as_str()) != sent_token)
        {
            debug!("Using token refreshed by a concurrent request");
            return Ok(access_token);
        }

        let Some(refresh_token) = current.refresh_token else {
            warn!("No refresh token available, ending session");
            self.end_session();
            return Err(Recovery::NoRefreshToken);
        };

        match self.refresh_with(&refresh_token).await {
            Ok(tokens) => Ok(tokens.access_token),
            Err(e) => {
                warn!("Token refresh failed, ending session: {e}");
                self.end_session();
                Err(Recovery::Failed(e))
            }
        }
    }

    /// Forget everything fetched under the current session
    fn clear_caches(&self) {
        self.stats_cache.clear();
        self.product_pages.clear();
        self.user_pages.clear();
    }

    /// Clear the session after an unrecoverable 401
    fn end_session(&self) {
        self.clear_caches();
        if let Err(e) = self.tokens.logout() {
            warn!("Failed to remove stored tokens: {e}");
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let message = response.text().await.unwrap_or_else(|_| status.to_string());
    ClientError::from_status(status, message)
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    token_expires_in_mins: Option<u32>,
    cache_ttl: Option<Duration>,
    tokens: Option<TokenStore>,
}

impl ApiClientBuilder {
    /// Start from a loaded configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: Some(config.base_url.clone()),
            timeout: config.timeout(),
            user_agent: Some(config.user_agent.clone()),
            token_expires_in_mins: config.token_expires_in_mins,
            cache_ttl: Some(config.cache_ttl()),
            tokens: None,
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Ask the server for tokens that live this many minutes
    #[must_use]
    pub const fn token_expires_in_mins(mut self, minutes: u32) -> Self {
        self.token_expires_in_mins = Some(minutes);
        self
    }

    /// Set how long dashboard statistics stay cached
    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Persist tokens in `storage`, seeding the session from it
    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn TokenStorage>) -> Self {
        self.tokens = Some(TokenStore::load(storage));
        self
    }

    /// Share an existing token store
    #[must_use]
    pub fn token_store(mut self, tokens: TokenStore) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| ClientConfig::default().user_agent);
        client_builder = client_builder.user_agent(user_agent);

        let client = client_builder.build()?;

        let tokens = self
            .tokens
            .unwrap_or_else(|| TokenStore::load(Arc::new(MemoryStorage::new())));
        let cache_ttl = self
            .cache_ttl
            .unwrap_or_else(|| ClientConfig::default().cache_ttl());

        Ok(ApiClient {
            client,
            base_url,
            tokens,
            refresh_lock: Arc::new(Mutex::new(())),
            token_expires_in_mins: self.token_expires_in_mins,
            stats_cache: QueryCache::new(cache_ttl),
            product_pages: QueryCache::new(cache_ttl),
            user_pages: QueryCache::new(cache_ttl),
        })
    }
}

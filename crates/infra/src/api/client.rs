//! Somfy Open API client
//!
//! Every operation runs the same pipeline: make sure the held token is valid
//! (refreshing it under the token lock when expired), send one request with
//! a bearer header, reject any status other than 200, decode the JSON body.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use somfy_common::auth::Token;
use somfy_core::{Authenticator, SomfyApi};
use somfy_domain::constants::JSON_CONTENT_TYPE;
use somfy_domain::{ClientConfig, Command, Device, Execution, Result, Site, SomfyError};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::auth::SomfyAuthenticator;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Authenticated client for the Somfy Open API
pub struct SomfyClient {
    http: HttpClient,
    authenticator: Arc<dyn Authenticator>,
    api_base_url: String,
    token: Mutex<Arc<Token>>,
}

impl SomfyClient {
    /// Create a client holding `token`, with its own authenticator
    ///
    /// # Errors
    /// `SomfyError::Config` when the configuration is invalid,
    /// `SomfyError::Transport` when the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, token: Token) -> Result<Self> {
        config.validate()?;

        let http = HttpClient::new()?;
        let authenticator = SomfyAuthenticator::with_http_client(config, http.clone())?;

        Ok(Self::with_parts(config, token, Arc::new(authenticator), http))
    }

    /// Create a client from explicit collaborators
    pub fn with_parts(
        config: &ClientConfig,
        token: Token,
        authenticator: Arc<dyn Authenticator>,
        http: HttpClient,
    ) -> Self {
        Self {
            http,
            authenticator,
            api_base_url: config.api_base().to_string(),
            token: Mutex::new(Arc::new(token)),
        }
    }

    /// The token currently held by the client
    pub async fn token(&self) -> Arc<Token> {
        Arc::clone(&*self.token.lock().await)
    }

    /// Resolve a valid token, replacing the held one after a refresh.
    ///
    /// The lock is held across the refresh so concurrent callers wait for
    /// the single in-flight refresh instead of starting their own. On error
    /// the held token is left untouched.
    async fn valid_token(&self) -> Result<Arc<Token>> {
        let mut held = self.token.lock().await;

        if held.is_expired() {
            debug!(expired_at = %held.access_token_expires_at(), "held token expired, refreshing");
            let refreshed = self.authenticator.refresh_token(Arc::clone(&held)).await?;
            *held = refreshed;
        }

        Ok(Arc::clone(&held))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(Method::GET, path, |request| request).await
    }

    async fn call<T, F>(&self, method: Method, path: &str, prepare: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder + Send,
    {
        let token = self.valid_token().await?;
        let url = format!("{}{}", self.api_base_url, path);

        debug!(%method, url = %url, "API request");

        let request =
            prepare(self.http.request(method.clone(), &url).bearer_auth(token.access_token()));
        let response = self.http.send(request).await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%method, url = %url, %status, "API request was not successful");
            return Err(SomfyError::ApiRequest { uri: url, status: status.as_u16() });
        }

        let body =
            response.bytes().await.map_err(|err| SomfyError::from(InfraError::from(err)))?;
        let result = serde_json::from_slice(&body)
            .map_err(|e| SomfyError::Decode(format!("{url}: {e}")))?;

        info!(%method, path = %path, "API request successful");
        Ok(result)
    }
}

#[async_trait]
impl SomfyApi for SomfyClient {
    #[instrument(skip(self))]
    async fn list_sites(&self) -> Result<Vec<Site>> {
        self.get("/site").await
    }

    #[instrument(skip(self))]
    async fn get_site_by_id(&self, site_id: &str) -> Result<Site> {
        self.get(&format!("/site/{site_id}")).await
    }

    #[instrument(skip(self))]
    async fn list_devices(&self, site_id: &str) -> Result<Vec<Device>> {
        self.get(&format!("/site/{site_id}/device")).await
    }

    #[instrument(skip(self))]
    async fn get_device_by_id(&self, device_id: &str) -> Result<Device> {
        self.get(&format!("/device/{device_id}")).await
    }

    #[instrument(skip(self, command), fields(command = %command.name))]
    async fn execute(&self, command: &Command, device_id: &str) -> Result<String> {
        let body = serde_json::to_vec(command)
            .map_err(|e| SomfyError::InvalidCommand(format!("failed to encode command: {e}")))?;

        let execution: Execution = self
            .call(Method::POST, &format!("/device/{device_id}/exec"), |request| {
                request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body)
            })
            .await?;

        Ok(execution.job_id)
    }

    async fn set_token(&self, token: Token) {
        *self.token.lock().await = Arc::new(token);
        info!("held token replaced");
    }
}

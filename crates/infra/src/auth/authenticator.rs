//! Somfy authorization server adapter
//!
//! Builds the authorize, token-exchange and token-refresh URIs and performs
//! the token GET exchanges. Query strings are assembled verbatim from the
//! configured values, the way Somfy documents them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, StatusCode};
use somfy_common::auth::{AccessTokenResponse, Token};
use somfy_common::utils::query::parse_query;
use somfy_core::Authenticator;
use somfy_domain::constants::{AUTHORIZE_PATH, TOKEN_PATH};
use somfy_domain::{redact_uri, ClientConfig, Result, SomfyError};
use tracing::{debug, info, instrument};
use url::Url;
use uuid::Uuid;

use crate::errors::{token_fetch_failure, InfraError};
use crate::http::HttpClient;

/// Authenticator for the Somfy Open API
pub struct SomfyAuthenticator {
    http: HttpClient,
    consumer_key: String,
    consumer_secret: String,
    callback_url: String,
    authorize_endpoint: Url,
    token_endpoint: Url,
    state: String,
}

impl SomfyAuthenticator {
    /// Create an authenticator with a default HTTP client
    ///
    /// # Errors
    /// `SomfyError::Config` when the auth base URL cannot be parsed,
    /// `SomfyError::Transport` when the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_http_client(config, HttpClient::new()?)
    }

    /// Create an authenticator sharing an existing HTTP client
    ///
    /// # Errors
    /// `SomfyError::Config` when the auth base URL cannot be parsed.
    pub fn with_http_client(config: &ClientConfig, http: HttpClient) -> Result<Self> {
        Ok(Self {
            http,
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            callback_url: config.callback_url.clone(),
            authorize_endpoint: endpoint(config.auth_base(), AUTHORIZE_PATH)?,
            token_endpoint: endpoint(config.auth_base(), TOKEN_PATH)?,
            state: Uuid::new_v4().to_string(),
        })
    }

    /// Token-exchange URI for an authorization code
    #[must_use]
    pub fn build_issue_token_uri(&self, authorization_code: &str) -> Url {
        let query = format!(
            "response_type=code&client_id={}&client_secret={}&redirect_uri={}&code={}&state={}\
             &grant_type=authorization_code",
            self.consumer_key,
            self.consumer_secret,
            self.callback_url,
            authorization_code,
            self.state
        );
        with_query(&self.token_endpoint, &query)
    }

    /// Token-refresh URI for a refresh token
    #[must_use]
    pub fn build_refresh_token_uri(&self, refresh_token: &str) -> Url {
        let query = format!(
            "client_id={}&client_secret={}&refresh_token={}&grant_type=refresh_token",
            self.consumer_key, self.consumer_secret, refresh_token
        );
        with_query(&self.token_endpoint, &query)
    }

    async fn fetch_token(&self, uri: Url) -> Result<Token> {
        let redacted = redact_uri(uri.as_str());
        debug!(uri = %redacted, "requesting token");

        let response = self
            .http
            .send(self.http.request(Method::GET, uri.clone()))
            .await
            .map_err(|err| token_fetch_failure(uri.as_str(), None, err))?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(uri = %redacted, %status, "token endpoint rejected request");
            return Err(SomfyError::TokenFetch {
                uri: uri.to_string(),
                status: Some(status.as_u16()),
                reason: format!("unexpected status {status}"),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| {
                let err = SomfyError::from(InfraError::from(err));
                token_fetch_failure(uri.as_str(), Some(status.as_u16()), err)
            })?;

        let token_response: AccessTokenResponse = serde_json::from_slice(&body).map_err(|err| {
            SomfyError::TokenFetch {
                uri: uri.to_string(),
                status: Some(status.as_u16()),
                reason: format!("invalid token response: {err}"),
            }
        })?;

        token_response.into_token_at(Utc::now()).map_err(|err| SomfyError::TokenFetch {
            uri: uri.to_string(),
            status: Some(status.as_u16()),
            reason: format!("invalid expires_in: {err}"),
        })
    }
}

#[async_trait]
impl Authenticator for SomfyAuthenticator {
    fn build_authentication_request_uri(&self) -> Url {
        let query = format!(
            "response_type=code&client_id={}&redirect_uri={}&state={}&grant_type=authorization_code",
            self.consumer_key, self.callback_url, self.state
        );
        with_query(&self.authorize_endpoint, &query)
    }

    fn state(&self) -> &str {
        &self.state
    }

    fn extract_authorization_code_from_redirect_uri(&self, redirect_uri: &Url) -> Result<String> {
        parse_query(redirect_uri)
            .first("code")
            .map(str::to_string)
            .ok_or_else(|| SomfyError::InvalidRedirect { uri: redirect_uri.to_string() })
    }

    #[instrument(skip_all)]
    async fn issue_token(&self, authorization_code: &str) -> Result<Token> {
        let token = self.fetch_token(self.build_issue_token_uri(authorization_code)).await?;
        info!(expires_at = %token.access_token_expires_at(), "access token issued");
        Ok(token)
    }

    #[instrument(skip_all)]
    async fn refresh_token(&self, token: Arc<Token>) -> Result<Arc<Token>> {
        if !token.is_expired() {
            debug!("access token still valid, skipping refresh");
            return Ok(token);
        }

        if !token.has_refresh_token() {
            return Err(SomfyError::TokenExpired);
        }

        let fresh = self.fetch_token(self.build_refresh_token_uri(token.refresh_token())).await?;
        info!(expires_at = %fresh.access_token_expires_at(), "access token refreshed");
        Ok(Arc::new(fresh))
    }
}

fn endpoint(base: &str, path: &str) -> Result<Url> {
    let raw = format!("{base}{path}");
    Url::parse(&raw).map_err(|e| SomfyError::Config(format!("invalid auth endpoint {raw}: {e}")))
}

fn with_query(endpoint: &Url, query: &str) -> Url {
    let mut uri = endpoint.clone();
    uri.set_query(Some(query));
    uri
}

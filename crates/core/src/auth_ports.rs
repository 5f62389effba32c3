//! Authentication port interfaces

use std::sync::Arc;

use async_trait::async_trait;
use somfy_common::auth::Token;
use somfy_domain::Result;
use url::Url;

/// OAuth2 authorization-code and refresh-token grants against the Somfy
/// authorization server
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// URI the user agent is sent to in order to grant access
    fn build_authentication_request_uri(&self) -> Url;

    /// Opaque per-instance `state` value embedded in every URI this
    /// authenticator builds. Redirect handlers compare it with the `state`
    /// returned by the authorization server.
    fn state(&self) -> &str;

    /// Pull the authorization code out of the redirect URI
    ///
    /// # Errors
    /// `SomfyError::InvalidRedirect` when the URI has no `code` parameter.
    fn extract_authorization_code_from_redirect_uri(&self, redirect_uri: &Url) -> Result<String>;

    /// Exchange an authorization code for a token
    async fn issue_token(&self, authorization_code: &str) -> Result<Token>;

    /// Return `token` itself while it is valid, otherwise a newly issued one
    ///
    /// The returned `Arc` is pointer-equal to the input when no refresh was
    /// necessary.
    async fn refresh_token(&self, token: Arc<Token>) -> Result<Arc<Token>>;
}

//! OAuth token types
//!
//! `AccessTokenResponse` is the JSON body of the Somfy token endpoint; it is
//! converted into a [`Token`] immediately after decoding and discarded.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token lifetime that does not fit in the representable date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("token lifetime of {expires_in_secs}s is out of range")]
pub struct InvalidTokenLifetime {
    pub expires_in_secs: i64,
}

/// Issued access/refresh token pair
///
/// Immutable once constructed: the expiry is fixed at creation as
/// `issued_at + expires_in`. A refresh produces a new `Token`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    issued_at: DateTime<Utc>,
    access_token: String,
    refresh_token: String,
    access_token_expires_at: DateTime<Utc>,
}

impl Token {
    /// Create a token issued at `issued_at`, valid for `expires_in_secs`
    ///
    /// A lifetime past the representable date range saturates to
    /// `DateTime::<Utc>::MAX_UTC` (or `MIN_UTC` when negative).
    #[must_use]
    pub fn new(
        issued_at: DateTime<Utc>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in_secs: i64,
    ) -> Self {
        let access_token_expires_at =
            expiry(issued_at, expires_in_secs).unwrap_or(if expires_in_secs < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });

        Self {
            issued_at,
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            access_token_expires_at,
        }
    }

    /// Create a token, rejecting lifetimes past the representable date range
    ///
    /// # Errors
    /// Returns `InvalidTokenLifetime` when `issued_at + expires_in_secs`
    /// overflows.
    pub fn try_new(
        issued_at: DateTime<Utc>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in_secs: i64,
    ) -> Result<Self, InvalidTokenLifetime> {
        let access_token_expires_at = expiry(issued_at, expires_in_secs)
            .ok_or(InvalidTokenLifetime { expires_in_secs })?;

        Ok(Self {
            issued_at,
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            access_token_expires_at,
        })
    }

    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    #[must_use]
    pub const fn access_token_expires_at(&self) -> DateTime<Utc> {
        self.access_token_expires_at
    }

    /// Whether a refresh token was issued alongside the access token
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Check if the access token is expired right now
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check if the access token is expired at `now`
    ///
    /// The expiry instant itself counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.access_token_expires_at
    }

    /// Seconds until expiry (negative once expired)
    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.access_token_expires_at - Utc::now()).num_seconds()
    }
}

fn expiry(issued_at: DateTime<Utc>, expires_in_secs: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(expires_in_secs)
        .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("issued_at", &self.issued_at)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("access_token_expires_at", &self.access_token_expires_at)
            .finish()
    }
}

/// Token endpoint response (RFC 6749 §5.1)
#[derive(Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
}

impl fmt::Debug for AccessTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

impl AccessTokenResponse {
    /// Convert into a token issued at `issued_at`
    ///
    /// # Errors
    /// Returns `InvalidTokenLifetime` when `expires_in` pushes the expiry
    /// past the representable date range.
    pub fn into_token_at(self, issued_at: DateTime<Utc>) -> Result<Token, InvalidTokenLifetime> {
        Token::try_new(issued_at, self.access_token, self.refresh_token, self.expires_in)
    }
}

impl TryFrom<AccessTokenResponse> for Token {
    type Error = InvalidTokenLifetime;

    /// Stamps the token as issued now
    fn try_from(response: AccessTokenResponse) -> Result<Self, Self::Error> {
        response.into_token_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_expiring_in(secs: i64) -> Token {
        Token::new(Utc::now(), "access", "refresh", secs)
    }

    #[test]
    fn expiry_is_issue_time_plus_lifetime() {
        let issued_at = Utc::now();
        let token = Token::new(issued_at, "access", "refresh", 3600);

        assert_eq!(token.access_token_expires_at() - token.issued_at(), Duration::seconds(3600));
        assert_eq!(token.issued_at(), issued_at);
    }

    #[test]
    fn token_in_the_past_is_expired() {
        let token = Token::new(Utc::now() - Duration::hours(2), "access", "refresh", 3600);
        assert!(token.is_expired());
        assert!(token.seconds_until_expiry() < 0);
    }

    #[test]
    fn token_in_the_future_is_valid() {
        let token = token_expiring_in(3600);
        assert!(!token.is_expired());
        assert!(token.seconds_until_expiry() > 3500);
    }

    #[test]
    fn expiry_instant_counts_as_expired() {
        let token = token_expiring_in(60);
        let expires_at = token.access_token_expires_at();

        assert!(token.is_expired_at(expires_at));
        assert!(!token.is_expired_at(expires_at - Duration::milliseconds(1)));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?}", Token::new(Utc::now(), "s3cr3t-access", "s3cr3t-refresh", 60));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    fn response_converts_into_token() {
        let response: AccessTokenResponse = serde_json::from_str(
            r#"{
                "access_token": "a-valid-access-token",
                "refresh_token": "a-valid-refresh-token",
                "expires_in": 3600,
                "token_type": "bearer",
                "scope": null
            }"#,
        )
        .unwrap();

        let before = Utc::now();
        let token = Token::try_from(response).unwrap();

        assert_eq!(token.access_token(), "a-valid-access-token");
        assert_eq!(token.refresh_token(), "a-valid-refresh-token");
        assert!(token.issued_at() >= before);
        assert!(!token.is_expired());
    }

    #[test]
    fn response_without_refresh_token_decodes() {
        let response: AccessTokenResponse =
            serde_json::from_str(r#"{"access_token": "a", "expires_in": 60}"#).unwrap();
        let token = response.into_token_at(Utc::now()).unwrap();

        assert!(!token.has_refresh_token());
    }

    #[test]
    fn out_of_range_lifetime_is_rejected() {
        let response: AccessTokenResponse = serde_json::from_str(
            r#"{"access_token": "a", "refresh_token": "r", "expires_in": 10000000000000}"#,
        )
        .unwrap();

        let err = response.into_token_at(Utc::now()).unwrap_err();
        assert_eq!(err.expires_in_secs, 10_000_000_000_000);

        let err = Token::try_new(Utc::now(), "a", "r", i64::MIN).unwrap_err();
        assert_eq!(err.expires_in_secs, i64::MIN);
    }

    #[test]
    fn out_of_range_lifetime_saturates_in_new() {
        let token = Token::new(Utc::now(), "a", "r", i64::MAX);
        assert_eq!(token.access_token_expires_at(), DateTime::<Utc>::MAX_UTC);
        assert!(!token.is_expired());

        let token = Token::new(Utc::now(), "a", "r", i64::MIN);
        assert!(token.is_expired());
    }

    #[test]
    fn response_debug_output_hides_secrets() {
        let response: AccessTokenResponse = serde_json::from_str(
            r#"{"access_token": "s3cr3t-access", "refresh_token": "s3cr3t-refresh", "expires_in": 60}"#,
        )
        .unwrap();

        let rendered = format!("{response:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("expires_in: 60"));
    }
}

//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use somfy_domain::SomfyError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SomfyError);

impl From<InfraError> for SomfyError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SomfyError> for InfraError {
    fn from(value: SomfyError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSomfyError {
    fn into_somfy(self) -> SomfyError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SomfyError */
/* -------------------------------------------------------------------------- */

impl IntoSomfyError for HttpError {
    fn into_somfy(self) -> SomfyError {
        // Token endpoint URLs carry credentials in their query string
        let err = self.without_url();

        if err.is_timeout() {
            return SomfyError::Transport("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return SomfyError::Transport(format!("HTTP connection failure: {err}"));
        }

        if err.is_decode() {
            return SomfyError::Decode(err.to_string());
        }

        if err.is_builder() {
            return SomfyError::Transport(format!("invalid HTTP request: {err}"));
        }

        SomfyError::Transport(err.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_somfy())
    }
}

/// Wrap a failure that happened while talking to the token endpoint
///
/// Transport and decode failures are reported as `TokenFetch` so callers see
/// a single failure kind for the whole issue/refresh exchange.
#[must_use]
pub fn token_fetch_failure(uri: &str, status: Option<u16>, err: SomfyError) -> SomfyError {
    let reason = match err {
        SomfyError::Transport(reason) | SomfyError::Decode(reason) => reason,
        SomfyError::TokenFetch { reason, .. } => reason,
        other => other.to_string(),
    };

    SomfyError::TokenFetch { uri: uri.to_string(), status, reason }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

//! Somfy Open API port interfaces

use async_trait::async_trait;
use somfy_common::auth::Token;
use somfy_domain::{Command, Device, Result, Site};

/// Authenticated operations of the Somfy Open API
///
/// Every call makes sure the held token is valid first, refreshing it when
/// expired. Failures are surfaced as-is; nothing is retried.
#[async_trait]
pub trait SomfyApi: Send + Sync {
    /// `GET /site`
    async fn list_sites(&self) -> Result<Vec<Site>>;

    /// `GET /site/{site_id}`
    async fn get_site_by_id(&self, site_id: &str) -> Result<Site>;

    /// `GET /site/{site_id}/device`
    async fn list_devices(&self, site_id: &str) -> Result<Vec<Device>>;

    /// `GET /device/{device_id}`
    async fn get_device_by_id(&self, device_id: &str) -> Result<Device>;

    /// `POST /device/{device_id}/exec`, returning the job id
    async fn execute(&self, command: &Command, device_id: &str) -> Result<String>;

    /// Replace the held token, e.g. after a new authorization flow completed
    /// because the previous one could no longer be refreshed.
    async fn set_token(&self, token: Token);
}

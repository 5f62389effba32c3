//! Example: Authorizing against Somfy and listing devices
//!
//! Walks through the authorization-code flow interactively, then lists
//! every site and its devices.
//!
//! # Setup
//!
//! 1. Register an application in the Somfy developer portal and note its
//!    consumer key, consumer secret and callback URL.
//!
//! 2. Set up environment variables (or write a `somfy.toml`): ```bash export
//!    SOMFY_CALLBACK_URL=https://my.callback.url SOMFY_CONSUMER_KEY=...
//!    SOMFY_CONSUMER_SECRET=... ```
//!
//! 3. Run this example: ```bash RUST_LOG=somfy_infra=debug cargo run -p
//!    somfy-infra --example authorize ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use somfy_common::utils::query::parse_query;
use somfy_core::{Authenticator, SomfyApi};
use somfy_infra::{config, HttpClient, SomfyAuthenticator, SomfyClient};
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = config::load().context("loading Somfy configuration")?;
    let http = HttpClient::new()?;
    let authenticator = Arc::new(SomfyAuthenticator::with_http_client(&config, http.clone())?);

    println!("Open this URL in a browser and grant access:\n");
    println!("  {}\n", authenticator.build_authentication_request_uri());
    print!("Paste the URL you were redirected to: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let redirect = Url::parse(line.trim()).context("redirect URL is not a valid URL")?;

    let params = parse_query(&redirect);
    if params.first("state") != Some(authenticator.state()) {
        anyhow::bail!("state mismatch in redirect URL, refusing to continue");
    }

    let code = authenticator.extract_authorization_code_from_redirect_uri(&redirect)?;
    let token = authenticator.issue_token(&code).await?;
    println!("\n✓ Token issued, valid until {}\n", token.access_token_expires_at());

    let client = SomfyClient::with_parts(&config, token, authenticator, http);

    for site in client.list_sites().await? {
        println!("Site {} ({})", site.label, site.id);
        for device in client.list_devices(&site.id).await? {
            let capabilities: Vec<_> =
                device.capabilities.iter().map(|c| c.identification()).collect();
            println!(
                "  - {} [{}] {}{}",
                device.name,
                device.device_type,
                capabilities.join(", "),
                if device.available { "" } else { " (unavailable)" }
            );
        }
    }

    Ok(())
}

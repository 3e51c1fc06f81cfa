use anyhow::{Error, Result, anyhow};
use tracing_subscriber::EnvFilter;

use engagement_push::{api, clients::firebase, config::Config};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::load()?;

    // Parse the Firebase credential up front; a bad credential is logged
    // and the server still starts, failing sends at dispatch time.
    firebase::credentials(config.firebase_service_account.as_deref()).await;

    api::run_api_server(config)
        .await
        .map_err(|e| anyhow!("Server error: {}", e))?;

    Ok(())
}

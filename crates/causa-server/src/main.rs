//! Causa server entrypoint
//!
//! Reads configuration from the environment and starts the HTTP
//! server. See `config::ServerConfig` for the variable surface.

use anyhow::Context;
use causa_server::config::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().context("failed to load configuration")?;

    causa_server::start_server(config)
        .await
        .context("server exited with error")?;

    Ok(())
}

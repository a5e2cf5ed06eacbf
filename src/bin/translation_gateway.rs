use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use translation_gateway::server;
use translation_gateway::{GatewayConfig, TranslationGateway};

const DEFAULT_LOG_FILTER: &str = "translation_gateway=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(fmt::layer())
        .try_init()?;

    let config = GatewayConfig::from_env()?;
    let gateway = Arc::new(TranslationGateway::from_config(&config)?);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    let provider = gateway.provider_id();
    info!(
        addr = %listener.local_addr()?,
        provider = provider.as_str(),
        max_attempts = config.retry_policy.max_attempts,
        "translation gateway listening"
    );

    server::serve(listener, gateway, shutdown_signal()).await?;
    info!("translation gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

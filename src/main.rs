mod config;
mod constants;
mod error;
mod formatters;
mod gateway;
mod glossary;
mod greeting;
mod models;
mod service;
mod transport;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, TransportKind};
use crate::constants::REQUEST_TIMEOUT;
use crate::gateway::NwsClient;
use crate::glossary::GlossaryStore;
use crate::service::WeatherServer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();
    init_logging(config.log_level.as_deref());

    tracing::info!("Starting MCP weather server");

    let nws = NwsClient::new(&config.api_base, REQUEST_TIMEOUT)?;
    let glossary = GlossaryStore::new(&config.glossary);
    tracing::info!(
        api_base = nws.base_url(),
        glossary = %glossary.path().display(),
        transport = ?config.transport,
        "configured"
    );

    let weather = WeatherServer::new(nws, glossary);
    match config.transport {
        TransportKind::Stdio => transport::serve_stdio(weather).await?,
        TransportKind::Http => transport::serve_http(weather, config.bind).await?,
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Logs go to stderr; stdout carries the stdio transport.
fn init_logging(directive: Option<&str>) {
    let filter = match directive {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "nws_weather_mcp=info".into()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

//! Transports the weather server can be served over.

use std::net::SocketAddr;

use anyhow::Result;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use rmcp::ServiceExt;

use crate::service::WeatherServer;

/// Path the streamable HTTP endpoint is mounted on
pub const MCP_HTTP_PATH: &str = "/mcp";

/// Serves a single MCP session over stdin/stdout until the client disconnects.
pub async fn serve_stdio(weather: WeatherServer) -> Result<()> {
    let server = weather
        .serve(rmcp::transport::stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {:?}", e))?;
    server.waiting().await?;
    Ok(())
}

/// Serves stateless streamable HTTP on `bind` until Ctrl-C.
///
/// Every request gets a clone of `weather`; clones share the HTTP client and
/// glossary cache.
pub async fn serve_http(weather: WeatherServer, bind: SocketAddr) -> Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(weather.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            stateful_mode: false,
            ..Default::default()
        },
    );

    let router = axum::Router::new().nest_service(MCP_HTTP_PATH, service);
    let listener = tokio::net::TcpListener::bind(bind).await?;

    tracing::info!("Listening on http://{}{}", listener.local_addr()?, MCP_HTTP_PATH);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    Ok(())
}

//! Command line and environment configuration.
//!
//! Every flag has an environment fallback; a `.env` file in the working
//! directory is loaded first.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::constants::NWS_API_BASE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// MCP over stdin/stdout
    Stdio,
    /// Stateless streamable HTTP
    Http,
}

/// MCP server for National Weather Service alerts, forecasts and glossary.
#[derive(Debug, Clone, Parser)]
#[command(name = "nws-weather-mcp", version)]
pub struct Config {
    /// Transport to serve MCP over
    #[arg(long, env = "WEATHER_MCP_TRANSPORT", value_enum, default_value_t = TransportKind::Stdio)]
    pub transport: TransportKind,

    /// Listen address for the HTTP transport
    #[arg(long, env = "WEATHER_MCP_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Root of the weather API
    #[arg(long, env = "WEATHER_MCP_API_BASE", default_value = NWS_API_BASE)]
    pub api_base: String,

    /// Path of the glossary JSON file
    #[arg(long, env = "WEATHER_MCP_GLOSSARY", default_value = "glossary.json")]
    pub glossary: PathBuf,

    /// Log filter directive (e.g. "debug"); RUST_LOG is used when unset
    #[arg(long, env = "WEATHER_MCP_LOG")]
    pub log_level: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}

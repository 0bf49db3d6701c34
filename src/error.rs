//! Error types for the weather server.
//!
//! `FetchError` never leaves the gateway: it only exists so the cause of a
//! masked failure can be logged. `GlossaryError` is reported to MCP clients.

use std::path::PathBuf;

use thiserror::Error;

/// Why an outbound NWS request produced no data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout or malformed URL.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("request failed with status: {0}")]
    Status(reqwest::StatusCode),

    /// The body was not valid JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Errors raised while loading the glossary file.
#[derive(Debug, Error)]
pub enum GlossaryError {
    #[error("failed to read glossary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse glossary {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode glossary: {0}")]
    Encode(#[from] serde_json::Error),
}

//! Server Command Wrappers
//!
//! HTTP bindings to the plans endpoints, organized by domain.

mod toggle;
mod lists;

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::error::SyncError;

// Re-export all public items
pub use toggle::*;
pub use lists::*;

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Request seam between the sync flow and the browser's fetch
#[async_trait(?Send)]
pub trait Transport {
    async fn post(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply, SyncError>;
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply, SyncError>;
}

/// `fetch`-backed transport; cookies ride along under the default
/// same-origin credentials mode
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn post(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply, SyncError> {
        let mut builder = Request::post(url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        let response = builder.send().await.map_err(map_network_error)?;
        read_reply(response).await
    }

    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply, SyncError> {
        let mut builder = Request::get(url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        let response = builder.send().await.map_err(map_network_error)?;
        read_reply(response).await
    }
}

fn map_network_error(error: gloo_net::Error) -> SyncError {
    SyncError::Transport(error.to_string())
}

async fn read_reply(response: gloo_net::http::Response) -> Result<HttpReply, SyncError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| SyncError::Transport(e.to_string()))?;
    Ok(HttpReply { status, body })
}

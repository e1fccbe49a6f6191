//! Error Types

use thiserror::Error;

/// Failure of a toggle or a counter refresh
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Request never completed
    #[error("Network error: {0}")]
    Transport(String),
    /// Non-2xx response without a readable body
    #[error("Request failed with status {0}")]
    Status(u16),
    /// Server answered with `success: false`
    #[error("{0}")]
    Server(String),
    /// Body was not the expected JSON or markup
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// Browser API unavailable or refused the operation
    #[error("{0}")]
    Dom(String),
}

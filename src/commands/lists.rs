//! List View Reads
//!
//! Programmatic GETs of the favorites/comparison pages used as count sources.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::models::SetKind;
use super::Transport;

/// Marks the read as non-navigational
const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Body of the list view for `kind`; non-2xx replies are errors
pub async fn fetch_list_body(
    transport: &dyn Transport,
    config: &SyncConfig,
    kind: SetKind,
) -> Result<String, SyncError> {
    let reply = transport.get(config.list_url(kind), &[AJAX_HEADER]).await?;
    if !reply.is_success() {
        return Err(SyncError::Status(reply.status));
    }
    Ok(reply.body)
}

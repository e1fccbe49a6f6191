//! Toggle Commands
//!
//! One authenticated POST per user toggle. No retry, no de-dup: two clicks
//! in flight resolve in arrival order.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::models::{SetKind, ToggleContext, ToggleOutcome, ToggleResponse};
use super::{HttpReply, Transport};

pub async fn toggle_membership(
    transport: &dyn Transport,
    config: &SyncConfig,
    csrf_token: Option<&str>,
    ctx: &ToggleContext,
) -> Result<ToggleOutcome, SyncError> {
    let url = config.toggle_url(ctx.kind, &ctx.item_id);

    let mut headers = vec![("Content-Type", "application/json")];
    if let Some(token) = csrf_token {
        headers.push((config.csrf_header.as_str(), token));
    }

    let reply = transport.post(&url, &headers).await?;
    interpret_reply(ctx.kind, &reply)
}

/// Map a toggle reply to an outcome. Business failures arrive in-band, so a
/// non-2xx status is only fatal when the body is not the toggle JSON.
pub fn interpret_reply(kind: SetKind, reply: &HttpReply) -> Result<ToggleOutcome, SyncError> {
    let parsed: ToggleResponse = match serde_json::from_str(&reply.body) {
        Ok(parsed) => parsed,
        Err(_) if !reply.is_success() => return Err(SyncError::Status(reply.status)),
        Err(e) => return Err(SyncError::Decode(e.to_string())),
    };

    if !parsed.success {
        let text = parsed
            .error
            .or(parsed.message)
            .unwrap_or_else(|| format!("Could not update {}", kind.label()));
        return Err(SyncError::Server(text));
    }

    let is_member = parsed
        .membership(kind)
        .ok_or_else(|| SyncError::Decode(format!("missing `{}` field", kind.membership_field())))?;

    Ok(ToggleOutcome { kind, is_member, message: parsed.message })
}

//! Counter Reconciler
//!
//! Re-derives both navbar badge counts after a toggle. The toggle response
//! is never trusted for counts; each badge reads its own list view.

use std::rc::Rc;
use std::sync::OnceLock;

use async_trait::async_trait;
use futures_util::future::join;
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;

use crate::commands::{fetch_list_body, Transport};
use crate::config::SyncConfig;
use crate::dom::{BadgeElement, Page};
use crate::error::SyncError;
use crate::models::SetKind;

static COMPARING: OnceLock<Regex> = OnceLock::new();

fn comparing_regex() -> &'static Regex {
    COMPARING.get_or_init(|| Regex::new(r"Comparing (\d+)").expect("valid pattern"))
}

/// Keeps badges in step with server state
#[async_trait(?Send)]
pub trait CounterRefresh {
    /// Never fails outward; problems are logged
    async fn refresh_counters(&self);
}

/// Integer from a "Comparing N plans" sentence, 0 when absent
pub fn comparing_count(text: &str) -> u32 {
    comparing_regex()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(0)
}

#[derive(Deserialize)]
struct CountBody {
    count: u32,
}

/// A list view that answers `{"count": N}` skips scraping
pub fn structured_count(body: &str) -> Option<u32> {
    serde_json::from_str::<CountBody>(body).ok().map(|parsed| parsed.count)
}

pub fn derive_count(
    kind: SetKind,
    config: &SyncConfig,
    page: &dyn Page,
    body: &str,
) -> Result<u32, SyncError> {
    if let Some(count) = structured_count(body) {
        return Ok(count);
    }

    let fragment = page.parse_markup(body)?;
    let count = match kind {
        SetKind::Favorite => fragment.count(&config.card_selector) as u32,
        // Only the first summary paragraph carries the count
        SetKind::Comparison => fragment
            .texts(&config.comparison_summary_selector)
            .first()
            .map(|text| comparing_count(text))
            .unwrap_or(0),
    };
    Ok(count)
}

/// Text always equals the count; shown iff count > 0
pub fn apply_count(badge: &dyn BadgeElement, count: u32) {
    badge.set_text(&count.to_string());
    badge.set_visible(count > 0);
}

/// Fetch each list view, parse it detached, update the badge in place
pub struct TargetedRefresh {
    transport: Rc<dyn Transport>,
    page: Rc<dyn Page>,
    config: Rc<SyncConfig>,
}

impl TargetedRefresh {
    pub fn new(transport: Rc<dyn Transport>, page: Rc<dyn Page>, config: Rc<SyncConfig>) -> Self {
        Self { transport, page, config }
    }

    async fn refresh_badge(&self, kind: SetKind) {
        let Some(badge) = self.page.badge(self.config.badge_selector(kind)) else {
            debug!("[COUNTERS] No {} badge on this page", kind.label());
            return;
        };

        match self.fetch_count(kind).await {
            Ok(count) => {
                apply_count(badge.as_ref(), count);
                debug!("[COUNTERS] {} badge set to {}", kind.label(), count);
            }
            Err(e) => warn!("[COUNTERS] Error updating {} count: {}", kind.label(), e),
        }
    }

    async fn fetch_count(&self, kind: SetKind) -> Result<u32, SyncError> {
        let body = fetch_list_body(self.transport.as_ref(), &self.config, kind).await?;
        derive_count(kind, &self.config, self.page.as_ref(), &body)
    }
}

#[async_trait(?Send)]
impl CounterRefresh for TargetedRefresh {
    async fn refresh_counters(&self) {
        // Both badges, whichever set changed
        join(
            self.refresh_badge(SetKind::Favorite),
            self.refresh_badge(SetKind::Comparison),
        )
        .await;
    }
}

/// Earlier strategy: let the server re-render everything
pub struct ReloadRefresh;

#[async_trait(?Send)]
impl CounterRefresh for ReloadRefresh {
    async fn refresh_counters(&self) {
        let Some(window) = web_sys::window() else {
            warn!("[COUNTERS] No window to reload");
            return;
        };
        if let Err(e) = window.location().reload() {
            warn!("[COUNTERS] Reload failed: {:?}", e);
        }
    }
}

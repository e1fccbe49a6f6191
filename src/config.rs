//! Sync Configuration
//!
//! Endpoint templates, selectors and timings. Defaults match the plans
//! catalogue; the host page may override any field with an embedded
//! `<script id="plan-sync-config" type="application/json">` block.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::models::SetKind;

/// Id of the optional JSON override element
pub const CONFIG_ELEMENT_ID: &str = "plan-sync-config";

/// Characters kept verbatim when an item id is placed in a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// How feedback is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStyle {
    Toast,
    Alert,
}

/// How navbar badges are brought up to date after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterStrategy {
    Targeted,
    Reload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// `{id}` is replaced with the item id
    pub favorite_toggle_url: String,
    pub comparison_toggle_url: String,
    pub favorites_list_url: String,
    pub comparison_list_url: String,

    pub csrf_cookie: String,
    pub csrf_header: String,

    pub favorite_control_selector: String,
    pub comparison_control_selector: String,
    pub item_id_attribute: String,
    pub icon_selector: String,

    pub favorites_badge_selector: String,
    pub comparison_badge_selector: String,
    /// One element per saved item on the favorites page
    pub card_selector: String,
    /// Elements searched for the "Comparing N" summary
    pub comparison_summary_selector: String,

    pub toast_delay_ms: u32,
    pub toast_fade_ms: u32,
    pub notifications: NotificationStyle,
    pub counter_strategy: CounterStrategy,
    pub log_level: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            favorite_toggle_url: "/plans/favorite/toggle/{id}/".to_string(),
            comparison_toggle_url: "/plans/compare/toggle/{id}/".to_string(),
            favorites_list_url: "/plans/favorites/".to_string(),
            comparison_list_url: "/plans/compare/".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            favorite_control_selector: ".toggle-favorite".to_string(),
            comparison_control_selector: ".toggle-comparison".to_string(),
            item_id_attribute: "data-plan-id".to_string(),
            icon_selector: "i".to_string(),
            favorites_badge_selector: r#".nav-link[href*="favorites"] .badge"#.to_string(),
            comparison_badge_selector: r#".nav-link[href*="compare"] .badge"#.to_string(),
            card_selector: ".plan-card".to_string(),
            comparison_summary_selector: "p.text-muted".to_string(),
            toast_delay_ms: 3000,
            toast_fade_ms: 150,
            notifications: NotificationStyle::Toast,
            counter_strategy: CounterStrategy::Targeted,
            log_level: "info".to_string(),
        }
    }
}

impl SyncConfig {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(raw: &str) -> Result<Self, SyncError> {
        serde_json::from_str(raw).map_err(|e| SyncError::Decode(format!("invalid config: {}", e)))
    }

    /// Read the override block from the current document, defaults if absent
    pub fn from_page() -> Result<Self, SyncError> {
        let raw = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|element| element.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn toggle_url(&self, kind: SetKind, item_id: &str) -> String {
        let template = match kind {
            SetKind::Favorite => &self.favorite_toggle_url,
            SetKind::Comparison => &self.comparison_toggle_url,
        };
        let segment = utf8_percent_encode(item_id, PATH_SEGMENT).to_string();
        template.replace("{id}", &segment)
    }

    pub fn list_url(&self, kind: SetKind) -> &str {
        match kind {
            SetKind::Favorite => &self.favorites_list_url,
            SetKind::Comparison => &self.comparison_list_url,
        }
    }

    pub fn control_selector(&self, kind: SetKind) -> &str {
        match kind {
            SetKind::Favorite => &self.favorite_control_selector,
            SetKind::Comparison => &self.comparison_control_selector,
        }
    }

    pub fn badge_selector(&self, kind: SetKind) -> &str {
        match kind {
            SetKind::Favorite => &self.favorites_badge_selector,
            SetKind::Comparison => &self.comparison_badge_selector,
        }
    }

    /// Unknown level names fall back to `info`
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

//! Frontend Models
//!
//! Wire types for the toggle endpoints and the values passed between
//! the toggle flow, the icon reconciler and the notifier.

use serde::{Deserialize, Serialize};

/// Which user-scoped set a control or badge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetKind {
    Favorite,
    Comparison,
}

impl SetKind {
    pub const ALL: [SetKind; 2] = [SetKind::Favorite, SetKind::Comparison];

    /// Short label used in log lines and fallback error texts
    pub fn label(&self) -> &'static str {
        match self {
            SetKind::Favorite => "favorites",
            SetKind::Comparison => "comparison",
        }
    }

    /// Name of the membership flag in the toggle response
    pub fn membership_field(&self) -> &'static str {
        match self {
            SetKind::Favorite => "is_saved",
            SetKind::Comparison => "in_comparison",
        }
    }
}

/// Body returned by `POST /plans/{favorite,compare}/toggle/{id}/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ToggleResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub is_saved: Option<bool>,
    #[serde(default)]
    pub in_comparison: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ToggleResponse {
    pub fn membership(&self, kind: SetKind) -> Option<bool> {
        match kind {
            SetKind::Favorite => self.is_saved,
            SetKind::Comparison => self.in_comparison,
        }
    }
}

/// Confirmed result of a successful toggle
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    pub kind: SetKind,
    pub is_member: bool,
    pub message: Option<String>,
}

impl ToggleOutcome {
    /// Server attached a capacity notice ("Maximum 4 plans ...")
    pub fn hit_capacity(&self) -> bool {
        self.message
            .as_deref()
            .is_some_and(|message| message.contains("maximum") || message.contains("Maximum"))
    }

    /// Feedback text shown after the toggle
    pub fn confirmation(&self) -> &'static str {
        match (self.kind, self.is_member) {
            (SetKind::Favorite, true) => "Saved to Favorites ❤️",
            (SetKind::Favorite, false) => "Removed from Favorites",
            (SetKind::Comparison, true) => "Added to Compare ✓",
            (SetKind::Comparison, false) => "Removed from Compare",
        }
    }
}

/// Per-control binding: one item in one set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleContext {
    pub item_id: String,
    pub kind: SetKind,
}

impl ToggleContext {
    pub fn new(item_id: impl Into<String>, kind: SetKind) -> Self {
        Self { item_id: item_id.into(), kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Bootstrap background class for the toast
    pub fn bg_class(&self) -> &'static str {
        match self {
            Severity::Success => "bg-success",
            Severity::Error => "bg-danger",
        }
    }
}

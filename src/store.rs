//! Toast State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Severity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Showing,
    /// Fade-out running; removed from the document afterwards
    Hiding,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
}

/// Toasts currently in the stack, oldest first
#[derive(Clone, Debug, Default, Store)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    pub next_id: u64,
}

/// Type alias for the store
pub type ToastStore = Store<ToastState>;

// ========================
// List operations
// ========================

pub fn push_toast(toasts: &mut Vec<Toast>, id: u64, message: &str, severity: Severity) {
    toasts.push(Toast {
        id,
        message: message.to_string(),
        severity,
        phase: ToastPhase::Showing,
    });
}

/// Returns false if the toast is gone or already hiding
pub fn begin_hide(toasts: &mut [Toast], id: u64) -> bool {
    match toasts.iter_mut().find(|toast| toast.id == id) {
        Some(toast) if toast.phase == ToastPhase::Showing => {
            toast.phase = ToastPhase::Hiding;
            true
        }
        _ => false,
    }
}

pub fn remove_toast(toasts: &mut Vec<Toast>, id: u64) -> bool {
    let before = toasts.len();
    toasts.retain(|toast| toast.id != id);
    toasts.len() != before
}

pub fn is_hiding(toasts: &[Toast], id: u64) -> bool {
    toasts
        .iter()
        .any(|toast| toast.id == id && toast.phase == ToastPhase::Hiding)
}

// ========================
// Store Helper Functions
// ========================

/// Where toasts live while they are on screen
pub trait ToastQueue {
    /// Add a toast and return its id
    fn push(&self, message: &str, severity: Severity) -> u64;
    fn begin_hide(&self, id: u64) -> bool;
    fn remove(&self, id: u64) -> bool;
}

impl ToastQueue for ToastStore {
    fn push(&self, message: &str, severity: Severity) -> u64 {
        store_push_toast(self, message, severity)
    }

    fn begin_hide(&self, id: u64) -> bool {
        store_begin_hide(self, id)
    }

    fn remove(&self, id: u64) -> bool {
        store_remove_toast(self, id)
    }
}

/// Add a toast and return its id
pub fn store_push_toast(store: &ToastStore, message: &str, severity: Severity) -> u64 {
    let id = store.next_id().get_untracked();
    store.next_id().set(id + 1);
    push_toast(&mut store.toasts().write(), id, message, severity);
    id
}

pub fn store_begin_hide(store: &ToastStore, id: u64) -> bool {
    begin_hide(&mut store.toasts().write(), id)
}

pub fn store_remove_toast(store: &ToastStore, id: u64) -> bool {
    remove_toast(&mut store.toasts().write(), id)
}

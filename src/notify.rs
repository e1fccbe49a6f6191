//! Notification Sink
//!
//! `notify(message, severity)` with two interchangeable presentations:
//! a managed toast stack and the blocking browser alert.

use std::cell::Cell;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use reactive_stores::Store;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::components::{run_toast, GlooSleeper, ToastStack};
use crate::error::SyncError;
use crate::models::Severity;
use crate::store::{ToastQueue, ToastState, ToastStore};

const CONTAINER_CLASS: &str = "toast-container position-fixed top-0 end-0 p-3";
const CONTAINER_Z_INDEX: &str = "9999";

pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Blocking `window.alert`; successes only go to the log
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if severity == Severity::Success {
            info!("[NOTIFY] {}", message);
            return;
        }
        match web_sys::window() {
            Some(window) => {
                let _ = window.alert_with_message(message);
            }
            None => warn!("[NOTIFY] No window for alert: {}", message),
        }
    }
}

/// Where the toast container lives
pub trait ToastHost {
    type Container;

    fn find_container(&self) -> Option<Self::Container>;
    fn create_container(&self, class_name: &str) -> Result<Self::Container, SyncError>;
    fn set_style(&self, container: &Self::Container, property: &str, value: &str);
}

/// Reuse the page's `.toast-container` untouched, or create and style one
pub fn prepare_container<H: ToastHost>(host: &H) -> Result<H::Container, SyncError> {
    if let Some(existing) = host.find_container() {
        return Ok(existing);
    }
    let created = host.create_container(CONTAINER_CLASS)?;
    host.set_style(&created, "z-index", CONTAINER_Z_INDEX);
    Ok(created)
}

struct BrowserToastHost {
    document: Document,
}

impl ToastHost for BrowserToastHost {
    type Container = HtmlElement;

    fn find_container(&self) -> Option<HtmlElement> {
        self.document
            .query_selector(".toast-container")
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn create_container(&self, class_name: &str) -> Result<HtmlElement, SyncError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| SyncError::Dom("document body is unavailable".to_string()))?;
        let created = self
            .document
            .create_element("div")
            .map_err(|_| SyncError::Dom("failed to create toast container".to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SyncError::Dom("toast container is not HtmlElement".to_string()))?;
        created.set_class_name(class_name);
        body.append_child(&created)
            .map_err(|_| SyncError::Dom("failed to attach toast container".to_string()))?;
        Ok(created)
    }

    fn set_style(&self, container: &HtmlElement, property: &str, value: &str) {
        let _ = container.style().set_property(property, value);
    }
}

/// Self-dismissing toasts stacked in one lazily created container
pub struct ToastNotifier {
    store: ToastStore,
    delay_ms: u32,
    fade_ms: u32,
    mounted: Cell<bool>,
}

impl ToastNotifier {
    pub fn new(delay_ms: u32, fade_ms: u32) -> Self {
        Self {
            store: Store::new(ToastState::default()),
            delay_ms,
            fade_ms,
            mounted: Cell::new(false),
        }
    }

    /// Find or create `.toast-container` and mount the stack into it once
    fn ensure_mounted(&self) -> Result<(), SyncError> {
        if self.mounted.get() {
            return Ok(());
        }

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SyncError::Dom("document is unavailable".to_string()))?;

        let container = prepare_container(&BrowserToastHost { document })?;

        let store = self.store;
        let fade_ms = self.fade_ms;
        leptos::mount::mount_to(container, move || view! { <ToastStack store=store fade_ms=fade_ms /> })
            .forget();
        self.mounted.set(true);
        Ok(())
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Err(e) = self.ensure_mounted() {
            warn!("[NOTIFY] Toast unavailable ({}): {}", e, message);
            return;
        }

        let id = ToastQueue::push(&self.store, message, severity);
        let store = self.store;
        let (delay_ms, fade_ms) = (self.delay_ms, self.fade_ms);
        spawn_local(async move {
            run_toast(&store, &GlooSleeper, id, delay_ms, fade_ms).await;
        });
    }
}

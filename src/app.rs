//! Plan Sync App
//!
//! The toggle-and-reconcile flow and the browser wiring around it.

use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::AddEventListenerOptions;

use crate::commands::{toggle_membership, GlooTransport, Transport};
use crate::config::{CounterStrategy, NotificationStyle, SyncConfig};
use crate::controls::bind_controls;
use crate::cookies::document_cookie;
use crate::counters::{CounterRefresh, ReloadRefresh, TargetedRefresh};
use crate::dom::{BrowserPage, IconElement};
use crate::error::SyncError;
use crate::models::{Severity, ToggleContext, ToggleOutcome};
use crate::notify::{AlertNotifier, Notifier, ToastNotifier};

/// Reads a cookie by name
pub type CredentialSource = Rc<dyn Fn(&str) -> Option<String>>;

/// Collaborators shared by every bound control
pub struct SyncApp {
    pub config: Rc<SyncConfig>,
    transport: Rc<dyn Transport>,
    notifier: Rc<dyn Notifier>,
    counters: Rc<dyn CounterRefresh>,
    credentials: CredentialSource,
}

impl SyncApp {
    pub fn new(
        config: Rc<SyncConfig>,
        transport: Rc<dyn Transport>,
        notifier: Rc<dyn Notifier>,
        counters: Rc<dyn CounterRefresh>,
        credentials: CredentialSource,
    ) -> Self {
        Self { config, transport, notifier, counters, credentials }
    }

    /// Production wiring for the current page
    pub fn browser(config: SyncConfig) -> Self {
        let config = Rc::new(config);
        let transport: Rc<dyn Transport> = Rc::new(GlooTransport);

        let notifier: Rc<dyn Notifier> = match config.notifications {
            NotificationStyle::Toast => Rc::new(ToastNotifier::new(config.toast_delay_ms, config.toast_fade_ms)),
            NotificationStyle::Alert => Rc::new(AlertNotifier),
        };

        let counters: Rc<dyn CounterRefresh> = match config.counter_strategy {
            CounterStrategy::Targeted => Rc::new(TargetedRefresh::new(
                transport.clone(),
                Rc::new(BrowserPage),
                config.clone(),
            )),
            CounterStrategy::Reload => Rc::new(ReloadRefresh),
        };

        Self::new(config, transport, notifier, counters, Rc::new(document_cookie))
    }

    /// One user toggle. The icon only changes after this toggle's own
    /// successful response; failures are surfaced and leave the page alone.
    pub async fn handle_toggle(
        &self,
        ctx: &ToggleContext,
        icon: &dyn IconElement,
    ) -> Result<ToggleOutcome, SyncError> {
        let token = (self.credentials)(&self.config.csrf_cookie);
        if token.is_none() {
            debug!("[TOGGLE] No {} cookie; sending without token", self.config.csrf_cookie);
        }

        let outcome = match toggle_membership(self.transport.as_ref(), &self.config, token.as_deref(), ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("[TOGGLE] {} {} failed: {}", ctx.kind.label(), ctx.item_id, e);
                self.notifier.notify(&e.to_string(), Severity::Error);
                return Err(e);
            }
        };

        crate::icons::reconcile_icon(icon, outcome.kind, outcome.is_member);
        self.notifier.notify(outcome.confirmation(), Severity::Success);
        if outcome.hit_capacity() {
            if let Some(message) = outcome.message.as_deref() {
                self.notifier.notify(message, Severity::Error);
            }
        }
        info!("[TOGGLE] {} {} -> {}", ctx.kind.label(), ctx.item_id, outcome.is_member);

        self.counters.refresh_counters().await;
        Ok(outcome)
    }
}

/// Anything past "loading" means the markup is already in the DOM
pub fn document_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Bind controls once the document is parsed
pub fn start(config: SyncConfig) {
    let app = Rc::new(SyncApp::browser(config));

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        warn!("[APP] No document; nothing to bind");
        return;
    };

    if document_parsed(&document.ready_state()) {
        let bound = bind_controls(&app);
        info!("[APP] Bound {} toggle controls", bound);
        return;
    }

    let on_ready = Closure::once(move || {
        let bound = bind_controls(&app);
        info!("[APP] Bound {} toggle controls", bound);
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
            &options,
        )
        .is_err()
    {
        warn!("[APP] Could not wait for DOMContentLoaded");
    }
    on_ready.forget();
}

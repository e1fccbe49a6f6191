//! Control Binder
//!
//! One click handler per toggle control, each closed over its own
//! `(item_id, kind)` and icon rather than looking them up at click time.

use std::rc::Rc;

use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::app::SyncApp;
use crate::config::SyncConfig;
use crate::models::{SetKind, ToggleContext};

/// What the binder needs from a control element
pub trait ControlElement {
    type Icon;

    fn attribute(&self, name: &str) -> Option<String>;
    fn find_icon(&self, selector: &str) -> Option<Self::Icon>;
}

impl ControlElement for Element {
    type Icon = Element;

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn find_icon(&self, selector: &str) -> Option<Element> {
        self.query_selector(selector).ok().flatten()
    }
}

/// Why a control was left unbound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingId,
    MissingIcon { item_id: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingId => write!(f, "no item id"),
            SkipReason::MissingIcon { item_id } => write!(f, "no icon for {}", item_id),
        }
    }
}

/// Context and icon a click handler closes over. Blank ids count as missing.
pub fn resolve_control<C: ControlElement>(
    config: &SyncConfig,
    control: &C,
    kind: SetKind,
) -> Result<(ToggleContext, C::Icon), SkipReason> {
    let item_id = control
        .attribute(&config.item_id_attribute)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or(SkipReason::MissingId)?;
    let icon = control
        .find_icon(&config.icon_selector)
        .ok_or_else(|| SkipReason::MissingIcon { item_id: item_id.clone() })?;
    Ok((ToggleContext::new(item_id, kind), icon))
}

/// Bind every marked control on the page; returns how many were bound
pub fn bind_controls(app: &Rc<SyncApp>) -> usize {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        warn!("[BIND] No document");
        return 0;
    };

    let mut bound = 0;
    for kind in SetKind::ALL {
        let selector = app.config.control_selector(kind);
        let nodes = match document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(_) => {
                warn!("[BIND] Invalid selector {}", selector);
                continue;
            }
        };
        for index in 0..nodes.length() {
            let Some(control) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            if bind_control(app, &control, kind) {
                bound += 1;
            }
        }
    }
    bound
}

fn bind_control(app: &Rc<SyncApp>, control: &Element, kind: SetKind) -> bool {
    let (ctx, icon) = match resolve_control(&app.config, control, kind) {
        Ok(resolved) => resolved,
        Err(reason) => {
            warn!("[BIND] Skipping {} control: {}", kind.label(), reason);
            return false;
        }
    };

    let ctx = Rc::new(ctx);
    let app = Rc::clone(app);
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        event.stop_propagation();

        let (app, ctx, icon) = (Rc::clone(&app), Rc::clone(&ctx), icon.clone());
        spawn_local(async move {
            let started = js_sys::Date::now();
            let result = app.handle_toggle(&ctx, &icon).await;
            debug!(
                "[TOGGLE] {} {} settled in {:.0}ms (ok={})",
                ctx.kind.label(),
                ctx.item_id,
                js_sys::Date::now() - started,
                result.is_ok()
            );
        });
    });

    if control
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .is_err()
    {
        warn!("[BIND] Could not attach click handler to {} control", kind.label());
        return false;
    }
    handler.forget();
    true
}

//! Toast Stack Component
//!
//! Renders the toast store inside `.toast-container`. Each toast owns its
//! own timers; nothing is de-duplicated.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::Severity;
use crate::store::{is_hiding, Toast, ToastQueue, ToastStateStoreFields, ToastStore};

/// Waits between toast phases
#[async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, ms: u32);
}

pub struct GlooSleeper;

#[async_trait(?Send)]
impl Sleeper for GlooSleeper {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

/// Bootstrap classes; dropping `show` starts the fade
pub fn toast_class(severity: Severity, hiding: bool) -> String {
    let phase = if hiding { "fade" } else { "fade show" };
    format!("toast align-items-center text-white {} border-0 {}", severity.bg_class(), phase)
}

/// Fade out, then detach. A toast already hiding or gone is left alone.
pub async fn hide_toast(queue: &dyn ToastQueue, sleeper: &dyn Sleeper, id: u64, fade_ms: u32) {
    if !queue.begin_hide(id) {
        return;
    }
    sleeper.sleep(fade_ms).await;
    queue.remove(id);
}

/// Full lifetime of one toast: visible for `delay_ms`, then hidden
pub async fn run_toast(queue: &dyn ToastQueue, sleeper: &dyn Sleeper, id: u64, delay_ms: u32, fade_ms: u32) {
    sleeper.sleep(delay_ms).await;
    hide_toast(queue, sleeper, id, fade_ms).await;
}

/// Close button
pub fn dismiss_toast(store: ToastStore, id: u64, fade_ms: u32) {
    spawn_local(async move {
        hide_toast(&store, &GlooSleeper, id, fade_ms).await;
    });
}

#[component]
pub fn ToastStack(store: ToastStore, fade_ms: u32) -> impl IntoView {
    view! {
        <For
            each=move || store.toasts().get()
            key=|toast| toast.id
            children=move |toast| view! { <ToastItem toast=toast store=store fade_ms=fade_ms /> }
        />
    }
}

#[component]
fn ToastItem(toast: Toast, store: ToastStore, fade_ms: u32) -> impl IntoView {
    let id = toast.id;
    let severity = toast.severity;
    let class = move || {
        let hiding = is_hiding(&store.toasts().read(), id);
        toast_class(severity, hiding)
    };

    view! {
        <div
            class=class
            id=format!("toast-{}", id)
            role="alert"
            aria-live="assertive"
            aria-atomic="true"
        >
            <div class="d-flex">
                <div class="toast-body">{toast.message}</div>
                <button
                    type="button"
                    class="btn-close btn-close-white me-2 m-auto"
                    aria-label="Close"
                    on:click=move |_| dismiss_toast(store, id, fade_ms)
                ></button>
            </div>
        </div>
    }
}

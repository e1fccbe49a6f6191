//! UI Components
//!
//! Leptos components mounted into the host page.

mod toast_stack;

pub use toast_stack::{run_toast, GlooSleeper, Sleeper, ToastStack};

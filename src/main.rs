#![allow(warnings)]
//! Plan Sync Entry Point
//!
//! Keeps favorite/compare toggles and navbar badges in step with the server
//! on the server-rendered plans pages.

mod models;
mod error;
mod config;
mod cookies;
mod commands;
mod dom;
mod icons;
mod counters;
mod store;
mod components;
mod notify;
mod controls;
mod app;

#[cfg(test)]
mod testing;

use config::SyncConfig;
use log::warn;

fn main() {
    console_error_panic_hook::set_once();

    let config = SyncConfig::from_page();
    let level = config.as_ref().map(SyncConfig::log_level).unwrap_or(log::Level::Info);
    let _ = console_log::init_with_level(level);

    let config = config.unwrap_or_else(|e| {
        warn!("[CONFIG] {}; using defaults", e);
        SyncConfig::default()
    });
    app::start(config);
}

//! # catalog-client
//!
//! Leptos + WASM frontend for the Catalog user service.
//!
//! This crate contains the session manager, the authenticated request
//! pipeline, route guards, and the pages that sit behind them. Browser-only
//! pieces are gated on the `hydrate` feature so the same tree renders on the
//! server.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}

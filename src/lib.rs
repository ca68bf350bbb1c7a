//! OritechAI landing site
//!
//! A server-rendered Leptos marketing page: configurable sections, a timed
//! reveal for first-time visitors, scroll-tracked navigation and third-party
//! embeds (booking calendar, chat, 3D backdrop) that degrade to static
//! content when they fail to load.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}

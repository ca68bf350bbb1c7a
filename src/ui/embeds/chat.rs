//! Chat assistant bubble
//!
//! The bundle reads its settings from a window global, so the global is
//! written before the script is injected and deleted once the script element
//! is removed again. A bundle that was already on the page keeps its global.
//! A failed load leaves the page without the bubble; nothing else changes.

use leptos::prelude::*;

use crate::core::{ChatEmbed, EmbedKind, EmbedStatus, ErrorFilter};
use crate::ui::loader::{ScriptOptions, use_script};

#[cfg(not(feature = "ssr"))]
fn set_global(name: &str, config: &crate::core::ChatWidgetConfig) {
    let Some(window) = leptos::web_sys::window() else {
        return;
    };
    match serde_wasm_bindgen::to_value(config) {
        Ok(value) => {
            if js_sys::Reflect::set(&window, &name.into(), &value).is_err() {
                leptos::logging::warn!("Could not set window.{}", name);
            }
        }
        Err(e) => leptos::logging::error!("Could not serialize {}: {}", name, e),
    }
}

#[cfg(not(feature = "ssr"))]
fn delete_global(name: &str) {
    if let Some(window) = leptos::web_sys::window() {
        let _ = js_sys::Reflect::delete_property(&window, &name.into());
    }
}

#[component]
pub fn ChatWidget(embed: ChatEmbed) -> impl IntoView {
    let options = ScriptOptions::new()
        .with_error_filter(ErrorFilter::new(EmbedKind::Chat).ignore_cross_origin());

    #[cfg(not(feature = "ssr"))]
    let options = {
        let global = embed.global_name.clone();
        let teardown_global = global.clone();
        let config = embed.config.clone();
        options
            .on_inject(move || set_global(&global, &config))
            .on_teardown(move || delete_global(&teardown_global))
    };

    let state = use_script(embed.script(), options);
    let status = move || EmbedStatus::from(&state.get());

    view! {
        <div
            id=embed.container_id()
            data-status=move || status().as_str()
            style="width: 0; height: 0;"
        ></div>
    }
}

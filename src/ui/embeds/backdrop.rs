//! Page background: 3D scene, looping video, or a static gradient
//!
//! The server renders the video with its poster, which is also what most
//! browsers keep. After hydration the richest supported mode is chosen, and
//! any failure drops straight to the gradient.

use leptos::prelude::*;

use crate::core::{BackdropConfig, BackdropMode, EmbedKind, ErrorFilter};
use crate::ui::loader::{ScriptOptions, use_script};

#[cfg(not(feature = "ssr"))]
fn detect_capabilities() -> crate::core::Capabilities {
    use leptos::web_sys::{HtmlCanvasElement, HtmlMediaElement};
    use wasm_bindgen::JsCast;

    let Some(document) = leptos::web_sys::window().and_then(|w| w.document()) else {
        return crate::core::Capabilities::none();
    };

    let video = document
        .create_element("video")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok())
        .is_some_and(|media| !media.can_play_type("video/mp4").is_empty());
    let webgl = document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .and_then(|canvas| canvas.get_context("webgl").ok().flatten())
        .is_some();

    crate::core::Capabilities { webgl, video }
}

#[component]
pub fn Backdrop(config: BackdropConfig) -> impl IntoView {
    let initial = if config.video_src.is_empty() {
        BackdropMode::Gradient
    } else {
        BackdropMode::Video
    };
    let mode = RwSignal::new(initial);

    #[cfg(not(feature = "ssr"))]
    {
        let config = config.clone();
        Effect::new(move |_| {
            let caps = detect_capabilities();
            let chosen = config.mode(caps);
            leptos::logging::log!("Backdrop mode {:?} for {:?}", chosen, caps);
            mode.set(chosen);
        });
    }

    let degrade = move |failed: BackdropMode| {
        leptos::logging::warn!("Backdrop {:?} failed, switching to gradient", failed);
        mode.set(BackdropMode::Gradient);
    };

    view! {
        <div class="backdrop" aria-hidden="true">
            {move || match mode.get() {
                BackdropMode::Scene => {
                                        view! {
                        <SceneLayer
                            config=config.clone()
                            on_failed=Callback::new(move |_| degrade(BackdropMode::Scene))
                        />
                    }
                        .into_any()
                }
                BackdropMode::Video => {
                                        view! {
                        <VideoLayer
                            config=config.clone()
                            on_failed=Callback::new(move |_| degrade(BackdropMode::Video))
                        />
                    }
                        .into_any()
                }
                BackdropMode::Gradient => view! { <GradientLayer /> }.into_any(),
            }}
            <div class="video-overlay"></div>
        </div>
    }
}

#[component]
fn VideoLayer(config: BackdropConfig, on_failed: Callback<()>) -> impl IntoView {
    view! {
        <video
            class="video-background"
            autoplay=true
            loop=true
            playsinline=true
            prop:muted=true
            muted=true
            poster=config.poster.clone()
            aria-label=config.description.clone()
            on:error=move |_| on_failed.run(())
        >
            <source
                src=config.video_src.clone()
                type="video/mp4"
                on:error=move |_| on_failed.run(())
            />
            <img src=config.poster.clone() alt=config.description.clone() class="video-background object-cover" />
        </video>
    }
}

#[component]
fn SceneLayer(config: BackdropConfig, on_failed: Callback<()>) -> impl IntoView {
    let state = use_script(
        config.scene_script(),
        ScriptOptions::new().with_error_filter(ErrorFilter::new(EmbedKind::Backdrop)),
    );

    Effect::new(move |_| {
        if state.with(|s| s.is_failed()) {
            on_failed.run(());
        }
    });

    view! {
        <div class="backdrop-scene">
            <spline-viewer url=config.scene_url.clone().unwrap_or_default()></spline-viewer>
        </div>
    }
}

/// Static background, always available
#[component]
pub fn GradientLayer() -> impl IntoView {
    view! {
        <div class="backdrop-gradient">
            <div class="backdrop-gradient-fill"></div>
            <div class="backdrop-orb backdrop-orb-primary"></div>
            <div class="backdrop-orb backdrop-orb-secondary"></div>
        </div>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    #[test]
    fn test_server_render_uses_video_with_poster() {
        let config = BackdropConfig::default();
        let html = Owner::new().with(|| view! { <Backdrop config=config /> }.to_html());

        assert!(html.contains("<video"));
        assert!(html.contains(r#"poster="/video-fallback.jpg""#));
        assert!(html.contains("Robot Website.mp4"));
        assert!(!html.contains("backdrop-gradient"));
    }

    #[test]
    fn test_without_video_renders_gradient() {
        let config = BackdropConfig {
            video_src: String::new(),
            ..BackdropConfig::default()
        };
        let html = Owner::new().with(|| view! { <Backdrop config=config /> }.to_html());

        assert!(html.contains("backdrop-gradient"));
        assert!(!html.contains("<video"));
    }
}

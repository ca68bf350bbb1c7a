use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::SiteConfig;
use crate::ui::pages::{LandingPage, NotFoundPage};
use crate::ui::provide_theme_context;

/// Element carrying the server's site config to the client
pub const SITE_CONFIG_ELEMENT_ID: &str = "site-config";

/// Site config as JSON that cannot terminate its `<script>` element
pub fn embedded_site_json(site: &SiteConfig) -> String {
    match site.to_json() {
        Ok(json) => json.replace("</", "<\\/"),
        Err(e) => {
            leptos::logging::error!("Could not serialize site config: {}", e);
            String::from("{}")
        }
    }
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    let site = use_context::<SiteConfig>().unwrap_or_default();
    let site_json = embedded_site_json(&site);

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
                <script id=SITE_CONFIG_ELEMENT_ID type="application/json" inner_html=site_json></script>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
fn read_embedded_site() -> Option<SiteConfig> {
    let element = leptos::web_sys::window()?
        .document()?
        .get_element_by_id(SITE_CONFIG_ELEMENT_ID)?;
    let json = element.text_content()?;
    match SiteConfig::from_json(&json) {
        Ok(site) => Some(site),
        Err(e) => {
            leptos::logging::warn!("Embedded site config rejected, using defaults: {}", e);
            None
        }
    }
}

fn resolve_site() -> SiteConfig {
    if let Some(site) = use_context::<SiteConfig>() {
        return site;
    }
    #[cfg(not(feature = "ssr"))]
    {
        if let Some(site) = read_embedded_site() {
            return site;
        }
    }
    SiteConfig::default()
}

/// Log promise rejections nobody handled instead of letting them surface
#[cfg(not(feature = "ssr"))]
fn catch_unhandled_rejections() {
    let handle = window_event_listener_untyped("unhandledrejection", |ev| {
        let reason = js_sys::Reflect::get(&ev, &"reason".into()).unwrap_or_default();
        leptos::logging::error!("Unhandled promise rejection: {:?}", reason);
        ev.prevent_default();
    });
    on_cleanup(move || handle.remove());
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let site = resolve_site();
    let theme = provide_theme_context(site.theme.clone());
    provide_context(site);

    #[cfg(not(feature = "ssr"))]
    catch_unhandled_rejections();

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/oritech-site.css"/>

        <div class="site-root" style=move || theme.style.get()>
            <Router>
                <Routes fallback=NotFoundPage>
                    <Route path=path!("/") view=LandingPage />
                </Routes>
            </Router>
        </div>
    }
}

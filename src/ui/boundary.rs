//! Per-region error containment
//!
//! A region that throws while rendering is replaced by a small notice with a
//! retry button; the rest of the page keeps working.

use leptos::logging::error;
use leptos::prelude::*;

use crate::ui::icon::{Icon, icons};

#[component]
pub fn RegionBoundary(
    /// Region name used in diagnostics
    #[prop(into)]
    region: String,
    children: ChildrenFn,
) -> impl IntoView {
    let attempt = RwSignal::new(0u32);

    let fallback = move |errors: ArcRwSignal<Errors>| {
        errors.with(|errors| {
            for (_, e) in errors.iter() {
                error!("Region {} failed to render: {}", region, e);
            }
        });

        let on_retry = Callback::new(move |_| {
            errors.set(Errors::default());
            attempt.update(|n| *n += 1);
        });
        view! { <RegionFallback on_retry=on_retry /> }
    };

    view! {
        <ErrorBoundary fallback=fallback>
            {
                let children = children.clone();
                move || {
                    attempt.track();
                    children()
                }
            }
        </ErrorBoundary>
    }
}

/// Notice shown in place of a failed region
#[component]
pub fn RegionFallback(on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="region-error flex flex-col items-center justify-center p-8 text-center" role="alert">
            <Icon name=icons::ALERT_CIRCLE class="w-8 h-8 mb-4" />
            <h3 class="text-xl font-bold mb-2">"Something went wrong"</h3>
            <p class="mb-6">"This part of the page could not be displayed."</p>
            <button class="btn-primary" on:click=move |_| on_retry.run(())>
                "Try again"
            </button>
        </div>
    }
}

//! Inline booking calendar with contact fallback

use leptos::prelude::*;

use crate::core::{
    Contact, EmbedKind, EmbedStatus, ErrorFilter, SchedulingEmbed, booking_status,
};
use crate::ui::icon::{Icon, icons};
use crate::ui::loader::{ScriptOptions, use_script};
use crate::ui::spinner::{Spinner, SpinnerSize};

#[component]
pub fn BookingEmbed(embed: SchedulingEmbed, contact: Contact) -> impl IntoView {
    let script = use_script(
        embed.script(),
        ScriptOptions::new()
            .with_error_filter(ErrorFilter::new(EmbedKind::Scheduling).ignore_cross_origin()),
    );
    let frame_loaded = RwSignal::new(false);
    let timed_out = RwSignal::new(false);
    // The iframe is only created in the browser so its load event is never missed
    let mounted = RwSignal::new(false);

    #[cfg(not(feature = "ssr"))]
    {
        use gloo_timers::callback::Timeout;

        use crate::core::BOOKING_LOAD_TIMEOUT_MS;

        let guard = StoredValue::new_local(None::<Timeout>);
        Effect::new(move |_| {
            mounted.set(true);
            let timeout = Timeout::new(BOOKING_LOAD_TIMEOUT_MS, move || {
                if !frame_loaded.get_untracked() {
                    leptos::logging::warn!("Booking calendar did not load, showing fallback");
                }
                let _ = timed_out.try_set(true);
            });
            guard.set_value(Some(timeout));
        });
        on_cleanup(move || {
            guard.try_update_value(|timeout| timeout.take());
        });
    }

    let status = Memo::new(move |_| {
        script.with(|state| booking_status(state, frame_loaded.get(), timed_out.get()))
    });

    let src = embed.inline_url();
    let public_url = embed.public_url();
    let height = embed.height_px;
    let title = embed.title.clone();

    view! {
        <div class="booking-embed" data-status=move || status.get().as_str()>
            <Show
                when=move || status.get() != EmbedStatus::Fallback
                fallback=move || view! { <BookingFallback contact=contact.clone() /> }
            >
                {
                    let src = src.clone();
                    let title = title.clone();
                    view! {
                        <div
                            class="calendly-inline-widget rounded-xl overflow-hidden"
                            style=format!("min-height: {}px", height)
                        >
                            <Show when=move || status.get() == EmbedStatus::Pending>
                                <Spinner size=SpinnerSize::Large label="Loading calendar..." />
                            </Show>
                            <Show when=move || mounted.get()>
                                <iframe
                                    src=src.clone()
                                    width="100%"
                                    height=height.to_string()
                                    title=title.clone()
                                    class="rounded-xl"
                                    class:invisible=move || status.get() != EmbedStatus::Ready
                                    on:load=move |_| frame_loaded.set(true)
                                ></iframe>
                            </Show>
                        </div>
                    }
                }
            </Show>

            <div class="text-center mt-6">
                <p class="booking-backup-text">"Having trouble with the calendar?"</p>
                <a
                    href=public_url
                    target="_blank"
                    rel="noopener noreferrer"
                    class="btn-secondary inline-flex items-center"
                >
                    <Icon name=icons::EXTERNAL_LINK class="w-5 h-5 mr-2" />
                    "Open in new tab"
                </a>
            </div>
        </div>
    }
}

/// Shown in place of the calendar when it cannot load
#[component]
pub fn BookingFallback(contact: Contact) -> impl IntoView {
    let mailto = contact.mailto();
    let tel = contact.tel();

    view! {
        <div class="booking-fallback flex flex-col items-center justify-center p-8 text-center" role="alert">
            <h3 class="text-xl font-bold mb-4">"Booking Calendar"</h3>
            <p class="mb-6">
                "Our booking calendar is currently experiencing issues. Please contact us directly to schedule a consultation."
            </p>
            <p class="mb-4">"Can't see the calendar? Contact us directly:"</p>
            <div class="flex flex-wrap justify-center gap-4">
                <a href=mailto class="btn btn-gold inline-flex items-center">
                    <Icon name=icons::MAIL class="w-5 h-5 mr-2" />
                    {format!("Email: {}", contact.email)}
                </a>
                <a href=tel class="btn btn-secondary inline-flex items-center">
                    <Icon name=icons::PHONE class="w-5 h-5 mr-2" />
                    {format!("Phone: {}", contact.phone)}
                </a>
            </div>
        </div>
    }
}

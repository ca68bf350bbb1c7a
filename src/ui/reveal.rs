//! Timed reveal of the navigation bar and page content
//!
//! The server always renders both hidden. After hydration the visit check
//! runs once: returning visitors see everything at once, others get the
//! timed intro.

use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use crate::core::{RevealState, RevealStep};

/// Reveal state shared by the navigation and the page body
#[derive(Clone, Copy)]
pub struct RevealContext {
    pub nav_visible: RwSignal<bool>,
    pub content_visible: RwSignal<bool>,
}

impl RevealContext {
    fn new() -> Self {
        Self {
            nav_visible: RwSignal::new(false),
            content_visible: RwSignal::new(false),
        }
    }

    #[cfg(not(feature = "ssr"))]
    fn apply(&self, state: RevealState) {
        self.nav_visible.set(state.nav_visible);
        self.content_visible.set(state.content_visible);
    }

    #[cfg(not(feature = "ssr"))]
    fn reveal(&self, step: RevealStep) {
        match step {
            RevealStep::Navigation => self.nav_visible.set(true),
            RevealStep::Content => self.content_visible.set(true),
        }
    }
}

#[cfg(not(feature = "ssr"))]
fn check_visit() -> crate::core::VisitDecision {
    use crate::core::{MemoryStore, VisitTimer, now_ms};
    use crate::ui::storage::LocalStorage;
    use leptos::logging::warn;

    match LocalStorage::open() {
        Ok(storage) => VisitTimer::new(storage).check(now_ms()),
        Err(e) => {
            warn!("Visit history unavailable: {}", e);
            VisitTimer::new(MemoryStore::new()).check(now_ms())
        }
    }
}

/// Run the visit check and schedule the reveal timers
///
/// Pending timers are cancelled when the owner is cleaned up.
pub fn start_reveal() -> RevealContext {
    let ctx = RevealContext::new();

    #[cfg(not(feature = "ssr"))]
    {
        use gloo_timers::callback::Timeout;

        let timers = StoredValue::new_local(Vec::<Timeout>::new());

        Effect::new(move |_| {
            let decision = check_visit();
            ctx.apply(RevealState::initial(&decision));

            let pending = decision
                .pending_steps()
                .into_iter()
                .map(|(step, delay)| {
                    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
                    Timeout::new(millis, move || ctx.reveal(step))
                })
                .collect();
            timers.set_value(pending);
        });

        // Dropping a Timeout cancels it
        on_cleanup(move || {
            timers.try_update_value(|pending| pending.clear());
        });
    }

    ctx
}

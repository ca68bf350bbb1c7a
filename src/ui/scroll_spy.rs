//! Scroll tracking for the navigation bar
//!
//! Section positions are measured from the live layout on every recompute,
//! so content that changes height (the booking iframe, the reveal) never
//! leaves stale bounds behind.

use leptos::prelude::*;

use crate::core::DEFAULT_HEADER_OFFSET;

#[derive(Clone, Copy)]
pub struct ScrollSpyContext {
    /// Section currently under the header line
    pub active: RwSignal<Option<String>>,
    /// Page scrolled past the point where the header turns solid
    pub scrolled: RwSignal<bool>,
    header_offset: f64,
}

impl ScrollSpyContext {
    pub fn is_active(&self, id: &str) -> bool {
        self.active.with(|active| active.as_deref() == Some(id))
    }

    /// Smooth-scroll so the section starts just below the fixed header
    pub fn scroll_to(&self, id: &str) {
        #[cfg(not(feature = "ssr"))]
        {
            use leptos::web_sys::{ScrollBehavior, ScrollToOptions};

            let Some(window) = leptos::web_sys::window() else {
                return;
            };
            let Some(top) = document_top(id) else {
                leptos::logging::warn!("Cannot scroll to missing section #{}", id);
                return;
            };

            let options = ScrollToOptions::new();
            options.set_top((top - self.header_offset).max(0.0));
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
        #[cfg(feature = "ssr")]
        {
            let _ = (id, self.header_offset);
        }
    }
}

fn window_scroll_y() -> f64 {
    #[cfg(not(feature = "ssr"))]
    {
        leptos::web_sys::window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0)
    }
    #[cfg(feature = "ssr")]
    {
        0.0
    }
}

/// Top of an element relative to the document
#[cfg(not(feature = "ssr"))]
fn document_top(id: &str) -> Option<f64> {
    let document = leptos::web_sys::window()?.document()?;
    let element = document.get_element_by_id(id)?;
    Some(element.get_bounding_client_rect().top() + window_scroll_y())
}

#[cfg(not(feature = "ssr"))]
fn measure(ids: &[String]) -> Vec<crate::core::SectionBounds> {
    let Some(document) = leptos::web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let scroll_y = window_scroll_y();

    ids.iter()
        .filter_map(|id| {
            let rect = document.get_element_by_id(id)?.get_bounding_client_rect();
            Some(crate::core::SectionBounds::new(
                id.clone(),
                rect.top() + scroll_y,
                rect.height(),
            ))
        })
        .collect()
}

/// Track the active section among `ids` and provide the result as context
///
/// Scroll events are coalesced to one recompute per animation frame. The
/// listener and any pending frame are released on cleanup.
pub fn use_scroll_spy(ids: Vec<String>) -> ScrollSpyContext {
    let ctx = ScrollSpyContext {
        active: RwSignal::new(ids.first().cloned()),
        scrolled: RwSignal::new(false),
        header_offset: DEFAULT_HEADER_OFFSET,
    };

    #[cfg(not(feature = "ssr"))]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        use crate::core::{FrameGate, ScrollSpy, is_scrolled};

        let spy = Rc::new(RefCell::new(
            ScrollSpy::new(ids).with_header_offset(ctx.header_offset),
        ));
        let gate = Rc::new(RefCell::new(FrameGate::new()));
        let frame = StoredValue::new(None::<AnimationFrameRequestHandle>);

        let recompute = Rc::new(move || {
            let scroll_y = window_scroll_y();
            ctx.scrolled.set(is_scrolled(scroll_y));

            let sections = measure(spy.borrow().ids());
            let mut spy = spy.borrow_mut();
            if spy.update(scroll_y, &sections) {
                ctx.active.set(spy.active().map(str::to_string));
            }
        });

        let on_scroll = {
            let recompute = recompute.clone();
            move |_| {
                if !gate.borrow_mut().request() {
                    return;
                }
                let frame_gate = gate.clone();
                let recompute = recompute.clone();
                let scheduled = request_animation_frame_with_handle(move || {
                    frame_gate.borrow_mut().begin_frame();
                    recompute();
                });
                match scheduled {
                    Ok(handle) => frame.set_value(Some(handle)),
                    Err(_) => gate.borrow_mut().cancel(),
                }
            }
        };

        let handle_scroll = window_event_listener(leptos::ev::scroll, on_scroll);

        // Initial position, e.g. after a reload halfway down the page
        Effect::new(move |_| recompute());

        on_cleanup(move || {
            handle_scroll.remove();
            if let Some(Some(pending)) = frame.try_get_value() {
                pending.cancel();
            }
        });
    }
    #[cfg(feature = "ssr")]
    {
        let _ = ids;
    }

    provide_context(ctx);
    ctx
}

pub fn use_scroll_spy_context() -> ScrollSpyContext {
    use_context::<ScrollSpyContext>().expect("ScrollSpyContext should be provided")
}

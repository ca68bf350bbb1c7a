//! Third-party script loading for embed regions
//!
//! [`use_script`] injects a script once per page through a shared
//! [`ScriptRegistry`](crate::core::ScriptRegistry), drives a
//! [`ResourceLoader`](crate::core::ResourceLoader) from the element's `load`
//! and `error` events and exposes its state as a signal. Everything it set up
//! is undone when the owning component is cleaned up.

use leptos::prelude::*;

use crate::core::{ErrorFilter, LoadState, ScriptSpec};

/// Extra behaviour around a script mount
#[derive(Default)]
pub struct ScriptOptions {
    error_filter: Option<ErrorFilter>,
    on_inject: Option<Box<dyn FnOnce()>>,
    on_teardown: Option<Box<dyn FnOnce()>>,
}

impl ScriptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the loader when a global `error` event matches the filter
    pub fn with_error_filter(mut self, filter: ErrorFilter) -> Self {
        self.error_filter = Some(filter);
        self
    }

    /// Runs right before the script is injected
    pub fn on_inject(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_inject = Some(Box::new(f));
        self
    }

    /// Runs after the script element was removed from the page, i.e. when
    /// the last region using it unmounts
    pub fn on_teardown(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_teardown = Some(Box::new(f));
        self
    }
}

/// Load a script and follow its state
///
/// On the server the state stays [`LoadState::Unloaded`].
pub fn use_script(spec: ScriptSpec, options: ScriptOptions) -> ReadSignal<LoadState> {
    let state = RwSignal::new(LoadState::Unloaded);

    #[cfg(not(feature = "ssr"))]
    {
        let mount = StoredValue::new_local(None::<browser::ScriptMount>);
        let mut pending = Some((spec, options));

        // Runs after hydration, so the body is no longer being walked
        Effect::new(move |_| {
            let Some((spec, options)) = pending.take() else {
                return;
            };
            match browser::ScriptMount::start(spec, options, state) {
                Ok(started) => mount.set_value(Some(started)),
                Err(e) => {
                    leptos::logging::error!("{}", e);
                    state.set(LoadState::Failed(e.to_string()));
                }
            }
        });

        on_cleanup(move || {
            if let Some(Some(started)) = mount.try_update_value(Option::take) {
                started.teardown();
            }
        });
    }
    #[cfg(feature = "ssr")]
    {
        let _ = (spec, options);
    }

    state.read_only()
}

#[cfg(not(feature = "ssr"))]
pub use browser::DocumentHost;

#[cfg(not(feature = "ssr"))]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use leptos::logging::{log, warn};
    use leptos::prelude::*;
    use leptos::web_sys::{self, Element, ErrorEvent, HtmlScriptElement};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use super::ScriptOptions;
    use crate::core::{
        EmbedError, LoadState, MountOutcome, ResourceLoader, ScriptHost, ScriptRegistry,
        ScriptSpec, UnmountOutcome,
    };

    /// Attribute recording the outcome on the element, for later mounts
    const STATE_ATTR: &str = "data-load-state";

    thread_local! {
        static REGISTRY: RefCell<ScriptRegistry> = RefCell::new(ScriptRegistry::new());
    }

    fn js_reason(value: &wasm_bindgen::JsValue) -> String {
        value.as_string().unwrap_or_else(|| format!("{value:?}"))
    }

    /// [`ScriptHost`] over the live document; scripts go at the end of `<body>`
    pub struct DocumentHost {
        document: web_sys::Document,
    }

    impl DocumentHost {
        pub fn new(embed: &str) -> Result<Self, EmbedError> {
            web_sys::window()
                .and_then(|w| w.document())
                .map(|document| Self { document })
                .ok_or_else(|| EmbedError::Unsupported {
                    embed: embed.to_string(),
                    missing: "document".to_string(),
                })
        }

        pub fn script(&self, id: &str) -> Option<HtmlScriptElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
        }
    }

    impl ScriptHost for DocumentHost {
        fn has_script(&self, id: &str) -> bool {
            self.document.get_element_by_id(id).is_some()
        }

        fn insert_script(&self, spec: &ScriptSpec) -> Result<(), EmbedError> {
            let injection_error = |reason: String| EmbedError::ScriptInjection {
                id: spec.id.clone(),
                reason,
            };

            let script = self
                .document
                .create_element("script")
                .map_err(|e| injection_error(js_reason(&e)))?
                .dyn_into::<HtmlScriptElement>()
                .map_err(|_| injection_error("not a script element".to_string()))?;
            script.set_id(&spec.id);
            script.set_src(&spec.src);
            script.set_async(spec.is_async);
            script.set_defer(spec.defer);

            let body = self
                .document
                .body()
                .ok_or_else(|| injection_error("document has no body".to_string()))?;
            body.append_child(&script)
                .map_err(|e| injection_error(js_reason(&e)))?;
            Ok(())
        }

        fn remove_script(&self, id: &str) -> bool {
            match self.document.get_element_by_id(id) {
                Some(element) => {
                    element.remove();
                    true
                }
                None => false,
            }
        }
    }

    type Listener = Closure<dyn FnMut(web_sys::Event)>;

    /// Everything one `use_script` call set up
    pub struct ScriptMount {
        id: String,
        loader: Rc<RefCell<ResourceLoader>>,
        element: Option<HtmlScriptElement>,
        on_load: Listener,
        on_error: Listener,
        error_listener: Option<WindowListenerHandle>,
        on_teardown: Option<Box<dyn FnOnce()>>,
    }

    impl ScriptMount {
        pub fn start(
            spec: ScriptSpec,
            options: ScriptOptions,
            state: RwSignal<LoadState>,
        ) -> Result<Self, EmbedError> {
            let loader = Rc::new(RefCell::new(ResourceLoader::new()));
            loader
                .borrow_mut()
                .subscribe(move |next| {
                    let _ = state.try_set(next.clone());
                });

            let host = DocumentHost::new(&spec.id)?;
            if let Some(prepare) = options.on_inject {
                prepare();
            }
            let outcome = REGISTRY.with(|registry| registry.borrow_mut().mount(&host, &spec))?;
            log!("Script {} mounted ({:?})", spec.id, outcome);
            loader.borrow_mut().begin();

            let element = host.script(&spec.id);
            if outcome == MountOutcome::AlreadyPresent {
                // The shared element may have settled before this mount
                match element
                    .as_ref()
                    .and_then(|el| el.get_attribute(STATE_ATTR))
                    .as_deref()
                {
                    Some("loaded") => {
                        loader.borrow_mut().succeed();
                    }
                    Some("failed") => {
                        loader.borrow_mut().fail("script failed to load");
                    }
                    _ => {}
                }
            }

            let on_load: Listener = {
                let loader = loader.clone();
                let element = element.clone();
                Closure::new(move |_: web_sys::Event| {
                    if let Some(el) = &element {
                        let _ = el.set_attribute(STATE_ATTR, "loaded");
                    }
                    loader.borrow_mut().succeed();
                })
            };
            let on_error: Listener = {
                let loader = loader.clone();
                let element = element.clone();
                let id = spec.id.clone();
                Closure::new(move |_: web_sys::Event| {
                    if let Some(el) = &element {
                        let _ = el.set_attribute(STATE_ATTR, "failed");
                    }
                    let err = EmbedError::LoadFailed {
                        embed: id.clone(),
                        reason: "script failed to load".to_string(),
                    };
                    if loader.borrow_mut().fail(err.to_string()) {
                        warn!("{}, showing fallback", err);
                    }
                })
            };
            if let Some(el) = &element {
                let _ = el
                    .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
                let _ = el
                    .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
            }

            let error_listener = options.error_filter.map(|filter| {
                let loader = loader.clone();
                window_event_listener_untyped("error", move |ev: web_sys::Event| {
                    let Some(ev) = ev.dyn_ref::<ErrorEvent>() else {
                        return;
                    };
                    let target_id = ev
                        .target()
                        .and_then(|t| t.dyn_into::<Element>().ok())
                        .map(|el| el.id());
                    let message = ev.message();
                    if filter.matches(&message, target_id.as_deref())
                        || filter.matches(&ev.filename(), None)
                    {
                        ev.prevent_default();
                        let err = EmbedError::LoadFailed {
                            embed: filter.kind().as_str().to_string(),
                            reason: message,
                        };
                        if loader.borrow_mut().fail(err.to_string()) {
                            warn!("{}", err);
                        }
                    }
                })
            });

            Ok(Self {
                id: spec.id,
                loader,
                element,
                on_load,
                on_error,
                error_listener,
                on_teardown: options.on_teardown,
            })
        }

        pub fn teardown(self) {
            if let Some(el) = &self.element {
                let _ = el.remove_event_listener_with_callback(
                    "load",
                    self.on_load.as_ref().unchecked_ref(),
                );
                let _ = el.remove_event_listener_with_callback(
                    "error",
                    self.on_error.as_ref().unchecked_ref(),
                );
            }
            if let Some(handle) = self.error_listener {
                handle.remove();
            }

            let outcome = DocumentHost::new(&self.id).ok().map(|host| {
                REGISTRY.with(|registry| registry.borrow_mut().unmount(&host, &self.id))
            });
            log!("Script {} released ({:?})", self.id, outcome);
            self.loader.borrow_mut().reset();

            if outcome.is_some_and(UnmountOutcome::element_removed) {
                if let Some(cleanup) = self.on_teardown {
                    cleanup();
                }
            }
        }
    }
}

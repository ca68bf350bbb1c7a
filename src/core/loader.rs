//! Third-party resource loading
//!
//! [`ResourceLoader`] is the state machine behind every embed:
//!
//! ```text
//! Unloaded --begin--> Loading --succeed--> Loaded
//!     |                  |                   |
//!     +------fail--------+-------fail--------+--> Failed
//! ```
//!
//! `Failed` is terminal until [`ResourceLoader::reset`]; a failed embed shows
//! its fallback once and is not retried.
//!
//! [`ScriptRegistry`] makes script injection idempotent: a script with a given
//! element id is inserted at most once no matter how many regions mount it,
//! and it is removed when the last of them unmounts.

use std::collections::HashMap;
use std::fmt;

use super::error::EmbedError;

/// Lifecycle of an external resource
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Unloaded => "unloaded",
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
            LoadState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Failed(reason) => write!(f, "failed ({reason})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Handle returned by [`ResourceLoader::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&LoadState)>;

/// State machine with a single subscription point for state changes
#[derive(Default)]
pub struct ResourceLoader {
    state: LoadState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl fmt::Debug for ResourceLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceLoader")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Register a callback invoked after every state change
    pub fn subscribe(&mut self, listener: impl Fn(&LoadState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// `Unloaded -> Loading`
    pub fn begin(&mut self) -> bool {
        match self.state {
            LoadState::Unloaded => self.transition(LoadState::Loading),
            _ => false,
        }
    }

    /// `Loading -> Loaded`
    pub fn succeed(&mut self) -> bool {
        match self.state {
            LoadState::Loading => self.transition(LoadState::Loaded),
            _ => false,
        }
    }

    /// Any non-failed state `-> Failed`
    ///
    /// Failing after `Loaded` covers runtime errors thrown by a script that
    /// loaded fine. A second failure is ignored.
    pub fn fail(&mut self, reason: impl Into<String>) -> bool {
        match self.state {
            LoadState::Failed(_) => false,
            _ => self.transition(LoadState::Failed(reason.into())),
        }
    }

    /// Back to `Unloaded`, used on teardown so a remount starts clean
    pub fn reset(&mut self) -> bool {
        match self.state {
            LoadState::Unloaded => false,
            _ => self.transition(LoadState::Unloaded),
        }
    }

    fn transition(&mut self, next: LoadState) -> bool {
        self.state = next;
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
        true
    }
}

/// Script element to inject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSpec {
    /// Stable element id used for de-duplication
    pub id: String,
    pub src: String,
    pub is_async: bool,
    pub defer: bool,
}

impl ScriptSpec {
    pub fn new(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            is_async: true,
            defer: false,
        }
    }

    pub fn deferred(mut self) -> Self {
        self.defer = true;
        self
    }
}

/// The document the scripts are inserted into
pub trait ScriptHost {
    fn has_script(&self, id: &str) -> bool;

    fn insert_script(&self, spec: &ScriptSpec) -> Result<(), EmbedError>;

    /// Remove the element with this id. Returns `false` if none existed.
    fn remove_script(&self, id: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// This mount inserted the script element
    Injected,
    /// The element was already on the page; nothing was inserted
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmountOutcome {
    /// Last owner left, the element was removed
    Removed,
    /// Other regions still use the script
    Retained,
    /// Last owner left; the element was already there before the first
    /// mount, so it stays
    Released,
    /// The id was never mounted through this registry
    NotMounted,
}

#[derive(Debug)]
struct Mounted {
    count: usize,
    /// The element was inserted by this registry and may be removed by it
    injected: bool,
}

impl UnmountOutcome {
    /// The element is gone, so state the script depended on can go too
    pub fn element_removed(self) -> bool {
        self == UnmountOutcome::Removed
    }
}

/// Reference-counted script ownership per element id
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    owners: HashMap<String, Mounted>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(
        &mut self,
        host: &dyn ScriptHost,
        spec: &ScriptSpec,
    ) -> Result<MountOutcome, EmbedError> {
        if let Some(mounted) = self.owners.get_mut(&spec.id) {
            mounted.count += 1;
            return Ok(MountOutcome::AlreadyPresent);
        }

        let outcome = if host.has_script(&spec.id) {
            MountOutcome::AlreadyPresent
        } else {
            host.insert_script(spec)?;
            MountOutcome::Injected
        };
        self.owners.insert(
            spec.id.clone(),
            Mounted {
                count: 1,
                injected: outcome == MountOutcome::Injected,
            },
        );
        Ok(outcome)
    }

    pub fn unmount(&mut self, host: &dyn ScriptHost, id: &str) -> UnmountOutcome {
        let Some(mounted) = self.owners.get_mut(id) else {
            return UnmountOutcome::NotMounted;
        };

        mounted.count -= 1;
        if mounted.count > 0 {
            return UnmountOutcome::Retained;
        }

        let injected = mounted.injected;
        self.owners.remove(id);
        if !injected {
            return UnmountOutcome::Released;
        }
        host.remove_script(id);
        UnmountOutcome::Removed
    }

    pub fn owners(&self, id: &str) -> usize {
        self.owners.get(id).map_or(0, |mounted| mounted.count)
    }
}

/// In-memory [`ScriptHost`] recording every insertion
#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub scripts: RefCell<Vec<ScriptSpec>>,
        pub inserts: Cell<usize>,
        pub reject: Cell<bool>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn ids(&self) -> Vec<String> {
            self.scripts.borrow().iter().map(|s| s.id.clone()).collect()
        }
    }

    impl ScriptHost for RecordingHost {
        fn has_script(&self, id: &str) -> bool {
            self.scripts.borrow().iter().any(|s| s.id == id)
        }

        fn insert_script(&self, spec: &ScriptSpec) -> Result<(), EmbedError> {
            if self.reject.get() {
                return Err(EmbedError::ScriptInjection {
                    id: spec.id.clone(),
                    reason: "document has no body".to_string(),
                });
            }
            self.inserts.set(self.inserts.get() + 1);
            self.scripts.borrow_mut().push(spec.clone());
            Ok(())
        }

        fn remove_script(&self, id: &str) -> bool {
            let mut scripts = self.scripts.borrow_mut();
            let before = scripts.len();
            scripts.retain(|s| s.id != id);
            scripts.len() != before
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::testing::RecordingHost;
    use super::*;

    #[test]
    fn test_loader_happy_path() {
        let mut loader = ResourceLoader::new();
        assert_eq!(loader.state(), &LoadState::Unloaded);

        assert!(loader.begin());
        assert_eq!(loader.state(), &LoadState::Loading);
        assert!(loader.succeed());
        assert_eq!(loader.state(), &LoadState::Loaded);
        assert!(loader.state().is_settled());
    }

    #[test]
    fn test_loader_rejects_illegal_transitions() {
        let mut loader = ResourceLoader::new();
        assert!(!loader.succeed());
        assert!(!loader.reset());

        loader.begin();
        assert!(!loader.begin());

        loader.fail("404");
        assert!(!loader.fail("again"));
        assert!(!loader.succeed());
        assert!(!loader.begin());
        assert_eq!(loader.state(), &LoadState::Failed("404".to_string()));
    }

    #[test]
    fn test_loader_can_fail_before_and_after_load() {
        let mut loader = ResourceLoader::new();
        assert!(loader.fail("no WebGL"));
        assert!(loader.state().is_failed());

        let mut loader = ResourceLoader::new();
        loader.begin();
        loader.succeed();
        assert!(loader.fail("Script error."));
        assert!(loader.state().is_failed());
    }

    #[test]
    fn test_reset_allows_a_fresh_attempt() {
        let mut loader = ResourceLoader::new();
        loader.begin();
        loader.fail("timeout");
        assert!(loader.reset());
        assert!(loader.begin());
    }

    #[test]
    fn test_subscribers_see_every_change_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut loader = ResourceLoader::new();

        let sink = seen.clone();
        loader.subscribe(move |state| sink.borrow_mut().push(state.as_str()));

        loader.begin();
        loader.succeed();
        loader.succeed(); // ignored, no notification
        loader.reset();

        assert_eq!(*seen.borrow(), vec!["loading", "loaded", "unloaded"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let count = Rc::new(RefCell::new(0));
        let mut loader = ResourceLoader::new();

        let sink = count.clone();
        let id = loader.subscribe(move |_| *sink.borrow_mut() += 1);
        loader.begin();
        assert!(loader.unsubscribe(id));
        assert!(!loader.unsubscribe(id));
        loader.succeed();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_load_state_display() {
        assert_eq!(LoadState::Loading.to_string(), "loading");
        assert_eq!(
            LoadState::Failed("blocked".to_string()).to_string(),
            "failed (blocked)"
        );
    }

    #[test]
    fn test_registry_injects_once() {
        let host = RecordingHost::new();
        let mut registry = ScriptRegistry::new();
        let spec = ScriptSpec::new("voiceglow-script", "https://cdn.example/vg.js");

        assert_eq!(registry.mount(&host, &spec).unwrap(), MountOutcome::Injected);
        assert_eq!(
            registry.mount(&host, &spec).unwrap(),
            MountOutcome::AlreadyPresent
        );
        assert_eq!(host.inserts.get(), 1);
        assert_eq!(registry.owners("voiceglow-script"), 2);
    }

    #[test]
    fn test_registry_removes_on_last_unmount() {
        let host = RecordingHost::new();
        let mut registry = ScriptRegistry::new();
        let spec = ScriptSpec::new("calendly-widget-script", "https://cdn.example/w.js");

        registry.mount(&host, &spec).unwrap();
        registry.mount(&host, &spec).unwrap();

        assert_eq!(
            registry.unmount(&host, "calendly-widget-script"),
            UnmountOutcome::Retained
        );
        assert!(host.has_script("calendly-widget-script"));

        assert_eq!(
            registry.unmount(&host, "calendly-widget-script"),
            UnmountOutcome::Removed
        );
        assert!(!host.has_script("calendly-widget-script"));
        assert_eq!(
            registry.unmount(&host, "calendly-widget-script"),
            UnmountOutcome::NotMounted
        );
    }

    #[test]
    fn test_remount_after_teardown_injects_again() {
        let host = RecordingHost::new();
        let mut registry = ScriptRegistry::new();
        let spec = ScriptSpec::new("s", "https://cdn.example/s.js");

        registry.mount(&host, &spec).unwrap();
        registry.unmount(&host, "s");
        registry.mount(&host, &spec).unwrap();

        assert_eq!(host.inserts.get(), 2);
        assert_eq!(host.ids(), vec!["s".to_string()]);
    }

    #[test]
    fn test_registry_leaves_existing_element() {
        let host = RecordingHost::new();
        host.scripts
            .borrow_mut()
            .push(ScriptSpec::new("s", "https://cdn.example/s.js"));
        let mut registry = ScriptRegistry::new();

        let outcome = registry
            .mount(&host, &ScriptSpec::new("s", "https://cdn.example/s.js"))
            .unwrap();
        assert_eq!(outcome, MountOutcome::AlreadyPresent);
        assert_eq!(host.inserts.get(), 0);

        // Not ours to remove
        let outcome = registry.unmount(&host, "s");
        assert_eq!(outcome, UnmountOutcome::Released);
        assert!(!outcome.element_removed());
        assert_eq!(host.ids(), vec!["s".to_string()]);
        assert_eq!(registry.owners("s"), 0);
    }

    #[test]
    fn test_existing_element_survives_shared_mounts() {
        let host = RecordingHost::new();
        host.scripts
            .borrow_mut()
            .push(ScriptSpec::new("s", "https://cdn.example/s.js"));
        let mut registry = ScriptRegistry::new();
        let spec = ScriptSpec::new("s", "https://cdn.example/s.js");

        registry.mount(&host, &spec).unwrap();
        registry.mount(&host, &spec).unwrap();

        assert!(!registry.unmount(&host, "s").element_removed());
        assert!(!registry.unmount(&host, "s").element_removed());
        assert!(host.has_script("s"));
        assert_eq!(host.inserts.get(), 0);
    }

    #[test]
    fn test_failed_injection_is_not_recorded() {
        let host = RecordingHost::new();
        host.reject.set(true);
        let mut registry = ScriptRegistry::new();
        let spec = ScriptSpec::new("s", "https://cdn.example/s.js");

        assert!(matches!(
            registry.mount(&host, &spec),
            Err(EmbedError::ScriptInjection { .. })
        ));
        assert_eq!(registry.owners("s"), 0);

        host.reject.set(false);
        assert_eq!(registry.mount(&host, &spec).unwrap(), MountOutcome::Injected);
    }

    #[test]
    fn test_script_spec_builders() {
        let spec = ScriptSpec::new("id", "src").deferred();
        assert!(spec.is_async);
        assert!(spec.defer);
    }
}

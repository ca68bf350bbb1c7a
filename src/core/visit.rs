//! Visit-aware intro gating
//!
//! On every page load the [`VisitTimer`] compares the current time with the
//! persisted last-visit timestamp:
//! - **Recent** (last seen less than an hour ago): navigation and content are
//!   shown immediately.
//! - **Fresh** (never seen, seen an hour or more ago, or the stored value is
//!   unreadable): the timed reveal plays, navigation first, then content.
//!
//! The stored timestamp is rewritten with the current time after every check,
//! so the one-hour window slides forward with each visit.

use std::time::Duration;

use leptos::logging::warn;

use super::storage::KeyValueStore;

/// Storage key holding the last visit in epoch milliseconds
pub const LAST_VISIT_KEY: &str = "lastVisit";

/// Visits closer together than this skip the intro (1 hour)
pub const RECENT_VISIT_THRESHOLD_MS: u64 = 3_600_000;

/// Delay before the navigation bar appears on a fresh visit
pub const NAV_REVEAL_DELAY_MS: u64 = 3_000;

/// Delay before the page body appears on a fresh visit
pub const CONTENT_REVEAL_DELAY_MS: u64 = 7_500;

/// Current wall-clock time in epoch milliseconds
pub fn now_ms() -> i64 {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as i64
    }
}

/// How the current page load relates to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitKind {
    /// First visit, a visit after a long gap, or unknown history
    Fresh,
    /// Returned within the threshold
    Recent,
}

/// A part of the page that is revealed on a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    Navigation,
    Content,
}

/// Outcome of a visit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitDecision {
    pub kind: VisitKind,
    /// Time since the previous visit, when a valid one was stored
    pub elapsed: Option<Duration>,
    pub nav_delay: Duration,
    pub content_delay: Duration,
}

impl VisitDecision {
    pub fn skip_intro(&self) -> bool {
        self.kind == VisitKind::Recent
    }

    /// Timers to schedule for this visit, empty when the intro is skipped
    pub fn pending_steps(&self) -> Vec<(RevealStep, Duration)> {
        if self.skip_intro() {
            return Vec::new();
        }
        vec![
            (RevealStep::Navigation, self.nav_delay),
            (RevealStep::Content, self.content_delay),
        ]
    }
}

/// Visibility of the timed parts of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealState {
    pub nav_visible: bool,
    pub content_visible: bool,
}

impl RevealState {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn visible() -> Self {
        Self {
            nav_visible: true,
            content_visible: true,
        }
    }

    /// Initial visibility for a decision, before any timer fires
    pub fn initial(decision: &VisitDecision) -> Self {
        if decision.skip_intro() {
            Self::visible()
        } else {
            Self::hidden()
        }
    }

    pub fn reveal(&mut self, step: RevealStep) {
        match step {
            RevealStep::Navigation => self.nav_visible = true,
            RevealStep::Content => self.content_visible = true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.nav_visible && self.content_visible
    }
}

/// Decides once per page load whether the intro plays
pub struct VisitTimer<S> {
    store: S,
    threshold: Duration,
    nav_delay: Duration,
    content_delay: Duration,
}

impl<S: KeyValueStore> VisitTimer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            threshold: Duration::from_millis(RECENT_VISIT_THRESHOLD_MS),
            nav_delay: Duration::from_millis(NAV_REVEAL_DELAY_MS),
            content_delay: Duration::from_millis(CONTENT_REVEAL_DELAY_MS),
        }
    }

    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_delays(mut self, nav_delay: Duration, content_delay: Duration) -> Self {
        self.nav_delay = nav_delay;
        self.content_delay = content_delay;
        self
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Last stored visit, or `None` when absent, unreadable or malformed
    pub fn last_visit(&self) -> Option<i64> {
        match self.store.get(LAST_VISIT_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<i64>() {
                Ok(ts) => Some(ts),
                Err(_) => {
                    warn!("Ignoring malformed {} value: {:?}", LAST_VISIT_KEY, raw);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read {}: {}", LAST_VISIT_KEY, e);
                None
            }
        }
    }

    /// Classify this visit and record it
    ///
    /// Never fails: storage problems fall back to a fresh visit.
    pub fn check(&self, now_ms: i64) -> VisitDecision {
        let previous = self.last_visit();
        let decision = self.classify(previous, now_ms);

        if let Err(e) = self.store.set(LAST_VISIT_KEY, &now_ms.to_string()) {
            warn!("Could not record visit: {}", e);
        }

        decision
    }

    fn classify(&self, previous: Option<i64>, now_ms: i64) -> VisitDecision {
        // A timestamp ahead of the clock is still closer than the threshold
        let gap_ms = previous.map(|ts| now_ms.saturating_sub(ts));
        let elapsed = gap_ms
            .filter(|ms| *ms >= 0)
            .map(|ms| Duration::from_millis(ms as u64));
        let threshold_ms = i64::try_from(self.threshold.as_millis()).unwrap_or(i64::MAX);

        match gap_ms {
            Some(gap) if gap < threshold_ms => VisitDecision {
                kind: VisitKind::Recent,
                elapsed,
                nav_delay: Duration::ZERO,
                content_delay: Duration::ZERO,
            },
            _ => VisitDecision {
                kind: VisitKind::Fresh,
                elapsed,
                nav_delay: self.nav_delay,
                content_delay: self.content_delay,
            },
        }
    }
}

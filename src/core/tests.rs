//! End-to-end scenarios across the core modules

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::loader::testing::RecordingHost;
use crate::core::{
    EmbedKind, EmbedStatus, ErrorFilter, LAST_VISIT_KEY, LoadState, MemoryStore, MountOutcome,
    RECENT_VISIT_THRESHOLD_MS, ResourceLoader, RevealState, RevealStep, ScriptRegistry,
    ScrollSpy, SectionBounds, SiteConfig, UnmountOutcome, VisitTimer,
};

const T1: i64 = 1_760_000_000_000;

/// Lay out the enabled sections of a config back to back
fn measure(site: &SiteConfig, height: f64) -> Vec<SectionBounds> {
    site.section_ids()
        .into_iter()
        .enumerate()
        .map(|(i, id)| SectionBounds::new(id, i as f64 * height, height))
        .collect()
}

/// Loader whose state changes are mirrored into a shared cell, the way the
/// UI mirrors them into a signal
fn observed_loader() -> (ResourceLoader, Rc<RefCell<Vec<LoadState>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut loader = ResourceLoader::new();
    let sink = seen.clone();
    loader.subscribe(move |state| sink.borrow_mut().push(state.clone()));
    (loader, seen)
}

#[test]
fn test_first_then_repeat_visit() {
    let store = Rc::new(MemoryStore::new());

    // First visit: full reveal, timestamp stored
    let first = VisitTimer::new(store.clone()).check(T1);
    let mut state = RevealState::initial(&first);
    assert_eq!(state, RevealState::hidden());
    for (step, _) in first.pending_steps() {
        state.reveal(step);
    }
    assert!(state.is_complete());
    assert_eq!(store.peek(LAST_VISIT_KEY), Some(T1.to_string()));

    // Reload ten minutes later: everything visible at once
    let t2 = T1 + 600_000;
    let second = VisitTimer::new(store.clone()).check(t2);
    assert_eq!(RevealState::initial(&second), RevealState::visible());
    assert_eq!(store.peek(LAST_VISIT_KEY), Some(t2.to_string()));

    // Back after more than an hour since the last visit
    let t3 = t2 + RECENT_VISIT_THRESHOLD_MS as i64;
    let third = VisitTimer::new(store.clone()).check(t3);
    assert!(!third.skip_intro());
    assert_eq!(
        third.pending_steps().first().map(|(step, _)| *step),
        Some(RevealStep::Navigation)
    );
}

#[test]
fn test_scroll_spy_follows_configured_sections() {
    let site = SiteConfig::default();
    let sections = measure(&site, 900.0);
    let mut spy = ScrollSpy::new(site.section_ids());

    assert_eq!(spy.active(), Some("hero"));

    // Inside the third section (services), probe = y + header offset
    assert!(spy.update(2.0 * 900.0 + 10.0 - spy.header_offset(), &sections));
    assert_eq!(spy.active(), Some("services"));
    let active: Vec<_> = site.section_ids().into_iter().filter(|id| spy.is_active(id)).collect();
    assert_eq!(active, vec!["services"]);

    // Exactly at the bottom edge of services the next section wins
    spy.update(3.0 * 900.0 - spy.header_offset(), &sections);
    assert_eq!(spy.active(), Some("why-us"));
}

#[test]
fn test_scroll_spy_skips_disabled_sections() {
    let mut site = SiteConfig::default();
    site.disable_section("problem");
    let sections = measure(&site, 900.0);
    let mut spy = ScrollSpy::new(site.section_ids());

    spy.update(900.0, &sections);
    assert_eq!(spy.active(), Some("services"));
}

#[test]
fn test_failed_embed_falls_back_without_affecting_siblings() {
    let site = SiteConfig::default();
    let chat = site.chat.clone().unwrap();
    let host = RecordingHost::new();
    let mut registry = ScriptRegistry::new();

    let (mut booking, booking_seen) = observed_loader();
    let (mut chat_loader, _) = observed_loader();

    assert_eq!(
        registry.mount(&host, &site.booking.script()).unwrap(),
        MountOutcome::Injected
    );
    assert_eq!(
        registry.mount(&host, &chat.script()).unwrap(),
        MountOutcome::Injected
    );
    booking.begin();
    chat_loader.begin();
    chat_loader.succeed();

    // The booking script reports an error instead of loading
    let filter = ErrorFilter::new(EmbedKind::Scheduling).ignore_cross_origin();
    let chat_filter = ErrorFilter::new(EmbedKind::Chat).ignore_cross_origin();
    let target = Some(EmbedKind::Scheduling.script_id());
    assert!(filter.matches("error", target));
    assert!(!chat_filter.matches("error", target));
    booking.fail("script error");

    assert_eq!(EmbedStatus::from(booking.state()), EmbedStatus::Fallback);
    assert_eq!(EmbedStatus::from(chat_loader.state()), EmbedStatus::Ready);
    assert_eq!(
        *booking_seen.borrow(),
        vec![
            LoadState::Loading,
            LoadState::Failed("script error".to_string())
        ]
    );

    // A late load event does not flip the fallback back
    assert!(!booking.succeed());
    assert_eq!(EmbedStatus::from(booking.state()), EmbedStatus::Fallback);

    // Sibling script is still on the page
    assert!(host.ids().contains(&chat.script().id));
}

#[test]
fn test_unmount_removes_injected_script() {
    let site = SiteConfig::default();
    let host = RecordingHost::new();
    let mut registry = ScriptRegistry::new();
    let spec = site.booking.script();

    // Two regions share the booking script
    registry.mount(&host, &spec).unwrap();
    assert_eq!(
        registry.mount(&host, &spec).unwrap(),
        MountOutcome::AlreadyPresent
    );
    assert_eq!(host.inserts.get(), 1);

    assert_eq!(registry.unmount(&host, &spec.id), UnmountOutcome::Retained);
    assert!(host.ids().contains(&spec.id));

    assert_eq!(registry.unmount(&host, &spec.id), UnmountOutcome::Removed);
    assert!(host.ids().is_empty());

    // Remount starts from scratch
    assert_eq!(
        registry.mount(&host, &spec).unwrap(),
        MountOutcome::Injected
    );
}

#[test]
fn test_site_config_drives_embed_urls() {
    let mut site = SiteConfig::default();
    site.booking.slug = "acme/intro".to_string();

    assert_eq!(
        site.booking.embed_url("acme.test"),
        "https://calendly.com/acme/intro?embed_domain=acme.test&embed_type=Inline"
    );
    site.validate().unwrap();
}

#[test]
fn test_preexisting_chat_bundle_is_left_on_page() {
    let site = SiteConfig::default();
    let spec = site.chat.as_ref().expect("chat enabled by default").script();
    let host = RecordingHost::new();
    // Added by something other than this page, e.g. a tag manager
    host.scripts.borrow_mut().push(spec.clone());
    let mut registry = ScriptRegistry::new();

    assert_eq!(
        registry.mount(&host, &spec).unwrap(),
        MountOutcome::AlreadyPresent
    );
    let outcome = registry.unmount(&host, &spec.id);

    assert_eq!(outcome, UnmountOutcome::Released);
    assert!(!outcome.element_removed());
    assert_eq!(host.ids(), vec![spec.id.clone()]);
    assert_eq!(host.inserts.get(), 0);
}

//! Scroll position tracking for navigation highlighting
//!
//! A section is active when `scroll_y + header_offset` falls inside
//! `[top, top + height)`. Sections are checked in document order and the
//! first match wins, so a probe sitting exactly on a boundary belongs to the
//! section below it.

/// Height compensated for the fixed header covering the top of the viewport
pub const DEFAULT_HEADER_OFFSET: f64 = 100.0;

/// Scroll distance after which the navigation bar turns solid
pub const SCROLLED_THRESHOLD: f64 = 50.0;

/// Whether the page has scrolled far enough to restyle the navigation bar
pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

/// Measured vertical extent of one page section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment test
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// What to do when the probe is outside every section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Above the first section selects the first; below the last selects
    /// the last. Gaps between sections keep the previous selection.
    #[default]
    Clamp,
    /// Keep the previous selection whenever nothing matches
    Hold,
}

/// Where a probe landed relative to the measured sections
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe<'a> {
    Inside(&'a str),
    Above,
    Below,
    Gap,
    /// No sections were measured
    Empty,
}

/// Locate a probe position among sections given in document order
pub fn probe<'a>(y: f64, sections: &'a [SectionBounds]) -> Probe<'a> {
    if let Some(hit) = sections.iter().find(|s| s.contains(y)) {
        return Probe::Inside(&hit.id);
    }

    let top = sections.iter().map(|s| s.top).reduce(f64::min);
    let bottom = sections.iter().map(SectionBounds::bottom).reduce(f64::max);

    match (top, bottom) {
        (Some(top), _) if y < top => Probe::Above,
        (_, Some(bottom)) if y >= bottom => Probe::Below,
        (Some(_), Some(_)) => Probe::Gap,
        _ => Probe::Empty,
    }
}

/// Tracks which section is currently in view
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    ids: Vec<String>,
    header_offset: f64,
    policy: EdgePolicy,
    active: Option<usize>,
}

impl ScrollSpy {
    /// Create a spy over the given section ids. The first id starts active.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let active = if ids.is_empty() { None } else { Some(0) };
        Self {
            ids,
            header_offset: DEFAULT_HEADER_OFFSET,
            policy: EdgePolicy::default(),
            active,
        }
    }

    pub fn with_header_offset(mut self, offset: f64) -> Self {
        self.header_offset = offset;
        self
    }

    pub fn with_edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn header_offset(&self) -> f64 {
        self.header_offset
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.ids[i].as_str())
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active() == Some(id)
    }

    /// Section that should be active at `scroll_y`, without updating state
    ///
    /// Measured sections whose id is unknown to the spy are ignored.
    pub fn locate(&self, scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
        let known: Vec<SectionBounds> = sections
            .iter()
            .filter(|s| self.index_of(&s.id).is_some())
            .cloned()
            .collect();

        let target = match (probe(scroll_y + self.header_offset, &known), self.policy) {
            (Probe::Inside(id), _) => self.index_of(id),
            (Probe::Above, EdgePolicy::Clamp) => known.first().and_then(|s| self.index_of(&s.id)),
            (Probe::Below, EdgePolicy::Clamp) => known.last().and_then(|s| self.index_of(&s.id)),
            _ => self.active,
        };

        target.map(|i| self.ids[i].as_str())
    }

    /// Recompute the active section. Returns `true` if it changed.
    pub fn update(&mut self, scroll_y: f64, sections: &[SectionBounds]) -> bool {
        let next = self
            .locate(scroll_y, sections)
            .and_then(|id| self.index_of(id));
        if next != self.active {
            self.active = next;
            true
        } else {
            false
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|known| known == id)
    }
}

/// Coalesces bursts of scroll events into one recomputation per frame
///
/// ```
/// # use oritech_site::core::FrameGate;
/// let mut gate = FrameGate::new();
/// assert!(gate.request());  // schedule a frame
/// assert!(!gate.request()); // already scheduled
/// gate.begin_frame();
/// assert!(gate.request());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a new event. Returns `true` when the caller must schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// Called at the start of the scheduled frame
    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    /// Drop a scheduled frame, e.g. on teardown
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 4] = ["hero", "services", "process", "booking"];

    /// Contiguous sections of 800px starting at 0
    fn layout() -> Vec<SectionBounds> {
        IDS.iter()
            .enumerate()
            .map(|(i, id)| SectionBounds::new(*id, i as f64 * 800.0, 800.0))
            .collect()
    }

    #[test]
    fn test_starts_on_first_section() {
        let spy = ScrollSpy::new(IDS);
        assert_eq!(spy.active(), Some("hero"));
        assert_eq!(spy.header_offset(), DEFAULT_HEADER_OFFSET);
    }

    #[test]
    fn test_empty_spy_has_no_active_section() {
        let mut spy = ScrollSpy::new(Vec::<String>::new());
        assert_eq!(spy.active(), None);
        assert!(!spy.update(500.0, &layout()));
        assert_eq!(spy.active(), None);
    }

    #[test]
    fn test_scroll_inside_each_section() {
        let sections = layout();
        let mut spy = ScrollSpy::new(IDS);

        for (k, id) in IDS.iter().enumerate() {
            // Middle of section k, accounting for the header offset
            let scroll_y = k as f64 * 800.0 + 400.0 - DEFAULT_HEADER_OFFSET;
            spy.update(scroll_y, &sections);
            assert_eq!(spy.active(), Some(*id));
            for other in IDS.iter().filter(|o| *o != id) {
                assert!(!spy.is_active(other));
            }
        }
    }

    #[test]
    fn test_lower_boundary_belongs_to_next_section() {
        let sections = layout();
        let mut spy = ScrollSpy::new(IDS).with_header_offset(0.0);

        spy.update(799.999, &sections);
        assert_eq!(spy.active(), Some("hero"));

        spy.update(800.0, &sections);
        assert_eq!(spy.active(), Some("services"));
    }

    #[test]
    fn test_header_offset_shifts_the_probe() {
        let sections = layout();
        let mut spy = ScrollSpy::new(IDS).with_header_offset(80.0);

        spy.update(719.0, &sections);
        assert_eq!(spy.active(), Some("hero"));
        spy.update(720.0, &sections);
        assert_eq!(spy.active(), Some("services"));
    }

    #[test]
    fn test_update_reports_changes_only() {
        let sections = layout();
        let mut spy = ScrollSpy::new(IDS);

        assert!(!spy.update(0.0, &sections));
        assert!(spy.update(900.0, &sections));
        assert!(!spy.update(950.0, &sections));
    }

    #[test]
    fn test_clamp_above_and_below() {
        // Page starts with a 300px banner that is not a tracked section
        let sections: Vec<SectionBounds> = IDS
            .iter()
            .enumerate()
            .map(|(i, id)| SectionBounds::new(*id, 300.0 + i as f64 * 500.0, 500.0))
            .collect();
        let mut spy = ScrollSpy::new(IDS).with_header_offset(0.0);

        spy.update(1_200.0, &sections);
        assert_eq!(spy.active(), Some("services"));

        spy.update(10.0, &sections);
        assert_eq!(spy.active(), Some("hero"));

        spy.update(10_000.0, &sections);
        assert_eq!(spy.active(), Some("booking"));
    }

    #[test]
    fn test_hold_keeps_previous_outside_sections() {
        let sections = vec![
            SectionBounds::new("services", 1_000.0, 500.0),
            SectionBounds::new("process", 1_500.0, 500.0),
        ];
        let mut spy = ScrollSpy::new(IDS)
            .with_header_offset(0.0)
            .with_edge_policy(EdgePolicy::Hold);

        spy.update(0.0, &sections);
        assert_eq!(spy.active(), Some("hero"));

        spy.update(1_600.0, &sections);
        assert_eq!(spy.active(), Some("process"));

        spy.update(5_000.0, &sections);
        assert_eq!(spy.active(), Some("process"));
    }

    #[test]
    fn test_gap_between_sections_holds() {
        let sections = vec![
            SectionBounds::new("hero", 0.0, 500.0),
            SectionBounds::new("services", 700.0, 500.0),
        ];
        let mut spy = ScrollSpy::new(IDS).with_header_offset(0.0);

        spy.update(100.0, &sections);
        spy.update(600.0, &sections);
        assert_eq!(spy.active(), Some("hero"));
        assert_eq!(probe(600.0, &sections), Probe::Gap);
    }

    #[test]
    fn test_unknown_sections_are_ignored() {
        let sections = vec![
            SectionBounds::new("banner", 0.0, 400.0),
            SectionBounds::new("services", 400.0, 400.0),
        ];
        let mut spy = ScrollSpy::new(IDS).with_header_offset(0.0);

        spy.update(500.0, &sections);
        assert_eq!(spy.active(), Some("services"));

        // Inside "banner", which is above every known section
        spy.update(100.0, &sections);
        assert_eq!(spy.active(), Some("services"));
    }

    #[test]
    fn test_missing_sections_do_not_break_lookup() {
        let mut sections = layout();
        sections.remove(1);
        let mut spy = ScrollSpy::new(IDS).with_header_offset(0.0);

        spy.update(1_700.0, &sections);
        assert_eq!(spy.active(), Some("process"));
    }

    #[test]
    fn test_probe_variants() {
        let sections = layout();
        assert_eq!(probe(-1.0, &sections), Probe::Above);
        assert_eq!(probe(0.0, &sections), Probe::Inside("hero"));
        assert_eq!(probe(3_200.0, &sections), Probe::Below);
        assert_eq!(probe(10.0, &[]), Probe::Empty);
    }

    #[test]
    fn test_is_scrolled_threshold() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(SCROLLED_THRESHOLD));
        assert!(is_scrolled(SCROLLED_THRESHOLD + 1.0));
    }

    #[test]
    fn test_frame_gate_coalesces_events() {
        let mut gate = FrameGate::new();
        let scheduled = (0..10).filter(|_| gate.request()).count();
        assert_eq!(scheduled, 1);
        assert!(gate.is_pending());

        gate.begin_frame();
        assert!(!gate.is_pending());
        assert!(gate.request());

        gate.cancel();
        assert!(!gate.is_pending());
    }
}

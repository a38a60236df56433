//! Interaction state tracking
//!
//! Hovering a cell gives it an [`ActiveTreatment`] (a color and an expiry).
//! Each active cell owns exactly one pending timer. Replacing, evicting or
//! clearing an entry cancels that timer in the same step, so a timer can never
//! outlive the entry it was scheduled for.
//!
//! # Example
//! ```
//! # use museroom::core::background::*;
//! # use std::time::Duration;
//! let palette = Palette::new(["red"]).unwrap();
//! let settings = TrackerSettings::new(Duration::from_millis(100));
//! let mut tracker =
//!     InteractionTracker::new(palette, settings, ManualTimers::new(), RandomPicker::seeded(1));
//!
//! tracker.on_cell_enter(CellId::new(2, 2));
//! assert_eq!(tracker.len(), 1);
//!
//! tracker.advance_to(Timestamp(101));
//! assert!(tracker.is_empty());
//! ```

use std::collections::HashMap;
use std::time::Duration;

use super::grid::CellId;
use super::palette::{Color, ColorPicker, Palette};
use super::timers::{Expiry, ManualTimers, TimerDriver, Timestamp};

/// Default time a hovered cell stays lit
pub const DEFAULT_LINGER_MS: u64 = 800;

/// Transient visual override for one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTreatment {
    pub cell: CellId,
    pub color: Color,
    pub expires_at: Timestamp,
}

/// Snapshot of all active treatments, keyed by cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    entries: HashMap<CellId, ActiveTreatment>,
}

impl InteractionState {
    pub fn get(&self, cell: &CellId) -> Option<&ActiveTreatment> {
        self.entries.get(cell)
    }

    pub fn contains(&self, cell: &CellId) -> bool {
        self.entries.contains_key(cell)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveTreatment> {
        self.entries.values()
    }
}

impl FromIterator<ActiveTreatment> for InteractionState {
    fn from_iter<T: IntoIterator<Item = ActiveTreatment>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|t| (t.cell, t)).collect(),
        }
    }
}

/// Tracker tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    /// How long a treatment lives after the last enter
    pub linger: Duration,
    /// Backpressure cap on simultaneously active cells
    pub max_active_cells: Option<usize>,
}

impl TrackerSettings {
    pub fn new(linger: Duration) -> Self {
        Self {
            linger,
            max_active_cells: None,
        }
    }

    pub fn with_max_active_cells(mut self, cap: usize) -> Self {
        self.max_active_cells = Some(cap);
        self
    }

    fn cap(&self) -> Option<usize> {
        self.max_active_cells.map(|cap| cap.max(1))
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_LINGER_MS))
    }
}

struct Slot<H> {
    treatment: ActiveTreatment,
    timer: H,
    seq: u64,
}

/// Owns the interaction state and every expiry timer backing it
pub struct InteractionTracker<D: TimerDriver, P: ColorPicker> {
    palette: Palette,
    settings: TrackerSettings,
    driver: D,
    picker: P,
    slots: HashMap<CellId, Slot<D::Handle>>,
    next_seq: u64,
    version: u64,
}

impl<D: TimerDriver, P: ColorPicker> InteractionTracker<D, P> {
    pub fn new(palette: Palette, settings: TrackerSettings, driver: D, picker: P) -> Self {
        Self {
            palette,
            settings,
            driver,
            picker,
            slots: HashMap::new(),
            next_seq: 0,
            version: 0,
        }
    }

    /// Pointer entered `cell`: light it up with a fresh color and (re)start
    /// its linger timer.
    pub fn on_cell_enter(&mut self, cell: CellId) -> &ActiveTreatment {
        let now = self.driver.now();
        self.prune_expired(now);

        let color = self.picker.pick(&self.palette);

        if let Some(previous) = self.slots.remove(&cell) {
            self.driver.cancel(previous.timer);
        } else if let Some(cap) = self.settings.cap() {
            while self.slots.len() >= cap {
                if !self.evict_oldest() {
                    break;
                }
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let expires_at = now + self.settings.linger;
        let timer = self.driver.schedule(
            Expiry {
                cell,
                expires_at,
                seq,
            },
            self.settings.linger,
        );

        self.version += 1;
        let slot = self.slots.entry(cell).insert_entry(Slot {
            treatment: ActiveTreatment {
                cell,
                color,
                expires_at,
            },
            timer,
            seq,
        });
        &slot.into_mut().treatment
    }

    /// A timer fired. Removes the entry only if it is still the one the timer
    /// was scheduled for.
    pub fn expire(&mut self, expiry: Expiry) -> bool {
        let matches = self.slots.get(&expiry.cell).is_some_and(|slot| {
            slot.seq == expiry.seq && slot.treatment.expires_at == expiry.expires_at
        });

        if !matches {
            return false;
        }

        // The timer already fired; dropping its handle is enough
        self.slots.remove(&expiry.cell);
        self.version += 1;
        true
    }

    /// Drop every entry whose expiry is at or before `now`.
    ///
    /// Covers timers the host delivered late (throttled background tabs).
    pub fn prune_expired(&mut self, now: Timestamp) -> usize {
        let stale: Vec<CellId> = self
            .slots
            .values()
            .filter(|slot| slot.treatment.expires_at <= now)
            .map(|slot| slot.treatment.cell)
            .collect();

        for cell in &stale {
            if let Some(slot) = self.slots.remove(cell) {
                self.driver.cancel(slot.timer);
            }
        }

        if !stale.is_empty() {
            self.version += 1;
        }
        stale.len()
    }

    /// Cancel every pending timer and empty the state. Safe to call repeatedly.
    pub fn clear_all(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        for (_, slot) in self.slots.drain() {
            self.driver.cancel(slot.timer);
        }
        self.version += 1;
    }

    pub fn get(&self, cell: &CellId) -> Option<&ActiveTreatment> {
        self.slots.get(cell).map(|slot| &slot.treatment)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> InteractionState {
        self.slots
            .values()
            .map(|slot| slot.treatment.clone())
            .collect()
    }

    /// Bumped on every mutation; consumers re-render when it changes
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn settings(&self) -> TrackerSettings {
        self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn evict_oldest(&mut self) -> bool {
        let oldest = self
            .slots
            .iter()
            .min_by_key(|(_, slot)| slot.seq)
            .map(|(cell, _)| *cell);

        match oldest.and_then(|cell| self.slots.remove(&cell)) {
            Some(slot) => {
                self.driver.cancel(slot.timer);
                true
            }
            None => false,
        }
    }
}

impl<P: ColorPicker> InteractionTracker<ManualTimers, P> {
    /// Advance simulated time, applying every timer that fires on the way.
    /// Returns how many entries expired.
    pub fn advance_to(&mut self, to: Timestamp) -> usize {
        let fired = self.driver.advance_to(to);
        fired
            .into_iter()
            .filter(|expiry| self.expire(*expiry))
            .count()
    }

    pub fn advance_by(&mut self, by: Duration) -> usize {
        let to = self.driver.now() + by;
        self.advance_to(to)
    }
}

impl<D: TimerDriver, P: ColorPicker> Drop for InteractionTracker<D, P> {
    fn drop(&mut self) {
        self.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::background::palette::SequencePicker;
    use std::cell::RefCell;
    use std::rc::Rc;

    type TestTracker = InteractionTracker<ManualTimers, SequencePicker>;

    fn tracker(colors: &[&str], linger_ms: u64, picks: Vec<usize>) -> TestTracker {
        InteractionTracker::new(
            Palette::new(colors.iter().copied()).unwrap(),
            TrackerSettings::new(Duration::from_millis(linger_ms)),
            ManualTimers::new(),
            SequencePicker::new(picks),
        )
    }

    fn capped(cap: usize) -> TestTracker {
        InteractionTracker::new(
            Palette::new(["red"]).unwrap(),
            TrackerSettings::new(Duration::from_millis(800)).with_max_active_cells(cap),
            ManualTimers::new(),
            SequencePicker::new(vec![0]),
        )
    }

    #[test]
    fn test_enter_creates_single_entry() {
        let mut tracker = tracker(&["red", "blue"], 800, vec![1]);
        tracker.advance_to(Timestamp(40));

        let treatment = tracker.on_cell_enter(CellId::new(1, 2)).clone();

        assert_eq!(tracker.len(), 1);
        assert_eq!(treatment.cell, CellId::new(1, 2));
        assert_eq!(treatment.color.as_str(), "blue");
        assert_eq!(treatment.expires_at, Timestamp(840));
        assert_eq!(tracker.driver().pending_count(), 1);
    }

    #[test]
    fn test_scenario_red_cell_expires_after_linger() {
        let mut tracker = tracker(&["red"], 100, vec![0]);
        let cell = CellId::new(2, 2);

        tracker.on_cell_enter(cell);

        tracker.advance_to(Timestamp(50));
        let state = tracker.snapshot();
        assert_eq!(state.len(), 1);
        let entry = state.get(&cell).unwrap();
        assert_eq!(entry.color.as_str(), "red");
        assert_eq!(entry.expires_at, Timestamp(100));

        tracker.advance_to(Timestamp(101));
        assert!(tracker.snapshot().is_empty());
        assert_eq!(tracker.driver().pending_count(), 0);
    }

    #[test]
    fn test_reenter_replaces_color_and_resets_expiry() {
        let mut tracker = tracker(&["red", "green"], 100, vec![0, 1]);
        let cell = CellId::new(0, 0);

        tracker.on_cell_enter(cell);
        tracker.advance_to(Timestamp(60));
        tracker.on_cell_enter(cell);

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.driver().pending_count(), 1);
        let entry = tracker.get(&cell).unwrap();
        assert_eq!(entry.color.as_str(), "green");
        assert_eq!(entry.expires_at, Timestamp(160));

        // The first timer's deadline passes without removing the refreshed entry
        assert_eq!(tracker.advance_to(Timestamp(120)), 0);
        assert!(tracker.get(&cell).is_some());

        assert_eq!(tracker.advance_to(Timestamp(160)), 1);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_stale_expiry_is_ignored() {
        let mut tracker = tracker(&["red"], 100, vec![0]);
        let cell = CellId::new(3, 3);

        let first = tracker.on_cell_enter(cell).clone();
        let stale = Expiry {
            cell,
            expires_at: first.expires_at,
            seq: 0,
        };

        // Same instant, so expires_at is identical; only seq tells them apart
        tracker.on_cell_enter(cell);
        assert!(!tracker.expire(stale));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_expire_unknown_cell_is_noop() {
        let mut tracker = tracker(&["red"], 100, vec![0]);
        let version = tracker.version();

        assert!(!tracker.expire(Expiry {
            cell: CellId::new(9, 9),
            expires_at: Timestamp(100),
            seq: 0,
        }));
        assert_eq!(tracker.version(), version);
    }

    #[test]
    fn test_independent_cells_expire_independently() {
        let mut tracker = tracker(&["red"], 100, vec![0]);

        tracker.on_cell_enter(CellId::new(0, 0));
        tracker.advance_to(Timestamp(50));
        tracker.on_cell_enter(CellId::new(0, 1));

        tracker.advance_to(Timestamp(100));
        assert!(tracker.get(&CellId::new(0, 0)).is_none());
        assert!(tracker.get(&CellId::new(0, 1)).is_some());

        tracker.advance_to(Timestamp(150));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_clear_all_cancels_timers() {
        let mut tracker = tracker(&["red"], 100, vec![0]);
        tracker.on_cell_enter(CellId::new(0, 0));
        tracker.on_cell_enter(CellId::new(1, 0));

        tracker.clear_all();
        assert!(tracker.is_empty());
        assert_eq!(tracker.driver().pending_count(), 0);

        let version = tracker.version();
        assert_eq!(tracker.advance_to(Timestamp(10_000)), 0);
        assert!(tracker.is_empty());
        assert_eq!(tracker.version(), version);
    }

    #[test]
    fn test_clear_all_is_idempotent() {
        let mut tracker = tracker(&["red"], 100, vec![0]);
        tracker.clear_all();
        let version = tracker.version();

        tracker.clear_all();
        assert!(tracker.is_empty());
        assert_eq!(tracker.version(), version);
    }

    #[test]
    fn test_cap_evicts_oldest_first() {
        let mut tracker = capped(3);
        let cells: Vec<CellId> = (0..5).map(|i| CellId::new(0, i)).collect();

        for cell in &cells {
            tracker.on_cell_enter(*cell);
            assert!(tracker.len() <= 3);
        }

        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.driver().pending_count(), 3);
        assert!(tracker.get(&cells[0]).is_none());
        assert!(tracker.get(&cells[1]).is_none());
        for cell in &cells[2..] {
            assert!(tracker.get(cell).is_some());
        }
    }

    #[test]
    fn test_cap_refresh_counts_as_newest() {
        let mut tracker = capped(2);
        let a = CellId::new(0, 0);
        let b = CellId::new(0, 1);
        let c = CellId::new(0, 2);

        tracker.on_cell_enter(a);
        tracker.on_cell_enter(b);
        // Re-entering `a` replaces in place and makes it the newest
        tracker.on_cell_enter(a);
        assert_eq!(tracker.len(), 2);

        tracker.on_cell_enter(c);
        assert!(tracker.get(&a).is_some());
        assert!(tracker.get(&b).is_none());
        assert!(tracker.get(&c).is_some());
    }

    #[test]
    fn test_zero_cap_behaves_as_one() {
        let mut tracker = capped(0);
        tracker.on_cell_enter(CellId::new(0, 0));
        tracker.on_cell_enter(CellId::new(0, 1));

        assert_eq!(tracker.len(), 1);
        assert!(tracker.get(&CellId::new(0, 1)).is_some());
    }

    #[test]
    fn test_evicted_timer_does_not_fire() {
        let mut tracker = capped(1);
        tracker.on_cell_enter(CellId::new(0, 0));
        tracker.advance_to(Timestamp(10));
        tracker.on_cell_enter(CellId::new(0, 1));

        // Only the surviving entry expires
        assert_eq!(tracker.advance_to(Timestamp(10_000)), 1);
        assert_eq!(tracker.driver().pending_count(), 0);
    }

    #[test]
    fn test_prune_expired_removes_only_due_entries() {
        let mut tracker = tracker(&["red"], 100, vec![0]);
        tracker.on_cell_enter(CellId::new(0, 0));
        tracker.advance_to(Timestamp(50));
        tracker.on_cell_enter(CellId::new(0, 1));

        assert_eq!(tracker.prune_expired(Timestamp(100)), 1);
        assert!(tracker.get(&CellId::new(0, 1)).is_some());
        assert_eq!(tracker.driver().pending_count(), 1);
        assert_eq!(tracker.prune_expired(Timestamp(100)), 0);
    }

    #[test]
    fn test_enter_prunes_late_entries() {
        // Timers held back by the host: the clock moved on but nothing fired yet
        let mut tracker = tracker(&["red"], 100, vec![0]);
        tracker.on_cell_enter(CellId::new(0, 0));
        let _ = tracker.driver.advance_to(Timestamp(500));

        tracker.on_cell_enter(CellId::new(5, 5));
        assert_eq!(tracker.len(), 1);
        assert!(tracker.get(&CellId::new(0, 0)).is_none());
    }

    #[test]
    fn test_version_tracks_mutations() {
        let mut tracker = tracker(&["red"], 100, vec![0]);
        assert_eq!(tracker.version(), 0);

        tracker.on_cell_enter(CellId::new(0, 0));
        assert_eq!(tracker.version(), 1);

        tracker.on_cell_enter(CellId::new(0, 0));
        assert_eq!(tracker.version(), 2);

        tracker.advance_to(Timestamp(1_000));
        assert_eq!(tracker.version(), 3);
    }

    #[test]
    fn test_advance_by_is_relative() {
        let mut tracker = tracker(&["red"], 100, vec![0]);
        tracker.advance_by(Duration::from_millis(30));
        tracker.on_cell_enter(CellId::new(0, 0));

        assert_eq!(tracker.advance_by(Duration::from_millis(99)), 0);
        assert_eq!(tracker.advance_by(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut tracker = tracker(&["red"], 100, vec![0]);
        tracker.on_cell_enter(CellId::new(0, 0));
        let snapshot = tracker.snapshot();

        tracker.clear_all();
        assert_eq!(snapshot.len(), 1);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = tracker(&["red"], 100, vec![0]);
        let second = tracker(&["red"], 100, vec![0]);

        first.on_cell_enter(CellId::new(0, 0));
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    /// Driver recording every cancelled handle in a log shared with the test
    struct LoggingTimers {
        next: u64,
        cancelled: Rc<RefCell<Vec<u64>>>,
    }

    impl TimerDriver for LoggingTimers {
        type Handle = u64;

        fn now(&self) -> Timestamp {
            Timestamp(0)
        }

        fn schedule(&mut self, _expiry: Expiry, _delay: Duration) -> u64 {
            self.next += 1;
            self.next
        }

        fn cancel(&mut self, handle: u64) {
            self.cancelled.borrow_mut().push(handle);
        }
    }

    #[test]
    fn test_drop_cancels_pending_timers() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = InteractionTracker::new(
            Palette::new(["red"]).unwrap(),
            TrackerSettings::default(),
            LoggingTimers {
                next: 0,
                cancelled: Rc::clone(&cancelled),
            },
            SequencePicker::new(vec![0]),
        );

        tracker.on_cell_enter(CellId::new(0, 0));
        tracker.on_cell_enter(CellId::new(0, 2));
        tracker.on_cell_enter(CellId::new(2, 0));
        assert!(cancelled.borrow().is_empty());

        drop(tracker);

        let mut handles = cancelled.borrow().clone();
        handles.sort_unstable();
        assert_eq!(handles, vec![1, 2, 3]);
    }
}

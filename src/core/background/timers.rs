//! Expiry scheduling
//!
//! The tracker never touches a real clock. It asks a [`TimerDriver`] for the
//! current time and for one-shot timers. In the browser the driver wraps
//! `setTimeout`; in tests [`ManualTimers`] advances simulated time.

use std::collections::BTreeMap;
use std::ops::Add;
use std::time::Duration;

use super::grid::CellId;

/// Milliseconds on a driver's monotonic clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Time left until `self`, zero if already passed
    pub fn saturating_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        let ms = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(ms))
    }
}

/// What a timer delivers when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Expiry {
    pub cell: CellId,
    pub expires_at: Timestamp,
    /// Sequence number of the entry the timer was scheduled for
    pub seq: u64,
}

/// Clock plus one-shot timers.
///
/// A scheduled timer must eventually hand its [`Expiry`] back to the tracker
/// (see `InteractionTracker::expire`) unless it is cancelled first.
pub trait TimerDriver {
    /// Owned handle for a pending timer
    type Handle;

    fn now(&self) -> Timestamp;

    fn schedule(&mut self, expiry: Expiry, delay: Duration) -> Self::Handle;

    /// Cancel a pending timer. Cancelling an already fired timer is a no-op.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Handle returned by [`ManualTimers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ManualHandle {
    due: Timestamp,
    id: u64,
}

/// Deterministic driver with simulated time
#[derive(Debug, Default)]
pub struct ManualTimers {
    now: Timestamp,
    next_id: u64,
    pending: BTreeMap<ManualHandle, Expiry>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at `now`
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Number of timers that have neither fired nor been cancelled
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock to `to` and return every timer due by then, in deadline
    /// order. Moving backwards is ignored.
    pub fn advance_to(&mut self, to: Timestamp) -> Vec<Expiry> {
        if to > self.now {
            self.now = to;
        }

        let mut fired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().due > self.now {
                break;
            }
            fired.push(entry.remove());
        }
        fired
    }
}

impl TimerDriver for ManualTimers {
    type Handle = ManualHandle;

    fn now(&self) -> Timestamp {
        self.now
    }

    fn schedule(&mut self, expiry: Expiry, delay: Duration) -> ManualHandle {
        let handle = ManualHandle {
            due: self.now + delay,
            id: self.next_id,
        };
        self.next_id += 1;
        self.pending.insert(handle, expiry);
        handle
    }

    fn cancel(&mut self, handle: ManualHandle) {
        self.pending.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiry(row: u32, at: u64) -> Expiry {
        Expiry {
            cell: CellId::new(row, 0),
            expires_at: Timestamp(at),
            seq: row as u64,
        }
    }

    #[test]
    fn test_timestamp_add_duration() {
        assert_eq!(Timestamp(100) + Duration::from_millis(800), Timestamp(900));
        assert_eq!(Timestamp(u64::MAX) + Duration::from_secs(1), Timestamp(u64::MAX));
    }

    #[test]
    fn test_saturating_since() {
        assert_eq!(
            Timestamp(900).saturating_since(Timestamp(100)),
            Duration::from_millis(800)
        );
        assert_eq!(Timestamp(5).saturating_since(Timestamp(10)), Duration::ZERO);
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = ManualTimers::new();
        timers.schedule(expiry(1, 300), Duration::from_millis(300));
        timers.schedule(expiry(2, 100), Duration::from_millis(100));
        timers.schedule(expiry(3, 200), Duration::from_millis(200));

        let fired = timers.advance_to(Timestamp(250));
        assert_eq!(fired, vec![expiry(2, 100), expiry(3, 200)]);
        assert_eq!(timers.pending_count(), 1);
        assert_eq!(timers.now(), Timestamp(250));
    }

    #[test]
    fn test_fires_exactly_at_deadline() {
        let mut timers = ManualTimers::new();
        timers.schedule(expiry(1, 100), Duration::from_millis(100));

        assert!(timers.advance_to(Timestamp(99)).is_empty());
        assert_eq!(timers.advance_to(Timestamp(100)).len(), 1);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = ManualTimers::new();
        let handle = timers.schedule(expiry(1, 100), Duration::from_millis(100));
        timers.cancel(handle);

        assert_eq!(timers.pending_count(), 0);
        assert!(timers.advance_to(Timestamp(1_000)).is_empty());

        // Cancelling twice is harmless
        timers.cancel(handle);
    }

    #[test]
    fn test_clock_does_not_go_backwards() {
        let mut timers = ManualTimers::starting_at(Timestamp(500));
        timers.advance_to(Timestamp(100));
        assert_eq!(timers.now(), Timestamp(500));
    }
}

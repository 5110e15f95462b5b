//! Value debouncing against an external clock.
//!
//! [`Debouncer`] does no timing itself: callers pass the current time as a
//! `Duration` since any fixed origin (`Date.now()` in the browser, a test
//! counter in tests) and schedule their own wake-up at [`Debouncer::deadline`].

use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    changed_at: Duration,
}

/// Holds the last settled value and at most one pending change.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    settled: T,
    pending: Option<Pending<T>>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, quiet: Duration) -> Self {
        Self {
            quiet,
            settled: initial,
            pending: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// The last value that stayed unchanged for a full quiet period.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// Record a new input value. Any earlier pending value is replaced and
    /// the quiet period restarts from `now`. Returns the new deadline.
    pub fn push(&mut self, value: T, now: Duration) -> Duration {
        self.pending = Some(Pending {
            value,
            changed_at: now,
        });
        now + self.quiet
    }

    /// When the pending value, if any, may settle.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.changed_at + self.quiet)
    }

    /// Settle the pending value if its quiet period has elapsed.
    ///
    /// Returns the newly settled value, at most once per change. A pending
    /// value equal to the settled one settles silently.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now >= p.changed_at + self.quiet);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        if pending.value == self.settled {
            return None;
        }
        self.settled = pending.value.clone();
        Some(pending.value)
    }

    /// Forget the pending value without settling it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_only_final_value_propagates_once() {
        let mut d = Debouncer::new(0, ms(500));
        d.push(1, ms(0));
        d.push(2, ms(200));

        // 500ms after the first change, but only 300ms after the last
        assert_eq!(d.poll(ms(500)), None);
        assert_eq!(d.poll(ms(699)), None);
        assert_eq!(d.poll(ms(700)), Some(2));
        assert_eq!(d.poll(ms(900)), None);
        assert_eq!(*d.settled(), 2);
    }

    #[test]
    fn test_deadline_resets_on_each_push() {
        let mut d = Debouncer::new("a", ms(100));
        assert_eq!(d.deadline(), None);
        assert_eq!(d.push("b", ms(10)), ms(110));
        assert_eq!(d.push("c", ms(50)), ms(150));
        assert_eq!(d.deadline(), Some(ms(150)));
    }

    #[test]
    fn test_change_back_to_settled_emits_nothing() {
        let mut d = Debouncer::new(7, ms(100));
        d.push(8, ms(0));
        d.push(7, ms(50));
        assert_eq!(d.poll(ms(1000)), None);
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut d = Debouncer::new(1, ms(100));
        d.push(2, ms(0));
        d.cancel();
        assert_eq!(d.poll(ms(1000)), None);
        assert_eq!(*d.settled(), 1);
    }
}

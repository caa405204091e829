//! Per-domain polling schedule.
//!
//! A deterministic state machine driven by explicit `Instant`s: the caller
//! (the app's driver tick) asks whether a fetch is due, and reports back
//! when the fetch finishes. The explicit in-flight flag is the mutual
//! exclusion invariant — a tick that fires while the previous fetch is
//! still pending is skipped, never run concurrently.

use super::RefreshStatus;
use std::time::{Duration, Instant};

/// Schedule and status machine for one domain.
#[derive(Debug)]
pub struct PollSchedule {
    interval: Duration,
    /// `None` means due immediately (first run or manual retry).
    next_due: Option<Instant>,
    in_flight: bool,
    status: RefreshStatus,
}

impl PollSchedule {
    /// Create a schedule that is due immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            in_flight: false,
            status: RefreshStatus::Idle,
        }
    }

    /// Current refresh status.
    pub fn status(&self) -> RefreshStatus {
        self.status
    }

    /// Whether a fetch is currently in flight.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Try to start a fetch. Refuses while one is in flight or before the
    /// deadline. On success the status moves to `Loading` (no cached data)
    /// or `Refreshing` (cached data stays visible while revalidating).
    pub fn try_begin(&mut self, now: Instant, has_cache: bool) -> bool {
        if self.in_flight {
            return false;
        }
        if let Some(due) = self.next_due
            && now < due
        {
            return false;
        }

        self.in_flight = true;
        self.status = if has_cache {
            RefreshStatus::Refreshing
        } else {
            RefreshStatus::Loading
        };
        true
    }

    /// Record a finished fetch and arm the next deadline.
    ///
    /// Failure escalates to `Error` only when there is no cached data to
    /// fall back to; with a cache the failure is swallowed and the display
    /// keeps last-known-good data.
    pub fn finish(&mut self, now: Instant, ok: bool, has_cache: bool) {
        self.in_flight = false;
        self.next_due = Some(now + self.interval);
        self.status = if ok || has_cache {
            RefreshStatus::Idle
        } else {
            RefreshStatus::Error
        };
    }

    /// Make the schedule due immediately. Manual retry re-enters the same
    /// transition rules as a timer tick.
    pub fn retry(&mut self) {
        self.next_due = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INTERVAL: Duration = Duration::from_secs(15);

    #[test]
    fn test_first_fetch_is_loading() {
        let mut schedule = PollSchedule::new(INTERVAL);
        let t0 = Instant::now();

        assert!(schedule.try_begin(t0, false));
        assert_eq!(schedule.status(), RefreshStatus::Loading);

        schedule.finish(t0, true, true);
        assert_eq!(schedule.status(), RefreshStatus::Idle);
    }

    #[test]
    fn test_subsequent_fetch_is_refreshing() {
        let mut schedule = PollSchedule::new(INTERVAL);
        let t0 = Instant::now();

        schedule.try_begin(t0, false);
        schedule.finish(t0, true, true);

        assert!(schedule.try_begin(t0 + INTERVAL, true));
        assert_eq!(schedule.status(), RefreshStatus::Refreshing);
    }

    #[test]
    fn test_overlapping_ticks_run_exactly_one_fetch() {
        let mut schedule = PollSchedule::new(INTERVAL);
        let t0 = Instant::now();

        // Two ticks 1ms apart while the first fetch is still pending.
        assert!(schedule.try_begin(t0, false));
        assert!(!schedule.try_begin(t0 + Duration::from_millis(1), false));
        assert!(schedule.in_flight());

        schedule.finish(t0 + Duration::from_secs(1), true, true);
        assert!(!schedule.in_flight());
    }

    #[test]
    fn test_not_due_before_interval_elapses() {
        let mut schedule = PollSchedule::new(INTERVAL);
        let t0 = Instant::now();

        schedule.try_begin(t0, false);
        schedule.finish(t0, true, true);

        assert!(!schedule.try_begin(t0 + INTERVAL - Duration::from_millis(1), true));
        assert!(schedule.try_begin(t0 + INTERVAL, true));
    }

    #[test]
    fn test_failure_without_cache_is_error() {
        let mut schedule = PollSchedule::new(INTERVAL);
        let t0 = Instant::now();

        schedule.try_begin(t0, false);
        schedule.finish(t0, false, false);
        assert_eq!(schedule.status(), RefreshStatus::Error);
    }

    #[test]
    fn test_failed_background_refresh_is_swallowed() {
        let mut schedule = PollSchedule::new(INTERVAL);
        let t0 = Instant::now();

        schedule.try_begin(t0, false);
        schedule.finish(t0, true, true);

        // Background refresh fails while cached data exists.
        schedule.try_begin(t0 + INTERVAL, true);
        schedule.finish(t0 + INTERVAL + Duration::from_secs(1), false, true);
        assert_eq!(schedule.status(), RefreshStatus::Idle);
    }

    #[test]
    fn test_retry_reenters_transition_rules() {
        let mut schedule = PollSchedule::new(INTERVAL);
        let t0 = Instant::now();

        schedule.try_begin(t0, false);
        schedule.finish(t0, false, false);
        assert_eq!(schedule.status(), RefreshStatus::Error);

        // Manual retry makes the schedule due immediately; the error state
        // with no cache re-enters as a loading fetch.
        schedule.retry();
        assert!(schedule.try_begin(t0 + Duration::from_millis(1), false));
        assert_eq!(schedule.status(), RefreshStatus::Loading);
    }

    #[test]
    fn test_retry_does_not_bypass_in_flight_exclusion() {
        let mut schedule = PollSchedule::new(INTERVAL);
        let t0 = Instant::now();

        schedule.try_begin(t0, false);
        schedule.retry();
        assert!(!schedule.try_begin(t0 + Duration::from_millis(1), false));
    }

    #[test]
    fn test_error_to_refreshing_once_cache_appears() {
        let mut schedule = PollSchedule::new(INTERVAL);
        let t0 = Instant::now();

        schedule.try_begin(t0, false);
        schedule.finish(t0, false, false);
        assert_eq!(schedule.status(), RefreshStatus::Error);

        // Ticks from the error state with cached data revalidate in the
        // background.
        assert!(schedule.try_begin(t0 + INTERVAL, true));
        assert_eq!(schedule.status(), RefreshStatus::Refreshing);
    }
}

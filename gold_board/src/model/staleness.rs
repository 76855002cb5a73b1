//! Fetch staleness tracker.
//!
//! Records the last successful fetch and decides when a run of failures has lasted long
//! enough to surface the persistent error state:
//!
//! - `StalenessTracker::record_success(now, wall)`: refresh both timestamps and clear
//!   the error flag.
//! - `StalenessTracker::record_failure(now, timeout)`: leave the timestamps alone and
//!   raise the flag once `now - last_success >= timeout`.
//!
//! Time is passed in explicitly as `Instant`s so the threshold can be checked without
//! waiting for real minutes to pass. Only a success clears the flag.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// In-memory fetch state.
#[derive(Debug, Clone)]
pub struct StalenessTracker {
    last_success: Instant,
    last_success_at: Option<DateTime<Local>>,
    persistent_error: bool,
}

impl StalenessTracker {
    /// Start tracking; `started` counts as the last success.
    pub fn new(started: Instant) -> Self {
        Self {
            last_success: started,
            last_success_at: None,
            persistent_error: false,
        }
    }

    /// Record a successful fetch.
    pub fn record_success(&mut self, now: Instant, wall: DateTime<Local>) {
        self.last_success = now;
        self.last_success_at = Some(wall);
        self.persistent_error = false;
    }

    /// Record a failed fetch and return whether the board is now in the error state.
    pub fn record_failure(&mut self, now: Instant, timeout: Duration) -> bool {
        if self.elapsed(now) >= timeout {
            self.persistent_error = true;
        }
        self.persistent_error
    }

    /// Time since the last success.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_success)
    }

    /// Whether the persistent error state is active.
    pub fn is_persistent_error(&self) -> bool {
        self.persistent_error
    }

    /// Wall-clock time of the last success, if any.
    pub fn last_success_at(&self) -> Option<DateTime<Local>> {
        self.last_success_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(3 * 60);

    #[test]
    fn failures_before_timeout_are_transient() {
        let start = Instant::now();
        let mut tracker = StalenessTracker::new(start);
        assert!(!tracker.record_failure(start + Duration::from_secs(10), TIMEOUT));
        assert!(!tracker.record_failure(start + Duration::from_secs(179), TIMEOUT));
        assert!(!tracker.is_persistent_error());
    }

    #[test]
    fn failure_at_threshold_sets_flag_until_success() {
        let start = Instant::now();
        let mut tracker = StalenessTracker::new(start);
        assert!(tracker.record_failure(start + TIMEOUT, TIMEOUT));

        // A later failure with a longer timeout does not clear it.
        assert!(tracker.record_failure(start + TIMEOUT, Duration::from_secs(3600)));

        let recovered = start + TIMEOUT + Duration::from_secs(10);
        tracker.record_success(recovered, Local::now());
        assert!(!tracker.is_persistent_error());
        assert!(tracker.last_success_at().is_some());
        assert!(!tracker.record_failure(recovered + Duration::from_secs(10), TIMEOUT));
    }

    #[test]
    fn success_resets_the_clock() {
        let start = Instant::now();
        let mut tracker = StalenessTracker::new(start);
        tracker.record_success(start + Duration::from_secs(170), Local::now());
        assert!(!tracker.record_failure(start + Duration::from_secs(200), TIMEOUT));
        assert_eq!(tracker.elapsed(start + Duration::from_secs(200)), Duration::from_secs(30));
    }
}

//! Count-up animation for price transitions.
//!
//! A transition runs [`ANIMATION_STEPS`] interpolated frames followed by one final frame
//! holding the target, spaced [`FRAME_DELAY`] apart. The UI loop polls
//! [`CountUp::advance`] on its own timer; nothing here sleeps.

use std::time::{Duration, Instant};

/// Interpolated frames per transition.
pub const ANIMATION_STEPS: u32 = 15;
/// Total transition length in milliseconds.
pub const ANIMATION_DURATION_MS: u64 = 400;
/// Spacing between frames.
pub const FRAME_DELAY: Duration = Duration::from_millis(ANIMATION_DURATION_MS / ANIMATION_STEPS as u64);

/// One running transition from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountUp {
    start: u64,
    end: u64,
    /// Steps still to show; `None` once the final frame went out.
    remaining: Option<u32>,
    next_due: Instant,
}

impl CountUp {
    /// Begin a transition from `old` to `new`, first frame due at `now`.
    ///
    /// Equal values, or an `old` of zero, count up from zero instead.
    pub fn begin(old: u64, new: u64, now: Instant) -> Self {
        let start = if old == new || old == 0 { 0 } else { old };
        Self {
            start,
            end: new,
            remaining: Some(ANIMATION_STEPS),
            next_due: now,
        }
    }

    /// Emit the next frame if it is due.
    pub fn advance(&mut self, now: Instant) -> Option<u64> {
        let remaining = self.remaining?;
        if now < self.next_due {
            return None;
        }
        let value = self.value_at(remaining);
        self.remaining = remaining.checked_sub(1);
        self.next_due += FRAME_DELAY;
        Some(value)
    }

    /// When the next frame is due, or `None` when finished.
    pub fn next_due(&self) -> Option<Instant> {
        self.remaining.map(|_| self.next_due)
    }

    /// Whether the final frame has been emitted.
    pub fn is_finished(&self) -> bool {
        self.remaining.is_none()
    }

    /// Value the transition ends on.
    pub fn target(&self) -> u64 {
        self.end
    }

    fn value_at(&self, remaining: u32) -> u64 {
        if remaining == 0 {
            return self.end;
        }
        let fraction = 1.0 - f64::from(remaining) / f64::from(ANIMATION_STEPS);
        let value = self.start as f64 + (self.end as f64 - self.start as f64) * fraction;
        value.max(0.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut anim: CountUp, start: Instant) -> Vec<u64> {
        let mut frames = Vec::new();
        let mut now = start;
        while !anim.is_finished() {
            if let Some(value) = anim.advance(now) {
                frames.push(value);
            }
            now += FRAME_DELAY;
        }
        frames
    }

    #[test]
    fn frame_delay_is_integer_division() {
        assert_eq!(FRAME_DELAY, Duration::from_millis(26));
    }

    #[test]
    fn equal_values_count_up_from_zero() {
        let now = Instant::now();
        let frames = drain(CountUp::begin(100_000, 100_000, now), now);
        assert_eq!(frames.len(), ANIMATION_STEPS as usize + 1);
        assert_eq!(frames[0], 0);
        assert_eq!(frames[1], 6_666);
        assert_eq!(*frames.last().unwrap(), 100_000);
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn zero_old_counts_up_from_zero() {
        let now = Instant::now();
        let frames = drain(CountUp::begin(0, 4_500, now), now);
        assert_eq!(frames[0], 0);
        assert_eq!(*frames.last().unwrap(), 4_500);
    }

    #[test]
    fn changed_value_interpolates_from_old() {
        let now = Instant::now();
        let frames = drain(CountUp::begin(103_000, 100_000, now), now);
        assert_eq!(frames[0], 103_000);
        assert_eq!(frames[1], 102_800);
        assert_eq!(*frames.last().unwrap(), 100_000);
        assert!(frames.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn frames_wait_for_their_slot() {
        let now = Instant::now();
        let mut anim = CountUp::begin(0, 100_000, now);
        assert_eq!(anim.advance(now), Some(0));
        assert_eq!(anim.advance(now), None);
        assert_eq!(anim.next_due(), Some(now + FRAME_DELAY));
        assert_eq!(anim.advance(now + FRAME_DELAY), Some(6_666));
    }

    #[test]
    fn finished_animation_has_no_due_time() {
        let now = Instant::now();
        let mut anim = CountUp::begin(1, 2, now);
        assert_eq!(anim.target(), 2);
        let mut t = now;
        let mut last = None;
        while let Some(value) = anim.advance(t) {
            last = Some(value);
            t += FRAME_DELAY;
        }
        assert_eq!(last, Some(2));
        assert!(anim.is_finished());
        assert_eq!(anim.next_due(), None);
    }
}

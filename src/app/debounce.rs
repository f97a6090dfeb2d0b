//! Debounced settling of the search query.
//!
//! Zellij timers cannot be cancelled, so "restart the timer on every
//! keystroke" is expressed as counting. Each pushed value schedules one timer
//! of the quiet period and bumps a pending count. Each elapsed timer drops the
//! count, and only the elapse that brings it back to zero settles the latest
//! value. Timers of equal length fire in the order they were scheduled, so
//! that elapse belongs to the last keystroke and fires one quiet period after it.

use std::time::Duration;

/// Default quiet period before a typed query settles.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Last-write-wins debouncer driven by host timer elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    quiet_period: Duration,
    pending_timers: usize,
    pending_value: Option<String>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending_timers: 0,
            pending_value: None,
        }
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Records a new raw value, superseding any pending one.
    ///
    /// Returns the timer the caller must schedule.
    pub fn push(&mut self, value: String) -> Duration {
        self.pending_value = Some(value);
        self.pending_timers += 1;
        self.quiet_period
    }

    /// Handles one elapsed timer.
    ///
    /// Returns the settled value once the last scheduled timer elapses, and
    /// `None` while newer timers are still outstanding.
    pub fn on_timer_elapsed(&mut self) -> Option<String> {
        if self.pending_timers == 0 {
            tracing::debug!("timer elapsed with nothing pending");
            return None;
        }

        self.pending_timers -= 1;
        if self.pending_timers > 0 {
            tracing::trace!(outstanding = self.pending_timers, "superseded timer elapsed");
            return None;
        }

        self.pending_value.take()
    }

    /// `true` while a value is waiting to settle.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending_value.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays keystrokes at given millisecond offsets against a simulated
    /// host clock and returns every `(time, value)` the debouncer settled.
    fn replay(inputs: &[(u64, &str)], quiet_ms: u64) -> Vec<(u64, String)> {
        let mut debouncer = Debouncer::new(Duration::from_millis(quiet_ms));
        let mut timers: Vec<u64> = Vec::new();
        let mut settled = Vec::new();

        let mut events: Vec<(u64, Option<&str>)> =
            inputs.iter().map(|&(t, v)| (t, Some(v))).collect();

        while !events.is_empty() || !timers.is_empty() {
            let next_input = events.first().map(|e| e.0);
            let next_timer = timers.first().copied();

            match (next_input, next_timer) {
                (Some(ti), Some(tt)) if tt <= ti => {
                    timers.remove(0);
                    if let Some(v) = debouncer.on_timer_elapsed() {
                        settled.push((tt, v));
                    }
                }
                (Some(ti), _) => {
                    let (_, value) = events.remove(0);
                    let delay = debouncer.push(value.unwrap_or_default().to_string());
                    timers.push(ti + delay.as_millis() as u64);
                }
                (None, Some(tt)) => {
                    timers.remove(0);
                    if let Some(v) = debouncer.on_timer_elapsed() {
                        settled.push((tt, v));
                    }
                }
                (None, None) => break,
            }
        }

        settled
    }

    #[test]
    fn single_value_settles_after_quiet_period() {
        assert_eq!(replay(&[(0, "bat")], 500), vec![(500, "bat".to_string())]);
    }

    #[test]
    fn rapid_typing_settles_once_with_final_value() {
        let settled = replay(&[(0, "b"), (100, "ba"), (200, "bat")], 500);
        assert_eq!(settled, vec![(700, "bat".to_string())]);
    }

    #[test]
    fn pauses_longer_than_quiet_period_settle_each_value() {
        let settled = replay(&[(0, "b"), (600, "ba")], 500);
        assert_eq!(
            settled,
            vec![(500, "b".to_string()), (1100, "ba".to_string())]
        );
    }

    #[test]
    fn input_exactly_at_expiry_is_treated_as_after_it() {
        // The timer for "b" is due at 500 and fires before the input stamped 500.
        let settled = replay(&[(0, "b"), (500, "ba")], 500);
        assert_eq!(
            settled,
            vec![(500, "b".to_string()), (1000, "ba".to_string())]
        );
    }

    #[test]
    fn nothing_settles_without_input() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.on_timer_elapsed(), None);
    }

    #[test]
    fn push_reports_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        assert_eq!(debouncer.push("x".into()), Duration::from_millis(250));
        assert!(debouncer.is_pending());
    }
}

//! Double-clap sequencing on top of per-block detections.
//!
//! The kernel classifies single blocks; this tracker decides when two
//! single-clap detections form one deliberate double clap. Timestamps are
//! supplied by the caller (monotonic, from the capture loop), so the
//! tracker never reads a clock and replays deterministically.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Timing window for pairing two claps, plus suppression intervals.
/// All values in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleClapConfig {
    /// Minimum gap between the two claps (exclusive). Anything faster is
    /// echo or a single clap smeared across blocks.
    pub min_gap: f32,
    /// Maximum gap between the two claps (exclusive).
    pub max_gap: f32,
    /// Quiet period after a trigger before detections are honored again.
    pub cooldown: f32,
    /// Detections closer than this to the previously accepted one are
    /// dropped outright.
    pub debounce: f32,
}

impl Default for DoubleClapConfig {
    fn default() -> Self {
        Self {
            min_gap: 0.12,
            max_gap: 0.65,
            cooldown: 2.0,
            debounce: 0.06,
        }
    }
}

/// Clap timing state for one audio stream.
///
/// Feed every positive per-block detection to [`register_clap`] with its
/// timestamp; the call returns `true` when that detection completes a
/// double clap. One tracker per stream; calls must arrive in time order.
///
/// [`register_clap`]: DoubleClapTracker::register_clap
#[derive(Debug, Clone)]
pub struct DoubleClapTracker {
    config: DoubleClapConfig,
    /// Pending first clap of a would-be pair.
    first_clap: Option<Instant>,
    /// Most recent detection that survived the debounce filter.
    last_accepted: Option<Instant>,
    /// When the last double clap fired.
    last_trigger: Option<Instant>,
}

impl DoubleClapTracker {
    pub fn new(config: DoubleClapConfig) -> Self {
        Self {
            config,
            first_clap: None,
            last_accepted: None,
            last_trigger: None,
        }
    }

    /// Register a single-clap detection stamped with `now`.
    ///
    /// Returns `true` when this detection completes a double clap.
    pub fn register_clap(&mut self, now: Instant) -> bool {
        // Same physical clap often trips several consecutive blocks.
        if let Some(prev) = self.last_accepted {
            if now.duration_since(prev).as_secs_f32() < self.config.debounce {
                return false;
            }
        }
        self.last_accepted = Some(now);

        if let Some(trigger) = self.last_trigger {
            if now.duration_since(trigger).as_secs_f32() < self.config.cooldown {
                return false;
            }
        }

        match self.first_clap {
            Some(first) => {
                let gap = now.duration_since(first).as_secs_f32();
                if gap > self.config.min_gap && gap < self.config.max_gap {
                    self.first_clap = None;
                    self.last_trigger = Some(now);
                    info!(gap, "double clap detected");
                    true
                } else {
                    if gap >= self.config.max_gap {
                        // Too slow to pair: this clap opens a new window.
                        self.first_clap = Some(now);
                    }
                    // gap <= min_gap: keep waiting on the original first clap.
                    false
                }
            }
            None => {
                self.first_clap = Some(now);
                false
            }
        }
    }

    /// Forget any pending first clap. Hosts call this when resuming after a
    /// pause so a stale half-pair cannot combine with a fresh clap.
    pub fn reset(&mut self) {
        self.first_clap = None;
    }

    pub fn config(&self) -> &DoubleClapConfig {
        &self.config
    }
}

impl Default for DoubleClapTracker {
    fn default() -> Self {
        Self::new(DoubleClapConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn single_clap_does_not_trigger() {
        let mut tracker = DoubleClapTracker::default();
        assert!(!tracker.register_clap(Instant::now()));
    }

    #[test]
    fn pair_inside_window_triggers() {
        let mut tracker = DoubleClapTracker::default();
        let base = Instant::now();
        assert!(!tracker.register_clap(at(base, 0)));
        assert!(tracker.register_clap(at(base, 300)));
    }

    #[test]
    fn debounced_detection_is_dropped_entirely() {
        let mut tracker = DoubleClapTracker::default();
        let base = Instant::now();
        assert!(!tracker.register_clap(at(base, 0)));
        // 30 ms later: inside the 60 ms debounce, dropped.
        assert!(!tracker.register_clap(at(base, 30)));
        // The pending first clap is still the one at t=0.
        assert!(tracker.register_clap(at(base, 300)));
    }

    #[test]
    fn too_fast_pair_keeps_waiting() {
        let mut tracker = DoubleClapTracker::default();
        let base = Instant::now();
        assert!(!tracker.register_clap(at(base, 0)));
        // 80 ms: past debounce but under min_gap, so no trigger yet.
        assert!(!tracker.register_clap(at(base, 80)));
        // A clap at a proper distance from the original still pairs.
        assert!(tracker.register_clap(at(base, 400)));
    }

    #[test]
    fn too_slow_pair_restarts_the_window() {
        let mut tracker = DoubleClapTracker::default();
        let base = Instant::now();
        assert!(!tracker.register_clap(at(base, 0)));
        // 1 s later: outside max_gap, becomes the new first clap.
        assert!(!tracker.register_clap(at(base, 1000)));
        assert!(tracker.register_clap(at(base, 1300)));
    }

    #[test]
    fn cooldown_suppresses_retriggers() {
        let mut tracker = DoubleClapTracker::default();
        let base = Instant::now();
        assert!(!tracker.register_clap(at(base, 0)));
        assert!(tracker.register_clap(at(base, 300)));

        // Inside the 2 s cooldown nothing fires, not even a clean pair.
        assert!(!tracker.register_clap(at(base, 800)));
        assert!(!tracker.register_clap(at(base, 1100)));

        // After cooldown a fresh pair works again.
        assert!(!tracker.register_clap(at(base, 2400)));
        assert!(tracker.register_clap(at(base, 2700)));
    }

    #[test]
    fn reset_clears_pending_first_clap() {
        let mut tracker = DoubleClapTracker::default();
        let base = Instant::now();
        assert!(!tracker.register_clap(at(base, 0)));
        tracker.reset();
        // Would have paired with the forgotten clap; instead it starts over.
        assert!(!tracker.register_clap(at(base, 300)));
        assert!(tracker.register_clap(at(base, 600)));
    }
}

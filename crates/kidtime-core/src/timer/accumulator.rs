//! Elapsed-time accumulator.
//!
//! Two counters driven by one-second ticks: the overall total and the
//! homework subset. The accumulator has no clock of its own; the caller
//! decides when a tick happens.
//!
//! ## State
//!
//! ```text
//! running=false            -> tick() is a no-op
//! running=true             -> total += 1
//! running=true, homework   -> total += 1, homework += 1
//! ```

use serde::{Deserialize, Serialize};

/// Counters captured at the moment the main timer was switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRecord {
    pub total_time: u64,
    pub homework_time: u64,
}

/// Result of flipping the main timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainToggle {
    Started,
    /// The timer was running and is now stopped; carries the counters at
    /// the moment of stopping.
    Stopped(StopRecord),
}

/// Read-only copy of the accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    pub total_time_spent: u64,
    pub homework_time_spent: u64,
    pub is_timer_running: bool,
    pub is_homework_timer: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TimeAccumulator {
    total_time_spent: u64,
    homework_time_spent: u64,
    is_timer_running: bool,
    is_homework_timer: bool,
}

impl TimeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn total(&self) -> u64 {
        self.total_time_spent
    }

    pub fn homework(&self) -> u64 {
        self.homework_time_spent
    }

    pub fn is_running(&self) -> bool {
        self.is_timer_running
    }

    pub fn is_homework(&self) -> bool {
        self.is_homework_timer
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            total_time_spent: self.total_time_spent,
            homework_time_spent: self.homework_time_spent,
            is_timer_running: self.is_timer_running,
            is_homework_timer: self.is_homework_timer,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance by one second. Returns `true` if the counters moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_timer_running {
            return false;
        }
        self.total_time_spent = self.total_time_spent.saturating_add(1);
        if self.is_homework_timer {
            self.homework_time_spent = self.homework_time_spent.saturating_add(1);
        }
        true
    }

    /// Flip the main timer.
    ///
    /// When switching off, the returned [`StopRecord`] holds the counters as
    /// they were at the moment of the toggle.
    pub fn toggle_main(&mut self) -> MainToggle {
        if self.is_timer_running {
            let record = StopRecord {
                total_time: self.total_time_spent,
                homework_time: self.homework_time_spent,
            };
            self.is_timer_running = false;
            MainToggle::Stopped(record)
        } else {
            self.is_timer_running = true;
            MainToggle::Started
        }
    }

    /// Flip the homework flag. Independent of the main timer.
    pub fn toggle_homework(&mut self) -> bool {
        self.is_homework_timer = !self.is_homework_timer;
        self.is_homework_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tick_is_noop_while_stopped() {
        let mut acc = TimeAccumulator::new();
        assert!(!acc.tick());
        assert_eq!(acc.total(), 0);
    }

    #[test]
    fn homework_only_accrues_with_main_timer() {
        let mut acc = TimeAccumulator::new();
        acc.toggle_homework();
        acc.tick();
        assert_eq!(acc.homework(), 0);

        acc.toggle_main();
        acc.tick();
        acc.tick();
        assert_eq!(acc.total(), 2);
        assert_eq!(acc.homework(), 2);
    }

    #[test]
    fn stop_captures_counters_at_toggle() {
        let mut acc = TimeAccumulator::new();
        assert_eq!(acc.toggle_main(), MainToggle::Started);
        for _ in 0..7 {
            acc.tick();
        }
        let toggled = acc.toggle_main();
        assert_eq!(
            toggled,
            MainToggle::Stopped(StopRecord {
                total_time: 7,
                homework_time: 0
            })
        );
        assert!(!acc.is_running());
        // Frozen while stopped.
        acc.tick();
        assert_eq!(acc.total(), 7);
    }

    #[test]
    fn homework_toggle_does_not_touch_main_flag() {
        let mut acc = TimeAccumulator::new();
        assert!(acc.toggle_homework());
        assert!(!acc.is_running());
        assert!(!acc.toggle_homework());
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let mut acc = TimeAccumulator::new();
        acc.toggle_main();
        acc.tick();
        let json = serde_json::to_value(acc.snapshot()).unwrap();
        assert_eq!(json["totalTimeSpent"], 1);
        assert_eq!(json["isTimerRunning"], true);
        assert_eq!(json["isHomeworkTimer"], false);
    }

    proptest! {
        #[test]
        fn total_grows_by_running_ticks(flags in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..200)) {
            let mut acc = TimeAccumulator::new();
            let mut expected_total = 0u64;
            let mut expected_homework = 0u64;
            for (running, homework) in flags {
                if acc.is_running() != running {
                    acc.toggle_main();
                }
                if acc.is_homework() != homework {
                    acc.toggle_homework();
                }
                let before = acc.total();
                acc.tick();
                prop_assert!(acc.total() >= before);
                if running {
                    expected_total += 1;
                    if homework {
                        expected_homework += 1;
                    }
                }
            }
            prop_assert_eq!(acc.total(), expected_total);
            prop_assert_eq!(acc.homework(), expected_homework);
            prop_assert!(acc.homework() <= acc.total());
        }
    }
}

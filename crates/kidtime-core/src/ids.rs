//! Timestamp-based identifiers.
//!
//! Reminders and history entries are keyed by their creation time in
//! milliseconds. Two creations within the same millisecond would collide,
//! so the source never hands out a value that is not strictly greater than
//! the previous one.

use chrono::Utc;

#[derive(Debug, Clone, Default)]
pub struct IdSource {
    last: i64,
}

impl IdSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after `last`, e.g. the largest id restored from storage.
    pub fn starting_after(last: i64) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self) -> i64 {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&mut self, now_ms: i64) -> i64 {
        let id = if now_ms > self.last {
            now_ms
        } else {
            self.last.saturating_add(1)
        };
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_millisecond_yields_distinct_ids() {
        let mut ids = IdSource::new();
        let a = ids.next_at(1_700_000_000_000);
        let b = ids.next_at(1_700_000_000_000);
        assert_eq!(a, 1_700_000_000_000);
        assert_eq!(b, a + 1);
    }

    #[test]
    fn clock_going_backwards_keeps_order() {
        let mut ids = IdSource::starting_after(500);
        assert_eq!(ids.next_at(100), 501);
        assert_eq!(ids.next_at(1_000), 1_000);
    }

    #[test]
    fn wall_clock_ids_increase() {
        let mut ids = IdSource::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
    }
}

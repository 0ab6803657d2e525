//! Reminder scheduling against accumulated time.
//!
//! A reminder's target is a total-seconds value fixed when it is created:
//! `current_total + minutes * 60`. Targets are compared against the
//! accumulator's total, not wall-clock time, so a paused timer pauses every
//! pending reminder too.
//!
//! Reminders live for the session only and are never persisted.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ValidationError;
use crate::ids::IdSource;

/// When a pending reminder counts as due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirePolicy {
    /// Fire only on the tick where the total equals the target. A target the
    /// total never lands on (e.g. added with zero minutes) never fires.
    #[default]
    Exact,
    /// Fire on the first tick where the total is at or past the target.
    Reached,
}

impl FirePolicy {
    pub fn is_due(self, target_time: u64, current_total: u64) -> bool {
        match self {
            FirePolicy::Exact => current_total == target_time,
            FirePolicy::Reached => current_total >= target_time,
        }
    }
}

impl std::fmt::Display for FirePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FirePolicy::Exact => "exact",
            FirePolicy::Reached => "reached",
        })
    }
}

impl std::str::FromStr for FirePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(FirePolicy::Exact),
            "reached" => Ok(FirePolicy::Reached),
            other => Err(ValidationError::InvalidValue {
                field: "fire_policy".into(),
                message: format!("expected 'exact' or 'reached', got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: i64,
    pub text: String,
    pub target_time: u64,
}

impl Reminder {
    /// Whole minutes left until the target, floored and clamped at zero.
    pub fn remaining_minutes(&self, current_total: u64) -> u64 {
        self.target_time.saturating_sub(current_total) / 60
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReminderScheduler {
    pending: Vec<Reminder>,
    policy: FirePolicy,
    ids: IdSource,
}

impl ReminderScheduler {
    pub fn new(policy: FirePolicy) -> Self {
        Self {
            pending: Vec::new(),
            policy,
            ids: IdSource::new(),
        }
    }

    pub fn policy(&self) -> FirePolicy {
        self.policy
    }

    /// Pending reminders in insertion order.
    pub fn pending(&self) -> &[Reminder] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `text` to fire `minutes_from_now` minutes of accumulated time
    /// after `current_total`.
    ///
    /// The stored text keeps the caller's spacing; only the emptiness check
    /// trims. Non-positive minutes are accepted and produce a target at or
    /// before `current_total`.
    ///
    /// # Errors
    /// [`ValidationError::EmptyReminderText`] when `text` is blank. Pending
    /// reminders are left untouched.
    pub fn add(
        &mut self,
        text: &str,
        minutes_from_now: i64,
        current_total: u64,
    ) -> Result<Reminder, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyReminderText);
        }

        let offset_secs = minutes_from_now.saturating_mul(60);
        let target_time = if offset_secs >= 0 {
            current_total.saturating_add(offset_secs as u64)
        } else {
            current_total.saturating_sub(offset_secs.unsigned_abs())
        };

        let reminder = Reminder {
            id: self.ids.next_id(),
            text: text.to_string(),
            target_time,
        };
        info!(
            id = reminder.id,
            target_time, minutes_from_now, "reminder scheduled"
        );
        self.pending.push(reminder.clone());
        Ok(reminder)
    }

    /// Remove and return every reminder due at `current_total`.
    ///
    /// Call once per tick, after the accumulator has advanced.
    pub fn check_and_fire(&mut self, current_total: u64) -> Vec<Reminder> {
        let policy = self.policy;
        let (due, keep): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|r| policy.is_due(r.target_time, current_total));
        self.pending = keep;

        for reminder in &due {
            info!(id = reminder.id, current_total, "reminder fired");
        }
        due
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::locale::Locale;

/// Every state change in a session produces an Event.
/// The presentation layer renders them; notices are the subset it should
/// surface as transient messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        total_time: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        date: NaiveDate,
        total_time: u64,
        homework_time: u64,
        at: DateTime<Utc>,
    },
    HomeworkToggled {
        active: bool,
        at: DateTime<Utc>,
    },
    Ticked {
        total_time: u64,
        homework_time: u64,
    },
    ReminderAdded {
        id: i64,
        text: String,
        target_time: u64,
        at: DateTime<Utc>,
    },
    ReminderFired {
        id: i64,
        text: String,
        target_time: u64,
        at: DateTime<Utc>,
    },
    /// User input was rejected; state is unchanged.
    ValidationFailed {
        message: String,
        at: DateTime<Utc>,
    },
    HistoryUpdated {
        entry: HistoryEntry,
    },
    LocaleChanged {
        locale: Locale,
    },
    /// Persisting the ledger failed. In-memory state is still correct.
    StorageError {
        message: String,
        at: DateTime<Utc>,
    },
}

/// The two kinds of transient notice the presentation layer raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Input was rejected.
    Validation,
    ReminderFired,
}

impl Event {
    /// Which notice, if any, this event should raise. Confirmations and
    /// storage failures carry a message but are not notices.
    pub fn notice_kind(&self) -> Option<NoticeKind> {
        match self {
            Event::ValidationFailed { .. } => Some(NoticeKind::Validation),
            Event::ReminderFired { .. } => Some(NoticeKind::ReminderFired),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::Ticked {
            total_time: 3,
            homework_time: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ticked");
        assert_eq!(json["total_time"], 3);
    }

    #[test]
    fn only_user_facing_events_raise_notices() {
        let fired = Event::ReminderFired {
            id: 1,
            text: "drink water".into(),
            target_time: 60,
            at: Utc::now(),
        };
        assert_eq!(fired.notice_kind(), Some(NoticeKind::ReminderFired));
        let rejected = Event::ValidationFailed {
            message: "empty".into(),
            at: Utc::now(),
        };
        assert_eq!(rejected.notice_kind(), Some(NoticeKind::Validation));
        let failed_save = Event::StorageError {
            message: "disk full".into(),
            at: Utc::now(),
        };
        assert_eq!(failed_save.notice_kind(), None);
        assert_eq!(
            Event::LocaleChanged { locale: Locale::Ar }.notice_kind(),
            None
        );
    }
}

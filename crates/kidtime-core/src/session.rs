//! One tracking session.
//!
//! [`Session`] owns every piece of mutable state: the accumulator, the
//! pending reminders, the history ledger and the store the ledger is saved
//! to. Nothing is shared; callers drive it from a single thread by calling
//! [`Session::tick`] once per pulse and forwarding user intents.
//!
//! ## Lifecycle
//!
//! ```text
//! open(store)  -> ledger loaded from HISTORY_KEY
//! tick()       -> accumulate, then fire due reminders
//! toggle_main  -> on stop: upsert today, save
//! ```
//!
//! Storage failures never abort a session. They are logged and reported as
//! [`Event::StorageError`]. If the stored ledger could not be read on open,
//! nothing is written back until a later read succeeds, so days recorded by
//! earlier sessions are never overwritten with a partial ledger.

use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::events::Event;
use crate::history::{HistoryEntry, HistoryLedger, HISTORY_KEY};
use crate::locale::{Direction, Locale};
use crate::reminders::{FirePolicy, ReminderScheduler};
use crate::storage::{Config, HistoryStore};
use crate::timer::{CounterSnapshot, MainToggle, TimeAccumulator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub locale: Locale,
    pub fire_policy: FirePolicy,
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            locale: config.locale,
            fire_policy: config.reminders.fire_policy,
        }
    }
}

/// A pending reminder as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderView {
    pub id: i64,
    pub text: String,
    pub target_time: u64,
    pub remaining_minutes: u64,
}

/// Read-only view of the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub counters: CounterSnapshot,
    pub reminders: Vec<ReminderView>,
    pub history: Vec<HistoryEntry>,
    pub locale: Locale,
    pub direction: Direction,
}

pub struct Session<S: HistoryStore> {
    accumulator: TimeAccumulator,
    scheduler: ReminderScheduler,
    ledger: HistoryLedger,
    locale: Locale,
    store: S,
    /// False while the stored ledger is unread because `load` failed.
    history_loaded: bool,
}

impl<S: HistoryStore> Session<S> {
    /// Start a session, restoring the ledger from `store`.
    ///
    /// An absent or malformed record yields an empty ledger. A failed read
    /// also starts empty, but saving stays blocked until the record can be
    /// read and merged.
    pub fn open(store: S, options: SessionOptions) -> Self {
        let (blob, history_loaded) = match store.load(HISTORY_KEY) {
            Ok(blob) => (blob, true),
            Err(e) => {
                error!(error = %e, "failed to read history, starting empty");
                (None, false)
            }
        };
        let ledger = HistoryLedger::deserialize(blob.as_deref());
        info!(days = ledger.len(), locale = %options.locale, "session opened");

        Self {
            accumulator: TimeAccumulator::new(),
            scheduler: ReminderScheduler::new(options.fire_policy),
            ledger,
            locale: options.locale,
            store,
            history_loaded,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn accumulator(&self) -> &TimeAccumulator {
        &self.accumulator
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_running(&self) -> bool {
        self.accumulator.is_running()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let total = self.accumulator.total();
        SessionSnapshot {
            counters: self.accumulator.snapshot(),
            reminders: self
                .scheduler
                .pending()
                .iter()
                .map(|r| ReminderView {
                    id: r.id,
                    text: r.text.clone(),
                    target_time: r.target_time,
                    remaining_minutes: r.remaining_minutes(total),
                })
                .collect(),
            history: self.ledger.entries().to_vec(),
            locale: self.locale,
            direction: self.locale.direction(),
        }
    }

    /// Localized message for events that raise a notice.
    pub fn notice(&self, event: &Event) -> Option<String> {
        let t = self.locale.strings();
        match event {
            Event::ReminderFired { text, .. } => Some(format!("{}: {}", t.set_reminder, text)),
            Event::ReminderAdded { text, .. } => Some(format!("{}: {}", t.reminder_added, text)),
            Event::ValidationFailed { .. } => Some(t.reminder_empty.to_string()),
            Event::StorageError { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// One pulse: advance the counters, then fire reminders due at the new
    /// total. Returns nothing while the main timer is stopped.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.accumulator.tick() {
            return Vec::new();
        }
        let total = self.accumulator.total();
        let homework = self.accumulator.homework();
        debug!(total, homework, "tick");

        let mut events = vec![Event::Ticked {
            total_time: total,
            homework_time: homework,
        }];
        let now = Utc::now();
        events.extend(
            self.scheduler
                .check_and_fire(total)
                .into_iter()
                .map(|r| Event::ReminderFired {
                    id: r.id,
                    text: r.text,
                    target_time: r.target_time,
                    at: now,
                }),
        );
        events
    }

    /// Flip the main timer, dating any history write with the local date.
    pub fn toggle_main(&mut self) -> Vec<Event> {
        self.toggle_main_on(Local::now().date_naive())
    }

    /// Flip the main timer. Stopping upserts `today` with the counters at
    /// the moment of the toggle and saves the ledger.
    pub fn toggle_main_on(&mut self, today: NaiveDate) -> Vec<Event> {
        match self.accumulator.toggle_main() {
            MainToggle::Started => {
                info!(total = self.accumulator.total(), "timer started");
                vec![Event::TimerStarted {
                    total_time: self.accumulator.total(),
                    at: Utc::now(),
                }]
            }
            MainToggle::Stopped(record) => {
                info!(
                    total = record.total_time,
                    homework = record.homework_time,
                    "timer stopped"
                );
                let mut entry = self
                    .ledger
                    .upsert(today, record.total_time, record.homework_time)
                    .clone();
                let storage_error = self.persist();
                // A retried read may have merged in the stored entry for today.
                if let Some(merged) = self.ledger.get(today) {
                    entry = merged.clone();
                }
                let mut events = vec![
                    Event::TimerStopped {
                        date: today,
                        total_time: record.total_time,
                        homework_time: record.homework_time,
                        at: Utc::now(),
                    },
                    Event::HistoryUpdated { entry },
                ];
                events.extend(storage_error);
                events
            }
        }
    }

    /// Stop the main timer if it is running. Used on teardown so the day's
    /// totals are not lost.
    pub fn stop_on(&mut self, today: NaiveDate) -> Vec<Event> {
        if self.accumulator.is_running() {
            self.toggle_main_on(today)
        } else {
            Vec::new()
        }
    }

    pub fn toggle_homework(&mut self) -> Event {
        let active = self.accumulator.toggle_homework();
        info!(active, "homework timer toggled");
        Event::HomeworkToggled {
            active,
            at: Utc::now(),
        }
    }

    /// Schedule a reminder relative to the current total.
    ///
    /// Blank text produces [`Event::ValidationFailed`] and leaves the pending
    /// set unchanged.
    pub fn add_reminder(&mut self, text: &str, minutes_from_now: i64) -> Event {
        match self
            .scheduler
            .add(text, minutes_from_now, self.accumulator.total())
        {
            Ok(reminder) => Event::ReminderAdded {
                id: reminder.id,
                text: reminder.text,
                target_time: reminder.target_time,
                at: Utc::now(),
            },
            Err(e) => {
                debug!(error = %e, "reminder rejected");
                Event::ValidationFailed {
                    message: e.to_string(),
                    at: Utc::now(),
                }
            }
        }
    }

    pub fn set_locale(&mut self, locale: Locale) -> Event {
        self.locale = locale;
        Event::LocaleChanged { locale }
    }

    /// Retry a read that failed on open and fold this session's entries
    /// into what is stored.
    fn reload_history(&mut self) -> crate::error::Result<()> {
        let blob = self.store.load(HISTORY_KEY)?;
        let mut stored = HistoryLedger::deserialize(blob.as_deref());
        for entry in self.ledger.entries() {
            stored.upsert(entry.date, entry.total_time, entry.homework_time);
        }
        info!(days = stored.len(), "history read on retry");
        self.ledger = stored;
        self.history_loaded = true;
        Ok(())
    }

    fn persist(&mut self) -> Option<Event> {
        let result = if self.history_loaded {
            Ok(())
        } else {
            self.reload_history()
        };
        let result = result.and_then(|()| {
            self.ledger
                .serialize()
                .map_err(crate::error::CoreError::from)
                .and_then(|blob| self.store.save(HISTORY_KEY, &blob))
        });
        match result {
            Ok(()) => None,
            Err(e) => {
                error!(error = %e, "failed to save history");
                Some(Event::StorageError {
                    message: e.to_string(),
                    at: Utc::now(),
                })
            }
        }
    }
}

//! # Kidtime Core Library
//!
//! Time tracking for a single child on a single device: an overall timer, a
//! homework sub-timer, reminders keyed to accumulated time, and a per-day
//! history of totals.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven accumulator plus a cancellable one-second
//!   [`Ticker`]. The accumulator has no clock; the caller feeds it pulses.
//! - **Reminders**: pending (text, target-seconds) entries checked after
//!   every tick.
//! - **History**: one entry per calendar day, saved to a key-value store on
//!   every change.
//! - **Session**: the owned state object that ties the three together.
//!
//! ## Key Components
//!
//! - [`Session`]: entry point for presentation layers
//! - [`HistoryStore`]: persistence seam, backed by [`Database`] or [`MemoryStore`]
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod history;
pub mod ids;
pub mod locale;
pub mod reminders;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{Event, NoticeKind};
pub use history::{HistoryEntry, HistoryLedger, HistorySummary, HISTORY_KEY};
pub use locale::{Direction, Locale, Strings};
pub use reminders::{FirePolicy, Reminder, ReminderScheduler};
pub use session::{ReminderView, Session, SessionOptions, SessionSnapshot};
pub use storage::{Config, Database, HistoryStore, MemoryStore};
pub use timer::{format_hms, CounterSnapshot, Pulse, StopRecord, TimeAccumulator, Ticker};

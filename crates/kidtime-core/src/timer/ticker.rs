//! Cancellable one-second pulse source.
//!
//! The ticker owns a tokio interval task that pushes [`Pulse`] values into
//! an unbounded channel. The receiving side is drained by whoever owns the
//! session, so every state mutation still happens on one logical thread.
//!
//! Each arming bumps a generation counter. Pulses already queued from an
//! earlier arming are recognisable via [`Ticker::is_current`] and must be
//! dropped by the consumer.
//!
//! Dropping the ticker aborts the task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub generation: u64,
    pub seq: u64,
}

pub type PulseReceiver = mpsc::UnboundedReceiver<Pulse>;

pub struct Ticker {
    period: Duration,
    tx: mpsc::UnboundedSender<Pulse>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl Ticker {
    /// Create a disarmed ticker and the receiver its pulses arrive on.
    pub fn new(period: Duration) -> (Self, PulseReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let period = if period.is_zero() {
            DEFAULT_TICK_INTERVAL
        } else {
            period
        };
        (
            Self {
                period,
                tx,
                handle: None,
                generation: 0,
            },
            rx,
        )
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether a pulse belongs to the current arming.
    pub fn is_current(&self, pulse: &Pulse) -> bool {
        self.is_armed() && pulse.generation == self.generation
    }

    /// Start pulsing. Any previously armed task is aborted first.
    ///
    /// The first pulse arrives one full period after arming. Must be called
    /// from within a tokio runtime.
    pub fn arm(&mut self) {
        self.disarm();
        self.generation = self.generation.wrapping_add(1);

        let tx = self.tx.clone();
        let period = self.period;
        let generation = self.generation;
        let first = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut seq: u64 = 0;
            loop {
                interval.tick().await;
                seq = seq.wrapping_add(1);
                if tx.send(Pulse { generation, seq }).is_err() {
                    break;
                }
            }
        });
        debug!(generation, period_ms = period.as_millis() as u64, "ticker armed");
        self.handle = Some(handle);
    }

    /// Stop pulsing. Safe to call when not armed.
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(generation = self.generation, "ticker disarmed");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_pulse_arrives_after_one_period() {
        let (mut ticker, mut rx) = Ticker::new(Duration::from_secs(1));
        ticker.arm();

        time::advance(Duration::from_millis(999)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        time::advance(Duration::from_millis(1)).await;
        let pulse = rx.recv().await.unwrap();
        assert_eq!(pulse.seq, 1);
        assert!(ticker.is_current(&pulse));
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_invalidates_old_generation() {
        let (mut ticker, mut rx) = Ticker::new(Duration::from_secs(1));
        ticker.arm();
        time::advance(Duration::from_secs(1)).await;
        let stale = rx.recv().await.unwrap();

        ticker.arm();
        assert!(!ticker.is_current(&stale));

        time::advance(Duration::from_secs(1)).await;
        let fresh = rx.recv().await.unwrap();
        assert!(ticker.is_current(&fresh));
        assert_eq!(fresh.seq, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_stops_pulses() {
        let (mut ticker, mut rx) = Ticker::new(Duration::from_secs(1));
        ticker.arm();
        ticker.disarm();
        assert!(!ticker.is_armed());

        time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_releases_the_task() {
        let (mut ticker, mut rx) = Ticker::new(Duration::from_secs(1));
        ticker.arm();
        drop(ticker);

        time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        // Task aborted and every sender dropped: the channel closes.
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn zero_period_falls_back_to_default() {
        let (ticker, _rx) = Ticker::new(Duration::ZERO);
        assert_eq!(ticker.period(), DEFAULT_TICK_INTERVAL);
    }
}

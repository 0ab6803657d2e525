mod accumulator;
mod ticker;

pub use accumulator::{CounterSnapshot, MainToggle, StopRecord, TimeAccumulator};
pub use ticker::{Pulse, PulseReceiver, Ticker, DEFAULT_TICK_INTERVAL};

/// Format a second count as `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

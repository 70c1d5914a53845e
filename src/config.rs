//! Runtime tuning for the dashboard loop.
//!
//! Bootstrap code (pins, bus bring-up) owns everything else; this structure
//! only carries the cadence and redundancy knobs the control core needs.
use crate::protocol::transport::{
    DRIVE_SHIFT_REPEAT, RECEIVE_TIMEOUT_MS, TICK_PERIOD_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DashboardConfig {
    /// Upper bound on the inbound wait of a single tick (ms).
    pub receive_timeout_ms: u32,
    /// Pause between two ticks in [`Dashboard::run`](crate::runtime::Dashboard::run) (ms).
    pub tick_period_ms: u32,
    /// Number of identical drive-shift frames queued per gear change.
    pub drive_shift_repeat: u8,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            receive_timeout_ms: RECEIVE_TIMEOUT_MS,
            tick_period_ms: TICK_PERIOD_MS,
            drive_shift_repeat: DRIVE_SHIFT_REPEAT,
        }
    }
}

impl DashboardConfig {
    pub fn with_receive_timeout_ms(mut self, millis: u32) -> Self {
        self.receive_timeout_ms = millis;
        self
    }

    pub fn with_tick_period_ms(mut self, millis: u32) -> Self {
        self.tick_period_ms = millis;
        self
    }

    /// Repetition count for drive-shift commands. Clamped to at least one frame.
    pub fn with_drive_shift_repeat(mut self, repeat: u8) -> Self {
        self.drive_shift_repeat = repeat.max(1);
        self
    }
}

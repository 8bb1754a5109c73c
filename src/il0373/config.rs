//! Timing configuration for the panel protocol

/// Shortest reset pulse the controller reliably latches
pub const RESET_HOLD_MIN_MS: u32 = 10;

const BUSY_POLL_INTERVAL_MS: u32 = 100;
const BUSY_WAIT_TIMEOUT_MS: u32 = 5000; // 5 seconds timeout
const REFRESH_SETTLE_MS: u32 = 1;
const POWER_OFF_SETTLE_MS: u32 = 100;

/// Delays and limits used while talking to the panel.
///
/// The defaults match the vendor reference flow, except that the busy wait is
/// bounded. Use [`PanelConfig::unbounded`] to block on the busy line forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    /// How long the reset line is held low and then high, never below [`RESET_HOLD_MIN_MS`]
    pub reset_hold_ms: u32,
    /// Sleep between two reads of the busy line
    pub busy_poll_interval_ms: u32,
    /// Give up waiting on the busy line after this long, `None` waits forever
    pub busy_timeout_ms: Option<u32>,
    /// Pause between the refresh command and the first busy poll
    pub refresh_settle_ms: u32,
    /// Pause between power off and deep sleep
    pub power_off_settle_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            reset_hold_ms: RESET_HOLD_MIN_MS,
            busy_poll_interval_ms: BUSY_POLL_INTERVAL_MS,
            busy_timeout_ms: Some(BUSY_WAIT_TIMEOUT_MS),
            refresh_settle_ms: REFRESH_SETTLE_MS,
            power_off_settle_ms: POWER_OFF_SETTLE_MS,
        }
    }
}

impl PanelConfig {
    /// Defaults with an unbounded busy wait
    pub fn unbounded() -> Self {
        PanelConfig {
            busy_timeout_ms: None,
            ..Self::default()
        }
    }

    /// Reset pulse length, clamped to [`RESET_HOLD_MIN_MS`]
    pub fn with_reset_hold_ms(mut self, ms: u32) -> Self {
        self.reset_hold_ms = ms.max(RESET_HOLD_MIN_MS);
        self
    }

    /// Busy poll interval, at least 1 ms
    pub fn with_busy_poll_interval_ms(mut self, ms: u32) -> Self {
        self.busy_poll_interval_ms = ms.max(1);
        self
    }

    /// Busy wait limit, `None` for no limit
    pub fn with_busy_timeout_ms(mut self, ms: Option<u32>) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    /// Pause after the refresh command
    pub fn with_refresh_settle_ms(mut self, ms: u32) -> Self {
        self.refresh_settle_ms = ms;
        self
    }

    /// Pause after power off
    pub fn with_power_off_settle_ms(mut self, ms: u32) -> Self {
        self.power_off_settle_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_reference_timing() {
        let config = PanelConfig::default();
        assert_eq!(config.reset_hold_ms, 10);
        assert_eq!(config.busy_poll_interval_ms, 100);
        assert_eq!(config.refresh_settle_ms, 1);
        assert_eq!(config.power_off_settle_ms, 100);
        assert_eq!(config.busy_timeout_ms, Some(5000));
        assert_eq!(PanelConfig::unbounded().busy_timeout_ms, None);
    }

    #[test]
    fn reset_hold_never_drops_below_minimum() {
        assert_eq!(PanelConfig::default().with_reset_hold_ms(0).reset_hold_ms, 10);
        assert_eq!(PanelConfig::default().with_reset_hold_ms(25).reset_hold_ms, 25);
        assert_eq!(
            PanelConfig::default()
                .with_busy_poll_interval_ms(0)
                .busy_poll_interval_ms,
            1
        );
    }
}

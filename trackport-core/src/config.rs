//! Bridge configuration
//!
//! The firmware generates a [`BridgeConfig`] constant from `bridge.toml` at
//! build time; everything here therefore stays const-constructible.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sample rates the PS/2 Set Sample Rate command accepts (reports/s)
pub const VALID_SAMPLE_RATES: [u8; 7] = [10, 20, 40, 60, 80, 100, 200];

/// How reports are obtained from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReportMode {
    /// The device pushes reports as it moves
    #[default]
    Stream,
    /// The host polls with Read Data
    Remote,
}

/// Configuration for link timing, bring-up and the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    pub mode: ReportMode,
    /// Set Sample Rate argument, `None` keeps the device default
    pub sample_rate: Option<u8>,
    /// Motion counts per wheel tick while scroll emulation is held
    pub scroll_divisor: u8,
    /// Deadline for clocking out one host-to-device byte
    pub tx_timeout_ms: u32,
    /// Deadline for ACK and ID bytes during bring-up
    pub ack_timeout_ms: u32,
    /// Deadline for the post-reset self-test result
    pub self_test_timeout_ms: u32,
    /// How long one loop iteration waits for the first report byte
    pub report_wait_ms: u32,
    /// Deadline for the remaining bytes of a report
    pub report_byte_timeout_ms: u32,
    /// Idle time before the first jiggle, and between later ones
    pub jiggle_interval_ms: u32,
    /// Jiggles per idle period
    pub jiggle_max: u8,
    /// Interval between status-request heartbeats in stream mode
    pub heartbeat_interval_ms: u32,
    /// Heartbeats per session
    pub heartbeat_max: u16,
}

impl BridgeConfig {
    pub const fn new() -> Self {
        Self {
            mode: ReportMode::Stream,
            sample_rate: None,
            scroll_divisor: 8,
            tx_timeout_ms: 500,
            ack_timeout_ms: 25,
            self_test_timeout_ms: 500,
            report_wait_ms: 10,
            report_byte_timeout_ms: 20,
            jiggle_interval_ms: 30_000,
            jiggle_max: 20,
            heartbeat_interval_ms: 30_000,
            heartbeat_max: 60,
        }
    }

    /// Check values the device or the loop cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(rate) = self.sample_rate {
            if !VALID_SAMPLE_RATES.contains(&rate) {
                return Err(ConfigError::InvalidSampleRate(rate));
            }
        }
        if self.scroll_divisor == 0 {
            return Err(ConfigError::ZeroScrollDivisor);
        }
        if self.tx_timeout_ms == 0
            || self.ack_timeout_ms == 0
            || self.self_test_timeout_ms == 0
            || self.report_byte_timeout_ms == 0
        {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    InvalidSampleRate(u8),
    ZeroScrollDivisor,
    ZeroTimeout,
}

/// Operator switch positions, sampled once per loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Switches {
    /// Swap primary buttons and auxiliary button roles
    pub left_handed: bool,
    /// Enable idle prevention
    pub jiggle: bool,
    /// Turn the extra button into a scroll modifier
    pub scroll_emulation: bool,
}

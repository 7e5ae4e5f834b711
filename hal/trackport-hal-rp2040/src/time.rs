//! Monotonic clock on the embassy time driver

use embassy_time::{block_for, Duration, Instant};
use trackport_hal::Monotonic;

/// Microsecond clock backed by the RP2040 timer peripheral
///
/// Safe to use from either core; the time driver reads the shared
/// 64-bit timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }

    fn delay_us(&self, us: u32) {
        block_for(Duration::from_micros(u64::from(us)));
    }
}

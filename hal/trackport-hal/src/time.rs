//! Monotonic time source for bounded busy-waits
//!
//! There is no scheduler underneath the link code; every wait is a spin
//! against a deadline taken from this clock.

/// Free-running microsecond clock
pub trait Monotonic {
    /// Microseconds since an arbitrary fixed origin; never goes backwards
    fn now_us(&self) -> u64;

    /// Milliseconds since the same origin
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Spin for at least `us` microseconds
    fn delay_us(&self, us: u32) {
        let deadline = Deadline::after_us(self, u64::from(us));
        while !deadline.expired(self) {
            core::hint::spin_loop();
        }
    }
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }

    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn delay_us(&self, us: u32) {
        (**self).delay_us(us)
    }
}

/// Point in time after which a bounded wait gives up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    expires_at_us: u64,
}

impl Deadline {
    /// Deadline `us` microseconds from now
    pub fn after_us<C: Monotonic + ?Sized>(clock: &C, us: u64) -> Self {
        Self {
            expires_at_us: clock.now_us().saturating_add(us),
        }
    }

    /// Deadline `ms` milliseconds from now
    pub fn after_ms<C: Monotonic + ?Sized>(clock: &C, ms: u32) -> Self {
        Self::after_us(clock, u64::from(ms) * 1000)
    }

    /// Check whether the deadline has passed
    pub fn expired<C: Monotonic + ?Sized>(&self, clock: &C) -> bool {
        clock.now_us() >= self.expires_at_us
    }

    /// Spin until `condition` holds or the deadline passes
    ///
    /// Returns `true` if the condition was met in time.
    pub fn wait_for<C, F>(&self, clock: &C, mut condition: F) -> bool
    where
        C: Monotonic + ?Sized,
        F: FnMut() -> bool,
    {
        loop {
            if condition() {
                return true;
            }
            if self.expired(clock) {
                return false;
            }
            core::hint::spin_loop();
        }
    }
}

//! Idle prevention
//!
//! When the pointer has been still for a while, emit a tiny out-and-back
//! nudge so the host does not lock or sleep. The nth nudge after the last
//! real activity fires once `interval * n` has elapsed, up to a cap; after
//! that the jiggler stays quiet until the user moves again.

/// Nudge emitted by the jiggler, as two motion events on X
pub const NUDGE: [(i16, i16); 2] = [(1, 0), (-1, 0)];

/// Jiggler phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JiggleState {
    /// No nudge since the last real activity
    Idle,
    /// This many nudges sent since the last real activity
    Armed(u8),
}

/// Schedules nudges relative to the last real activity
#[derive(Debug, Clone)]
pub struct Jiggler {
    interval_ms: u64,
    max: u8,
    last_activity_ms: u64,
    fired: u8,
}

impl Jiggler {
    pub fn new(interval_ms: u32, max: u8) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            max,
            last_activity_ms: 0,
            fired: 0,
        }
    }

    /// Real user input happened
    pub fn note_activity(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
        self.fired = 0;
    }

    /// Whether a nudge is due now
    ///
    /// Never fires while disabled or while the host is suspended. A due
    /// nudge counts as sent.
    pub fn poll(&mut self, now_ms: u64, enabled: bool, suspended: bool) -> bool {
        if !enabled || suspended || self.fired >= self.max {
            return false;
        }
        let elapsed = now_ms.saturating_sub(self.last_activity_ms);
        if elapsed > self.interval_ms * (u64::from(self.fired) + 1) {
            self.fired += 1;
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> JiggleState {
        match self.fired {
            0 => JiggleState::Idle,
            n => JiggleState::Armed(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_interval() {
        let mut jiggler = Jiggler::new(30_000, 20);
        assert!(!jiggler.poll(30_000, true, false));
        assert!(jiggler.poll(30_001, true, false));
        assert_eq!(jiggler.state(), JiggleState::Armed(1));
        assert!(!jiggler.poll(30_002, true, false));
        assert!(!jiggler.poll(60_000, true, false));
        assert!(jiggler.poll(60_001, true, false));
    }

    #[test]
    fn test_capped_until_activity() {
        let mut jiggler = Jiggler::new(1_000, 3);
        let mut fired = 0;
        for now in (0..20_000).step_by(100) {
            if jiggler.poll(now, true, false) {
                fired += 1;
            }
        }
        assert_eq!(fired, 3);

        jiggler.note_activity(20_000);
        assert_eq!(jiggler.state(), JiggleState::Idle);
        assert!(jiggler.poll(21_001, true, false));
    }

    #[test]
    fn test_suppressed_when_disabled_or_suspended() {
        let mut jiggler = Jiggler::new(1_000, 20);
        assert!(!jiggler.poll(5_000, false, false));
        assert!(!jiggler.poll(5_000, true, true));
        assert_eq!(jiggler.state(), JiggleState::Idle);
        assert!(jiggler.poll(5_000, true, false));
    }

    #[test]
    fn test_nudge_returns_to_origin() {
        let (x, y) = NUDGE
            .iter()
            .fold((0, 0), |(x, y), (dx, dy)| (x + dx, y + dy));
        assert_eq!((x, y), (0, 0));
    }
}

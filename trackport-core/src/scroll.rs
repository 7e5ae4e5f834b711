//! Scroll emulation
//!
//! While the scroll modifier is held, vertical motion is divided down into
//! wheel ticks instead of moving the pointer. Small movements accumulate
//! until they add up to a tick; the remainder carries over so slow rolling
//! still scrolls.

/// Divides vertical motion into wheel ticks
#[derive(Debug, Clone)]
pub struct ScrollEmulator {
    divisor: i16,
    accumulator: i16,
}

impl ScrollEmulator {
    /// `divisor` counts per tick; zero is treated as one
    pub fn new(divisor: u8) -> Self {
        Self {
            divisor: i16::from(divisor.max(1)),
            accumulator: 0,
        }
    }

    /// Feed one report's vertical delta (host orientation)
    ///
    /// Returns the wheel ticks to emit, if any.
    pub fn feed(&mut self, dy: i16) -> Option<i16> {
        let ticks = dy / self.divisor;
        if ticks != 0 {
            self.accumulator = 0;
            return Some(ticks);
        }

        self.accumulator += dy;
        let ticks = self.accumulator / self.divisor;
        if ticks != 0 {
            self.accumulator %= self.divisor;
            Some(ticks)
        } else {
            None
        }
    }

    /// Drop any partial tick; called whenever the modifier is not held
    pub fn reset(&mut self) {
        self.accumulator = 0;
    }

    pub fn accumulator(&self) -> i16 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_large_motion_ticks_directly() {
        let mut scroll = ScrollEmulator::new(8);
        assert_eq!(scroll.feed(24), Some(3));
        assert_eq!(scroll.feed(-17), Some(-2));
        assert_eq!(scroll.accumulator(), 0);
    }

    #[test]
    fn test_small_motion_accumulates() {
        let mut scroll = ScrollEmulator::new(8);
        let ticks: std::vec::Vec<_> = [6, 6, 6, 6].iter().map(|&dy| scroll.feed(dy)).collect();
        assert_eq!(ticks, [None, Some(1), Some(1), Some(1)]);
        assert_eq!(scroll.accumulator(), 0);
    }

    #[test]
    fn test_direct_tick_clears_partial() {
        let mut scroll = ScrollEmulator::new(8);
        assert_eq!(scroll.feed(5), None);
        assert_eq!(scroll.feed(9), Some(1));
        assert_eq!(scroll.accumulator(), 0);
        assert_eq!(scroll.feed(5), None);
    }

    #[test]
    fn test_reset_drops_partial() {
        let mut scroll = ScrollEmulator::new(8);
        scroll.feed(7);
        scroll.reset();
        assert_eq!(scroll.feed(7), None);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut scroll = ScrollEmulator::new(8);
        assert_eq!(scroll.feed(5), None);
        assert_eq!(scroll.feed(-5), None);
        assert_eq!(scroll.accumulator(), 0);
    }

    proptest! {
        #[test]
        fn prop_accumulator_stays_below_divisor(
            divisor in 1u8..32,
            deltas in proptest::collection::vec(-20i16..20, 0..64),
        ) {
            let mut scroll = ScrollEmulator::new(divisor);
            for dy in deltas {
                scroll.feed(dy);
                prop_assert!(scroll.accumulator().abs() < i16::from(divisor));
            }
        }

        #[test]
        fn prop_slow_roll_conserves_distance(steps in 1usize..100) {
            // Same-sign sub-tick motion never loses counts
            let mut scroll = ScrollEmulator::new(8);
            let mut ticks = 0i16;
            for _ in 0..steps {
                ticks += scroll.feed(3).unwrap_or(0);
            }
            prop_assert_eq!(ticks * 8 + scroll.accumulator(), 3 * steps as i16);
        }
    }
}

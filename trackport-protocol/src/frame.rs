//! Frame encoding and decoding for the PS/2 link.
//!
//! Frame format (device clocks every bit, data is valid on the falling edge):
//! - START (1 bit): always 0
//! - DATA (8 bits): least significant bit first
//! - PARITY (1 bit): odd parity over the data bits
//! - STOP (1 bit): always 1

/// Number of bits in one frame
pub const FRAME_BITS: usize = 11;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Start bit was 1
    BadStart,
    /// Parity bit did not make the number of ones odd
    BadParity,
    /// Stop bit was 0
    BadStop,
}

/// Parity bit for `byte` such that data plus parity has an odd number of ones
pub fn odd_parity(byte: u8) -> bool {
    byte.count_ones() % 2 == 0
}

/// Line levels of the frame carrying `byte`, in transmission order
///
/// `true` is a released (high) data line.
pub fn encode(byte: u8) -> [bool; FRAME_BITS] {
    let mut bits = [false; FRAME_BITS];
    for (i, bit) in bits[1..9].iter_mut().enumerate() {
        *bit = byte & (1 << i) != 0;
    }
    bits[9] = odd_parity(byte);
    bits[10] = true;
    bits
}

/// Position of the next expected bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RxState {
    /// Idle, next edge carries the start bit
    Start,
    /// Next edge carries data bit `n` (0-7)
    Data(u8),
    /// Next edge carries the parity bit
    Parity,
    /// Next edge carries the stop bit
    Stop,
}

/// Bit-at-a-time frame decoder
///
/// Fed one sampled data level per falling clock edge. Never allocates and
/// never blocks, so it can run in interrupt context.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    state: RxState,
    shift: u8,
    /// Expected parity bit for the data seen so far
    parity: bool,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a decoder waiting for a start bit
    pub const fn new() -> Self {
        Self {
            state: RxState::Start,
            shift: 0,
            parity: true,
        }
    }

    /// Drop any partial frame and wait for the next start bit
    pub fn reset(&mut self) {
        self.state = RxState::Start;
        self.shift = 0;
        self.parity = true;
    }

    /// True when no frame is in progress
    pub fn is_idle(&self) -> bool {
        self.state == RxState::Start
    }

    /// Feed the data line level sampled on one falling clock edge
    ///
    /// Returns `Ok(Some(byte))` on the stop bit of a valid frame, `Ok(None)`
    /// while the frame is incomplete, or `Err` when a marker or parity check
    /// fails. Every error leaves the decoder idle.
    pub fn feed(&mut self, data_high: bool) -> Result<Option<u8>, FrameError> {
        match self.state {
            RxState::Start => {
                if data_high {
                    return Err(self.fail(FrameError::BadStart));
                }
                self.state = RxState::Data(0);
                Ok(None)
            }
            RxState::Data(n) => {
                self.shift >>= 1;
                if data_high {
                    self.shift |= 0x80;
                    self.parity = !self.parity;
                }
                self.state = if n == 7 {
                    RxState::Parity
                } else {
                    RxState::Data(n + 1)
                };
                Ok(None)
            }
            RxState::Parity => {
                if data_high != self.parity {
                    return Err(self.fail(FrameError::BadParity));
                }
                self.state = RxState::Stop;
                Ok(None)
            }
            RxState::Stop => {
                if !data_high {
                    return Err(self.fail(FrameError::BadStop));
                }
                let byte = self.shift;
                self.reset();
                Ok(Some(byte))
            }
        }
    }

    fn fail(&mut self, error: FrameError) -> FrameError {
        self.reset();
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Feed a whole frame, returning the final result
    fn feed_frame(decoder: &mut FrameDecoder, bits: &[bool]) -> Result<Option<u8>, FrameError> {
        let mut last = Ok(None);
        for &bit in bits {
            last = decoder.feed(bit);
            if last.is_err() {
                break;
            }
        }
        last
    }

    #[test]
    fn test_odd_parity() {
        assert!(odd_parity(0x00)); // zero ones -> parity 1
        assert!(!odd_parity(0x01));
        assert!(odd_parity(0x03));
        assert!(odd_parity(0xFF));
        assert!(!odd_parity(0xFE)); // seven ones
    }

    #[test]
    fn test_encode_ack() {
        // 0xFA = 1111_1010, six ones -> parity 1
        let bits = encode(0xFA);
        assert!(!bits[0]);
        assert_eq!(&bits[1..9], &[false, true, false, true, true, true, true, true]);
        assert!(bits[9]);
        assert!(bits[10]);
    }

    #[test]
    fn test_decode_self_test_passed() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(feed_frame(&mut decoder, &encode(0xAA)), Ok(Some(0xAA)));
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_bad_start_resets() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(true), Err(FrameError::BadStart));
        assert!(decoder.is_idle());

        // Decoder is usable straight away
        assert_eq!(feed_frame(&mut decoder, &encode(0x42)), Ok(Some(0x42)));
    }

    #[test]
    fn test_error_mid_frame_clears_accumulator() {
        let mut decoder = FrameDecoder::new();
        let mut bits = encode(0xFF);
        bits[10] = false;
        assert_eq!(feed_frame(&mut decoder, &bits), Err(FrameError::BadStop));

        // Previous data bits must not leak into the next byte
        assert_eq!(feed_frame(&mut decoder, &encode(0x00)), Ok(Some(0x00)));
    }

    proptest! {
        #[test]
        fn prop_valid_frame_decodes(byte in any::<u8>()) {
            let mut decoder = FrameDecoder::new();
            let bits = encode(byte);
            for &bit in &bits[..FRAME_BITS - 1] {
                prop_assert_eq!(decoder.feed(bit), Ok(None));
            }
            prop_assert_eq!(decoder.feed(bits[FRAME_BITS - 1]), Ok(Some(byte)));
        }

        #[test]
        fn prop_corrupt_frame_rejected(byte in any::<u8>(), which in 0usize..3) {
            let mut bits = encode(byte);
            let (index, expected) = match which {
                0 => (0, FrameError::BadStart),
                1 => (9, FrameError::BadParity),
                _ => (10, FrameError::BadStop),
            };
            bits[index] = !bits[index];

            let mut decoder = FrameDecoder::new();
            prop_assert_eq!(feed_frame(&mut decoder, &bits), Err(expected));
            prop_assert!(decoder.is_idle());
        }
    }
}

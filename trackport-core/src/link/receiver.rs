//! Interrupt-side frame receiver
//!
//! Called on every falling clock edge with the sampled line levels. The
//! device changes data while clock is high, so the level read right after
//! the falling edge is the bit.

use trackport_protocol::{FrameDecoder, FrameError};

use super::LinkChannel;
use crate::error::LinkFault;

/// Receiver state owned by the edge interrupt handler
pub struct LinkReceiver<'a> {
    channel: &'a LinkChannel,
    decoder: FrameDecoder,
}

impl<'a> LinkReceiver<'a> {
    pub const fn new(channel: &'a LinkChannel) -> Self {
        Self {
            channel,
            decoder: FrameDecoder::new(),
        }
    }

    /// Handle one clock edge
    ///
    /// `clock_high` is the clock level at sampling time; a high clock means
    /// the edge was a glitch and it is ignored. Edges that arrive while the
    /// channel is disarmed abort any partial frame.
    ///
    /// Completed bytes go to the mailbox; malformed frames raise
    /// [`LinkFault::Frame`] and are returned for logging.
    pub fn on_clock_edge(
        &mut self,
        clock_high: bool,
        data_high: bool,
    ) -> Result<Option<u8>, FrameError> {
        if !self.channel.is_armed() {
            self.decoder.reset();
            return Ok(None);
        }
        if clock_high {
            return Ok(None);
        }

        match self.decoder.feed(data_high) {
            Ok(Some(byte)) => {
                self.channel.mailbox().push(byte);
                Ok(Some(byte))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                self.channel.raise(LinkFault::Frame(err));
                Err(err)
            }
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.decoder.reset();
    }

    /// Whether the receiver is between frames
    pub fn is_idle(&self) -> bool {
        self.decoder.is_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackport_protocol::frame::encode;

    fn clock_in(receiver: &mut LinkReceiver<'_>, byte: u8) -> Result<Option<u8>, FrameError> {
        let mut last = Ok(None);
        for bit in encode(byte) {
            last = receiver.on_clock_edge(false, bit);
        }
        last
    }

    #[test]
    fn test_bytes_reach_mailbox() {
        let channel = LinkChannel::new();
        channel.arm();
        let mut receiver = LinkReceiver::new(&channel);

        assert_eq!(clock_in(&mut receiver, 0xFA), Ok(Some(0xFA)));
        assert_eq!(clock_in(&mut receiver, 0x08), Ok(Some(0x08)));
        assert_eq!(channel.mailbox().pull(), Some(0xFA));
        assert_eq!(channel.mailbox().pull(), Some(0x08));
        assert_eq!(channel.fault(), None);
    }

    #[test]
    fn test_disarmed_discards_and_resets() {
        let channel = LinkChannel::new();
        channel.arm();
        let mut receiver = LinkReceiver::new(&channel);

        let bits = encode(0x55);
        for &bit in &bits[..5] {
            receiver.on_clock_edge(false, bit).unwrap();
        }
        assert!(!receiver.is_idle());

        channel.disarm();
        receiver.on_clock_edge(false, true).unwrap();
        assert!(receiver.is_idle());
        assert!(channel.mailbox().is_empty());

        channel.arm();
        assert_eq!(clock_in(&mut receiver, 0x55), Ok(Some(0x55)));
    }

    #[test]
    fn test_spurious_edge_ignored() {
        let channel = LinkChannel::new();
        channel.arm();
        let mut receiver = LinkReceiver::new(&channel);

        let bits = encode(0x3C);
        for (i, &bit) in bits.iter().enumerate() {
            if i == 4 {
                assert_eq!(receiver.on_clock_edge(true, !bit), Ok(None));
            }
            receiver.on_clock_edge(false, bit).unwrap();
        }
        assert_eq!(channel.mailbox().pull(), Some(0x3C));
    }

    #[test]
    fn test_bad_parity_raises_fault() {
        let channel = LinkChannel::new();
        channel.arm();
        let mut receiver = LinkReceiver::new(&channel);

        let mut bits = encode(0x12);
        bits[9] = !bits[9];
        let mut result = Ok(None);
        for bit in bits {
            result = receiver.on_clock_edge(false, bit);
            if result.is_err() {
                break;
            }
        }
        assert_eq!(result, Err(FrameError::BadParity));
        assert_eq!(channel.fault(), Some(LinkFault::Frame(FrameError::BadParity)));
        assert!(channel.mailbox().is_empty());
    }
}

//! PS/2 link layer
//!
//! Split across the interrupt boundary:
//!
//! ```text
//!   clock edge ISR                         main loop
//! ┌────────────────┐   ┌──────────────┐   ┌────────────────────┐
//! │ LinkReceiver   │──▶│ LinkChannel  │◀──│ Link               │
//! │ (frame decode) │   │ mailbox      │   │ read / write       │
//! └────────────────┘   │ fault flag   │   │ inhibit / release  │
//!                      │ armed flag   │   └────────────────────┘
//!                      └──────────────┘
//! ```
//!
//! The main loop owns both lines and all blocking waits; the receiver only
//! ever touches the channel.

mod channel;
mod mailbox;
mod receiver;
pub mod transmitter;

#[cfg(test)]
pub(crate) mod sim;

pub use channel::LinkChannel;
pub use mailbox::{Mailbox, MAILBOX_CAPACITY};
pub use receiver::LinkReceiver;

use trackport_hal::{Deadline, EdgeInterrupt, Monotonic, OpenDrainPin};

use crate::error::{LinkError, LinkFault};

/// Main-loop side of the link
///
/// Owns the clock and data lines, the time source and the receiver gate.
pub struct Link<'a, C, D, T, I> {
    clock: C,
    data: D,
    time: T,
    gate: I,
    channel: &'a LinkChannel,
    tx_timeout_ms: u32,
}

impl<'a, C, D, T, I> Link<'a, C, D, T, I>
where
    C: OpenDrainPin,
    D: OpenDrainPin,
    T: Monotonic,
    I: EdgeInterrupt,
{
    pub fn new(
        clock: C,
        data: D,
        time: T,
        gate: I,
        channel: &'a LinkChannel,
        tx_timeout_ms: u32,
    ) -> Self {
        Self {
            clock,
            data,
            time,
            gate,
            channel,
            tx_timeout_ms,
        }
    }

    /// Send one byte to the device
    ///
    /// The receiver is gated off for the duration. On timeout the bus is
    /// left inhibited, [`LinkFault::TransmitTimeout`] is raised and the
    /// receiver stays off until the next [`Link::release`].
    pub fn write(&mut self, byte: u8) -> Result<(), LinkError> {
        self.gate.disable();
        match transmitter::transmit(
            &mut self.clock,
            &mut self.data,
            &self.time,
            byte,
            self.tx_timeout_ms,
        ) {
            Ok(()) => {
                self.gate.enable();
                Ok(())
            }
            Err(transmitter::TransmitTimeout) => {
                self.inhibit();
                self.channel.raise(LinkFault::TransmitTimeout);
                Err(LinkError::TransmitTimeout)
            }
        }
    }

    /// Wait up to `timeout_ms` for the next received byte
    pub fn read(&mut self, timeout_ms: u32) -> Result<u8, LinkError> {
        let deadline = Deadline::after_ms(&self.time, timeout_ms);
        let mailbox = self.channel.mailbox();
        let mut byte = None;
        if deadline.wait_for(&self.time, || {
            byte = mailbox.pull();
            byte.is_some()
        }) {
            byte.ok_or(LinkError::ReceiveTimeout)
        } else {
            Err(LinkError::ReceiveTimeout)
        }
    }

    /// Hold the device off: clock low, data released, receiver gated
    pub fn inhibit(&mut self) {
        self.gate.disable();
        self.data.release();
        self.clock.drive_low();
    }

    /// Let the device talk again
    pub fn release(&mut self) {
        self.gate.enable();
        self.data.release();
        self.clock.release();
    }

    /// Discard everything in the mailbox
    pub fn flush(&mut self) {
        self.channel.mailbox().clear();
    }

    /// Whether no received bytes are waiting
    pub fn is_quiet(&self) -> bool {
        self.channel.mailbox().is_empty()
    }

    pub fn fault(&self) -> Option<LinkFault> {
        self.channel.fault()
    }

    pub fn raise(&self, fault: LinkFault) {
        self.channel.raise(fault);
    }

    pub fn clear_fault(&self) {
        self.channel.clear_fault();
    }

    pub fn now_ms(&self) -> u64 {
        self.time.now_ms()
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn gate(&self) -> &I {
        &self.gate
    }
}

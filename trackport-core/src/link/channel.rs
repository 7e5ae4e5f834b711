//! State shared between the receiver interrupt and the main loop
//!
//! Exactly three things cross the interrupt boundary: the mailbox of
//! received bytes, the fault flag, and whether the receiver is armed.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;
use trackport_hal::EdgeInterrupt;

use super::Mailbox;
use crate::error::LinkFault;

/// Shared link state, meant to live in a `static`
pub struct LinkChannel {
    mailbox: Mailbox,
    fault: Mutex<Cell<Option<LinkFault>>>,
    armed: AtomicBool,
}

impl LinkChannel {
    /// Receiver starts disarmed until the link releases the bus
    pub const fn new() -> Self {
        Self {
            mailbox: Mailbox::new(),
            fault: Mutex::new(Cell::new(None)),
            armed: AtomicBool::new(false),
        }
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// Record a fault unless one is already pending
    pub fn raise(&self, fault: LinkFault) {
        critical_section::with(|cs| {
            let cell = self.fault.borrow(cs);
            if cell.get().is_none() {
                cell.set(Some(fault));
            }
        });
    }

    /// Pending fault, if any
    pub fn fault(&self) -> Option<LinkFault> {
        critical_section::with(|cs| self.fault.borrow(cs).get())
    }

    pub fn clear_fault(&self) {
        critical_section::with(|cs| self.fault.borrow(cs).set(None));
    }

    /// Whether clock edges should reach the receiver
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::Release);
    }

    pub fn disarm(&self) {
        self.armed.store(false, Ordering::Release);
    }
}

impl Default for LinkChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeInterrupt for &LinkChannel {
    fn enable(&mut self) {
        self.arm();
    }

    fn disable(&mut self) {
        self.disarm();
    }
}

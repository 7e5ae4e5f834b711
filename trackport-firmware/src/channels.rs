//! Cross-core and cross-task shared state
//!
//! The bridge loop on core 1 produces pointer events; the HID task on
//! core 0 consumes them. The link channel is shared between the receiver
//! task (core 0, interrupt priority) and the bridge loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::AtomicBool;

use trackport_core::{LinkChannel, PointerEvent};

/// Channel capacity for pointer events
const POINTER_CHANNEL_SIZE: usize = 32;

/// Pointer events from the bridge loop to the HID writer
pub static POINTER_EVENTS: Channel<CriticalSectionRawMutex, PointerEvent, POINTER_CHANNEL_SIZE> =
    Channel::new();

/// Mailbox, fault flag and receiver gate of the PS/2 link
pub static LINK: LinkChannel = LinkChannel::new();

/// Set while the USB host has the bus suspended
pub static USB_SUSPENDED: AtomicBool = AtomicBool::new(false);

//! Pointer sink feeding the HID task

use core::sync::atomic::Ordering;

use defmt::*;
use trackport_core::{Button, PointerEvent, PointerSink};

use crate::channels::{POINTER_EVENTS, USB_SUSPENDED};

/// Forwards bridge events to the HID writer over [`POINTER_EVENTS`]
///
/// Never blocks: the bridge loop is a spin loop on the other core, so a
/// full channel drops the event.
pub struct ChannelSink {
    dropped: u32,
}

impl ChannelSink {
    pub const fn new() -> Self {
        Self { dropped: 0 }
    }

    /// Events lost to a full channel
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn push(&mut self, event: PointerEvent) {
        if POINTER_EVENTS.try_send(event).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Pointer channel full, dropping {:?}", event);
        }
    }
}

impl PointerSink for ChannelSink {
    fn motion(&mut self, dx: i16, dy: i16) {
        self.push(PointerEvent::Motion { dx, dy });
    }

    fn wheel(&mut self, ticks: i16) {
        self.push(PointerEvent::Wheel(ticks));
    }

    fn button(&mut self, button: Button, pressed: bool) {
        self.push(PointerEvent::Button { button, pressed });
    }

    fn is_suspended(&self) -> bool {
        USB_SUSPENDED.load(Ordering::Relaxed)
    }
}

//! Pointer event sink

use crate::translate::Button;

/// One host-bound pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerEvent {
    /// Relative motion, host orientation (Y grows downwards)
    Motion { dx: i16, dy: i16 },
    /// Wheel ticks; positive means rolled towards the user
    Wheel(i16),
    /// Button edge
    Button { button: Button, pressed: bool },
}

/// Destination for translated pointer events
///
/// Implementations must not block for long: the bridge calls these from
/// its polling loop.
pub trait PointerSink {
    fn motion(&mut self, dx: i16, dy: i16);

    fn wheel(&mut self, ticks: i16);

    fn button(&mut self, button: Button, pressed: bool);

    /// Whether the host has suspended the device
    ///
    /// Motion and wheel events are dropped while suspended.
    fn is_suspended(&self) -> bool;

    /// Forward a ready-made event
    fn send(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Motion { dx, dy } => self.motion(dx, dy),
            PointerEvent::Wheel(ticks) => self.wheel(ticks),
            PointerEvent::Button { button, pressed } => self.button(button, pressed),
        }
    }
}

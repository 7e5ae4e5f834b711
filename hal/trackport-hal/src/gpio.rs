//! GPIO pin abstractions
//!
//! The PS/2 bus is two open-collector lines with pull-ups: a line is either
//! released (pulled high by the resistor, or driven low by the other side)
//! or actively driven low.

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Open-collector bus line
///
/// Reading always reports the electrical level on the wire, which may be
/// low because the other end is driving it even while this side releases.
pub trait OpenDrainPin: InputPin {
    /// Stop driving the line; the pull-up takes it high unless the other
    /// side holds it low
    fn release(&mut self);

    /// Actively drive the line low
    fn drive_low(&mut self);

    /// Release for `true`, drive low for `false`
    fn set_state(&mut self, high: bool) {
        if high {
            self.release();
        } else {
            self.drive_low();
        }
    }
}

//! Open-collector bus line on a `Flex` pin
//!
//! The RP2040 has no true open-drain mode. A released line is an input
//! (the bus pull-up takes it high); a driven line is an output fixed low.
//! The output latch is kept low so switching direction never drives high.

use embassy_rp::gpio::{Flex, Pin, Pull};
use embassy_rp::Peri;
use trackport_hal::{InputPin, OpenDrainPin};

/// One PS/2 bus line
pub struct BusLine<'d> {
    pin: Flex<'d>,
}

impl<'d> BusLine<'d> {
    /// Take a pin and leave it released
    ///
    /// The internal pull-up is enabled as a backstop for adapters without
    /// external resistors; it is too weak to rely on for long cables.
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(Pull::Up);
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }
}

impl InputPin for BusLine<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl OpenDrainPin for BusLine<'_> {
    fn release(&mut self) {
        self.pin.set_as_input();
    }

    fn drive_low(&mut self) {
        self.pin.set_low();
        self.pin.set_as_output();
    }
}

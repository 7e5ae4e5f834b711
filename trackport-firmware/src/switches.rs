//! Operator switches on GPIO
//!
//! Each switch shorts its pin to ground; the internal pull-up holds an
//! open switch high.

use embedded_hal::digital::InputPin;
use trackport_core::{SwitchBank, Switches};

/// The three mode switches
pub struct BoardSwitches<P> {
    left_handed: P,
    jiggle: P,
    scroll_emulation: P,
}

impl<P: InputPin> BoardSwitches<P> {
    pub fn new(left_handed: P, jiggle: P, scroll_emulation: P) -> Self {
        Self {
            left_handed,
            jiggle,
            scroll_emulation,
        }
    }
}

impl<P: InputPin> SwitchBank for BoardSwitches<P> {
    fn read(&mut self) -> Switches {
        Switches {
            left_handed: closed(&mut self.left_handed),
            jiggle: closed(&mut self.jiggle),
            scroll_emulation: closed(&mut self.scroll_emulation),
        }
    }
}

/// A pin that cannot be read counts as open
fn closed<P: InputPin>(pin: &mut P) -> bool {
    pin.is_low().unwrap_or(false)
}

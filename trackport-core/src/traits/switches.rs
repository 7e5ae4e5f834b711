//! Operator switches

use crate::config::Switches;

/// Source of the operator switch positions
///
/// Read once per loop iteration; implementations debounce if they need to.
pub trait SwitchBank {
    fn read(&mut self) -> Switches;
}

impl SwitchBank for Switches {
    fn read(&mut self) -> Switches {
        *self
    }
}

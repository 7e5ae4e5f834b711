//! Pointer events to HID mouse reports
//!
//! HID reports carry 8-bit deltas, so larger motion is split across
//! several reports. Every report carries the current button state.

use trackport_core::{ButtonSet, PointerEvent};
use usbd_hid::descriptor::MouseReport;

const MAX_STEP: i16 = 127;

/// Tracks button state between reports
#[derive(Debug, Default)]
pub struct HidEncoder {
    buttons: ButtonSet,
    /// Buttons changed while the host was suspended
    resync: bool,
}

impl HidEncoder {
    pub const fn new() -> Self {
        Self {
            buttons: ButtonSet::EMPTY,
            resync: false,
        }
    }

    pub fn buttons(&self) -> ButtonSet {
        self.buttons
    }

    /// Reports to send for `event`, or `None` while the host is suspended
    ///
    /// Button changes are tracked either way. The first event after resume
    /// always yields a report so the host sees buttons released meanwhile.
    pub fn deliver(&mut self, event: PointerEvent, suspended: bool) -> Option<Reports> {
        let mut reports = self.encode(event);
        if suspended {
            self.resync |= reports.force;
            return None;
        }
        reports.force |= core::mem::take(&mut self.resync);
        Some(reports)
    }

    /// Reports needed to deliver `event`
    pub fn encode(&mut self, event: PointerEvent) -> Reports {
        let mut reports = Reports {
            buttons: 0,
            dx: 0,
            dy: 0,
            wheel: 0,
            force: false,
        };
        match event {
            PointerEvent::Motion { dx, dy } => {
                reports.dx = dx;
                reports.dy = dy;
            }
            // HID wheel is positive away from the user
            PointerEvent::Wheel(ticks) => reports.wheel = -ticks,
            PointerEvent::Button { button, pressed } => {
                self.buttons = self.buttons.with(button, pressed);
                reports.force = true;
            }
        }
        reports.buttons = self.buttons.bits();
        reports
    }
}

/// Iterator over the reports for one event
#[derive(Debug)]
pub struct Reports {
    buttons: u8,
    dx: i16,
    dy: i16,
    wheel: i16,
    /// Emit one report even without motion (button change)
    force: bool,
}

impl Iterator for Reports {
    type Item = MouseReport;

    fn next(&mut self) -> Option<MouseReport> {
        if self.dx == 0 && self.dy == 0 && self.wheel == 0 && !self.force {
            return None;
        }
        self.force = false;

        let x = self.dx.clamp(-MAX_STEP, MAX_STEP);
        let y = self.dy.clamp(-MAX_STEP, MAX_STEP);
        let wheel = self.wheel.clamp(-MAX_STEP, MAX_STEP);
        self.dx -= x;
        self.dy -= y;
        self.wheel -= wheel;

        Some(MouseReport {
            buttons: self.buttons,
            x: x as i8,
            y: y as i8,
            wheel: wheel as i8,
            pan: 0,
        })
    }
}

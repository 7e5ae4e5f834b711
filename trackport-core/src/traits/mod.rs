//! Host-facing traits
//!
//! These traits define the interface between the bridge logic and whatever
//! carries pointer events to the host (USB HID, a test recorder, ...).

pub mod sink;
pub mod switches;

pub use sink::{PointerEvent, PointerSink};
pub use switches::SwitchBank;

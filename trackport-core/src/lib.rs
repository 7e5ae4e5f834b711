//! Board-agnostic core logic for the PS/2 to HID bridge
//!
//! This crate contains the protocol engine, independent of any particular
//! microcontroller:
//!
//! - Link layer: interrupt-side receiver, mailbox, bit-banged transmitter
//! - Session controller for device bring-up and PS/2++ negotiation
//! - Report translation (handedness, auxiliary buttons, edge detection)
//! - Scroll emulation and idle prevention
//! - The main loop state machine that sequences all of the above
//! - Host-facing traits and configuration types

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bridge;
pub mod config;
pub mod error;
pub mod jiggle;
pub mod link;
pub mod scroll;
pub mod session;
pub mod traits;
pub mod translate;

pub use bridge::{Bridge, LoopState, Outcome};
pub use config::{BridgeConfig, ConfigError, ReportMode, Switches};
pub use error::{HandshakeFailure, HandshakeStep, LinkError, LinkFault, SessionError};
pub use link::{Link, LinkChannel, LinkReceiver, Mailbox, MAILBOX_CAPACITY};
pub use traits::{PointerEvent, PointerSink, SwitchBank};
pub use translate::{Button, ButtonSet};

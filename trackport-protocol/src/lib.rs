//! PS/2 Mouse Link Protocol
//!
//! This crate defines the wire protocol between the adapter and a PS/2
//! pointing device, plus the Logitech PS/2++ extension carried inside the
//! standard report stream.
//!
//! # Protocol Overview
//!
//! Every byte in either direction is one 11-bit frame, clocked by the device:
//! ```text
//! ┌───────┬──────────────────┬────────┬──────┐
//! │ START │ DATA (LSB first) │ PARITY │ STOP │
//! │ 0     │ 8 bits           │ odd    │ 1    │
//! └───────┴──────────────────┴────────┴──────┘
//! ```
//!
//! Movement arrives as 3-byte reports. A PS/2++ capable device, once woken by
//! the magic knock, reuses report slots that a standard mouse can never
//! produce to carry extra button state.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod extended;
pub mod frame;
pub mod report;

pub use command::{Command, Response, MAGIC_KNOCK};
pub use extended::{classify, AuxButtons, ExtendedKind, ExtendedPacket, Packet};
pub use frame::{odd_parity, FrameDecoder, FrameError, FRAME_BITS};
pub use report::{Report, REPORT_LEN};

//! Trackport Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the protocol engine
//! needs from a board. Chip-specific HALs implement them so the same engine
//! runs on different hardware platforms and in host-side tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (trackport-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trackport-core (protocol engine)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trackport-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ trackport-hal-    │
//!           │     rp2040        │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::OpenDrainPin`] - Bus lines
//! - [`irq::EdgeInterrupt`] - Gating of the clock-edge receiver
//! - [`time::Monotonic`] - Microsecond clock for bounded waits

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod irq;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OpenDrainPin};
pub use irq::EdgeInterrupt;
pub use time::{Deadline, Monotonic};

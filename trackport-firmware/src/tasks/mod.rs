//! Firmware tasks
//!
//! The receiver and USB tasks are embassy tasks on core 0; the bridge loop
//! is a plain blocking function run on core 1.

pub mod bridge;
pub mod link_rx;
pub mod usb;

pub use bridge::bridge_loop;
pub use link_rx::link_rx_task;
pub use usb::{hid_task, usb_task, SuspendHandler};

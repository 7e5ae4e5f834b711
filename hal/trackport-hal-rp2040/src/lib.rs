//! RP2040-specific HAL for the PS/2 bridge firmware
//!
//! This crate provides RP2040 implementations of the shared `trackport-hal`
//! traits, plus RP2040-specific functionality:
//!
//! - Open-collector bus lines on SIO `Flex` pins
//! - Monotonic clock backed by the embassy time driver
//! - PIO falling-edge sampler feeding the link receiver

#![no_std]

pub mod line;
pub mod sampler;
pub mod time;

pub use line::BusLine;
pub use sampler::{EdgeSample, EdgeSampler};
pub use time::EmbassyClock;

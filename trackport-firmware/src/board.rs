//! Board pin assignments
//!
//! The GPIO numbers here must match the `PIN_n` peripherals taken in
//! `main`; the edge sampler needs the raw numbers.

/// PS/2 clock line (5V tolerant through the level shifter)
pub const PS2_CLOCK_GPIO: u8 = 2;

/// PS/2 data line
pub const PS2_DATA_GPIO: u8 = 3;

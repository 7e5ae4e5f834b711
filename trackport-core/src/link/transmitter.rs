//! Host-to-device transmission
//!
//! The host cannot clock the bus; it requests to send by holding clock low,
//! then lets the device clock each bit in. Sequence:
//!
//! ```text
//! CLK  ‾‾‾\______/‾‾‾\_/‾\_/‾ ... ‾\_/‾\_/‾\___/‾‾‾
//! DAT  ‾‾‾‾‾‾\__________X===X ... ===X‾‾‾‾\___/‾‾‾
//!         │ RTS │ start  d0       parity stop ack
//! ```
//!
//! Each data bit is set while clock is low and read by the device on the
//! following rising edge. The device acknowledges by pulling data low for
//! one more clock.

use trackport_hal::{Deadline, Monotonic, OpenDrainPin};
use trackport_protocol::odd_parity;

/// How long clock is held low before data is pulled low
pub const REQUEST_TO_SEND_US: u32 = 100;

/// The device stopped clocking before the byte was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitTimeout;

/// Clock one byte out to the device
///
/// A single deadline of `timeout_ms` covers the whole byte. Leaves both
/// lines released on success; on timeout the caller decides what to do with
/// the bus.
pub fn transmit<C, D, T>(
    clock: &mut C,
    data: &mut D,
    time: &T,
    byte: u8,
    timeout_ms: u32,
) -> Result<(), TransmitTimeout>
where
    C: OpenDrainPin,
    D: OpenDrainPin,
    T: Monotonic,
{
    let deadline = Deadline::after_ms(time, timeout_ms);

    clock.release();
    data.release();

    // Request to send
    clock.drive_low();
    time.delay_us(REQUEST_TO_SEND_US);
    data.drive_low();
    clock.release();

    wait(&deadline, time, || clock.is_low())?;

    let parity = odd_parity(byte);
    for i in 0..9 {
        let bit = if i < 8 { byte & (1 << i) != 0 } else { parity };
        data.set_state(bit);
        wait(&deadline, time, || clock.is_high())?;
        wait(&deadline, time, || clock.is_low())?;
    }

    // Stop bit
    data.release();

    wait(&deadline, time, || data.is_low())?;
    wait(&deadline, time, || clock.is_low())?;
    wait(&deadline, time, || clock.is_high() && data.is_high())?;
    Ok(())
}

fn wait<T, F>(deadline: &Deadline, time: &T, condition: F) -> Result<(), TransmitTimeout>
where
    T: Monotonic,
    F: FnMut() -> bool,
{
    if deadline.wait_for(time, condition) {
        Ok(())
    } else {
        Err(TransmitTimeout)
    }
}

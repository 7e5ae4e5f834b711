//! Standard 3-byte movement report
//!
//! ```text
//!        bit 7   bit 6   bit 5   bit 4   bit 3   bit 2   bit 1   bit 0
//! byte0  Y ovf   X ovf   Y sign  X sign  1       middle  right   left
//! byte1  X movement (low 8 bits)
//! byte2  Y movement (low 8 bits)
//! ```

/// Bytes per report
pub const REPORT_LEN: usize = 3;

const STATUS_LEFT: u8 = 0x01;
const STATUS_RIGHT: u8 = 0x02;
const STATUS_MIDDLE: u8 = 0x04;
const STATUS_ALWAYS_ONE: u8 = 0x08;
const STATUS_X_SIGN: u8 = 0x10;
const STATUS_Y_SIGN: u8 = 0x20;
const STATUS_OVERFLOW: u8 = 0xC0;

/// One raw report as received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    bytes: [u8; REPORT_LEN],
}

impl Report {
    /// Wrap three received bytes
    pub const fn from_bytes(bytes: [u8; REPORT_LEN]) -> Self {
        Self { bytes }
    }

    /// Raw bytes
    pub fn bytes(&self) -> &[u8; REPORT_LEN] {
        &self.bytes
    }

    /// Status byte (byte0)
    pub fn status(&self) -> u8 {
        self.bytes[0]
    }

    /// True if the always-one bit is set
    ///
    /// A clear bit means the stream has slipped and byte0 is not a status
    /// byte.
    pub fn is_aligned(&self) -> bool {
        self.bytes[0] & STATUS_ALWAYS_ONE != 0
    }

    /// True if either overflow bit is set
    pub fn overflow(&self) -> bool {
        self.bytes[0] & STATUS_OVERFLOW != 0
    }

    /// Left button held
    pub fn left(&self) -> bool {
        self.bytes[0] & STATUS_LEFT != 0
    }

    /// Right button held
    pub fn right(&self) -> bool {
        self.bytes[0] & STATUS_RIGHT != 0
    }

    /// Middle button held
    pub fn middle(&self) -> bool {
        self.bytes[0] & STATUS_MIDDLE != 0
    }

    /// Horizontal movement, positive to the right
    pub fn dx(&self) -> i16 {
        sign_extend(self.bytes[1], self.bytes[0] & STATUS_X_SIGN != 0)
    }

    /// Vertical movement in device convention, positive away from the user
    pub fn dy(&self) -> i16 {
        sign_extend(self.bytes[2], self.bytes[0] & STATUS_Y_SIGN != 0)
    }
}

/// Combine the low byte with its sign bit into a 9-bit two's complement value
fn sign_extend(low: u8, negative: bool) -> i16 {
    if negative {
        i16::from(low) - 256
    } else {
        i16::from(low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons() {
        let report = Report::from_bytes([0x0D, 0, 0]);
        assert!(report.left());
        assert!(!report.right());
        assert!(report.middle());
        assert!(report.is_aligned());
    }

    #[test]
    fn test_signed_deltas() {
        // X = +5, Y = -3 (0xFD with Y sign)
        let report = Report::from_bytes([0x28, 0x05, 0xFD]);
        assert_eq!(report.dx(), 5);
        assert_eq!(report.dy(), -3);

        // Full negative range
        let report = Report::from_bytes([0x18, 0x00, 0x00]);
        assert_eq!(report.dx(), -256);
        assert_eq!(report.dy(), 0);
    }

    #[test]
    fn test_overflow_and_alignment() {
        assert!(Report::from_bytes([0x48, 0, 0]).overflow());
        assert!(Report::from_bytes([0x88, 0, 0]).overflow());
        assert!(!Report::from_bytes([0x38, 0, 0]).overflow());
        assert!(!Report::from_bytes([0x00, 0, 0]).is_aligned());
    }
}

//! Host-to-device commands and device responses

/// Commands understood by a PS/2 mouse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Reset and run the self test
    Reset,
    /// Ask the device to repeat its last byte
    Resend,
    /// Restore default sample rate, resolution and scaling
    SetDefaults,
    /// Stop autonomous reporting in stream mode
    DisableReporting,
    /// Start autonomous reporting in stream mode
    EnableReporting,
    /// Set sample rate (followed by the rate byte)
    SetSampleRate,
    /// Read the device id
    GetDeviceId,
    /// Host polls every report with [`Command::ReadData`]
    SetRemoteMode,
    /// Request one report (remote mode)
    ReadData,
    /// Device pushes reports on its own
    SetStreamMode,
    /// Request the 3-byte status block
    StatusRequest,
    /// Set resolution (followed by the resolution byte)
    SetResolution,
    /// Select 1:1 scaling
    SetScaling1To1,
}

// Wire format values
const CMD_RESET: u8 = 0xFF;
const CMD_RESEND: u8 = 0xFE;
const CMD_SET_DEFAULTS: u8 = 0xF6;
const CMD_DISABLE_REPORTING: u8 = 0xF5;
const CMD_ENABLE_REPORTING: u8 = 0xF4;
const CMD_SET_SAMPLE_RATE: u8 = 0xF3;
const CMD_GET_DEVICE_ID: u8 = 0xF2;
const CMD_SET_REMOTE_MODE: u8 = 0xF0;
const CMD_READ_DATA: u8 = 0xEB;
const CMD_SET_STREAM_MODE: u8 = 0xEA;
const CMD_STATUS_REQUEST: u8 = 0xE9;
const CMD_SET_RESOLUTION: u8 = 0xE8;
const CMD_SET_SCALING_1_1: u8 = 0xE6;

impl Command {
    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Reset => CMD_RESET,
            Command::Resend => CMD_RESEND,
            Command::SetDefaults => CMD_SET_DEFAULTS,
            Command::DisableReporting => CMD_DISABLE_REPORTING,
            Command::EnableReporting => CMD_ENABLE_REPORTING,
            Command::SetSampleRate => CMD_SET_SAMPLE_RATE,
            Command::GetDeviceId => CMD_GET_DEVICE_ID,
            Command::SetRemoteMode => CMD_SET_REMOTE_MODE,
            Command::ReadData => CMD_READ_DATA,
            Command::SetStreamMode => CMD_SET_STREAM_MODE,
            Command::StatusRequest => CMD_STATUS_REQUEST,
            Command::SetResolution => CMD_SET_RESOLUTION,
            Command::SetScaling1To1 => CMD_SET_SCALING_1_1,
        }
    }

    /// Number of reply bytes that follow the acknowledgment
    pub fn reply_len(self) -> usize {
        match self {
            Command::Reset => 2,
            Command::GetDeviceId => 1,
            Command::ReadData | Command::StatusRequest => 3,
            _ => 0,
        }
    }
}

/// Single-byte responses from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Command or argument accepted
    Ack,
    /// Last byte was garbled, send it again
    Resend,
    /// Two consecutive bad bytes
    Error,
    /// Power-on or reset self test passed
    SelfTestPassed,
}

const RESP_ACK: u8 = 0xFA;
const RESP_RESEND: u8 = 0xFE;
const RESP_ERROR: u8 = 0xFC;
const RESP_SELF_TEST_PASSED: u8 = 0xAA;

impl Response {
    /// Parse a response byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            RESP_ACK => Some(Response::Ack),
            RESP_RESEND => Some(Response::Resend),
            RESP_ERROR => Some(Response::Error),
            RESP_SELF_TEST_PASSED => Some(Response::SelfTestPassed),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Response::Ack => RESP_ACK,
            Response::Resend => RESP_RESEND,
            Response::Error => RESP_ERROR,
            Response::SelfTestPassed => RESP_SELF_TEST_PASSED,
        }
    }
}

/// Logitech PS/2++ magic knock
///
/// Resolution and scaling commands in an order no driver would issue on its
/// own. PS/2++ devices answer by switching on the extended report format; a
/// plain mouse just acknowledges every byte. Sent verbatim, byte by byte.
pub const MAGIC_KNOCK: [u8; 17] = [
    0xE8, 0x00, 0xE8, 0x03, 0xE8, 0x02, 0xE8, 0x01, 0xE6, 0xE8, 0x03, 0xE8, 0x01, 0xE8, 0x02,
    0xE8, 0x03,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_bytes() {
        assert_eq!(Command::Reset.to_byte(), 0xFF);
        assert_eq!(Command::EnableReporting.to_byte(), 0xF4);
        assert_eq!(Command::SetRemoteMode.to_byte(), 0xF0);
        assert_eq!(Command::ReadData.to_byte(), 0xEB);
        assert_eq!(Command::StatusRequest.to_byte(), 0xE9);
    }

    #[test]
    fn test_reply_lengths() {
        assert_eq!(Command::Reset.reply_len(), 2);
        assert_eq!(Command::ReadData.reply_len(), 3);
        assert_eq!(Command::SetSampleRate.reply_len(), 0);
    }

    #[test]
    fn test_unknown_response() {
        assert_eq!(Response::from_byte(0xFA), Some(Response::Ack));
        assert!(Response::from_byte(0x00).is_none());
        assert!(Response::from_byte(0x08).is_none());
    }

    #[test]
    fn test_magic_knock_shape() {
        // Eight resolution commands each followed by its argument, plus one scaling command
        let resolutions = MAGIC_KNOCK.iter().filter(|&&b| b == 0xE8).count();
        assert_eq!(resolutions, 8);
        assert_eq!(MAGIC_KNOCK[8], Command::SetScaling1To1.to_byte());
        assert!(MAGIC_KNOCK
            .iter()
            .all(|&b| b <= 0x03 || b == 0xE8 || b == 0xE6));
    }
}

//! Error types shared by the link, session and bridge layers

use trackport_protocol::FrameError;

/// Fault recorded by the link layer
///
/// A raised fault stays set until the main loop clears it during
/// recovery. Only the first fault after a clear is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkFault {
    /// The receiver saw a malformed frame
    Frame(FrameError),
    /// The device stopped clocking during a host-to-device write
    TransmitTimeout,
    /// The device reported X or Y overflow
    Overflow,
    /// A report arrived out of alignment or incomplete
    Desync,
}

/// Error returned by blocking link operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// A byte could not be clocked out before the deadline
    TransmitTimeout,
    /// No byte arrived before the deadline
    ReceiveTimeout,
}

/// Step of the bring-up sequence that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeStep {
    Reset,
    SelfTest,
    DeviceId,
    SampleRate,
    ReportMode,
    /// Index into the PS/2++ knock sequence
    MagicKnock(u8),
    EnableReporting,
}

/// How a bring-up step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeFailure {
    /// The command byte could not be sent
    Transmit,
    /// The device did not answer in time
    Timeout,
    /// The device answered with something else
    Unexpected(u8),
}

/// Bring-up failure with the step it happened at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionError {
    pub step: HandshakeStep,
    pub kind: HandshakeFailure,
}

impl SessionError {
    pub const fn new(step: HandshakeStep, kind: HandshakeFailure) -> Self {
        Self { step, kind }
    }
}

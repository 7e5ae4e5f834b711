//! Events that move the session between states

use crate::config::ReportMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// Reset command about to be sent
    Begin,
    /// Self test passed and device id received
    ResetComplete,
    /// Negotiation finished in the given report mode
    Established(ReportMode),
    /// Handshake failure or link fault
    Fault,
}

//! Session state definition

use super::events::SessionEvent;
use crate::config::ReportMode;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Nothing sent since power-on
    #[default]
    Idle,
    /// Reset sent, waiting for self test and id
    Resetting,
    /// Configuring rate, mode and the PS/2++ knock
    Negotiating,
    /// Device pushes reports
    Streaming,
    /// Host polls every report
    RemotePolling,
    /// Handshake or link failed; bring-up must start over
    Desynchronized,
}

impl SessionState {
    /// Whether reports can be consumed in this state
    pub fn is_established(&self) -> bool {
        matches!(self, SessionState::Streaming | SessionState::RemotePolling)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            // A new bring-up may start from anywhere
            (_, Begin) => Resetting,

            (Resetting, ResetComplete) => Negotiating,

            (Negotiating, Established(ReportMode::Stream)) => Streaming,
            (Negotiating, Established(ReportMode::Remote)) => RemotePolling,

            (_, Fault) => Desynchronized,

            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_flow() {
        let state = SessionState::Idle
            .transition(SessionEvent::Begin)
            .transition(SessionEvent::ResetComplete)
            .transition(SessionEvent::Established(ReportMode::Stream));
        assert_eq!(state, SessionState::Streaming);
        assert!(state.is_established());
    }

    #[test]
    fn test_remote_flow() {
        let state = SessionState::Idle
            .transition(SessionEvent::Begin)
            .transition(SessionEvent::ResetComplete)
            .transition(SessionEvent::Established(ReportMode::Remote));
        assert_eq!(state, SessionState::RemotePolling);
    }

    #[test]
    fn test_fault_from_any_state() {
        let states = [
            SessionState::Idle,
            SessionState::Resetting,
            SessionState::Negotiating,
            SessionState::Streaming,
            SessionState::RemotePolling,
        ];
        for state in states {
            assert_eq!(
                state.transition(SessionEvent::Fault),
                SessionState::Desynchronized
            );
        }
    }

    #[test]
    fn test_skipping_steps_is_ignored() {
        assert_eq!(
            SessionState::Resetting.transition(SessionEvent::Established(ReportMode::Stream)),
            SessionState::Resetting
        );
        assert_eq!(
            SessionState::Idle.transition(SessionEvent::ResetComplete),
            SessionState::Idle
        );
        assert!(!SessionState::Desynchronized.is_established());
        assert_eq!(
            SessionState::Desynchronized.transition(SessionEvent::Begin),
            SessionState::Resetting
        );
    }
}

//! Bring-up sequence
//!
//! ```text
//! host                     device
//!  FF ──────────────────▶
//!     ◀────────────────── FA AA id
//!  F3 rate (optional) ──▶  FA FA
//!  F0 (remote only) ────▶  FA
//!  E8 00 E8 03 ... E8 03 ▶ FA per byte      (PS/2++ knock)
//!  F4 (stream only) ────▶  FA
//! ```
//!
//! Every step has its own deadline. The first miss aborts the whole
//! sequence; retrying is the caller's job.

use trackport_hal::{EdgeInterrupt, Monotonic, OpenDrainPin};
use trackport_protocol::{Command, Response, MAGIC_KNOCK};

use super::{SessionEvent, SessionState};
use crate::config::{BridgeConfig, ReportMode};
use crate::error::{HandshakeFailure, HandshakeStep, LinkError, SessionError};
use crate::link::Link;

/// Device session tracker
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    device_id: Option<u8>,
}

impl Session {
    pub const fn new() -> Self {
        Self {
            state: SessionState::Idle,
            device_id: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Id reported after the last successful reset
    pub fn device_id(&self) -> Option<u8> {
        self.device_id
    }

    /// Record a link fault noticed outside the handshake
    pub fn mark_desynchronized(&mut self) {
        self.state = self.state.transition(SessionEvent::Fault);
    }

    /// Reset and configure the device
    ///
    /// Returns the device id. On failure the session is left
    /// [`SessionState::Desynchronized`].
    pub fn bring_up<C, D, T, I>(
        &mut self,
        link: &mut Link<'_, C, D, T, I>,
        config: &BridgeConfig,
    ) -> Result<u8, SessionError>
    where
        C: OpenDrainPin,
        D: OpenDrainPin,
        T: Monotonic,
        I: EdgeInterrupt,
    {
        self.state = self.state.transition(SessionEvent::Begin);
        self.device_id = None;

        match self.negotiate(link, config) {
            Ok(id) => {
                self.device_id = Some(id);
                self.state = self
                    .state
                    .transition(SessionEvent::Established(config.mode));
                Ok(id)
            }
            Err(err) => {
                self.state = self.state.transition(SessionEvent::Fault);
                Err(err)
            }
        }
    }

    fn negotiate<C, D, T, I>(
        &mut self,
        link: &mut Link<'_, C, D, T, I>,
        config: &BridgeConfig,
    ) -> Result<u8, SessionError>
    where
        C: OpenDrainPin,
        D: OpenDrainPin,
        T: Monotonic,
        I: EdgeInterrupt,
    {
        let ack = config.ack_timeout_ms;

        link.release();
        link.flush();

        send(link, Command::Reset.to_byte(), HandshakeStep::Reset, ack)?;
        expect(
            link,
            Response::SelfTestPassed.to_byte(),
            HandshakeStep::SelfTest,
            config.self_test_timeout_ms,
        )?;
        let id = link
            .read(ack)
            .map_err(|_| SessionError::new(HandshakeStep::DeviceId, HandshakeFailure::Timeout))?;
        self.state = self.state.transition(SessionEvent::ResetComplete);

        if let Some(rate) = config.sample_rate {
            send(link, Command::SetSampleRate.to_byte(), HandshakeStep::SampleRate, ack)?;
            send(link, rate, HandshakeStep::SampleRate, ack)?;
        }

        if config.mode == ReportMode::Remote {
            send(link, Command::SetRemoteMode.to_byte(), HandshakeStep::ReportMode, ack)?;
        }

        for (i, &byte) in MAGIC_KNOCK.iter().enumerate() {
            send(link, byte, HandshakeStep::MagicKnock(i as u8), ack)?;
        }

        if config.mode == ReportMode::Stream {
            send(
                link,
                Command::EnableReporting.to_byte(),
                HandshakeStep::EnableReporting,
                ack,
            )?;
        }

        Ok(id)
    }
}

/// Write one byte and wait for its ACK
fn send<C, D, T, I>(
    link: &mut Link<'_, C, D, T, I>,
    byte: u8,
    step: HandshakeStep,
    timeout_ms: u32,
) -> Result<(), SessionError>
where
    C: OpenDrainPin,
    D: OpenDrainPin,
    T: Monotonic,
    I: EdgeInterrupt,
{
    link.write(byte)
        .map_err(|_| SessionError::new(step, HandshakeFailure::Transmit))?;
    expect(link, Response::Ack.to_byte(), step, timeout_ms)
}

fn expect<C, D, T, I>(
    link: &mut Link<'_, C, D, T, I>,
    expected: u8,
    step: HandshakeStep,
    timeout_ms: u32,
) -> Result<(), SessionError>
where
    C: OpenDrainPin,
    D: OpenDrainPin,
    T: Monotonic,
    I: EdgeInterrupt,
{
    match link.read(timeout_ms) {
        Ok(byte) if byte == expected => Ok(()),
        Ok(byte) => Err(SessionError::new(step, HandshakeFailure::Unexpected(byte))),
        Err(LinkError::ReceiveTimeout) | Err(LinkError::TransmitTimeout) => {
            Err(SessionError::new(step, HandshakeFailure::Timeout))
        }
    }
}

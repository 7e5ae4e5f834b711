//! Main loop state machine
//!
//! One call to [`Bridge::poll`] is one loop iteration:
//!
//! 1. Sample the operator switches
//! 2. Recover (stop bus, clear state, full bring-up) if the link faulted
//!    or the session is down
//! 3. Obtain one report: poll it in remote mode, or wait briefly for one in
//!    stream mode (with an occasional status-request heartbeat)
//! 4. Check alignment, split off PS/2++ packets, check overflow
//! 5. Translate buttons, run scroll emulation, emit events
//! 6. Run the idle jiggler
//!
//! The bridge never logs; it returns an [`Outcome`] for the caller to
//! report.

use trackport_hal::{EdgeInterrupt, Monotonic, OpenDrainPin};
use trackport_protocol::{
    classify, AuxButtons, Command, ExtendedKind, Packet, Report, Response, REPORT_LEN,
};

use crate::config::{BridgeConfig, ReportMode, Switches};
use crate::error::{LinkFault, SessionError};
use crate::jiggle::{Jiggler, NUDGE};
use crate::link::Link;
use crate::scroll::ScrollEmulator;
use crate::session::Session;
use crate::traits::{PointerSink, SwitchBank};
use crate::translate::{host_motion, translate, Button, ButtonSet};

/// Loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    /// Session up, consuming reports
    Normal,
    /// Bring-up pending or failed
    Recovering,
}

/// Result of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// No report arrived
    Idle,
    /// A motion report was translated and emitted
    Report,
    /// A PS/2++ packet was consumed
    Extended(ExtendedKind),
    /// A fault was detected; recovery runs next iteration
    Fault(LinkFault),
    /// Bring-up succeeded
    Recovered { device_id: u8 },
    /// Bring-up failed; retried next iteration
    RecoveryFailed(SessionError),
}

/// Status-request liveness probe schedule (stream mode only)
#[derive(Debug, Clone)]
struct Heartbeat {
    interval_ms: u64,
    max: u16,
    remaining: u16,
    next_due_ms: u64,
}

impl Heartbeat {
    fn new(interval_ms: u32, max: u16) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            max,
            remaining: 0,
            next_due_ms: 0,
        }
    }

    fn restart(&mut self, now_ms: u64) {
        self.remaining = self.max;
        self.next_due_ms = now_ms + self.interval_ms;
    }

    fn due(&mut self, now_ms: u64) -> bool {
        if self.remaining == 0 || now_ms < self.next_due_ms {
            return false;
        }
        self.remaining -= 1;
        self.next_due_ms = now_ms + self.interval_ms;
        true
    }
}

/// PS/2 to host bridge
///
/// Owns the link and every piece of loop state.
pub struct Bridge<'a, C, D, T, I> {
    link: Link<'a, C, D, T, I>,
    config: BridgeConfig,
    session: Session,
    state: LoopState,
    aux: AuxButtons,
    buttons: ButtonSet,
    scroll: ScrollEmulator,
    jiggler: Jiggler,
    heartbeat: Heartbeat,
}

impl<'a, C, D, T, I> Bridge<'a, C, D, T, I>
where
    C: OpenDrainPin,
    D: OpenDrainPin,
    T: Monotonic,
    I: EdgeInterrupt,
{
    pub fn new(link: Link<'a, C, D, T, I>, config: BridgeConfig) -> Self {
        Self {
            link,
            session: Session::new(),
            state: LoopState::Recovering,
            aux: AuxButtons::default(),
            buttons: ButtonSet::EMPTY,
            scroll: ScrollEmulator::new(config.scroll_divisor),
            jiggler: Jiggler::new(config.jiggle_interval_ms, config.jiggle_max),
            heartbeat: Heartbeat::new(config.heartbeat_interval_ms, config.heartbeat_max),
            config,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn link(&self) -> &Link<'a, C, D, T, I> {
        &self.link
    }

    /// Buttons the host currently believes are held
    pub fn buttons(&self) -> ButtonSet {
        self.buttons
    }

    /// Run one loop iteration
    pub fn poll<S, W>(&mut self, sink: &mut S, switches: &mut W) -> Outcome
    where
        S: PointerSink,
        W: SwitchBank,
    {
        let switches = switches.read();
        let outcome = self.step(sink, &switches);

        let now = self.link.now_ms();
        if self.jiggler.poll(now, switches.jiggle, sink.is_suspended()) {
            for (dx, dy) in NUDGE {
                sink.motion(dx, dy);
            }
        }
        outcome
    }

    fn step<S: PointerSink>(&mut self, sink: &mut S, switches: &Switches) -> Outcome {
        if self.link.fault().is_some() || !self.session.state().is_established() {
            return self.recover(sink);
        }

        let report = match self.acquire() {
            Ok(Some(report)) => report,
            Ok(None) => return Outcome::Idle,
            Err(fault) => return self.fault(fault),
        };

        if !report.is_aligned() {
            return self.fault(LinkFault::Desync);
        }

        let report = match classify(report) {
            Packet::Extended(packet) => {
                if let Some(aux) = packet.aux_buttons() {
                    self.aux = aux;
                }
                return Outcome::Extended(packet.kind());
            }
            Packet::Motion(report) => report,
        };

        if report.overflow() {
            return self.fault(LinkFault::Overflow);
        }

        self.emit(&report, sink, switches);
        Outcome::Report
    }

    fn recover<S: PointerSink>(&mut self, sink: &mut S) -> Outcome {
        self.state = LoopState::Recovering;

        self.link.inhibit();
        self.link.clear_fault();
        self.link.flush();

        for (button, pressed) in self.buttons.changes(ButtonSet::EMPTY) {
            sink.button(button, pressed);
        }
        self.buttons = ButtonSet::EMPTY;
        self.aux = AuxButtons::default();
        self.scroll.reset();

        match self.session.bring_up(&mut self.link, &self.config) {
            Ok(device_id) => {
                self.state = LoopState::Normal;
                self.heartbeat.restart(self.link.now_ms());
                Outcome::Recovered { device_id }
            }
            Err(err) => Outcome::RecoveryFailed(err),
        }
    }

    fn fault(&mut self, fault: LinkFault) -> Outcome {
        self.link.raise(fault);
        self.session.mark_desynchronized();
        Outcome::Fault(fault)
    }

    /// Obtain the next report, if one is available
    fn acquire(&mut self) -> Result<Option<Report>, LinkFault> {
        match self.config.mode {
            ReportMode::Remote => {
                self.command(Command::ReadData)?;
                let first = self.read_bounded()?;
                self.finish_report(first).map(Some)
            }
            ReportMode::Stream => {
                // Only probe between reports; a pending report keeps the
                // probe due until the mailbox drains
                if self.link.is_quiet() && self.heartbeat.due(self.link.now_ms()) {
                    self.status_probe()?;
                }
                match self.link.read(self.config.report_wait_ms) {
                    Ok(first) => self.finish_report(first).map(Some),
                    Err(_) => Ok(None),
                }
            }
        }
    }

    /// Status request as a liveness check; the status bytes are discarded
    ///
    /// Up to one report's worth of stream bytes may still arrive ahead of
    /// the ACK; they are skipped.
    fn status_probe(&mut self) -> Result<(), LinkFault> {
        self.link
            .write(Command::StatusRequest.to_byte())
            .map_err(|_| LinkFault::TransmitTimeout)?;

        let mut skipped = 0;
        loop {
            match self.link.read(self.config.ack_timeout_ms) {
                Ok(byte) if byte == Response::Ack.to_byte() => break,
                Ok(_) if skipped < REPORT_LEN => skipped += 1,
                _ => return Err(LinkFault::Desync),
            }
        }

        for _ in 0..Command::StatusRequest.reply_len() {
            self.read_bounded()?;
        }
        Ok(())
    }

    fn finish_report(&mut self, first: u8) -> Result<Report, LinkFault> {
        let second = self.read_bounded()?;
        let third = self.read_bounded()?;
        Ok(Report::from_bytes([first, second, third]))
    }

    fn read_bounded(&mut self) -> Result<u8, LinkFault> {
        self.link
            .read(self.config.report_byte_timeout_ms)
            .map_err(|_| LinkFault::Desync)
    }

    /// Write a command and expect its ACK
    fn command(&mut self, command: Command) -> Result<(), LinkFault> {
        self.link
            .write(command.to_byte())
            .map_err(|_| LinkFault::TransmitTimeout)?;
        match self.link.read(self.config.ack_timeout_ms) {
            Ok(byte) if byte == Response::Ack.to_byte() => Ok(()),
            _ => Err(LinkFault::Desync),
        }
    }

    fn emit<S: PointerSink>(&mut self, report: &Report, sink: &mut S, switches: &Switches) {
        let suspended = sink.is_suspended();
        let logical = translate(report, self.aux, switches.left_handed);

        let scroll_held = switches.scroll_emulation && logical.contains(Button::Extra);
        let reported = if switches.scroll_emulation {
            logical.with(Button::Extra, false)
        } else {
            logical
        };

        let mut active = false;
        for (button, pressed) in self.buttons.changes(reported) {
            sink.button(button, pressed);
            active = true;
        }
        self.buttons = reported;

        let (dx, dy) = host_motion(report);
        let moved = dx != 0 || dy != 0;
        if scroll_held {
            if let Some(ticks) = self.scroll.feed(dy) {
                if !suspended {
                    sink.wheel(ticks);
                }
            }
        } else {
            self.scroll.reset();
            if moved && !suspended {
                sink.motion(dx, dy);
            }
        }

        if active || moved {
            self.jiggler.note_activity(self.link.now_ms());
        }
    }
}

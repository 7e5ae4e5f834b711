//! Simulated PS/2 mouse for host-side tests
//!
//! Both bus lines are handles onto one shared device model. Every line read
//! advances the device by one half clock period, so the host's spin-waits
//! drive the simulation forward exactly like a real device would.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use trackport_hal::{InputPin, Monotonic, OpenDrainPin};

use super::LinkChannel;

/// Clock that advances on every read and can be moved forward by tests
pub struct SimClock {
    now_us: Cell<u64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            now_us: Cell::new(0),
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_us.set(self.now_us.get() + ms * 1000);
    }
}

impl Monotonic for SimClock {
    fn now_us(&self) -> u64 {
        let now = self.now_us.get();
        self.now_us.set(now + 2);
        now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wire {
    Clock,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Host holds data low; clocking starts once clock is released
    Requested,
    Clocking { sampled: u8, bits: u16 },
    AckData,
    AckClock,
    AckRelease,
}

struct Device {
    channel: &'static LinkChannel,
    host_clock_low: bool,
    host_data_low: bool,
    dev_clock_low: bool,
    dev_data_low: bool,
    phase: Phase,
    incoming: u8,
    received: Vec<u8>,
    bad_frames: usize,
    unplugged: bool,
    /// Index of a received byte the device swallows without replying
    mute: Option<usize>,
    awaiting_argument: bool,
    reporting: bool,
    remote: bool,
    polled_reports: VecDeque<[u8; 3]>,
    /// Bytes sent ahead of the next reply
    preface: Vec<u8>,
    /// Self-test result byte answered to reset
    self_test: u8,
}

impl Device {
    fn level(&self, wire: Wire) -> bool {
        match wire {
            Wire::Clock => !(self.host_clock_low || self.dev_clock_low),
            Wire::Data => !(self.host_data_low || self.dev_data_low),
        }
    }

    fn host_changed(&mut self) {
        if self.host_clock_low {
            self.dev_clock_low = false;
            self.dev_data_low = false;
            self.phase = if self.host_data_low {
                Phase::Requested
            } else {
                Phase::Idle
            };
        }
    }

    fn tick(&mut self) {
        if self.unplugged {
            return;
        }
        match self.phase {
            Phase::Idle => {}
            Phase::Requested => {
                if !self.host_clock_low && self.host_data_low {
                    self.dev_clock_low = true;
                    self.phase = Phase::Clocking {
                        sampled: 0,
                        bits: 0,
                    };
                }
            }
            Phase::Clocking { sampled, bits } => {
                if self.dev_clock_low {
                    // Rising edge: sample the host's bit
                    self.dev_clock_low = false;
                    let bits = bits | (u16::from(!self.host_data_low) << sampled);
                    let sampled = sampled + 1;
                    if sampled == 10 {
                        self.finish_frame(bits);
                        self.phase = Phase::AckData;
                    } else {
                        self.phase = Phase::Clocking { sampled, bits };
                    }
                } else {
                    self.dev_clock_low = true;
                }
            }
            Phase::AckData => {
                self.dev_data_low = true;
                self.phase = Phase::AckClock;
            }
            Phase::AckClock => {
                self.dev_clock_low = true;
                self.phase = Phase::AckRelease;
            }
            Phase::AckRelease => {
                self.dev_clock_low = false;
                self.dev_data_low = false;
                self.phase = Phase::Idle;
                let byte = self.incoming;
                self.received.push(byte);
                if self.mute != Some(self.received.len() - 1) {
                    self.respond(byte);
                }
            }
        }
    }

    fn finish_frame(&mut self, bits: u16) {
        let byte = (bits & 0xFF) as u8;
        let parity = bits & 0x100 != 0;
        let stop = bits & 0x200 != 0;
        if parity != (byte.count_ones() % 2 == 0) || !stop {
            self.bad_frames += 1;
        }
        self.incoming = byte;
    }

    fn respond(&mut self, byte: u8) {
        let preface = core::mem::take(&mut self.preface);
        self.reply(&preface);
        if self.awaiting_argument {
            self.awaiting_argument = false;
            self.reply(&[0xFA]);
            return;
        }
        match byte {
            0xFF => {
                self.reporting = false;
                self.remote = false;
                let self_test = self.self_test;
                self.reply(&[0xFA, self_test, 0x00]);
            }
            0xF4 => {
                self.reporting = true;
                self.reply(&[0xFA]);
            }
            0xF5 => {
                self.reporting = false;
                self.reply(&[0xFA]);
            }
            0xF0 => {
                self.remote = true;
                self.reply(&[0xFA]);
            }
            0xEA => {
                self.remote = false;
                self.reply(&[0xFA]);
            }
            0xE8 | 0xF3 => {
                self.awaiting_argument = true;
                self.reply(&[0xFA]);
            }
            0xE6 | 0xF6 => self.reply(&[0xFA]),
            0xF2 => self.reply(&[0xFA, 0x00]),
            0xE9 => self.reply(&[0xFA, 0x00, 0x02, 0x64]),
            0xEB => {
                let report = self.polled_reports.pop_front().unwrap_or([0x08, 0, 0]);
                self.reply(&[0xFA]);
                self.reply(&report);
            }
            _ => self.reply(&[0xFE]),
        }
    }

    fn reply(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.channel.mailbox().push(byte);
        }
    }
}

/// Handle on the simulated device
#[derive(Clone)]
pub struct SimBus {
    device: Rc<RefCell<Device>>,
}

impl SimBus {
    pub fn new(channel: &'static LinkChannel) -> Self {
        Self {
            device: Rc::new(RefCell::new(Device {
                channel,
                host_clock_low: false,
                host_data_low: false,
                dev_clock_low: false,
                dev_data_low: false,
                phase: Phase::Idle,
                incoming: 0,
                received: Vec::new(),
                bad_frames: 0,
                unplugged: false,
                mute: None,
                awaiting_argument: false,
                reporting: false,
                remote: false,
                polled_reports: VecDeque::new(),
                preface: Vec::new(),
                self_test: 0xAA,
            })),
        }
    }

    /// Clock and data line handles for the host side
    pub fn lines(&self) -> (SimLine, SimLine) {
        (
            SimLine {
                device: self.device.clone(),
                wire: Wire::Clock,
            },
            SimLine {
                device: self.device.clone(),
                wire: Wire::Data,
            },
        )
    }

    /// Every byte the device has received, in order
    pub fn received(&self) -> Vec<u8> {
        self.device.borrow().received.clone()
    }

    pub fn bad_frames(&self) -> usize {
        self.device.borrow().bad_frames
    }

    /// Stop clocking entirely
    pub fn set_unplugged(&self, unplugged: bool) {
        self.device.borrow_mut().unplugged = unplugged;
    }

    /// Swallow the `index`-th received byte (zero based) without replying
    pub fn mute_byte(&self, index: usize) {
        self.device.borrow_mut().mute = Some(index);
    }

    /// Whether the host is holding clock low
    pub fn host_inhibits(&self) -> bool {
        let device = self.device.borrow();
        device.host_clock_low && !device.host_data_low
    }

    pub fn is_reporting(&self) -> bool {
        self.device.borrow().reporting
    }

    pub fn is_remote(&self) -> bool {
        self.device.borrow().remote
    }

    /// Deliver raw bytes as if streamed by the device
    pub fn stream(&self, bytes: &[u8]) {
        self.device.borrow_mut().reply(bytes);
    }

    /// Bytes the device streams just before its next reply
    pub fn preface_next_reply(&self, bytes: &[u8]) {
        self.device.borrow_mut().preface = bytes.to_vec();
    }

    /// Self-test result sent after every reset
    pub fn set_self_test(&self, result: u8) {
        self.device.borrow_mut().self_test = result;
    }

    /// Report returned by the next Read Data command
    pub fn queue_polled_report(&self, report: [u8; 3]) {
        self.device.borrow_mut().polled_reports.push_back(report);
    }
}

/// One host-side bus line
pub struct SimLine {
    device: Rc<RefCell<Device>>,
    wire: Wire,
}

impl InputPin for SimLine {
    fn is_high(&self) -> bool {
        let mut device = self.device.borrow_mut();
        device.tick();
        device.level(self.wire)
    }
}

impl OpenDrainPin for SimLine {
    fn release(&mut self) {
        self.set_host_low(false);
    }

    fn drive_low(&mut self) {
        self.set_host_low(true);
    }
}

impl SimLine {
    fn set_host_low(&mut self, low: bool) {
        let mut device = self.device.borrow_mut();
        match self.wire {
            Wire::Clock => device.host_clock_low = low,
            Wire::Data => device.host_data_low = low,
        }
        device.host_changed();
    }
}

//! Logitech PS/2++ extended packets
//!
//! After the magic knock a PS/2++ device tags some reports by setting the
//! X-overflow bit (byte0 bit 6) together with byte1 bit 1. A tagged report
//! carries a 6-bit packet type and an 8-bit payload instead of movement:
//!
//! ```text
//! byte0  . 1 T5 T4 1 . . .      type bits 5:4
//! byte1  T3 T2 T1 T0 . . 1 .    type bits 3:0
//! byte2  payload
//! ```
//!
//! Classification must happen before any overflow check on the status byte,
//! since the tag reuses an overflow bit.

use crate::report::Report;

const TAG0_MASK: u8 = 0x48;
const TAG1_MASK: u8 = 0x02;

const KIND_MOUSE_EXTRA: u8 = 0x0D;
const KIND_BUTTONS: u8 = 0x0E;
const KIND_TOUCHPAD: u8 = 0x0F;

const AUX_SIDE: u8 = 0x10;
const AUX_EXTRA: u8 = 0x20;

/// Extended packet types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtendedKind {
    /// Wheel and auxiliary button state (trackballs, 4+ button mice)
    MouseExtra,
    /// Buttons 4-10 state
    Buttons,
    /// Touchpad gesture data
    TouchPad,
    /// Any other type value
    Other(u8),
}

impl ExtendedKind {
    fn from_raw(raw: u8) -> Self {
        match raw {
            KIND_MOUSE_EXTRA => ExtendedKind::MouseExtra,
            KIND_BUTTONS => ExtendedKind::Buttons,
            KIND_TOUCHPAD => ExtendedKind::TouchPad,
            other => ExtendedKind::Other(other),
        }
    }
}

/// State of the two auxiliary buttons reported in a mouse-extra packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AuxButtons {
    /// Payload bit 4
    pub side: bool,
    /// Payload bit 5
    pub extra: bool,
}

/// A report reinterpreted as PS/2++ data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExtendedPacket {
    kind: u8,
    payload: u8,
}

impl ExtendedPacket {
    /// Decode `report` if it carries the PS/2++ tag
    pub fn decode(report: &Report) -> Option<Self> {
        let [b0, b1, b2] = *report.bytes();
        if b0 & TAG0_MASK != TAG0_MASK || b1 & TAG1_MASK != TAG1_MASK {
            return None;
        }
        Some(Self {
            kind: (b1 >> 4) | (b0 & 0x30),
            payload: b2,
        })
    }

    /// Packet type
    pub fn kind(&self) -> ExtendedKind {
        ExtendedKind::from_raw(self.kind)
    }

    /// Raw type value
    pub fn raw_kind(&self) -> u8 {
        self.kind
    }

    /// Payload byte
    pub fn payload(&self) -> u8 {
        self.payload
    }

    /// Auxiliary button state, for mouse-extra packets only
    pub fn aux_buttons(&self) -> Option<AuxButtons> {
        match self.kind() {
            ExtendedKind::MouseExtra => Some(AuxButtons {
                side: self.payload & AUX_SIDE != 0,
                extra: self.payload & AUX_EXTRA != 0,
            }),
            _ => None,
        }
    }
}

/// What a received report turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packet {
    /// Ordinary movement/button report
    Motion(Report),
    /// PS/2++ data; carries no movement
    Extended(ExtendedPacket),
}

/// Classify a report as extended or motion
pub fn classify(report: Report) -> Packet {
    match ExtendedPacket::decode(&report) {
        Some(packet) => Packet::Extended(packet),
        None => Packet::Motion(report),
    }
}

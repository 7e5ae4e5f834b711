//! Report translation: physical buttons to logical host buttons
//!
//! | Physical          | Right-handed | Left-handed |
//! |-------------------|--------------|-------------|
//! | primary left      | Left         | Right       |
//! | primary right     | Right        | Left        |
//! | primary middle    | Middle       | Middle      |
//! | aux side          | Middle       | Extra       |
//! | aux extra         | Extra        | Middle      |
//!
//! Host Y grows downwards, PS/2 Y grows upwards; the bridge negates Y.

use trackport_protocol::{AuxButtons, Report};

/// Logical host buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Left,
    Right,
    Middle,
    /// Fourth button; doubles as the scroll modifier
    Extra,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Left, Button::Right, Button::Middle, Button::Extra];

    /// Bit in a [`ButtonSet`]; matches HID button numbering
    pub const fn mask(self) -> u8 {
        match self {
            Button::Left => 0x01,
            Button::Right => 0x02,
            Button::Middle => 0x04,
            Button::Extra => 0x08,
        }
    }
}

/// Set of pressed logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Copy with `button` set to `pressed`
    #[must_use]
    pub fn with(self, button: Button, pressed: bool) -> Self {
        if pressed {
            Self(self.0 | button.mask())
        } else {
            Self(self.0 & !button.mask())
        }
    }

    /// Left/right and middle/extra exchanged
    #[must_use]
    pub fn mirrored(self) -> Self {
        Self::EMPTY
            .with(Button::Left, self.contains(Button::Right))
            .with(Button::Right, self.contains(Button::Left))
            .with(Button::Middle, self.contains(Button::Extra))
            .with(Button::Extra, self.contains(Button::Middle))
    }

    /// Buttons whose state differs from `next`, with their new state
    pub fn changes(self, next: ButtonSet) -> impl Iterator<Item = (Button, bool)> {
        let changed = self.0 ^ next.0;
        Button::ALL
            .into_iter()
            .filter(move |b| changed & b.mask() != 0)
            .map(move |b| (b, next.contains(b)))
    }
}

/// Map a motion report plus the latest auxiliary state to logical buttons
pub fn translate(report: &Report, aux: AuxButtons, left_handed: bool) -> ButtonSet {
    let (left, right, side_as, extra_as) = if left_handed {
        (report.right(), report.left(), Button::Extra, Button::Middle)
    } else {
        (report.left(), report.right(), Button::Middle, Button::Extra)
    };

    let mut set = ButtonSet::EMPTY
        .with(Button::Left, left)
        .with(Button::Right, right)
        .with(Button::Middle, report.middle());
    if aux.side {
        set = set.with(side_as, true);
    }
    if aux.extra {
        set = set.with(extra_as, true);
    }
    set
}

/// Motion in host orientation
pub fn host_motion(report: &Report) -> (i16, i16) {
    (report.dx(), -report.dy())
}

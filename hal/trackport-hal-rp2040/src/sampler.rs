//! PIO-based falling-edge sampler
//!
//! A PIO state machine waits for the clock line to go high then low and
//! pushes a snapshot of GPIO 0-31 into its RX FIFO. The pins stay under SIO
//! control, so the transmitter can keep driving them through `Flex` while
//! the sampler only ever reads.
//!
//! The program, with `CLK` the clock GPIO:
//!
//! ```text
//! .wrap_target
//!     wait 1 gpio CLK
//!     wait 0 gpio CLK
//!     in pins, 32
//!     push noblock
//! .wrap
//! ```
//!
//! Sampling runs at the full system clock, so the snapshot is taken a few
//! cycles after the edge, well inside the clock-low half period.

use embassy_rp::pio::{Common, Config, FifoJoin, Instance, ShiftConfig, ShiftDirection, StateMachine};
use fixed::types::U24F8;
use pio::{InSource, WaitSource};

/// Snapshot of every GPIO level at one falling clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeSample {
    levels: u32,
    clock_gpio: u8,
    data_gpio: u8,
}

impl EdgeSample {
    pub fn clock_high(&self) -> bool {
        self.levels & (1 << self.clock_gpio) != 0
    }

    pub fn data_high(&self) -> bool {
        self.levels & (1 << self.data_gpio) != 0
    }

    /// Raw GPIO 0-31 levels
    pub fn levels(&self) -> u32 {
        self.levels
    }
}

/// Edge sampler state machine
pub struct EdgeSampler<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
    clock_gpio: u8,
    data_gpio: u8,
}

impl<'d, PIO: Instance, const SM: usize> EdgeSampler<'d, PIO, SM> {
    /// Load the sampler program and start the state machine
    ///
    /// `clock_gpio` and `data_gpio` are GPIO numbers (0-29).
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        clock_gpio: u8,
        data_gpio: u8,
    ) -> Self {
        // The clock GPIO is only known at runtime, so assemble rather than
        // use pio_asm!
        let mut a = pio::Assembler::<{ pio::RP2040_MAX_PROGRAM_SIZE }>::new();
        let mut wrap_target = a.label();
        let mut wrap_source = a.label();
        a.bind(&mut wrap_target);
        a.wait(1, WaitSource::GPIO, clock_gpio, false);
        a.wait(0, WaitSource::GPIO, clock_gpio, false);
        a.r#in(InSource::PINS, 32);
        a.push(false, false);
        a.bind(&mut wrap_source);
        let program = a.assemble_with_wrap(wrap_source, wrap_target);

        let installed = common.load_program(&program);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[]);
        cfg.shift_in = ShiftConfig {
            auto_fill: false,
            threshold: 32,
            direction: ShiftDirection::Left,
        };
        cfg.fifo_join = FifoJoin::RxOnly;
        cfg.clock_divider = U24F8::from_num(1);

        sm.set_config(&cfg);
        sm.set_enable(true);

        Self {
            sm,
            clock_gpio,
            data_gpio,
        }
    }

    /// Wait for the next falling clock edge
    pub async fn next_edge(&mut self) -> EdgeSample {
        let levels = self.sm.rx().wait_pull().await;
        self.sample(levels)
    }

    /// Discard queued samples
    pub fn clear(&mut self) {
        while self.sm.rx().try_pull().is_some() {}
    }

    fn sample(&self, levels: u32) -> EdgeSample {
        EdgeSample {
            levels,
            clock_gpio: self.clock_gpio,
            data_gpio: self.data_gpio,
        }
    }
}

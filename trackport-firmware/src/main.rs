//! Trackport - PS/2 Trackball to USB HID Bridge
//!
//! Firmware for RP2040-based adapters. A PS/2 pointing device (with
//! Logitech PS/2++ extras) appears to the host as a USB HID mouse.
//!
//! Work split:
//! - Core 0, interrupt executor: PS/2 edge receiver
//! - Core 0, thread executor: USB device and HID writer
//! - Core 1: blocking bridge loop (link writes, session, translation)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::interrupt::{self, InterruptExt, Priority};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::{PIO0, USB};
use embassy_rp::pio::Pio;
use embassy_rp::usb::Driver;
use embassy_rp::watchdog::Watchdog;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State as HidState};
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use usbd_hid::descriptor::{MouseReport, SerializedDescriptor};
use {defmt_rtt as _, panic_probe as _};

use trackport_core::{Bridge, Link};
use trackport_hal_rp2040::{BusLine, EdgeSampler, EmbassyClock};

mod board;
mod channels;
mod config;
mod hid;
mod sink;
mod switches;
mod tasks;

use crate::channels::LINK;
use crate::switches::BoardSwitches;
use crate::tasks::SuspendHandler;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// USB vendor/product id (pid.codes test range)
const USB_VID: u16 = 0x1209;
const USB_PID: u16 = 0x0001;

// Static cells for USB buffers (must live forever)
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static HID_STATE: StaticCell<HidState<'static>> = StaticCell::new();
static USB_HANDLER: StaticCell<SuspendHandler> = StaticCell::new();

static CORE1_STACK: StaticCell<Stack<8192>> = StaticCell::new();
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_CORE0: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Trackport firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let bridge_config = config::load();

    // PS/2 bus: SIO drives the lines, PIO0 SM0 samples every falling edge
    // Pin assignments are board-specific, see board.rs
    let clock = BusLine::new(p.PIN_2);
    let data = BusLine::new(p.PIN_3);

    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let sampler = EdgeSampler::new(
        &mut common,
        sm0,
        board::PS2_CLOCK_GPIO,
        board::PS2_DATA_GPIO,
    );
    info!("PS/2 edge sampler initialized");

    // Operator switches, closed to ground
    let switches = BoardSwitches::new(
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
    );

    // USB HID mouse
    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some("Trackport");
    usb_config.product = Some("PS/2 Trackball Bridge");
    usb_config.serial_number = None;
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );
    builder.handler(USB_HANDLER.init(SuspendHandler::new()));

    let hid_config = HidConfig {
        report_descriptor: MouseReport::desc(),
        request_handler: None,
        poll_ms: 1,
        max_packet_size: 8,
    };
    let writer: HidWriter<'static, _, { tasks::usb::HID_REPORT_SIZE }> =
        HidWriter::new(&mut builder, HID_STATE.init(HidState::new()), hid_config);
    let usb = builder.build();
    info!("USB HID initialized");

    // Bridge loop on core 1
    let link = Link::new(
        clock,
        data,
        EmbassyClock,
        &LINK,
        &LINK,
        bridge_config.tx_timeout_ms,
    );
    let bridge = Bridge::new(link, bridge_config);
    let watchdog = Watchdog::new(p.WATCHDOG);

    spawn_core1(p.CORE1, CORE1_STACK.init(Stack::new()), move || {
        tasks::bridge_loop(bridge, switches, watchdog)
    });

    // Receiver above the thread executor so edges are never starved by USB
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high.spawn(tasks::link_rx_task(sampler)).unwrap();

    let executor = EXECUTOR_CORE0.init(Executor::new());
    executor.run(|spawner: Spawner| {
        spawner.spawn(tasks::usb_task(usb)).unwrap();
        spawner.spawn(tasks::hid_task(writer)).unwrap();
        info!("All tasks spawned, firmware running");
    })
}

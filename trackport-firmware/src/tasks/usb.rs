//! USB device and HID mouse tasks

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::HidWriter;
use embassy_usb::{Handler, UsbDevice};

use crate::channels::{POINTER_EVENTS, USB_SUSPENDED};
use crate::hid::HidEncoder;

/// Largest HID report the writer accepts
pub const HID_REPORT_SIZE: usize = 8;

pub type UsbDriver = Driver<'static, USB>;

/// Run the USB device state machine
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB task started");
    device.run().await
}

/// Turn pointer events into HID reports
#[embassy_executor::task]
pub async fn hid_task(mut writer: HidWriter<'static, UsbDriver, HID_REPORT_SIZE>) {
    info!("HID task started");

    let mut encoder = HidEncoder::new();

    loop {
        let event = POINTER_EVENTS.receive().await;

        // The host is not reading; queued reports would arrive as one
        // stale burst after resume
        let suspended = USB_SUSPENDED.load(Ordering::Relaxed);
        let Some(reports) = encoder.deliver(event, suspended) else {
            trace!("Suspended, dropping {:?}", event);
            continue;
        };

        for report in reports {
            if let Err(e) = writer.write_serialize(&report).await {
                warn!("HID write failed: {:?}", e);
                break;
            }
        }
    }
}

/// Tracks USB bus state for the bridge
pub struct SuspendHandler;

impl SuspendHandler {
    pub const fn new() -> Self {
        Self
    }
}

impl Handler for SuspendHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            USB_SUSPENDED.store(false, Ordering::Relaxed);
        }
        debug!("USB enabled: {}", enabled);
    }

    fn reset(&mut self) {
        USB_SUSPENDED.store(false, Ordering::Relaxed);
        debug!("USB bus reset");
    }

    fn configured(&mut self, configured: bool) {
        info!("USB configured: {}", configured);
    }

    fn suspended(&mut self, suspended: bool) {
        USB_SUSPENDED.store(suspended, Ordering::Relaxed);
        info!("USB suspended: {}", suspended);
    }
}

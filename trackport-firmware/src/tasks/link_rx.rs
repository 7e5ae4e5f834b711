//! PS/2 receive task
//!
//! Runs on the high-priority interrupt executor so every falling edge is
//! decoded within a few microseconds of the PIO capturing it.

use defmt::*;
use embassy_rp::peripherals::PIO0;
use trackport_core::LinkReceiver;
use trackport_hal_rp2040::EdgeSampler;

use crate::channels::LINK;

/// Feed PIO edge samples to the link receiver
#[embassy_executor::task]
pub async fn link_rx_task(mut sampler: EdgeSampler<'static, PIO0, 0>) {
    info!("Link RX task started");

    let mut receiver = LinkReceiver::new(&LINK);

    loop {
        let edge = sampler.next_edge().await;
        match receiver.on_clock_edge(edge.clock_high(), edge.data_high()) {
            Ok(Some(byte)) => trace!("RX: {=u8:#04x}", byte),
            Ok(None) => {}
            Err(e) => warn!("Frame error: {:?}", e),
        }
    }
}

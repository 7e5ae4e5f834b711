//! Bridge loop on core 1
//!
//! Every link wait is a spin, so the loop gets a core to itself and never
//! yields. The watchdog is fed once per iteration; the longest iteration
//! (a bring-up that times out late) stays well inside its period.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_rp::watchdog::Watchdog;
use embassy_time::Duration;
use trackport_core::{Bridge, LinkChannel, Outcome, SessionError};
use trackport_hal_rp2040::{BusLine, EmbassyClock};

use crate::sink::ChannelSink;
use crate::switches::BoardSwitches;

/// Watchdog period; the RP2040 maximum is about 8.3 s
const WATCHDOG_PERIOD: Duration = Duration::from_millis(8_000);

pub type FirmwareBridge =
    Bridge<'static, BusLine<'static>, BusLine<'static>, EmbassyClock, &'static LinkChannel>;

/// Run the bridge forever
pub fn bridge_loop(
    mut bridge: FirmwareBridge,
    mut switches: BoardSwitches<Input<'static>>,
    mut watchdog: Watchdog,
) -> ! {
    info!("Bridge loop started on core 1");

    let mut sink = ChannelSink::new();
    // Only log a failing bring-up when the failure changes
    let mut last_failure: Option<SessionError> = None;

    watchdog.start(WATCHDOG_PERIOD);

    loop {
        watchdog.feed();

        match bridge.poll(&mut sink, &mut switches) {
            Outcome::Idle | Outcome::Report => {}
            Outcome::Extended(kind) => debug!("PS/2++ packet: {:?}", kind),
            Outcome::Fault(fault) => warn!("Link fault: {:?}, recovering", fault),
            Outcome::Recovered { device_id } => {
                last_failure = None;
                info!(
                    "Device ready: id={=u8:#04x} session={:?} dropped_events={}",
                    device_id,
                    bridge.session().state(),
                    sink.dropped()
                );
            }
            Outcome::RecoveryFailed(err) => {
                if last_failure != Some(err) {
                    warn!("Bring-up failed at {:?}: {:?}", err.step, err.kind);
                    last_failure = Some(err);
                }
            }
        }
    }
}

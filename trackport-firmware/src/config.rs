//! Bridge configuration
//!
//! `build.rs` validates bridge.toml and turns it into the `BRIDGE_CONFIG`
//! constant included below.

use defmt::*;
use trackport_core::BridgeConfig;

include!(concat!(env!("OUT_DIR"), "/bridge_config.rs"));

/// Configuration the bridge runs with
///
/// Falls back to defaults if the generated constant fails the core's own
/// checks, which means build.rs and the core disagree on a limit.
pub fn load() -> BridgeConfig {
    match BRIDGE_CONFIG.validate() {
        Ok(()) => {
            info!(
                "Config: mode={:?} rate={:?} scroll_divisor={}",
                BRIDGE_CONFIG.mode, BRIDGE_CONFIG.sample_rate, BRIDGE_CONFIG.scroll_divisor
            );
            BRIDGE_CONFIG
        }
        Err(e) => {
            error!("Invalid bridge config: {:?}", e);
            error!("Using built-in defaults");
            BridgeConfig::default()
        }
    }
}

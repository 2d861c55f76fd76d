//! LoRa link math.
//!
//! This module contains:
//! - [`config`]: Region presets and standard LoRa parameters
//! - [`airtime`]: Time-on-air calculation for LoRa packets
//! - [`duty_cycle`]: Packet rate under a duty-cycle cap

mod airtime;
mod config;
mod duty_cycle;

pub use airtime::{airtime, airtime_ms, payload_symbol_count, LoRaParams};
pub use config::{
    Region, BANDWIDTH_HZ, CODING_RATE, MAX_SPREADING_FACTOR, MIN_SPREADING_FACTOR,
    PREAMBLE_SYMBOLS, SPREADING_FACTOR,
};
pub use duty_cycle::{
    airtime_budget_per_hour, packets_per_hour, DEFAULT_DUTY_CYCLE, SECONDS_PER_HOUR,
};

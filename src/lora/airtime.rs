//! LoRa time-on-air calculation.
//!
//! Computes how long a single packet occupies the channel from its payload
//! size and modulation parameters. The payload symbol count follows the
//! standard LoRa formula with the CRC and header terms folded into fixed
//! constants (`+ 28 + 16 - 20`) and a `4 * (SF - 2)` denominator.
//!
//! # Example
//!
//! ```
//! use lora_capacity::lora::{airtime, LoRaParams};
//!
//! let params = LoRaParams::new(7);
//! let seconds = airtime(20, &params).unwrap();
//! assert!((seconds - 0.061696).abs() < 1e-9);
//! ```

use super::config::{BANDWIDTH_HZ, CODING_RATE, PREAMBLE_SYMBOLS, SPREADING_FACTOR};
use crate::CapacityError;
use log::debug;

/// Fixed sync word and header overhead, in symbols.
const SYNC_SYMBOLS: f64 = 4.25;

/// Symbols always sent for the payload section, before any coding blocks.
const BASE_PAYLOAD_SYMBOLS: f64 = 8.0;

/// LoRa modulation parameters for airtime calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoRaParams {
    /// Spreading factor (7-12; the formula is only defined above 2)
    pub spreading_factor: u8,
    /// Bandwidth in Hz (typically 125000, 250000, or 500000)
    pub bandwidth_hz: f64,
    /// Coding rate denominator (5-8 for 4/5 to 4/8)
    pub coding_rate: u8,
    /// Preamble length in symbols (typically 8)
    pub preamble_symbols: u16,
}

impl Default for LoRaParams {
    fn default() -> Self {
        Self::new(SPREADING_FACTOR)
    }
}

impl LoRaParams {
    /// Parameters for the given spreading factor with standard defaults
    /// (125 kHz, coding rate 4/5, 8 preamble symbols).
    pub fn new(spreading_factor: u8) -> Self {
        Self {
            spreading_factor,
            bandwidth_hz: BANDWIDTH_HZ,
            coding_rate: CODING_RATE,
            preamble_symbols: PREAMBLE_SYMBOLS,
        }
    }

    pub fn with_bandwidth(mut self, bandwidth_hz: f64) -> Self {
        self.bandwidth_hz = bandwidth_hz;
        self
    }

    pub fn with_coding_rate(mut self, coding_rate: u8) -> Self {
        self.coding_rate = coding_rate;
        self
    }

    pub fn with_preamble(mut self, preamble_symbols: u16) -> Self {
        self.preamble_symbols = preamble_symbols;
        self
    }

    /// Check that the parameters are inside the domain of the airtime formula.
    pub fn validate(&self) -> Result<(), CapacityError> {
        validate_symbol_params(self.spreading_factor, self.coding_rate)?;
        if !self.bandwidth_hz.is_finite() || self.bandwidth_hz <= 0.0 {
            return Err(CapacityError::invalid(
                "bandwidth",
                format!("must be a positive number of Hz, got {}", self.bandwidth_hz),
            ));
        }
        Ok(())
    }

    /// Symbol duration in seconds: `2^SF / BW`.
    pub fn symbol_duration(&self) -> f64 {
        2.0_f64.powi(i32::from(self.spreading_factor)) / self.bandwidth_hz
    }
}

fn validate_symbol_params(spreading_factor: u8, coding_rate: u8) -> Result<(), CapacityError> {
    if spreading_factor <= 2 {
        return Err(CapacityError::invalid(
            "spreading_factor",
            format!("must be greater than 2, got {}", spreading_factor),
        ));
    }
    if coding_rate == 0 {
        return Err(CapacityError::invalid("coding_rate", "must be at least 1"));
    }
    Ok(())
}

/// Number of symbols in the payload section of a packet.
///
/// `8 + CR * max(ceil((8*PL - 4*SF + 28 + 16 - 20) / (4*(SF - 2))), 0)`
///
/// Small payloads at high spreading factors give a negative block count,
/// which is clamped so only the 8 base symbols remain.
pub fn payload_symbol_count(
    payload_bytes: usize,
    spreading_factor: u8,
    coding_rate: u8,
) -> Result<f64, CapacityError> {
    validate_symbol_params(spreading_factor, coding_rate)?;

    let sf = f64::from(spreading_factor);
    let numerator = 8.0 * payload_bytes as f64 - 4.0 * sf + 28.0 + 16.0 - 20.0;
    let denominator = 4.0 * (sf - 2.0);

    let blocks = (numerator / denominator).ceil().max(0.0);
    Ok(BASE_PAYLOAD_SYMBOLS + blocks * f64::from(coding_rate))
}

/// Calculate LoRa packet airtime in seconds.
///
/// Returns [`CapacityError::InvalidParameter`] when the spreading factor is
/// 2 or less, the coding rate is zero, or the bandwidth is not positive.
pub fn airtime(payload_bytes: usize, params: &LoRaParams) -> Result<f64, CapacityError> {
    params.validate()?;

    let symbol_duration = params.symbol_duration();
    let payload_symbols =
        payload_symbol_count(payload_bytes, params.spreading_factor, params.coding_rate)?;
    let total_symbols = f64::from(params.preamble_symbols) + SYNC_SYMBOLS + payload_symbols;
    let seconds = total_symbols * symbol_duration;

    debug!(
        "airtime: {} bytes SF{} {} Hz -> {} symbols, {:.6} s",
        payload_bytes, params.spreading_factor, params.bandwidth_hz, total_symbols, seconds
    );
    Ok(seconds)
}

/// Calculate airtime in milliseconds (convenience wrapper).
pub fn airtime_ms(payload_bytes: usize, params: &LoRaParams) -> Result<f64, CapacityError> {
    Ok(airtime(payload_bytes, params)? * 1000.0)
}

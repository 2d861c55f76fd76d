//! LoRa region configuration.
//!
//! Region presets carry the regulatory duty cycle used as the default cap
//! for capacity estimates. The default region is chosen at compile time via
//! the `region-*` cargo features.

use crate::CapacityError;
use std::fmt;

/// Frequency band region.
///
/// Determines the duty cycle limit for regulatory compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// EU 863-870 MHz band (1% duty cycle)
    Eu868,
    /// US 902-928 MHz band (more relaxed duty cycle)
    Us915,
    /// Australia 915-928 MHz
    Au915,
    /// Asia 920-923 MHz
    As923,
}

impl Region {
    /// All known regions, in declaration order.
    pub const ALL: [Region; 4] = [Self::Eu868, Self::Us915, Self::Au915, Self::As923];

    /// Get the duty cycle limit for this region (percentage).
    pub fn duty_cycle_percent(self) -> f64 {
        match self {
            Self::Eu868 => 1.0,
            Self::Us915 => 10.0,
            Self::Au915 => 10.0,
            Self::As923 => 1.0,
        }
    }

    /// Duty cycle limit as a fraction of time (0.01 = 1%).
    pub fn duty_cycle(self) -> f64 {
        self.duty_cycle_percent() / 100.0
    }

    /// Short lowercase name, as accepted by [`str::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eu868 => "eu868",
            Self::Us915 => "us915",
            Self::Au915 => "au915",
            Self::As923 => "as923",
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        #[cfg(feature = "region-us915")]
        return Self::Us915;
        #[cfg(feature = "region-au915")]
        return Self::Au915;
        #[cfg(feature = "region-as923")]
        return Self::As923;
        #[cfg(not(any(
            feature = "region-us915",
            feature = "region-au915",
            feature = "region-as923"
        )))]
        Self::Eu868
    }
}

impl std::str::FromStr for Region {
    type Err = CapacityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| CapacityError::invalid("region", format!("unknown region: {}", s)))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==================== Standard LoRa Parameters ====================

/// Spreading factor (SF7 - balanced range/speed).
pub const SPREADING_FACTOR: u8 = 7;

/// Smallest spreading factor defined for LoRa.
pub const MIN_SPREADING_FACTOR: u8 = 6;

/// Largest spreading factor defined for LoRa.
pub const MAX_SPREADING_FACTOR: u8 = 12;

/// Bandwidth in Hz (125 kHz - standard LoRa).
pub const BANDWIDTH_HZ: f64 = 125_000.0;

/// Coding rate denominator (5 = 4/5 coding rate).
pub const CODING_RATE: u8 = 5;

/// Preamble length in symbols.
pub const PREAMBLE_SYMBOLS: u16 = 8;

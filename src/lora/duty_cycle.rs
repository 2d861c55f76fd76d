//! Duty-cycle limited packet rate.
//!
//! Converts the airtime of one packet into the theoretical maximum number of
//! packets per hour a transmitter may send without exceeding its duty cycle.
//!
//! # Example
//!
//! ```
//! use lora_capacity::lora::{packets_per_hour, DEFAULT_DUTY_CYCLE};
//!
//! // 1% of an hour is 36 s of airtime; 100 ms packets fit 360 times.
//! let rate = packets_per_hour(0.1, DEFAULT_DUTY_CYCLE).unwrap();
//! assert!((rate - 360.0).abs() < 1e-9);
//! ```

use crate::CapacityError;
use log::debug;

/// Seconds in the window the duty cycle applies to.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Default duty cycle (1%, EU 868 MHz band).
pub const DEFAULT_DUTY_CYCLE: f64 = 0.01;

/// Airtime budget in seconds per hour for the given duty cycle.
pub fn airtime_budget_per_hour(duty_cycle: f64) -> Result<f64, CapacityError> {
    if !duty_cycle.is_finite() || duty_cycle < 0.0 {
        return Err(CapacityError::invalid(
            "duty_cycle",
            format!("must be a non-negative fraction, got {}", duty_cycle),
        ));
    }
    Ok(SECONDS_PER_HOUR * duty_cycle)
}

/// Maximum packets per hour under a duty-cycle cap.
///
/// `rate = 3600 * duty_cycle / airtime_seconds`
///
/// A zero duty cycle yields a rate of zero. Non-positive airtime and negative
/// duty cycles are rejected with [`CapacityError::InvalidParameter`].
pub fn packets_per_hour(airtime_seconds: f64, duty_cycle: f64) -> Result<f64, CapacityError> {
    if !airtime_seconds.is_finite() || airtime_seconds <= 0.0 {
        return Err(CapacityError::invalid(
            "airtime_seconds",
            format!("must be positive, got {}", airtime_seconds),
        ));
    }
    let budget = airtime_budget_per_hour(duty_cycle)?;
    let rate = budget / airtime_seconds;

    debug!(
        "rate: {:.3} s budget / {:.6} s per packet = {:.3} packets/hour",
        budget, airtime_seconds, rate
    );
    Ok(rate)
}

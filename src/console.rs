//! Interactive console session.
//!
//! Prompts for the scenario one field at a time, re-prompting on malformed
//! numbers, then prints the capacity report. Input and output are generic so
//! the session runs the same against a terminal or an in-memory buffer.
//!
//! # Example
//!
//! ```
//! use lora_capacity::console::run_session;
//! use lora_capacity::lora::Region;
//!
//! let mut input = "20\n7\n10\n0.01\n".as_bytes();
//! let mut output = Vec::new();
//! let report = run_session(&mut input, &mut output, Region::Eu868).unwrap();
//! assert_eq!(report.max_packets_per_hour_per_node, 58.351);
//! ```

use crate::capacity::{CapacityReport, MeshScenario};
use crate::lora::{Region, BANDWIDTH_HZ};
use crate::CapacityError;
use log::{info, warn};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Prompts allowed per field before the session gives up.
pub const MAX_ATTEMPTS: usize = 3;

const BANNER: &str = "LoRa Airtime & Mesh Capacity Estimator";

/// Answer to the duty-cycle prompt: a fraction, or a region name standing
/// for that region's regulatory limit.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DutyCycleAnswer(f64);

impl FromStr for DutyCycleAnswer {
    type Err = CapacityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(fraction) = s.parse::<f64>() {
            return Ok(Self(fraction));
        }
        s.parse::<Region>().map(|region| Self(region.duty_cycle()))
    }
}

/// Read one trimmed line. Returns `InputClosed` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<String, CapacityError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CapacityError::InputClosed);
    }
    Ok(line.trim().to_string())
}

/// Prompt until the answer parses as `T`, or `MAX_ATTEMPTS` is reached.
///
/// An empty answer selects `default` when one is given.
pub fn prompt_value<T, R, W>(
    input: &mut R,
    output: &mut W,
    label: &str,
    field: &'static str,
    default: Option<T>,
) -> Result<T, CapacityError>
where
    T: FromStr + Copy,
    R: BufRead,
    W: Write,
{
    let mut last_error = CapacityError::InputClosed;
    for attempt in 1..=MAX_ATTEMPTS {
        write!(output, "{}: ", label)?;
        output.flush()?;

        let answer = read_line(input)?;
        if answer.is_empty() {
            if let Some(value) = default {
                return Ok(value);
            }
        }
        match answer.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => {
                last_error = CapacityError::MalformedInput {
                    field,
                    input: answer,
                };
                warn!("attempt {}/{}: {}", attempt, MAX_ATTEMPTS, last_error);
                writeln!(output, "Error: {}", last_error)?;
            }
        }
    }
    Err(last_error)
}

/// Prompt for every field of a [`MeshScenario`].
///
/// The duty cycle defaults to the regulatory limit of `region`.
pub fn read_scenario<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    region: Region,
) -> Result<MeshScenario, CapacityError> {
    let payload_bytes = prompt_value(input, output, "Payload size (bytes)", "payload size", None)?;
    let spreading_factor = prompt_value(
        input,
        output,
        "Spreading Factor (7\u{2013}12)",
        "spreading factor",
        None,
    )?;
    let nodes = prompt_value(input, output, "Number of nodes in mesh", "node count", None)?;
    let duty_label = format!(
        "Duty cycle (e.g. 0.01 = 1%, or a region name) [{} {}]",
        region,
        region.duty_cycle()
    );
    let DutyCycleAnswer(duty_cycle) = prompt_value(
        input,
        output,
        &duty_label,
        "duty cycle",
        Some(DutyCycleAnswer(region.duty_cycle())),
    )?;

    Ok(MeshScenario {
        nodes,
        payload_bytes,
        spreading_factor,
        bandwidth_hz: BANDWIDTH_HZ,
        duty_cycle,
    })
}

/// Run one full session: banner, prompts, estimate, results.
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    region: Region,
) -> Result<CapacityReport, CapacityError> {
    writeln!(output, "{}\n", BANNER)?;

    let scenario = read_scenario(input, output, region)?;
    info!("estimating {:?}", scenario);
    let report = scenario.estimate()?;

    writeln!(output, "\nResults:")?;
    write!(output, "{}", report)?;
    output.flush()?;
    Ok(report)
}

//! Mesh capacity estimation.
//!
//! Combines packet airtime and the duty-cycle rate into a report of how many
//! packets a mesh of N nodes sharing one channel can send per hour, in total
//! and per node.
//!
//! # Example
//!
//! ```
//! use lora_capacity::{estimate_mesh_capacity, DEFAULT_DUTY_CYCLE};
//!
//! let report = estimate_mesh_capacity(10, 20, 7, 125_000.0, DEFAULT_DUTY_CYCLE).unwrap();
//! assert_eq!(report.airtime_seconds, 0.062);
//! assert_eq!(report.max_packets_per_hour_total, 583.51);
//! assert_eq!(report.max_packets_per_hour_per_node, 58.351);
//! assert_eq!(report.avg_seconds_between_packets_per_node, 61.7);
//! ```

use crate::lora::{
    airtime, packets_per_hour, LoRaParams, BANDWIDTH_HZ, DEFAULT_DUTY_CYCLE, SECONDS_PER_HOUR,
    SPREADING_FACTOR,
};
use crate::CapacityError;
use log::{debug, warn};
use serde::Serialize;
use std::fmt;

/// Result of a capacity estimate. Every field is rounded for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityReport {
    /// Time-on-air of one packet (3 decimals).
    pub airtime_seconds: f64,
    /// Packets per hour the whole channel allows (2 decimals).
    pub max_packets_per_hour_total: f64,
    /// Fair share of the channel rate for one node (3 decimals).
    pub max_packets_per_hour_per_node: f64,
    /// Mean gap between packets from one node, `inf` when it may never send (1 decimal).
    pub avg_seconds_between_packets_per_node: f64,
}

impl CapacityReport {
    /// Field names and values, in output order.
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("airtime_seconds", self.airtime_seconds),
            ("max_packets_per_hour_total", self.max_packets_per_hour_total),
            (
                "max_packets_per_hour_per_node",
                self.max_packets_per_hour_per_node,
            ),
            (
                "avg_seconds_between_packets_per_node",
                self.avg_seconds_between_packets_per_node,
            ),
        ]
    }

    /// Serialize to JSON. An infinite interval is written as `null`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for CapacityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.fields() {
            writeln!(f, "{}: {}", name, format_value(value))?;
        }
        Ok(())
    }
}

/// Format a float the way a console user expects: `61.7`, `10.0`, `inf`.
fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Round to `decimals` places, ties to even on the exact binary value.
///
/// Formatting with a fixed precision rounds the exact decimal expansion of
/// the float, which avoids the double rounding of `(x * 10^n).round() / 10^n`.
fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Inputs of a capacity estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshScenario {
    /// Nodes contending for the channel.
    pub nodes: u32,
    /// Payload size of every packet, in bytes.
    pub payload_bytes: usize,
    /// Spreading factor used by all nodes.
    pub spreading_factor: u8,
    /// Channel bandwidth in Hz.
    pub bandwidth_hz: f64,
    /// Duty-cycle cap as a fraction (0.01 = 1%).
    pub duty_cycle: f64,
}

impl Default for MeshScenario {
    fn default() -> Self {
        Self {
            nodes: 1,
            payload_bytes: 20,
            spreading_factor: SPREADING_FACTOR,
            bandwidth_hz: BANDWIDTH_HZ,
            duty_cycle: DEFAULT_DUTY_CYCLE,
        }
    }
}

impl MeshScenario {
    /// Estimate the capacity of this scenario.
    ///
    /// Coding rate and preamble use the standard defaults (4/5, 8 symbols).
    pub fn estimate(&self) -> Result<CapacityReport, CapacityError> {
        if self.nodes == 0 {
            return Err(CapacityError::invalid("nodes", "must be at least 1"));
        }

        let params = LoRaParams::new(self.spreading_factor).with_bandwidth(self.bandwidth_hz);
        let airtime_seconds = airtime(self.payload_bytes, &params)?;
        let total_pph = packets_per_hour(airtime_seconds, self.duty_cycle)?;

        let per_node_pph = total_pph / f64::from(self.nodes);
        let per_node_interval = if per_node_pph > 0.0 {
            SECONDS_PER_HOUR / per_node_pph
        } else {
            f64::INFINITY
        };
        if per_node_interval.is_infinite() {
            warn!("duty cycle {} leaves no airtime for any node", self.duty_cycle);
        }

        debug!(
            "{} nodes: {:.3} packets/hour total, {:.3} per node, one every {:.1} s",
            self.nodes, total_pph, per_node_pph, per_node_interval
        );

        Ok(CapacityReport {
            airtime_seconds: round_to(airtime_seconds, 3),
            max_packets_per_hour_total: round_to(total_pph, 2),
            max_packets_per_hour_per_node: round_to(per_node_pph, 3),
            avg_seconds_between_packets_per_node: round_to(per_node_interval, 1),
        })
    }
}

/// Estimate total and per-node capacity of `nodes` sharing one channel.
///
/// Returns [`CapacityError::InvalidParameter`] for zero nodes and for any
/// parameter rejected by [`airtime`] or [`packets_per_hour`].
pub fn estimate_mesh_capacity(
    nodes: u32,
    payload_bytes: usize,
    spreading_factor: u8,
    bandwidth_hz: f64,
    duty_cycle: f64,
) -> Result<CapacityReport, CapacityError> {
    MeshScenario {
        nodes,
        payload_bytes,
        spreading_factor,
        bandwidth_hz,
        duty_cycle,
    }
    .estimate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eu_estimate(nodes: u32, payload_bytes: usize, sf: u8) -> CapacityReport {
        estimate_mesh_capacity(nodes, payload_bytes, sf, 125_000.0, 0.01).unwrap()
    }

    // ==================== Report Values ====================

    #[test]
    fn test_ten_nodes_sf7() {
        let report = eu_estimate(10, 20, 7);
        assert_eq!(report.airtime_seconds, 0.062);
        assert_eq!(report.max_packets_per_hour_total, 583.51);
        assert_eq!(report.max_packets_per_hour_per_node, 58.351);
        assert_eq!(report.avg_seconds_between_packets_per_node, 61.7);
    }

    #[test]
    fn test_per_node_share_and_interval() {
        let report = eu_estimate(10, 20, 7);
        assert!(
            (report.max_packets_per_hour_per_node - report.max_packets_per_hour_total / 10.0).abs()
                < 1e-3
        );
        assert!(
            (report.avg_seconds_between_packets_per_node
                - 3600.0 / report.max_packets_per_hour_per_node)
                .abs()
                < 0.1
        );
    }

    #[test]
    fn test_single_node_sf7() {
        let report = eu_estimate(1, 20, 7);
        assert_eq!(report.max_packets_per_hour_per_node, 583.506);
        assert_eq!(report.avg_seconds_between_packets_per_node, 6.2);
    }

    #[test]
    fn test_sf12_with_ten_percent_duty_cycle() {
        let report = estimate_mesh_capacity(50, 51, 12, 125_000.0, 0.1).unwrap();
        assert_eq!(report.airtime_seconds, 2.302);
        assert_eq!(report.max_packets_per_hour_total, 156.39);
        assert_eq!(report.max_packets_per_hour_per_node, 3.128);
        assert_eq!(report.avg_seconds_between_packets_per_node, 1151.0);
    }

    #[test]
    fn test_empty_payload_is_accepted() {
        let report = eu_estimate(3, 0, 12);
        assert_eq!(report.airtime_seconds, 0.664);
        assert_eq!(report.max_packets_per_hour_total, 54.25);
        assert_eq!(report.max_packets_per_hour_per_node, 18.084);
        assert_eq!(report.avg_seconds_between_packets_per_node, 199.1);
    }

    #[test]
    fn test_zero_duty_cycle_gives_infinite_interval() {
        let report = estimate_mesh_capacity(1, 20, 7, 125_000.0, 0.0).unwrap();
        assert_eq!(report.max_packets_per_hour_total, 0.0);
        assert_eq!(report.max_packets_per_hour_per_node, 0.0);
        assert_eq!(report.avg_seconds_between_packets_per_node, f64::INFINITY);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let first = eu_estimate(7, 33, 9);
        let second = eu_estimate(7, 33, 9);
        for ((_, a), (_, b)) in first.fields().iter().zip(second.fields().iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_more_nodes_means_less_per_node() {
        let mut previous = eu_estimate(1, 20, 7);
        for nodes in [2, 5, 10, 50, 100] {
            let report = eu_estimate(nodes, 20, 7);
            assert!(report.max_packets_per_hour_per_node < previous.max_packets_per_hour_per_node);
            assert!(
                report.avg_seconds_between_packets_per_node
                    > previous.avg_seconds_between_packets_per_node
            );
            assert_eq!(
                report.max_packets_per_hour_total,
                previous.max_packets_per_hour_total
            );
            previous = report;
        }
    }

    #[test]
    fn test_scenario_default_matches_free_function() {
        let scenario = MeshScenario::default();
        assert_eq!(scenario.estimate().unwrap(), eu_estimate(1, 20, 7));
    }

    // ==================== Validation ====================

    #[test]
    fn test_zero_nodes_is_rejected() {
        let result = estimate_mesh_capacity(0, 20, 7, 125_000.0, 0.01);
        assert!(matches!(
            result,
            Err(CapacityError::InvalidParameter { name: "nodes", .. })
        ));
    }

    #[test]
    fn test_invalid_sf_is_rejected() {
        let result = estimate_mesh_capacity(10, 20, 2, 125_000.0, 0.01);
        assert!(matches!(
            result,
            Err(CapacityError::InvalidParameter {
                name: "spreading_factor",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_duty_cycle_is_rejected() {
        let result = estimate_mesh_capacity(10, 20, 7, 125_000.0, -0.5);
        assert!(matches!(
            result,
            Err(CapacityError::InvalidParameter {
                name: "duty_cycle",
                ..
            })
        ));
    }

    // ==================== Formatting ====================

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.061696, 3), 0.062);
        assert_eq!(round_to(58.35062240663901, 3), 58.351);
        assert_eq!(round_to(1150.9759999999999, 1), 1151.0);
        assert_eq!(round_to(f64::INFINITY, 1), f64::INFINITY);
    }

    #[test]
    fn test_display_lines_in_order() {
        let text = eu_estimate(10, 20, 7).to_string();
        assert_eq!(
            text,
            "airtime_seconds: 0.062\n\
             max_packets_per_hour_total: 583.51\n\
             max_packets_per_hour_per_node: 58.351\n\
             avg_seconds_between_packets_per_node: 61.7\n"
        );
    }

    #[test]
    fn test_display_whole_and_infinite_values() {
        let report = estimate_mesh_capacity(1, 20, 7, 125_000.0, 0.0).unwrap();
        let text = report.to_string();
        assert!(text.contains("max_packets_per_hour_total: 0.0\n"));
        assert!(text.contains("avg_seconds_between_packets_per_node: inf\n"));
    }

    #[test]
    fn test_json_field_order() {
        let json = eu_estimate(10, 20, 7).to_json().unwrap();
        assert_eq!(
            json,
            r#"{"airtime_seconds":0.062,"max_packets_per_hour_total":583.51,"max_packets_per_hour_per_node":58.351,"avg_seconds_between_packets_per_node":61.7}"#
        );
    }

    #[test]
    fn test_json_infinite_interval_is_null() {
        let report = estimate_mesh_capacity(1, 20, 7, 125_000.0, 0.0).unwrap();
        let json = report.to_json().unwrap();
        assert!(json.contains(r#""avg_seconds_between_packets_per_node":null"#));
    }
}

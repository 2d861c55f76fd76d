//! LoRa airtime and mesh capacity estimator.
//!
//! First-principles link math: time-on-air of one packet, the packet rate a
//! duty-cycle cap allows, and how that rate divides across nodes sharing one
//! channel. All calculations are pure functions of their inputs.

pub mod capacity;
pub mod console;
mod error;
pub mod lora;

// Re-export commonly used items
pub use capacity::{estimate_mesh_capacity, CapacityReport, MeshScenario};
pub use error::CapacityError;
pub use lora::{airtime, packets_per_hour, LoRaParams, Region, DEFAULT_DUTY_CYCLE};

//! Interactive LoRa airtime and mesh capacity estimator.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! RUST_LOG=debug cargo run
//! cargo run --features region-us915   # 10% default duty cycle
//! ```

use log::{error, info};
use lora_capacity::console::run_session;
use lora_capacity::Region;
use std::io;

fn main() {
    // Logs go to stderr; the report goes to stdout
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let region = Region::default();
    info!(
        "default region {} ({}% duty cycle)",
        region,
        region.duty_cycle_percent()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run_session(&mut stdin.lock(), &mut stdout.lock(), region) {
        error!("session failed: {}", e);
        std::process::exit(1);
    }
}

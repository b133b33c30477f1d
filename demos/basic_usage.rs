//! Basic logger usage example
//!
//! Demonstrates thresholds, prefix flags and JSON output on the console.
//!
//! Run with: cargo run --example basic_usage

use queue_logger::prelude::*;
use queue_logger::{debug, info, output, warn};

fn main() -> Result<()> {
    println!("=== Queue Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .level(Level::Debug)
        .flags(&[Flags::LEVEL, Flags::TIME])
        .build()?;

    // Messages are written by the background writer, so output may trail
    // the println! lines above and below.
    println!("1. Logging at different levels:");
    debug!(logger, "This is a debug message");
    info!(logger, "Listening on port {}", 8080);
    warn!(logger, "Retry {} of {}", 1, 3);
    output!(logger, "Always shown unless disabled");

    println!("\n2. Raising the threshold to error:");
    logger.set_level(Level::Error);
    info!(logger, "Info message (hidden)");
    logger.error("Error message (visible)", &[]);

    println!("\n3. JSON output with pid and tid:");
    logger.set_level(Level::Info);
    logger.add_flags(&[Flags::PID, Flags::TID]);
    logger.set_json(true);
    info!(logger, "user {} said \"{}\"", "alice", "hi");

    logger.stop();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}

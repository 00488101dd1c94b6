//! Basic logger usage example
//!
//! Demonstrates level filtering, formatted messages and key/value fields
//! written as JSON lines to stderr.
//!
//! Run with: cargo run --example basic_usage

use rust_context_logger::prelude::*;
use rust_context_logger::{error, warning};

fn main() -> Result<()> {
    println!("=== Rust Context Logger - Basic Usage Example ===\n");

    let logger = Logger::new(Context::background());

    println!("1. Default minimum level is WARNING - debug and info are dropped:");
    logger.debug("Debug message (hidden)")?;
    logger.info("Info message (hidden)")?;
    logger.warning("Warning message (visible)")?;

    println!("\n2. Lowering the minimum level:");
    rust_context_logger::set_min_level(LogLevel::Debug);
    logger.debug("Debug message (visible)")?;
    logger.info("Info message (visible)")?;

    println!("\n3. Formatted messages:");
    warning!(logger, "format with {} {} value", "more than one", "argument")?;

    println!("\n4. Key/value fields:");
    logger.contextual().warning(
        "request finished",
        fields!["status", 200, "latency_ms", 12.5, "cached", false],
    )?;

    println!("\n5. Errors:");
    let err = std::io::Error::other("connection refused");
    error!(logger, err = err, "failed to reach {}", "db-1")?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

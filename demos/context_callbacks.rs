//! Context callback example
//!
//! Demonstrates deriving fields from the context a logger is bound to,
//! forwarding errors to a crash reporter and wrapping the logger in a
//! helper without losing the caller location.
//!
//! Run with: cargo run --example context_callbacks

use rust_context_logger::prelude::*;

fn log_failure(logger: &Logger, err: &std::io::Error) -> Result<()> {
    logger
        .additional_caller_skip(1)
        .error(Some(err), "operation failed")
}

fn main() -> Result<()> {
    println!("=== Rust Context Logger - Context Callbacks Example ===\n");

    rust_context_logger::register_extra_data_callback("opID", |ctx: &Context| {
        ctx.value::<String>("opID").map(FieldValue::from)
    });
    rust_context_logger::register_extra_data_callback("tx_id", |ctx: &Context| {
        ctx.value::<i64>("tx_id").copied().map(FieldValue::from)
    });
    rust_context_logger::set_crash_reporter(|message: &str, error: Option<&str>| {
        println!("   [crash reporter] {} ({})", message, error.unwrap_or("no error"));
    });

    let ctx = Context::background()
        .with_value("opID", "OpId1".to_string())
        .with_value("tx_id", 123_i64);
    let logger = Logger::new(ctx);

    println!("1. Fields from the bound context:");
    logger.warning("processing transaction")?;

    println!("\n2. Call fields override context fields:");
    logger
        .contextual()
        .warning("retrying", fields!["tx_id", 124, "attempt", 2])?;

    println!("\n3. Error forwarded to the crash reporter:");
    let err = std::io::Error::other("deadline exceeded");
    log_failure(&logger, &err)?;

    println!("\n4. Capture disabled:");
    logger
        .capture_crash_report(false)
        .error(Some(&err), "expected failure, not reported")?;

    rust_context_logger::clear_extra_data_callbacks();
    rust_context_logger::clear_crash_reporter();

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

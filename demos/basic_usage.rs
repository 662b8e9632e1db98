//! Basic logger usage example
//!
//! Writes a handful of records to `log.txt` (rotating at 100 KB) and echoes
//! them to the console.
//!
//! Run with: cargo run --example basic_usage

use async_file_logger::prelude::*;
use async_file_logger::{console_log, debug, error, info, warn};

fn main() -> Result<()> {
    println!("=== Async File Logger - Basic Usage Example ===\n");

    let logger = Logger::new("log.txt", true, 100);

    println!("1. Templates with heterogeneous arguments:");
    for _ in 0..4 {
        info!(logger, "starting func {}", "server")?;
    }

    let user_id = 42;
    let action = "login";
    let duration = 3.5;
    let world = String::from("World");
    for _ in 0..4 {
        info!(logger, "User {} performed {} in {} seconds.", user_id, action, duration)?;
    }
    info!(logger, "Hello {}", world)?;
    info!(logger, "This is a message without placeholders.")?;
    info!(logger, "Multiple placeholders: {}, {}, {}.", 1, 2, 3)?;

    println!("\n2. Other levels:");
    debug!(logger, "cache hit ratio {}", 0.93)?;
    warn!(logger, "retry {} of {}", 1, 3)?;
    error!(logger, "request failed with status {}", 500)?;

    println!("\n3. Format errors are reported to the caller:");
    if let Err(e) = info!(logger, "{} and {}", "only one") {
        println!("   rejected: {}", e);
    }

    println!("\n4. Synchronous console output:");
    console_log!(logger, LogLevel::Info, "written directly, {} queued", logger.queued())?;

    if let Some(e) = logger.take_sink_error() {
        println!("   file output unavailable: {}", e);
    }

    println!("\n=== Example completed successfully! ===");

    // Dropping the logger drains the queue and joins the worker
    Ok(())
}

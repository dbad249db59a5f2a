//! File logging example
//!
//! Demonstrates the log file lifecycle with lifecycle notifications and
//! styled entries echoed to the console.
//!
//! Run with: cargo run --example file_logging

use rust_log_file::prelude::*;
use rust_log_file::style::{codes, codes_list};

fn main() -> Result<()> {
    println!("=== Rust Log File - File Logging Example ===\n");

    let options = LogFileOptions::new()
        .with_auto_create(true)
        .with_auto_open(true)
        .with_auto_close(true)
        .with_logger(|text| print!("{}", text));

    let mut log = LogFile::new("application.log")?.with_options(options);
    log.on_any(|event| {
        if event.kind.is_before() {
            return Ok(());
        }
        println!("  [{}] {}", event.kind, event.path.display());
        Ok(())
    });

    println!("1. Writing entries:");
    log.write(&FormatOptions::new("Application started").with_title("boot"))?;
    log.write(
        &FormatOptions::new("Using default settings for some options")
            .with_title("config")
            .with_title_style(codes_list(&[codes::BOLD, codes::YELLOW])),
    )?;
    log.write(
        &FormatOptions::new("Failed to load optional plugin")
            .with_title("ERROR")
            .with_title_layout(Alignment::Right, 10, ' ')
            .with_message_style(vec![StyleDirective::Group(vec![codes::BOLD, codes::RED])]),
    )?;

    println!("\n2. Raw entries for plain-text consumers:");
    for i in 1..=3 {
        log.write(&FormatOptions::new(format!("Processing item {}/3", i)).with_raw(true))?;
    }

    log.close()?;
    println!("\n3. File content ({} entries):", log.metrics().entries_written());
    print!("{}", log.content()?);

    log.delete()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}

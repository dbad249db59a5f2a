//! Stress tests for the log file lifecycle
//!
//! These tests verify:
//! - High-volume writes land completely and in order
//! - Repeated create/write/delete cycles leave no stale state
//! - Independent log files can be driven from separate threads

use rust_log_file::prelude::*;
use std::fs;
use std::thread;
use tempfile::TempDir;

fn auto_options() -> LogFileOptions {
    LogFileOptions::new()
        .with_auto_create(true)
        .with_auto_open(true)
        .with_auto_close(true)
}

/// Every write is on disk by the time the call returns
#[test]
fn test_high_volume_writes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("volume.log");

    let mut log = LogFile::new(&path)
        .expect("Failed to create log file")
        .with_options(auto_options());

    for i in 0..5_000 {
        log.write(&FormatOptions::new(format!("entry {}", i)).with_raw(true))
            .expect("Failed to write");
    }

    // Read while the stream is still open
    let content = fs::read_to_string(&path).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 5_000);
    assert!(content.lines().last().unwrap_or_default().ends_with("entry 4999"));
    assert_eq!(log.metrics().entries_written(), 5_000);
    assert_eq!(log.metrics().bytes_written(), content.len() as u64);
    assert_eq!(log.metrics().failed_writes(), 0);
}

/// Create, write and delete the same path many times
#[test]
fn test_lifecycle_cycles() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("cycle.log");

    let mut log = LogFile::new(&path)
        .expect("Failed to create log file")
        .with_options(auto_options());

    for i in 0..200 {
        log.write(&FormatOptions::new(format!("cycle {}", i)).with_raw(true))
            .expect("Failed to write");
        assert_eq!(log.content().expect("Failed to read").lines().count(), 1);
        log.delete().expect("Failed to delete");
        assert!(!log.exists());
        assert!(!log.is_online());
    }

    assert_eq!(log.metrics().opens(), 200);
    assert_eq!(log.metrics().closes(), 200);
}

/// One log file per thread; each file only sees its own entries
#[test]
fn test_independent_files_across_threads() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let handles: Vec<_> = (0..8)
        .map(|thread_id| {
            let path = temp_dir.path().join(format!("thread_{}.log", thread_id));
            let mut log = LogFile::new(&path)
                .expect("Failed to create log file")
                .with_options(auto_options());
            thread::spawn(move || {
                for i in 0..250 {
                    log.write(
                        &FormatOptions::new(format!("thread {} message {}", thread_id, i))
                            .with_raw(true),
                    )
                    .expect("Failed to write");
                }
                log.close().expect("Failed to close");
                path
            })
        })
        .collect();

    for (thread_id, handle) in handles.into_iter().enumerate() {
        let path = handle.join().expect("Thread panicked");
        let content = fs::read_to_string(&path).expect("Failed to read log file");
        assert_eq!(content.lines().count(), 250);
        let prefix = format!("thread {} message", thread_id);
        assert!(content.lines().all(|line| line.contains(&prefix)));
    }
}

//! Macros for writing entries with `format!`-style messages.
//!
//! # Examples
//!
//! ```
//! use rust_log_file::prelude::*;
//! use rust_log_file::{log_entry, log_message};
//!
//! let mut log = LogFile::with_storage("/logs/app.log", MemoryFileSystem::new())
//!     .unwrap()
//!     .with_options(LogFileOptions::new().with_auto_create(true).with_auto_open(true));
//!
//! let port = 8080;
//! log_message!(log, "Server listening on port {}", port).unwrap();
//! log_entry!(log, "http", "GET {} -> {}", "/health", 200).unwrap();
//! assert_eq!(log.content().unwrap().lines().count(), 2);
//! ```

/// Write an entry with a title and a formatted message.
///
/// Evaluates to the `Result` of [`LogFile::write`](crate::LogFile::write).
///
/// ```
/// # use rust_log_file::prelude::*;
/// # let mut log = LogFile::with_storage("/logs/app.log", MemoryFileSystem::new()).unwrap()
/// #     .with_options(LogFileOptions::new().with_auto_create(true).with_auto_open(true));
/// use rust_log_file::log_entry;
/// log_entry!(log, "db", "connected to {}", "primary").unwrap();
/// ```
#[macro_export]
macro_rules! log_entry {
    ($log:expr, $title:expr, $($arg:tt)+) => {
        $log.write(&$crate::FormatOptions::new(format!($($arg)+)).with_title($title))
    };
}

/// Write an entry with the default title and a formatted message.
#[macro_export]
macro_rules! log_message {
    ($log:expr, $($arg:tt)+) => {
        $log.write(&$crate::FormatOptions::new(format!($($arg)+)))
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn memory_log() -> LogFile<MemoryFileSystem> {
        LogFile::with_storage("/logs/macro.log", MemoryFileSystem::new())
            .unwrap()
            .with_options(LogFileOptions::new().with_auto_create(true).with_auto_open(true))
    }

    #[test]
    fn test_log_entry_macro() {
        let mut log = memory_log();
        crate::log_entry!(log, "auth", "user {} logged in", 42).unwrap();

        let content = strip_ansi_content(&log);
        assert!(content.contains("auth"));
        assert!(content.contains("user 42 logged in"));
    }

    #[test]
    fn test_log_message_macro() {
        let mut log = memory_log();
        crate::log_message!(log, "plain").unwrap();
        crate::log_message!(log, "count: {}", 3).unwrap();

        let content = strip_ansi_content(&log);
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with("count: 3\n"));
    }

    fn strip_ansi_content(log: &LogFile<MemoryFileSystem>) -> String {
        crate::strip_ansi(&log.content().unwrap())
    }
}

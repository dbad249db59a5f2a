//! # Rust Log File
//!
//! A single-file logger: one [`LogFile`] owns one file on disk, its write
//! stream, and the policies for self-healing missing preconditions, while
//! [`format`] renders entries as aligned, optionally ANSI-styled lines.
//!
//! ## Features
//!
//! - **Checked lifecycle**: create, open, close, delete and write with typed
//!   errors instead of silent recovery
//! - **Lifecycle notifications**: observers see every operation before and
//!   after it happens, and can veto it
//! - **Entry formatting**: padded timestamp and title fields, per-field SGR
//!   styles, raw mode for plain text
//! - **Pluggable storage**: local disk or in-memory backends

pub mod core;
pub mod macros;
pub mod storage;

pub mod prelude {
    pub use crate::core::{
        format, pad, Alignment, ChannelObserver, DefaultFormatter, EventKind, FormatOptions,
        Formatter, LogFile, LogFileEvent, LogFileMetrics, LogFileObserver, LogFileOptions,
        LoggerError, Overrides, Result, StyleDirective, TimestampFormat,
    };
    pub use crate::storage::{FileSystem, LocalFileSystem, MemoryFileSystem};
}

pub use crate::core::style;
pub use crate::core::{
    format, pad, resolve_path, strip_ansi, Alignment, ChannelObserver, DefaultFormatter, EchoSink,
    EventKind, EventPayload, FormatOptions, Formatter, LogFile, LogFileEvent, LogFileMetrics,
    LogFileObserver, LogFileOptions, LoggerError, ObserverRegistry, Overrides, OwnedEvent,
    ResolvedFlags, Result, StyleDirective, SubscriptionId, TimestampFormat,
};
pub use storage::{FileSystem, LocalFileSystem, MemoryFileSystem};

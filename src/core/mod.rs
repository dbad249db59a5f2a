//! Core log file types and traits

pub mod entry_format;
pub mod error;
pub mod events;
pub mod log_file;
pub mod metrics;
pub mod options;
pub mod style;
pub mod timestamp;

pub use entry_format::{format, pad, Alignment, DefaultFormatter, FormatOptions, Formatter};
pub use error::{LoggerError, Result};
pub use events::{
    ChannelObserver, EventKind, EventPayload, LogFileEvent, LogFileObserver, ObserverRegistry,
    OwnedEvent, SubscriptionId,
};
pub use log_file::{resolve_path, LogFile};
pub use metrics::LogFileMetrics;
pub use options::{EchoSink, LogFileOptions, Overrides, ResolvedFlags};
pub use style::{strip_ansi, StyleDirective};
pub use timestamp::TimestampFormat;

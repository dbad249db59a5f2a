//! The log file lifecycle
//!
//! A [`LogFile`] owns one path, at most one open write stream, and the
//! options governing how missing preconditions are handled:
//!
//! | operation | needs            | error without policy | policy        |
//! |-----------|------------------|----------------------|---------------|
//! | `open`    | file exists      | `MissingFile`        | `auto_create` |
//! | `write`   | file exists      | `MissingFile`        | `auto_create` |
//! | `write`   | stream open      | `NotOpen`            | `auto_open`   |
//! | `close`   | stream open      | `NotOpen`            | `ignore_closed` override |
//! | `delete`  | file exists      | `MissingFile`        | none          |
//! | `delete`  | stream closed    | `StreamOpen`         | `auto_close`  |
//!
//! All operations are synchronous: by the time a call returns, its effect is
//! on disk. A `LogFile` assumes it is the only writer of its path; several
//! processes or instances writing the same file may interleave or corrupt
//! entries.

use super::entry_format::FormatOptions;
use super::error::{LoggerError, Result};
use super::events::{
    EventKind, EventPayload, LogFileEvent, LogFileObserver, ObserverRegistry, SubscriptionId,
};
use super::metrics::LogFileMetrics;
use super::options::{LogFileOptions, Overrides};
use crate::storage::{FileSystem, LocalFileSystem};
use std::fmt;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Resolve `path` against the current directory and fold `.` and `..`
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(LoggerError::invalid_option("path", "a file path", "an empty path"));
    }
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| LoggerError::io_operation("resolving", path, e))?
            .join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// A single log file with a checked open/close/delete lifecycle
///
/// # Example
///
/// ```
/// use rust_log_file::{FormatOptions, LogFile, LogFileOptions, MemoryFileSystem};
///
/// let storage = MemoryFileSystem::new();
/// let mut log = LogFile::with_storage("/var/log/app.log", storage)
///     .unwrap()
///     .with_options(LogFileOptions::new().with_auto_create(true).with_auto_open(true));
///
/// log.write(&FormatOptions::new("started").with_raw(true)).unwrap();
/// assert!(log.is_online());
/// assert!(log.content().unwrap().ends_with("| started\n"));
/// ```
pub struct LogFile<S: FileSystem = LocalFileSystem> {
    path: PathBuf,
    options: LogFileOptions,
    stream: Option<S::Writer>,
    storage: S,
    observers: ObserverRegistry,
    metrics: LogFileMetrics,
}

impl LogFile<LocalFileSystem> {
    /// Log file on the local disk; nothing is touched until an operation runs
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_storage(path, LocalFileSystem::new())
    }
}

impl<S: FileSystem> LogFile<S> {
    pub fn with_storage(path: impl AsRef<Path>, storage: S) -> Result<Self> {
        Ok(Self {
            path: resolve_path(path.as_ref())?,
            options: LogFileOptions::default(),
            stream: None,
            storage,
            observers: ObserverRegistry::new(),
            metrics: LogFileMetrics::new(),
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: LogFileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point this log at another file
    ///
    /// The stream must be closed first, since it is bound to the old path.
    pub fn set_path(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        if self.stream.is_some() {
            return Err(LoggerError::stream_open(&self.path));
        }
        self.path = resolve_path(path.as_ref())?;
        Ok(self)
    }

    pub fn options(&self) -> &LogFileOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut LogFileOptions {
        &mut self.options
    }

    pub fn set_options(&mut self, options: LogFileOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn metrics(&self) -> &LogFileMetrics {
        &self.metrics
    }

    /// Whether the file exists right now
    pub fn exists(&self) -> bool {
        self.storage.file_exists(&self.path)
    }

    /// Whether a write stream is open
    ///
    /// A stream whose file was removed behind its back still counts until the
    /// next `open`, `write` or `delete`, which discards it.
    pub fn is_online(&self) -> bool {
        self.stream.is_some()
    }

    /// Full file content
    pub fn content(&self) -> Result<String> {
        let bytes = self
            .storage
            .read_all(&self.path)
            .map_err(|e| self.read_error(e))?;
        String::from_utf8(bytes).map_err(|e| {
            LoggerError::io_operation(
                "decoding",
                &self.path,
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })
    }

    /// Independent reader over the file; the write stream is not affected
    pub fn read(&self) -> Result<S::Reader> {
        self.storage
            .open_read(&self.path)
            .map_err(|e| self.read_error(e))
    }

    fn read_error(&self, error: io::Error) -> LoggerError {
        if error.kind() == io::ErrorKind::NotFound {
            LoggerError::missing_file(&self.path)
        } else {
            LoggerError::io_operation("reading", &self.path, error)
        }
    }

    /// Register `observer` for one event kind
    pub fn on<F>(&mut self, kind: EventKind, observer: F) -> SubscriptionId
    where
        F: Fn(&LogFileEvent<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.observers.subscribe(Some(kind), Arc::new(observer))
    }

    /// Register `observer` for every event kind
    pub fn on_any<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&LogFileEvent<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.observers.subscribe(None, Arc::new(observer))
    }

    /// Register an observer object for one kind, or all kinds with `None`
    pub fn subscribe(
        &mut self,
        kind: Option<EventKind>,
        observer: impl LogFileObserver + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(kind, Arc::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&self, kind: EventKind, payload: EventPayload<'_>) -> Result<()> {
        if self.observers.is_empty() {
            return Ok(());
        }
        let event = LogFileEvent {
            kind,
            path: &self.path,
            online: self.stream.is_some(),
            payload,
        };
        self.observers.emit(&event)
    }

    /// Check the file, dropping a stream whose file disappeared underneath it
    fn sync_exists(&mut self) -> bool {
        let exists = self.exists();
        if !exists && self.stream.take().is_some() {
            warn!(path = %self.path.display(), "log file vanished while open, discarding stream");
            self.metrics.record_close();
        }
        exists
    }

    /// Remove a file created by this call when no stream could be opened on it
    fn undo_create(&mut self) {
        if self.stream.is_some() {
            return;
        }
        match self.storage.remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed log file after failed open"),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to remove log file after failed open")
            }
        }
    }

    pub fn create(&mut self) -> Result<&mut Self> {
        self.create_with(&Overrides::default())
    }

    /// Create the file and its directory; does nothing if the file exists
    pub fn create_with(&mut self, overrides: &Overrides) -> Result<&mut Self> {
        if self.exists() {
            return Ok(self);
        }
        let flags = self.options.resolve(overrides);

        self.emit(EventKind::BeforeCreate, EventPayload::None)?;
        if let Some(parent) = self.path.parent() {
            if !self.storage.dir_exists(parent) {
                self.storage
                    .create_dir(parent, flags.recursive)
                    .map_err(|e| LoggerError::io_operation("creating directory", parent, e))?;
            }
        }
        self.storage
            .create_file(&self.path)
            .map_err(|e| LoggerError::io_operation("creating", &self.path, e))?;
        debug!(path = %self.path.display(), "created log file");
        self.emit(EventKind::Create, EventPayload::None)?;
        Ok(self)
    }

    pub fn open(&mut self) -> Result<&mut Self> {
        self.open_with(&Overrides::default())
    }

    /// Open the write stream, creating the file if allowed
    ///
    /// Existing content is kept unless `truncate` is in effect. Opening an
    /// already open file does nothing.
    pub fn open_with(&mut self, overrides: &Overrides) -> Result<&mut Self> {
        let flags = self.options.resolve(overrides);
        let created = !self.sync_exists();
        if created {
            if !flags.auto_create {
                return Err(LoggerError::missing_file(&self.path));
            }
            self.create_with(overrides)?;
        }
        if self.stream.is_some() {
            return Ok(self);
        }

        if let Err(e) = self.open_stream(flags.truncate) {
            if created {
                self.undo_create();
            }
            return Err(e);
        }
        self.emit(EventKind::Open, EventPayload::None)?;
        Ok(self)
    }

    fn open_stream(&mut self, truncate: bool) -> Result<()> {
        self.emit(EventKind::BeforeOpen, EventPayload::None)?;
        let writer = self
            .storage
            .open_write(&self.path, truncate)
            .map_err(|e| LoggerError::io_operation("opening", &self.path, e))?;
        self.stream = Some(writer);
        self.metrics.record_open();
        debug!(path = %self.path.display(), truncate, "opened log file");
        Ok(())
    }

    pub fn close(&mut self) -> Result<&mut Self> {
        self.close_with(&Overrides::default())
    }

    /// Flush and release the write stream
    pub fn close_with(&mut self, overrides: &Overrides) -> Result<&mut Self> {
        let flags = self.options.resolve(overrides);
        if self.stream.is_none() {
            if flags.ignore_closed {
                return Ok(self);
            }
            return Err(LoggerError::not_open(&self.path));
        }

        self.emit(EventKind::BeforeClose, EventPayload::None)?;
        if let Some(writer) = self.stream.as_mut() {
            writer
                .flush()
                .map_err(|e| LoggerError::io_operation("flushing", &self.path, e))?;
        }
        self.stream = None;
        self.metrics.record_close();
        debug!(path = %self.path.display(), "closed log file");
        self.emit(EventKind::Close, EventPayload::None)?;
        Ok(self)
    }

    pub fn delete(&mut self) -> Result<&mut Self> {
        self.delete_with(&Overrides::default())
    }

    /// Remove the file, closing the stream first if allowed
    pub fn delete_with(&mut self, overrides: &Overrides) -> Result<&mut Self> {
        let flags = self.options.resolve(overrides);
        if !self.sync_exists() {
            return Err(LoggerError::missing_file(&self.path));
        }
        if self.stream.is_some() && !flags.auto_close {
            return Err(LoggerError::stream_open(&self.path));
        }

        self.emit(EventKind::BeforeDelete, EventPayload::None)?;
        if self.stream.is_some() {
            self.close_with(&Overrides::default())?;
        }
        self.storage
            .remove_file(&self.path)
            .map_err(|e| LoggerError::io_operation("deleting", &self.path, e))?;
        debug!(path = %self.path.display(), "deleted log file");
        self.emit(EventKind::Delete, EventPayload::None)?;
        Ok(self)
    }

    pub fn write(&mut self, entry: &FormatOptions) -> Result<&mut Self> {
        self.write_with(entry, &Overrides::default())
    }

    /// Render `entry` with the configured formatter and append it
    ///
    /// Both preconditions are checked before anything happens, so a write
    /// refused for a missing file or closed stream leaves no trace. A file
    /// created by this call is removed again if no stream can be opened on it.
    pub fn write_with(&mut self, entry: &FormatOptions, overrides: &Overrides) -> Result<&mut Self> {
        let flags = self.options.resolve(overrides);
        let exists = self.sync_exists();
        if !exists && !flags.auto_create {
            return Err(LoggerError::missing_file(&self.path));
        }
        if self.stream.is_none() && !flags.auto_open {
            return Err(LoggerError::not_open(&self.path));
        }

        self.emit(EventKind::BeforeWrite, EventPayload::Entry(entry))?;
        if !exists {
            self.create_with(overrides)?;
        }
        if self.stream.is_none() {
            if let Err(e) = self.open_with(overrides) {
                if !exists {
                    self.undo_create();
                }
                return Err(e);
            }
        }

        let text = self.options.formatter.format(entry);
        let writer = self
            .stream
            .as_mut()
            .ok_or_else(|| LoggerError::not_open(&self.path))?;
        if let Err(e) = writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush())
        {
            self.metrics.record_failed_write();
            return Err(LoggerError::io_operation("writing", &self.path, e));
        }
        self.metrics.record_write(text.len());
        trace!(path = %self.path.display(), bytes = text.len(), "wrote log entry");

        if let Some(sink) = &self.options.logger {
            sink(&text);
        }
        self.emit(EventKind::Write, EventPayload::Text(&text))?;
        Ok(self)
    }
}

impl<S: FileSystem> fmt::Debug for LogFile<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFile")
            .field("path", &self.path)
            .field("online", &self.stream.is_some())
            .field("options", &self.options)
            .field("observers", &self.observers)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl<S: FileSystem> Drop for LogFile<S> {
    fn drop(&mut self) {
        if let Some(writer) = self.stream.as_mut() {
            if let Err(e) = writer.flush() {
                warn!(path = %self.path.display(), error = %e, "failed to flush log file on drop");
            }
        }
    }
}

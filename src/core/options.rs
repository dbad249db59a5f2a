//! Log file options and per-call overrides
//!
//! [`LogFileOptions`] is the persistent configuration of a log file.
//! [`Overrides`] carries per-call flags; a flag set on the call always wins
//! over the persisted option.

use super::entry_format::{DefaultFormatter, Formatter};
use super::error::{LoggerError, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Receives every rendered entry after it has been written
pub type EchoSink = Arc<dyn Fn(&str) + Send + Sync>;

const FUNCTION_KEYS: [&str; 2] = ["formatter", "logger"];

/// Persistent options of a log file
///
/// Defaults: no auto-create, no auto-open, no auto-close, recursive
/// directory creation, append on open, [`DefaultFormatter`], no echo sink.
///
/// # Examples
///
/// ```
/// use rust_log_file::LogFileOptions;
///
/// let options = LogFileOptions::new()
///     .with_auto_create(true)
///     .with_auto_open(true)
///     .with_truncate(false);
/// assert!(options.auto_create);
/// ```
#[derive(Clone)]
pub struct LogFileOptions {
    /// Create the file when an operation needs it and it is missing
    pub auto_create: bool,
    /// Open the stream when a write needs it and it is closed
    pub auto_open: bool,
    /// Close the stream when a delete needs it closed
    pub auto_close: bool,
    /// Create missing ancestor directories, not just the parent
    pub recursive: bool,
    /// Empty the file when opening the stream
    pub truncate: bool,
    pub formatter: Arc<dyn Formatter>,
    pub logger: Option<EchoSink>,
}

impl Default for LogFileOptions {
    fn default() -> Self {
        Self {
            auto_create: false,
            auto_open: false,
            auto_close: false,
            recursive: true,
            truncate: false,
            formatter: Arc::new(DefaultFormatter),
            logger: None,
        }
    }
}

impl fmt::Debug for LogFileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFileOptions")
            .field("auto_create", &self.auto_create)
            .field("auto_open", &self.auto_open)
            .field("auto_close", &self.auto_close)
            .field("recursive", &self.recursive)
            .field("truncate", &self.truncate)
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl LogFileOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read flags from a JSON object, substituting the default for any
    /// field whose value has the wrong type
    ///
    /// ```
    /// use rust_log_file::LogFileOptions;
    /// use serde_json::json;
    ///
    /// let options = LogFileOptions::from_json(&json!({"autoOpen": true, "truncate": "yes"}));
    /// assert!(options.auto_open);
    /// assert!(!options.truncate);
    /// ```
    pub fn from_json(value: &Value) -> Self {
        Self::read_json(value, false).unwrap_or_default()
    }

    /// Read flags from a JSON object, rejecting the first mistyped field
    pub fn try_from_json(value: &Value) -> Result<Self> {
        Self::read_json(value, true)
    }

    fn read_json(value: &Value, strict: bool) -> Result<Self> {
        let mut options = Self::default();
        let Some(map) = value.as_object() else {
            if strict {
                return Err(LoggerError::invalid_option("options", "object", json_type(value)));
            }
            tracing::warn!(found = json_type(value), "log file options are not an object, using defaults");
            return Ok(options);
        };

        let flags = [
            ("autoCreate", &mut options.auto_create),
            ("autoOpen", &mut options.auto_open),
            ("autoClose", &mut options.auto_close),
            ("recursive", &mut options.recursive),
            ("truncate", &mut options.truncate),
        ];
        for (key, slot) in flags {
            match map.get(key) {
                None => {}
                Some(Value::Bool(flag)) => *slot = *flag,
                Some(other) if strict => {
                    return Err(LoggerError::invalid_option(key, "boolean", json_type(other)));
                }
                Some(other) => {
                    tracing::warn!(option = key, found = json_type(other), "mistyped option, using default");
                }
            }
        }

        // Function options cannot come from JSON; any value here is mistyped
        for key in FUNCTION_KEYS {
            if let Some(other) = map.get(key) {
                if strict {
                    return Err(LoggerError::invalid_option(key, "function", json_type(other)));
                }
                tracing::warn!(option = key, found = json_type(other), "mistyped option, using default");
            }
        }

        Ok(options)
    }

    #[must_use]
    pub fn with_auto_create(mut self, auto_create: bool) -> Self {
        self.auto_create = auto_create;
        self
    }

    #[must_use]
    pub fn with_auto_open(mut self, auto_open: bool) -> Self {
        self.auto_open = auto_open;
        self
    }

    #[must_use]
    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Replace the formatter used by `write`
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Echo every written entry to `sink`, e.g. the console
    #[must_use]
    pub fn with_logger(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.logger = Some(Arc::new(sink));
        self
    }

    #[must_use]
    pub fn without_logger(mut self) -> Self {
        self.logger = None;
        self
    }

    /// Apply per-call overrides on top of these options
    pub fn resolve(&self, overrides: &Overrides) -> ResolvedFlags {
        ResolvedFlags {
            auto_create: overrides.auto_create.unwrap_or(self.auto_create),
            auto_open: overrides.auto_open.unwrap_or(self.auto_open),
            auto_close: overrides.auto_close.unwrap_or(self.auto_close),
            recursive: overrides.recursive.unwrap_or(self.recursive),
            truncate: overrides.truncate.unwrap_or(self.truncate),
            ignore_closed: overrides.ignore_closed.unwrap_or(false),
        }
    }
}

/// Per-call flags; `None` defers to the persisted option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub auto_create: Option<bool>,
    pub auto_open: Option<bool>,
    pub auto_close: Option<bool>,
    pub recursive: Option<bool>,
    pub truncate: Option<bool>,
    /// Make `close` a no-op instead of an error when nothing is open
    pub ignore_closed: Option<bool>,
}

impl Overrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_auto_create(mut self, auto_create: bool) -> Self {
        self.auto_create = Some(auto_create);
        self
    }

    #[must_use]
    pub fn with_auto_open(mut self, auto_open: bool) -> Self {
        self.auto_open = Some(auto_open);
        self
    }

    #[must_use]
    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = Some(auto_close);
        self
    }

    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = Some(recursive);
        self
    }

    #[must_use]
    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = Some(truncate);
        self
    }

    #[must_use]
    pub fn with_ignore_closed(mut self, ignore_closed: bool) -> Self {
        self.ignore_closed = Some(ignore_closed);
        self
    }
}

/// Effective flags for one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFlags {
    pub auto_create: bool,
    pub auto_open: bool,
    pub auto_close: bool,
    pub recursive: bool,
    pub truncate: bool,
    pub ignore_closed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry_format::FormatOptions;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = LogFileOptions::default();
        assert!(!options.auto_create);
        assert!(!options.auto_open);
        assert!(!options.auto_close);
        assert!(options.recursive);
        assert!(!options.truncate);
        assert!(options.logger.is_none());
    }

    #[test]
    fn test_override_always_wins() {
        let options = LogFileOptions::new().with_auto_create(true).with_truncate(true);
        let flags = options.resolve(&Overrides::new().with_auto_create(false));
        assert!(!flags.auto_create);
        assert!(flags.truncate);

        let flags = options.resolve(&Overrides::new().with_truncate(false).with_auto_open(true));
        assert!(flags.auto_create);
        assert!(!flags.truncate);
        assert!(flags.auto_open);
    }

    #[test]
    fn test_lenient_json_substitutes_defaults() {
        let options = LogFileOptions::from_json(&json!({
            "autoCreate": true,
            "autoOpen": 1,
            "recursive": false,
            "formatter": "fancy",
            "unknown": "ignored"
        }));
        assert!(options.auto_create);
        assert!(!options.auto_open);
        assert!(!options.recursive);

        let options = LogFileOptions::from_json(&json!("not an object"));
        assert!(options.recursive);
    }

    #[test]
    fn test_strict_json_rejects_mistyped() {
        let err = LogFileOptions::try_from_json(&json!({"truncate": "yes"})).unwrap_err();
        match err {
            LoggerError::InvalidOption { option, expected, found } => {
                assert_eq!(option, "truncate");
                assert_eq!(expected, "boolean");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(LogFileOptions::try_from_json(&json!({"logger": true})).is_err());
        assert!(LogFileOptions::try_from_json(&json!([])).is_err());

        let options = LogFileOptions::try_from_json(&json!({"autoClose": true})).unwrap();
        assert!(options.auto_close);
    }

    #[test]
    fn test_custom_formatter() {
        let options = LogFileOptions::new()
            .with_formatter(|entry: &FormatOptions| format!("{}\n", entry.message));
        assert_eq!(options.formatter.format(&FormatOptions::new("x")), "x\n");
    }
}

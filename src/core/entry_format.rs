//! Entry formatting
//!
//! Renders one log line from a [`FormatOptions`] record:
//!
//! ```text
//! <timestamp> | <title> | <message>\n
//! ```
//!
//! The timestamp and title fields are padded to a minimum width and each of
//! the four parts (timestamp, title, message, separator) carries its own
//! style list. Raw mode drops all styling.

use super::error::LoggerError;
use super::style::{self, codes, StyleDirective};
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TIMESTAMP_WIDTH: usize = 25;
pub const DEFAULT_TITLE_WIDTH: usize = 10;
pub const DEFAULT_SEPARATOR: &str = " | ";
pub const DEFAULT_TERMINATOR: &str = "\n";
pub const DEFAULT_TITLE: &str = "log";

/// Field alignment inside its minimum width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Text first, padding after
    #[default]
    Left,
    /// Padding first, text after
    Right,
}

impl Alignment {
    pub fn to_str(&self) -> &'static str {
        match self {
            Alignment::Left => "LEFT",
            Alignment::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Alignment {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LEFT" => Ok(Alignment::Left),
            "RIGHT" => Ok(Alignment::Right),
            _ => Err(LoggerError::invalid_option(
                "alignment",
                "LEFT or RIGHT",
                format!("'{}'", s),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Alignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Pad `text` with `fill` up to `width` characters
///
/// Right alignment pads at the start, left alignment at the end. Text that
/// is already at least `width` characters long is returned unchanged.
///
/// ```
/// use rust_log_file::{pad, Alignment};
///
/// assert_eq!(pad("AB", 10, Alignment::Right, '-'), "--------AB");
/// assert_eq!(pad("AB", 4, Alignment::Left, '.'), "AB..");
/// ```
pub fn pad(text: &str, width: usize, alignment: Alignment, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let padding: String = std::iter::repeat(fill).take(width - len).collect();
    match alignment {
        Alignment::Right => padding + text,
        Alignment::Left => format!("{}{}", text, padding),
    }
}

/// Options for rendering a single entry
///
/// Every field has a default, so callers override only what they need:
///
/// ```
/// use rust_log_file::FormatOptions;
///
/// let options = FormatOptions::new("server listening")
///     .with_title("http")
///     .with_raw(true);
/// ```
///
/// A missing `timestamp` means "now" at render time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    pub timestamp: Option<DateTime<Utc>>,
    pub timestamp_format: TimestampFormat,
    pub timestamp_alignment: Alignment,
    pub timestamp_minimum_width: usize,
    pub timestamp_padding: char,
    pub title: String,
    pub title_alignment: Alignment,
    pub title_minimum_width: usize,
    pub title_padding: char,
    pub message: String,
    pub separator: String,
    pub timestamp_style: Vec<StyleDirective>,
    pub title_style: Vec<StyleDirective>,
    pub message_style: Vec<StyleDirective>,
    pub separator_style: Vec<StyleDirective>,
    pub raw: bool,
    pub terminator: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            timestamp: None,
            timestamp_format: TimestampFormat::default(),
            timestamp_alignment: Alignment::Left,
            timestamp_minimum_width: DEFAULT_TIMESTAMP_WIDTH,
            timestamp_padding: ' ',
            title: DEFAULT_TITLE.to_string(),
            title_alignment: Alignment::Left,
            title_minimum_width: DEFAULT_TITLE_WIDTH,
            title_padding: ' ',
            message: String::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
            timestamp_style: style::codes_list(&[codes::BRIGHT_BLACK]),
            title_style: style::codes_list(&[codes::BOLD]),
            message_style: Vec::new(),
            separator_style: style::codes_list(&[codes::DIM]),
            raw: false,
            terminator: DEFAULT_TERMINATOR.to_string(),
        }
    }
}

impl FormatOptions {
    /// Default options carrying `message`
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Parse options from a JSON object; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, LoggerError> {
        serde_json::from_str(json)
            .map_err(|e| LoggerError::invalid_option("format options", "valid entry options", e.to_string()))
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set alignment, minimum width and padding of the timestamp field
    #[must_use]
    pub fn with_timestamp_layout(mut self, alignment: Alignment, width: usize, fill: char) -> Self {
        self.timestamp_alignment = alignment;
        self.timestamp_minimum_width = width;
        self.timestamp_padding = fill;
        self
    }

    /// Set alignment, minimum width and padding of the title field
    #[must_use]
    pub fn with_title_layout(mut self, alignment: Alignment, width: usize, fill: char) -> Self {
        self.title_alignment = alignment;
        self.title_minimum_width = width;
        self.title_padding = fill;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_timestamp_style(mut self, styles: Vec<StyleDirective>) -> Self {
        self.timestamp_style = styles;
        self
    }

    #[must_use]
    pub fn with_title_style(mut self, styles: Vec<StyleDirective>) -> Self {
        self.title_style = styles;
        self
    }

    #[must_use]
    pub fn with_message_style(mut self, styles: Vec<StyleDirective>) -> Self {
        self.message_style = styles;
        self
    }

    #[must_use]
    pub fn with_separator_style(mut self, styles: Vec<StyleDirective>) -> Self {
        self.separator_style = styles;
        self
    }

    #[must_use]
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    #[must_use]
    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }
}

/// Render one entry
pub fn format(options: &FormatOptions) -> String {
    let timestamp = options.timestamp.unwrap_or_else(Utc::now);
    let timestamp = pad(
        &options.timestamp_format.format(&timestamp),
        options.timestamp_minimum_width,
        options.timestamp_alignment,
        options.timestamp_padding,
    );
    let title = pad(
        &options.title,
        options.title_minimum_width,
        options.title_alignment,
        options.title_padding,
    );

    let mut line = if options.raw {
        [timestamp.as_str(), title.as_str(), options.message.as_str()].join(&options.separator)
    } else {
        let separator = style::apply(&options.separator, &options.separator_style);
        [
            style::apply(&timestamp, &options.timestamp_style),
            style::apply(&title, &options.title_style),
            style::apply(&options.message, &options.message_style),
        ]
        .join(&separator)
    };
    line.push_str(&options.terminator);
    line
}

/// Turns entry options into the text written to the log file
pub trait Formatter: Send + Sync {
    fn format(&self, options: &FormatOptions) -> String;
}

/// The stock formatter, backed by [`format`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn format(&self, options: &FormatOptions) -> String {
        format(options)
    }
}

impl<F> Formatter for F
where
    F: Fn(&FormatOptions) -> String + Send + Sync,
{
    fn format(&self, options: &FormatOptions) -> String {
        self(options)
    }
}

//! ANSI SGR styling for entry fields
//!
//! A field's style list is an ordered list of [`StyleDirective`]s. Each
//! directive becomes one `ESC[...m` sequence; a grouped directive joins its
//! codes with `;` inside a single sequence. An empty list leaves the field
//! untouched: no opening sequence and no reset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Control sequence introducer
pub const CSI: &str = "\x1b[";

/// Sequence appended after a styled field
pub const RESET: &str = "\x1b[0m";

/// Common SGR codes
pub mod codes {
    pub const NORMAL: u8 = 0;
    pub const BOLD: u8 = 1;
    pub const DIM: u8 = 2;
    pub const ITALIC: u8 = 3;
    pub const UNDERLINE: u8 = 4;
    pub const INVERSE: u8 = 7;

    pub const BLACK: u8 = 30;
    pub const RED: u8 = 31;
    pub const GREEN: u8 = 32;
    pub const YELLOW: u8 = 33;
    pub const BLUE: u8 = 34;
    pub const MAGENTA: u8 = 35;
    pub const CYAN: u8 = 36;
    pub const WHITE: u8 = 37;
    pub const BRIGHT_BLACK: u8 = 90;

    pub const BG_RED: u8 = 41;
    pub const BG_GREEN: u8 = 42;
    pub const BG_YELLOW: u8 = 43;
}

/// One style directive: a single code or a `;`-joined group of codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleDirective {
    Code(u8),
    Group(Vec<u8>),
}

impl StyleDirective {
    /// Render the `ESC[...m` sequence for this directive
    pub fn sequence(&self) -> String {
        format!("{}{}m", CSI, self)
    }
}

impl fmt::Display for StyleDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleDirective::Code(code) => write!(f, "{}", code),
            StyleDirective::Group(group) => {
                let joined = group
                    .iter()
                    .map(u8::to_string)
                    .collect::<Vec<_>>()
                    .join(";");
                f.write_str(&joined)
            }
        }
    }
}

impl From<u8> for StyleDirective {
    fn from(code: u8) -> Self {
        StyleDirective::Code(code)
    }
}

impl From<Vec<u8>> for StyleDirective {
    fn from(group: Vec<u8>) -> Self {
        StyleDirective::Group(group)
    }
}

impl From<&[u8]> for StyleDirective {
    fn from(group: &[u8]) -> Self {
        StyleDirective::Group(group.to_vec())
    }
}

/// Build a style list from single codes
pub fn codes_list(list: &[u8]) -> Vec<StyleDirective> {
    list.iter().copied().map(StyleDirective::Code).collect()
}

/// Opening sequence for a style list; empty when the list is empty
pub fn open_sequence(styles: &[StyleDirective]) -> String {
    styles.iter().map(StyleDirective::sequence).collect()
}

/// Wrap `text` in the opening sequence for `styles` and a reset
///
/// An empty list returns the text unchanged, without a reset.
pub fn apply(text: &str, styles: &[StyleDirective]) -> String {
    if styles.is_empty() {
        return text.to_string();
    }
    let mut out = open_sequence(styles);
    out.push_str(text);
    out.push_str(RESET);
    out
}

/// Remove SGR escape sequences from a string
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_code_sequence() {
        assert_eq!(StyleDirective::Code(codes::BOLD).sequence(), "\x1b[1m");
    }

    #[test]
    fn test_group_joined_with_semicolon() {
        let directive = StyleDirective::from(vec![codes::BOLD, codes::RED]);
        assert_eq!(directive.sequence(), "\x1b[1;31m");
    }

    #[test]
    fn test_multiple_directives_concatenate() {
        let styles = vec![
            StyleDirective::Code(codes::UNDERLINE),
            StyleDirective::Group(vec![codes::BOLD, codes::GREEN]),
        ];
        assert_eq!(apply("ok", &styles), "\x1b[4m\x1b[1;32mok\x1b[0m");
    }

    #[test]
    fn test_empty_list_is_untouched() {
        assert_eq!(apply("plain", &[]), "plain");
        assert_eq!(open_sequence(&[]), "");
    }

    #[test]
    fn test_normal_code_still_wraps() {
        let styles = codes_list(&[codes::NORMAL]);
        assert_eq!(apply("plain", &styles), "\x1b[0mplain\x1b[0m");
    }

    #[test]
    fn test_strip_ansi() {
        let styled = apply("hello", &codes_list(&[codes::BOLD, codes::RED]));
        assert_eq!(strip_ansi(&styled), "hello");
        assert_eq!(strip_ansi("no escapes"), "no escapes");
    }

    #[test]
    fn test_deserialize_directives() {
        let styles: Vec<StyleDirective> = serde_json::from_str("[1, [4, 31]]").unwrap();
        assert_eq!(
            styles,
            vec![StyleDirective::Code(1), StyleDirective::Group(vec![4, 31])]
        );
    }
}

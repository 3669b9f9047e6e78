//! Parser configuration

use crate::error::{CsvError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Characters that are always classified as whitespace and therefore can
/// never act as separator, quote or comment start
const ALWAYS_WHITESPACE: [char; 4] = [' ', '\r', '\n', '\u{ff}'];

/// CSV reading options, fixed for the lifetime of a reader
///
/// # Examples
///
/// ```
/// use csvfields::CsvConfig;
///
/// let config = CsvConfig::new()
///     .separator(';')
///     .hide_comments(false)
///     .allow_multiline_fields(true);
/// assert_eq!(config.separator, ';');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CsvConfig {
    /// Field separator (default: `,`)
    pub separator: char,
    /// Quote character, `None` disables quoting (default: `"`)
    pub quote: Option<char>,
    /// Every character in this string starts a comment (default: `#`)
    pub comment_chars: String,
    /// Consume comments without surfacing them (default: true)
    pub hide_comments: bool,
    /// Trim lead/trail whitespace of quoted fields (default: true)
    pub trim_quoted: bool,
    /// Trim lead/trail whitespace of unquoted fields and comments (default: true)
    pub trim_unquoted: bool,
    /// Let quoted fields span several physical lines (default: false)
    pub allow_multiline_fields: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            separator: ',',
            quote: Some('"'),
            comment_chars: "#".to_string(),
            hide_comments: true,
            trim_quoted: true,
            trim_unquoted: true,
            allow_multiline_fields: false,
        }
    }
}

impl CsvConfig {
    /// Create a configuration with the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field separator
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Set the quote character
    pub fn quote(mut self, quote: char) -> Self {
        self.quote = Some(quote);
        self
    }

    /// Disable quoting altogether
    pub fn no_quote(mut self) -> Self {
        self.quote = None;
        self
    }

    /// Set the comment-start characters. An empty string disables comments.
    pub fn comment_chars(mut self, chars: impl Into<String>) -> Self {
        self.comment_chars = chars.into();
        self
    }

    /// Hide comments from the caller
    pub fn hide_comments(mut self, hide: bool) -> Self {
        self.hide_comments = hide;
        self
    }

    /// Trim quoted fields
    pub fn trim_quoted(mut self, trim: bool) -> Self {
        self.trim_quoted = trim;
        self
    }

    /// Trim unquoted fields
    pub fn trim_unquoted(mut self, trim: bool) -> Self {
        self.trim_unquoted = trim;
        self
    }

    /// Allow quoted fields to continue over line ends
    pub fn allow_multiline_fields(mut self, allow: bool) -> Self {
        self.allow_multiline_fields = allow;
        self
    }

    /// Whether `c` is one of the comment-start characters
    pub fn is_comment_char(&self, c: char) -> bool {
        self.comment_chars.contains(c)
    }

    /// Check that the special characters are distinguishable
    pub fn validate(&self) -> Result<()> {
        if ALWAYS_WHITESPACE.contains(&self.separator) {
            return Err(CsvError::invalid_config(format!(
                "separator {:?} is always treated as whitespace",
                self.separator
            )));
        }
        if let Some(quote) = self.quote {
            if ALWAYS_WHITESPACE.contains(&quote) {
                return Err(CsvError::invalid_config(format!(
                    "quote {:?} is always treated as whitespace",
                    quote
                )));
            }
            if quote == self.separator {
                return Err(CsvError::invalid_config(format!(
                    "quote and separator are both {:?}",
                    quote
                )));
            }
            if self.is_comment_char(quote) {
                return Err(CsvError::invalid_config(format!(
                    "quote {:?} is also a comment character",
                    quote
                )));
            }
        }
        if self.is_comment_char(self.separator) {
            return Err(CsvError::invalid_config(format!(
                "separator {:?} is also a comment character",
                self.separator
            )));
        }
        if let Some(c) = self.comment_chars.chars().find(|c| ALWAYS_WHITESPACE.contains(c)) {
            return Err(CsvError::invalid_config(format!(
                "comment character {:?} is always treated as whitespace",
                c
            )));
        }
        Ok(())
    }
}

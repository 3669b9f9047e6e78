//! Values produced by the readers

use std::fmt;

/// One result of [`FieldReader::next_field`](crate::FieldReader::next_field)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// A field value, trimmed and unescaped
    Value(String),
    /// Text after a comment-start character (only when comments are shown)
    Comment {
        text: String,
        /// The comment text itself begins with a comment-start character
        label: bool,
    },
    /// The current row is complete
    EndOfLine,
}

impl Field {
    /// Field or comment text, `None` at end of line
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Value(s) => Some(s),
            Field::Comment { text, .. } => Some(text),
            Field::EndOfLine => None,
        }
    }

    /// Consume into the field or comment text
    pub fn into_string(self) -> Option<String> {
        match self {
            Field::Value(s) => Some(s),
            Field::Comment { text, .. } => Some(text),
            Field::EndOfLine => None,
        }
    }

    /// Check for the end-of-line marker
    pub fn is_end_of_line(&self) -> bool {
        matches!(self, Field::EndOfLine)
    }

    /// Check for a comment
    pub fn is_comment(&self) -> bool {
        matches!(self, Field::Comment { .. })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value(s) => f.write_str(s),
            Field::Comment { text, .. } => write!(f, "#{}", text),
            Field::EndOfLine => f.write_str("<EOL>"),
        }
    }
}

/// One row assembled by [`CsvReader`](crate::CsvReader)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Row index (0-based, counts the header row)
    pub index: u64,
    /// Field values in order; a shown comment is the last entry
    pub fields: Vec<String>,
    /// The last entry of `fields` is a comment
    pub has_comment: bool,
    /// That comment is a label comment
    pub label_comment: bool,
}

impl Row {
    /// Create a row without comment
    pub fn new(index: u64, fields: Vec<String>) -> Self {
        Row {
            index,
            fields,
            has_comment: false,
            label_comment: false,
        }
    }

    /// Get field at column index
    pub fn get(&self, col: usize) -> Option<&str> {
        self.fields.get(col).map(String::as_str)
    }

    /// Get number of entries, comment included
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if row has no entries
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Data fields only, without a trailing comment
    pub fn values(&self) -> &[String] {
        if self.has_comment {
            &self.fields[..self.fields.len().saturating_sub(1)]
        } else {
            &self.fields
        }
    }

    /// The trailing comment, if any
    pub fn comment(&self) -> Option<&str> {
        if self.has_comment {
            self.fields.last().map(String::as_str)
        } else {
            None
        }
    }
}

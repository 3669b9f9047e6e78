//! Character classification for the field automaton

use crate::config::CsvConfig;

/// Category of a single character, the only input the automaton looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharCategory {
    /// Starts a comment (outside quotes)
    CommentStart,
    /// Field content
    Ordinary,
    /// The configured quote character
    Quote,
    /// The configured field separator
    Separator,
    /// Space, control characters and Unicode whitespace
    Whitespace,
}

/// Maps characters to [`CharCategory`] for one configuration
///
/// Code points below 256 are answered from a table built once in
/// [`Classifier::new`]; anything above falls through to the rules.
#[derive(Debug, Clone)]
pub struct Classifier {
    separator: char,
    quote: Option<char>,
    comment_chars: String,
    lookup: [CharCategory; 256],
}

impl Classifier {
    /// Build the classifier and its lookup table
    pub fn new(config: &CsvConfig) -> Self {
        let mut classifier = Classifier {
            separator: config.separator,
            quote: config.quote,
            comment_chars: config.comment_chars.clone(),
            lookup: [CharCategory::Ordinary; 256],
        };
        for code in 0u8..=255 {
            let category = classifier.categorise(code as char);
            classifier.lookup[code as usize] = category;
        }
        classifier
    }

    /// Category of `c`
    #[inline]
    pub fn classify(&self, c: char) -> CharCategory {
        match u8::try_from(c) {
            Ok(byte) => self.lookup[byte as usize],
            Err(_) => self.categorise(c),
        }
    }

    /// Whether `c` is one of the comment-start characters
    #[inline]
    pub fn is_comment_start(&self, c: char) -> bool {
        self.comment_chars.contains(c)
    }

    // Rule-based classification, in priority order.
    fn categorise(&self, c: char) -> CharCategory {
        match c {
            ' ' | '\r' | '\n' | '\u{ff}' => CharCategory::Whitespace,
            _ if c == self.separator => CharCategory::Separator,
            _ if Some(c) == self.quote => CharCategory::Quote,
            _ if self.is_comment_start(c) => CharCategory::CommentStart,
            '!'..='~' => CharCategory::Ordinary,
            _ if c <= ' ' || c.is_whitespace() => CharCategory::Whitespace,
            _ => CharCategory::Ordinary,
        }
    }
}

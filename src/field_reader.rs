//! Streaming CSV field reader
//!
//! [`FieldReader`] hands out one field per call. It keeps a cursor into the
//! current physical line and only reads a new line when the current one is
//! used up, so memory stays bounded by the longest line (or the longest
//! multi-line quoted field).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, trace};

use crate::config::CsvConfig;
use crate::csv::{transition, Action, Classifier, Expected, LineSource, ReadState, LINE_SEPARATOR};
use crate::error::{CsvError, Result};
use crate::types::Field;

/// Outcome of scanning the loaded line
enum Scan {
    /// Field or comment found, the line stays loaded
    Found(Field),
    /// Row complete, the line is used up
    EndOfLine,
    /// Hidden comment line, read the next one
    SkipLine,
    /// Quoted field continues on the next line
    NextLine,
}

/// Field-at-a-time CSV reader
///
/// Each call to [`next_field`](FieldReader::next_field) returns a field value,
/// a comment (when comments are shown) or [`Field::EndOfLine`] once the row is
/// complete. After the last line it fails with [`CsvError::EndOfStream`].
///
/// # Examples
///
/// ```
/// use csvfields::{CsvConfig, Field, FieldReader};
///
/// let input = "name, age\n\"Smith, J\",42\n";
/// let mut reader = FieldReader::new(input.as_bytes(), CsvConfig::default()).unwrap();
///
/// assert_eq!(reader.next_field().unwrap(), Field::Value("name".into()));
/// assert_eq!(reader.next_field().unwrap(), Field::Value("age".into()));
/// assert_eq!(reader.next_field().unwrap(), Field::EndOfLine);
/// assert_eq!(reader.next_field().unwrap(), Field::Value("Smith, J".into()));
/// assert_eq!(reader.get_i32().unwrap(), 42);
/// assert_eq!(reader.next_field().unwrap(), Field::EndOfLine);
/// assert!(reader.next_field().unwrap_err().is_end_of_stream());
/// ```
pub struct FieldReader<S> {
    // None once closed
    source: Option<S>,

    // Configuration
    config: CsvConfig,
    classifier: Classifier,

    // Automaton state
    state: ReadState,
    line: Option<String>,
    offset: usize,
    field_count: usize,
    line_count: u64,
    exhausted: bool,

    // Last call
    was_comment: bool,
    was_label_comment: bool,
}

impl FieldReader<BufReader<File>> {
    /// Open a CSV file
    pub fn open<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened CSV file");
        Self::new(BufReader::new(file), config)
    }
}

impl<S: LineSource> FieldReader<S> {
    /// Create a reader over `source`; fails if `config` does not validate
    pub fn new(source: S, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        let classifier = Classifier::new(&config);
        debug!(
            separator = ?config.separator,
            quote = ?config.quote,
            comments = %config.comment_chars,
            "created CSV field reader"
        );

        Ok(FieldReader {
            source: Some(source),
            config,
            classifier,
            state: ReadState::SeekingField,
            line: None,
            offset: 0,
            field_count: 0,
            line_count: 0,
            exhausted: false,
            was_comment: false,
            was_label_comment: false,
        })
    }

    /// The configuration this reader was built with
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Read the next field, comment or end-of-line marker
    ///
    /// # Errors
    ///
    /// - [`CsvError::EndOfStream`] when all input is consumed
    /// - [`CsvError::Malformed`] on illegal input; do not keep reading the stream
    /// - [`CsvError::Closed`] after [`close`](FieldReader::close)
    /// - [`CsvError::Io`] when the source fails
    pub fn next_field(&mut self) -> Result<Field> {
        if self.source.is_none() {
            return Err(CsvError::Closed);
        }
        self.was_comment = false;
        self.was_label_comment = false;

        let mut field = String::with_capacity(if self.config.allow_multiline_fields {
            512
        } else {
            64
        });

        loop {
            let line = match self.line.take() {
                Some(line) => line,
                None => self.read_line()?,
            };

            let resume = self.state;
            match self.scan(&line, &mut field) {
                Ok(Scan::Found(found)) => {
                    self.line = Some(line);
                    return Ok(found);
                }
                Ok(Scan::EndOfLine) => return Ok(Field::EndOfLine),
                Ok(Scan::SkipLine) => {
                    trace!(line = self.line_count, "skipped comment line");
                }
                Ok(Scan::NextLine) => {
                    trace!(line = self.line_count, "quoted field continues");
                }
                Err(e) => {
                    // rescan this physical line on the next call; text gathered
                    // from earlier lines of a multi-line field is dropped
                    self.state = resume;
                    self.line = Some(line);
                    return Err(e);
                }
            }
        }
    }

    /// Read and discard `count` results of [`next_field`](FieldReader::next_field)
    pub fn skip(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.next_field()?;
        }
        Ok(())
    }

    /// Abandon the rest of the current line
    ///
    /// At a row boundary (no line loaded) this skips the whole next line.
    pub fn skip_to_next_line(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(CsvError::Closed);
        }
        if self.line.is_none() {
            self.read_line()?;
        }
        self.line = None;
        self.state = ReadState::SeekingField;
        self.field_count = 0;
        Ok(())
    }

    /// Physical lines read so far
    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    /// Fields returned so far on the current line
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Whether the last call returned a comment
    pub fn was_comment(&self) -> bool {
        self.was_comment
    }

    /// Whether the last call returned a label comment (`##label`)
    pub fn was_label_comment(&self) -> bool {
        self.was_label_comment
    }

    /// Whether [`close`](FieldReader::close) was called
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Release the underlying source. Further reads fail with [`CsvError::Closed`].
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            debug!(lines = self.line_count, "closed CSV field reader");
        }
        self.line = None;
    }

    /// Cursor position in the current line in characters, for error context
    pub(crate) fn position(&self) -> usize {
        self.line
            .as_deref()
            .map_or(0, |line| char_offset(line, self.offset))
    }

    fn read_line(&mut self) -> Result<String> {
        if self.exhausted {
            return Err(CsvError::EndOfStream);
        }
        let source = self.source.as_mut().ok_or(CsvError::Closed)?;

        match source.next_line()? {
            Some(line) => {
                self.line_count += 1;
                self.offset = 0;
                trace!(line = self.line_count, len = line.len(), "loaded line");
                Ok(line)
            }
            None => {
                self.exhausted = true;
                debug!(lines = self.line_count, "CSV stream exhausted");
                if self.state == ReadState::InQuotedField {
                    // multi-line quoted field never closed
                    self.state = ReadState::SeekingField;
                    return Err(CsvError::Malformed {
                        missing: self.quote_char(),
                        offset: 0,
                        field: self.field_count,
                        line: self.line_count,
                    });
                }
                Err(CsvError::EndOfStream)
            }
        }
    }

    /// Run the automaton over `line` from the saved cursor
    fn scan(&mut self, line: &str, field: &mut String) -> Result<Scan> {
        let start = self.offset;

        for (pos, c) in line[start..].char_indices() {
            let i = start + pos;
            let category = self.classifier.classify(c);

            match transition(self.state, category) {
                Action::Ignore => {}
                Action::Append => field.push(c),
                Action::AppendSpace => {
                    if !field.ends_with(' ') {
                        field.push(' ');
                    }
                }
                Action::Enter(next) => self.state = next,
                Action::AppendAndEnter(next) => {
                    field.push(c);
                    self.state = next;
                }
                Action::EndField => {
                    let value = self.finish_field(field);
                    self.offset = i + c.len_utf8();
                    self.state = ReadState::SeekingStart;
                    return Ok(Scan::Found(Field::Value(value)));
                }
                Action::EndFieldBeforeComment => {
                    let value = self.finish_field(field);
                    self.offset = if self.config.hide_comments {
                        line.len()
                    } else {
                        i
                    };
                    self.state = ReadState::SeekingField;
                    return Ok(Scan::Found(Field::Value(value)));
                }
                Action::Comment => {
                    self.state = ReadState::SeekingField;
                    if !self.config.hide_comments {
                        self.offset = line.len();
                        return Ok(Scan::Found(self.comment(&line[i + c.len_utf8()..])));
                    }
                    if self.field_count == 0 {
                        return Ok(Scan::SkipLine);
                    }
                    // trailing comment ends the row
                    self.offset = line.len();
                    break;
                }
                Action::Reject(expected) => return Err(self.malformed(expected, line, i)),
            }
        }

        self.end_of_line(line, field)
    }

    /// The scan ran off the end of the line without returning
    fn end_of_line(&mut self, line: &str, field: &mut String) -> Result<Scan> {
        match self.state {
            ReadState::SeekingField => {
                self.field_count = 0;
                Ok(Scan::EndOfLine)
            }
            ReadState::SeekingStart
            | ReadState::InPlainField
            | ReadState::AfterEndQuote
            | ReadState::SkippingTailAfterQuote => {
                // line end acts as a separator
                let value = self.finish_field(field);
                self.offset = line.len();
                self.state = ReadState::SeekingField;
                Ok(Scan::Found(Field::Value(value)))
            }
            ReadState::InQuotedField => {
                if self.config.allow_multiline_fields {
                    field.push_str(LINE_SEPARATOR);
                    Ok(Scan::NextLine)
                } else {
                    let last = line.char_indices().last().map_or(0, |(i, _)| i);
                    Err(self.malformed(Expected::Quote, line, last))
                }
            }
        }
    }

    /// Take the accumulated field, trimmed for the current state
    fn finish_field(&mut self, field: &mut String) -> String {
        let trim = if self.state.is_quoted() {
            self.config.trim_quoted
        } else {
            self.config.trim_unquoted
        };
        self.field_count += 1;

        let value = std::mem::take(field);
        if trim {
            trimmed(value)
        } else {
            value
        }
    }

    fn comment(&mut self, rest: &str) -> Field {
        let text = if self.config.trim_unquoted {
            rest.trim()
        } else {
            rest
        };
        let label = text
            .chars()
            .next()
            .is_some_and(|first| self.classifier.is_comment_start(first));

        self.was_comment = true;
        self.was_label_comment = label;
        Field::Comment {
            text: text.to_string(),
            label,
        }
    }

    fn malformed(&self, expected: Expected, line: &str, at: usize) -> CsvError {
        let missing = match expected {
            Expected::Separator => self.config.separator,
            Expected::Quote => self.quote_char(),
        };
        CsvError::Malformed {
            missing,
            offset: char_offset(line, at),
            field: self.field_count,
            line: self.line_count,
        }
    }

    // Quote errors only arise with quoting enabled
    fn quote_char(&self) -> char {
        self.config.quote.unwrap_or('"')
    }
}

// Byte index `at` expressed as a character count
fn char_offset(line: &str, at: usize) -> usize {
    line.get(..at).map_or(at, |head| head.chars().count())
}

fn trimmed(value: String) -> String {
    let t = value.trim();
    if t.len() == value.len() {
        value
    } else {
        t.to_string()
    }
}

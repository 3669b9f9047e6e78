//! Error types for CSV field reading

use thiserror::Error;

/// Errors raised while reading CSV fields
#[derive(Error, Debug)]
pub enum CsvError {
    /// No more lines remain and no field is pending.
    ///
    /// This is the normal termination signal of [`FieldReader`](crate::FieldReader),
    /// not a failure. Match on the variant (or use [`CsvError::is_end_of_stream`])
    /// rather than the message.
    #[error("end of CSV stream")]
    EndOfStream,

    /// The automaton met a character category that is illegal in its current state
    #[error("Malformed CSV stream. Missing [{missing}] near offset {offset} after field {field} on line {line}")]
    Malformed {
        /// Character that was expected but not found (separator or quote)
        missing: char,
        /// Approximate character offset in the current physical line
        offset: usize,
        /// 0-based field index on the current line
        field: usize,
        /// 1-based physical line number
        line: u64,
    },

    /// A typed accessor could not parse the raw field text
    #[error("Malformed {kind} [{value}] near offset {offset} after field {field} on line {line}: {detail}")]
    MalformedValue {
        /// Human readable name of the requested type, e.g. "integer"
        kind: &'static str,
        /// The offending field text
        value: String,
        offset: usize,
        field: usize,
        line: u64,
        /// Underlying parse failure
        detail: String,
    },

    /// Extraction attempted after [`FieldReader::close`](crate::FieldReader::close)
    #[error("attempt to use a closed CSV reader")]
    Closed,

    /// Configuration rejected at construction time
    #[error("Invalid CSV configuration: {message}")]
    InvalidConfig { message: String },

    /// Failure of the underlying line source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CsvError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True for the end-of-stream signal
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, CsvError::EndOfStream)
    }

    /// True for structural errors in the CSV text itself.
    ///
    /// Callers should stop reading the stream after one of these; a typed
    /// value error on a single field is recoverable and returns `false`.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CsvError::Malformed { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CsvError>;

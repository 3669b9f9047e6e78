//! # csvfields
//!
//! Streaming CSV reader built on a small finite-state automaton.
//!
//! - [`FieldReader`] returns one field at a time, with quoted fields, doubled
//!   quote escaping, multi-line quoted fields and inline `#` comments
//! - [`CsvReader`] assembles whole rows and handles an optional header row
//! - Separator, quote and comment characters and trimming are configurable
//!   through [`CsvConfig`]
//! - Typed accessors (`get_i32`, `get_bool`, `get_iso_date`, ...) convert
//!   fields as they are read
//!
//! ## Quick Start
//!
//! ```
//! use csvfields::{CsvConfig, CsvReader};
//!
//! let input = "# inventory\nitem,qty\n\"bolts, M4\",120\n";
//! let mut reader = CsvReader::from_source(input.as_bytes(), CsvConfig::default())
//!     .unwrap()
//!     .has_header(true);
//!
//! let rows: Vec<_> = reader.rows().collect::<Result<_, _>>().unwrap();
//! assert_eq!(rows[0].fields, vec!["bolts, M4", "120"]);
//! assert_eq!(reader.field(&rows[0], "qty"), Some("120"));
//! ```

pub mod config;
pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod field_reader;
pub mod typed;
pub mod types;

pub use config::CsvConfig;
pub use csv::{CharCategory, LineSource};
pub use csv_reader::{CsvReader, CsvRowIterator};
pub use error::{CsvError, Result};
pub use field_reader::FieldReader;
pub use typed::{parse_bool, parse_iso_date};
pub use types::{Field, Row};

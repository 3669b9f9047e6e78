//! Row-oriented CSV reading on top of [`FieldReader`]

use indexmap::IndexMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::config::CsvConfig;
use crate::csv::LineSource;
use crate::error::{CsvError, Result};
use crate::field_reader::FieldReader;
use crate::types::{Field, Row};

/// CSV reader returning whole rows
///
/// Reads rows by calling [`FieldReader::next_field`] until the end-of-line
/// marker. Memory usage is bounded by the longest row.
///
/// # Examples
///
/// ```no_run
/// use csvfields::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv").unwrap();
///
/// for row_result in reader.rows() {
///     let row = row_result.unwrap();
///     println!("{:?}", row.fields);
/// }
/// ```
///
/// # With Headers
///
/// ```no_run
/// use csvfields::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv")
///     .unwrap()
///     .has_header(true);
///
/// for row_result in reader.rows() {
///     let row = row_result.unwrap();
///     // header row already consumed
/// }
///
/// if let Some(headers) = reader.headers() {
///     println!("Headers: {:?}", headers);
/// }
/// ```
pub struct CsvReader<S> {
    fields: FieldReader<S>,
    row_count: u64,
    has_header: bool,
    // Header row as read, and the row index it came from
    header_row: Vec<String>,
    header_index: Option<u64>,
    columns: IndexMap<String, usize>,
}

impl CsvReader<BufReader<File>> {
    /// Open a CSV file with the default configuration
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, CsvConfig::default())
    }

    /// Open a CSV file with a custom configuration
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvfields::{CsvConfig, CsvReader};
    ///
    /// let reader = CsvReader::open_with("data.csv", CsvConfig::new().separator(';')).unwrap();
    /// ```
    pub fn open_with<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self> {
        Ok(Self::from_field_reader(FieldReader::open(path, config)?))
    }
}

impl<S: LineSource> CsvReader<S> {
    /// Create a reader over any line source
    pub fn from_source(source: S, config: CsvConfig) -> Result<Self> {
        Ok(Self::from_field_reader(FieldReader::new(source, config)?))
    }

    /// Wrap an existing field reader
    pub fn from_field_reader(fields: FieldReader<S>) -> Self {
        CsvReader {
            fields,
            row_count: 0,
            has_header: false,
            header_row: Vec::new(),
            header_index: None,
            columns: IndexMap::new(),
        }
    }

    /// Indicate that the first row contains headers (builder pattern)
    ///
    /// The first row with data values is stored and available via
    /// [`headers`](CsvReader::headers); [`rows`](CsvReader::rows) skips it.
    /// Comment-only rows before it are not headers.
    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    /// Header names, once the header row has been read
    pub fn headers(&self) -> Option<Vec<&str>> {
        self.header_index
            .map(|_| self.header_row.iter().map(String::as_str).collect())
    }

    /// Column index of a header name (first occurrence wins)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Field of `row` under header `name`
    pub fn field<'r>(&self, row: &'r Row, name: &str) -> Option<&'r str> {
        self.column_index(name).and_then(|col| row.get(col))
    }

    /// Read a single row
    ///
    /// Returns `Ok(None)` when the stream is exhausted. Hidden comment lines are
    /// skipped; a shown comment becomes the last entry of the row.
    pub fn read_row(&mut self) -> Result<Option<Row>> {
        let mut fields = Vec::new();
        let mut has_comment = false;
        let mut label_comment = false;

        loop {
            match self.fields.next_field() {
                Ok(Field::EndOfLine) => break,
                Ok(Field::Value(value)) => fields.push(value),
                Ok(Field::Comment { text, label }) => {
                    has_comment = true;
                    label_comment = label;
                    fields.push(text);
                }
                Err(CsvError::EndOfStream) if fields.is_empty() => return Ok(None),
                Err(CsvError::EndOfStream) => break,
                Err(e) => return Err(e),
            }
        }

        let row = Row {
            index: self.row_count,
            fields,
            has_comment,
            label_comment,
        };

        if self.has_header && self.header_index.is_none() && !row.values().is_empty() {
            self.header_row = row.values().to_vec();
            for (col, name) in self.header_row.iter().enumerate() {
                self.columns.entry(name.clone()).or_insert(col);
            }
            self.header_index = Some(row.index);
            debug!(columns = self.header_row.len(), "captured CSV header row");
        }

        self.row_count += 1;
        Ok(Some(row))
    }

    /// Get iterator over rows
    ///
    /// The iterator stops after the first error.
    pub fn rows(&mut self) -> CsvRowIterator<'_, S> {
        CsvRowIterator {
            reader: self,
            done: false,
        }
    }

    /// Get the number of rows read so far (header included)
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Physical lines read so far
    pub fn line_count(&self) -> u64 {
        self.fields.line_count()
    }

    /// Field-level access, e.g. for typed reads within a row
    pub fn field_reader(&mut self) -> &mut FieldReader<S> {
        &mut self.fields
    }

    /// Give back the underlying field reader
    pub fn into_inner(self) -> FieldReader<S> {
        self.fields
    }

    /// Release the underlying source
    pub fn close(&mut self) {
        self.fields.close();
    }
}

/// Iterator over CSV rows
pub struct CsvRowIterator<'a, S> {
    reader: &'a mut CsvReader<S>,
    done: bool,
}

impl<S: LineSource> Iterator for CsvRowIterator<'_, S> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.reader.read_row() {
                Ok(Some(row)) => {
                    if self.reader.header_index == Some(row.index) {
                        continue;
                    }
                    return Some(Ok(row));
                }
                Ok(None) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(input: &str, config: CsvConfig) -> CsvReader<&[u8]> {
        CsvReader::from_source(input.as_bytes(), config).unwrap()
    }

    #[test]
    fn test_read_rows() -> Result<()> {
        let mut r = reader("Name,Age,City\nAlice,30,NYC\nBob,25,SF\n", CsvConfig::default());
        let mut rows = vec![];
        for row_result in r.rows() {
            rows.push(row_result?);
        }

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].fields, vec!["Name", "Age", "City"]);
        assert_eq!(rows[1].fields, vec!["Alice", "30", "NYC"]);
        assert_eq!(rows[2].index, 2);
        assert_eq!(r.row_count(), 3);
        Ok(())
    }

    #[test]
    fn test_read_with_headers() -> Result<()> {
        let mut r = reader("ID,Name\n1,Alice\n2,Bob\n", CsvConfig::default()).has_header(true);
        assert_eq!(r.headers(), None); // Not read yet

        let rows: Vec<Row> = r.rows().collect::<Result<_>>()?;

        assert_eq!(r.headers(), Some(vec!["ID", "Name"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["1", "Alice"]);
        assert_eq!(r.column_index("Name"), Some(1));
        assert_eq!(r.field(&rows[1], "Name"), Some("Bob"));
        assert_eq!(r.field(&rows[1], "Missing"), None);
        Ok(())
    }

    #[test]
    fn test_header_after_shown_comment() -> Result<()> {
        let config = CsvConfig::new().hide_comments(false);
        let mut r = reader("# export\nid,v\n1,2\n", config).has_header(true);
        let rows: Vec<Row> = r.rows().collect::<Result<_>>()?;

        assert_eq!(r.headers(), Some(vec!["id", "v"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].comment(), Some("export"));
        assert!(rows[0].values().is_empty());
        assert_eq!(rows[1].fields, vec!["1", "2"]);
        assert_eq!(r.field(&rows[1], "v"), Some("2"));
        Ok(())
    }

    #[test]
    fn test_duplicate_header_names() -> Result<()> {
        let mut r = reader("a,a,b\n1,2,3", CsvConfig::default()).has_header(true);
        let rows: Vec<Row> = r.rows().collect::<Result<_>>()?;

        assert_eq!(r.headers(), Some(vec!["a", "a", "b"]));
        assert_eq!(r.column_index("a"), Some(0));
        assert_eq!(r.column_index("b"), Some(2));
        assert_eq!(r.field(&rows[0], "b"), Some("3"));
        Ok(())
    }

    #[test]
    fn test_hidden_comments_skipped() -> Result<()> {
        let mut r = reader("# header comment\na,b,#trailing\nc\n", CsvConfig::default());
        let first = r.read_row()?.unwrap();
        assert_eq!(first.fields, vec!["a", "b"]);
        assert!(!first.has_comment);
        assert_eq!(r.read_row()?.unwrap().fields, vec!["c"]);
        assert_eq!(r.read_row()?, None);
        Ok(())
    }

    #[test]
    fn test_shown_comment_in_row() -> Result<()> {
        let config = CsvConfig::new().hide_comments(false);
        let mut r = reader("a,b # note\n## label\n", config);

        let row = r.read_row()?.unwrap();
        assert_eq!(row.fields, vec!["a", "b", "note"]);
        assert!(row.has_comment);
        assert!(!row.label_comment);
        assert_eq!(row.values(), &["a".to_string(), "b".to_string()][..]);
        assert_eq!(row.comment(), Some("note"));

        let label = r.read_row()?.unwrap();
        assert_eq!(label.fields, vec!["# label"]);
        assert!(label.label_comment);
        Ok(())
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut r = reader("a\nb\"c\nd\n", CsvConfig::default());
        let results: Vec<_> = r.rows().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(CsvError::Malformed { .. })));
    }

    #[test]
    fn test_typed_reads_through_field_reader() -> Result<()> {
        let mut r = reader("id,active\n7,yes\n", CsvConfig::default()).has_header(true);
        r.read_row()?;
        assert_eq!(r.field_reader().get_i32()?, 7);
        assert!(r.field_reader().get_bool(false)?);
        assert_eq!(r.read_row()?.map(|row| row.len()), Some(0));
        assert_eq!(r.line_count(), 2);
        Ok(())
    }

    #[test]
    fn test_close() {
        let mut r = reader("a\n", CsvConfig::default());
        r.close();
        assert!(matches!(r.read_row(), Err(CsvError::Closed)));
        assert!(r.into_inner().is_closed());
    }
}

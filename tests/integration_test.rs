//! Integration tests for csvfields

use csvfields::{CsvConfig, CsvError, CsvReader, Field, FieldReader};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(content.as_bytes()).unwrap();
    temp.flush().unwrap();
    temp
}

#[test]
fn test_read_file_rows() {
    let temp = write_temp("Name,Age,City\r\nAlice,30,NYC\r\n\"Bob, Jr.\",25,\"San Francisco\"\r\n");

    let mut reader = CsvReader::open(temp.path()).unwrap().has_header(true);
    let rows: Vec<_> = reader
        .rows()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(reader.headers(), Some(vec!["Name", "Age", "City"]));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].fields, vec!["Alice", "30", "NYC"]);
    assert_eq!(rows[1].fields, vec!["Bob, Jr.", "25", "San Francisco"]);
    assert_eq!(reader.field(&rows[1], "City"), Some("San Francisco"));
}

#[test]
fn test_commented_file() {
    let temp = write_temp(
        "# exported data\n\
         ## Section A\n\
         id,value # columns\n\
         1,one\n\
         2,two,#trailing\n",
    );

    // hidden
    let mut reader = CsvReader::open(temp.path()).unwrap();
    let rows: Vec<Vec<String>> = reader
        .rows()
        .map(|r| r.map(|row| row.fields))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        rows,
        vec![
            vec!["id".to_string(), "value".to_string()],
            vec!["1".to_string(), "one".to_string()],
            vec!["2".to_string(), "two".to_string()],
        ]
    );

    // shown
    let config = CsvConfig::new().hide_comments(false);
    let mut reader = CsvReader::open_with(temp.path(), config).unwrap();
    let first = reader.read_row().unwrap().unwrap();
    assert!(first.has_comment);
    assert_eq!(first.comment(), Some("exported data"));
    let label = reader.read_row().unwrap().unwrap();
    assert!(label.label_comment);
    assert_eq!(label.comment(), Some("# Section A"));
    let header = reader.read_row().unwrap().unwrap();
    assert_eq!(header.values(), &["id".to_string(), "value".to_string()][..]);
    assert_eq!(header.comment(), Some("columns"));
}

#[test]
fn test_multiline_fields_from_file() {
    let temp = write_temp("id,note\n1,\"first line\nsecond line\"\n2,plain\n");
    let config = CsvConfig::new().allow_multiline_fields(true);
    let mut fields = FieldReader::open(temp.path(), config).unwrap();

    fields.skip_to_next_line().unwrap();
    assert_eq!(fields.get_i32().unwrap(), 1);
    let note = fields.next_field().unwrap();
    let expected = format!("first line{}second line", csvfields::csv::LINE_SEPARATOR);
    assert_eq!(note, Field::Value(expected));
    assert_eq!(fields.next_field().unwrap(), Field::EndOfLine);
    assert_eq!(fields.line_count(), 3);

    assert_eq!(fields.get_i32().unwrap(), 2);
    fields.close();
    assert!(matches!(fields.next_field(), Err(CsvError::Closed)));
}

#[test]
fn test_typed_columns() {
    let temp = write_temp("true,2024-03-01,0x,1.5\n");
    let mut fields = FieldReader::open(temp.path(), CsvConfig::default()).unwrap();

    assert!(fields.get_bool(false).unwrap());
    assert_eq!(fields.get_iso_date().unwrap(), "2024-03-01");
    match fields.get_hex_i32() {
        Err(CsvError::MalformedValue { value, line, .. }) => {
            assert_eq!(value, "0x");
            assert_eq!(line, 1);
        }
        other => panic!("expected malformed hex, got {:?}", other),
    }
    // recoverable: the rest of the row is still readable
    assert_eq!(fields.get_f64().unwrap(), 1.5);
    assert_eq!(fields.next_field().unwrap(), Field::EndOfLine);
    assert!(fields.next_field().unwrap_err().is_end_of_stream());
}

#[test]
fn test_semicolon_round_trip() {
    let lines = ["alpha;beta;gamma", "1;;3", "x y;z;"];
    let temp = write_temp(&lines.join("\n"));
    let config = CsvConfig::new().separator(';');
    let mut reader = CsvReader::open_with(temp.path(), config).unwrap();

    for line in lines {
        let row = reader.read_row().unwrap().unwrap();
        assert_eq!(row.fields.join(";"), line);
    }
    assert!(reader.read_row().unwrap().is_none());
}

#[test]
fn test_malformed_file_reports_position() {
    let temp = write_temp("a,b\nc,\"d\"e\n");
    let mut reader = CsvReader::open(temp.path()).unwrap();
    reader.read_row().unwrap();

    let err = reader.read_row().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Malformed CSV stream. Missing [,] near offset 5 after field 1 on line 2"
    );
}

#[test]
fn test_missing_file() {
    match CsvReader::open("definitely/not/here.csv") {
        Err(CsvError::Io(_)) => {}
        Err(other) => panic!("expected io error, got {:?}", other),
        Ok(_) => panic!("expected io error"),
    }
}

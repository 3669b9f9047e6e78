//! Typed field extraction
//!
//! Every accessor reads one field with [`FieldReader::next_field`] and
//! converts it. An empty field or the end-of-line marker yields the type's
//! zero value (or the caller's default for booleans) instead of an error.

use chrono::NaiveDate;
use std::fmt::Display;
use std::str::FromStr;

use crate::csv::LineSource;
use crate::error::{CsvError, Result};
use crate::field_reader::FieldReader;

const TRUE_WORDS: [&str; 6] = ["yes", "true", "y", "t", "1", "+"];
const FALSE_WORDS: [&str; 6] = ["no", "false", "n", "f", "0", "-"];

/// Parse a boolean word, case-insensitive
///
/// `yes true y t 1 +` are true, `no false n f 0 -` are false.
///
/// # Examples
///
/// ```
/// use csvfields::parse_bool;
///
/// assert_eq!(parse_bool("Yes"), Ok(true));
/// assert_eq!(parse_bool("-"), Ok(false));
/// assert!(parse_bool("maybe").is_err());
/// ```
pub fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    let cleaned = s.trim().to_lowercase();
    if TRUE_WORDS.contains(&cleaned.as_str()) {
        Ok(true)
    } else if FALSE_WORDS.contains(&cleaned.as_str()) {
        Ok(false)
    } else {
        Err(format!(
            "boolean value {:?} must be one of true (yes, true, y, t, 1, +) or false (no, false, n, f, 0, -)",
            cleaned
        ))
    }
}

/// Parse a strict ISO `yyyy-mm-dd` date and check it exists in the calendar
pub fn parse_iso_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err("expected yyyy-mm-dd".to_string());
    }

    // all-digit slices always parse
    let year: i32 = s[0..4].parse().map_err(|e| format!("year: {}", e))?;
    let month: u32 = s[5..7].parse().map_err(|e| format!("month: {}", e))?;
    let day: u32 = s[8..10].parse().map_err(|e| format!("day: {}", e))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("no such date {:04}-{:02}-{:02}", year, month, day))
}

fn parse_number<T>(s: &str) -> std::result::Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    s.parse::<T>().map_err(|e| e.to_string())
}

impl<S: LineSource> FieldReader<S> {
    /// Next field as text; `None` for an empty field or end of line
    fn next_text(&mut self) -> Result<Option<String>> {
        Ok(self.next_field()?.into_string().filter(|s| !s.is_empty()))
    }

    fn next_typed<T: Default>(
        &mut self,
        kind: &'static str,
        parse: impl FnOnce(&str) -> std::result::Result<T, String>,
    ) -> Result<T> {
        let Some(text) = self.next_text()? else {
            return Ok(T::default());
        };
        match parse(&text) {
            Ok(value) => Ok(value),
            Err(detail) => Err(self.malformed_value(kind, text, detail)),
        }
    }

    fn malformed_value(&self, kind: &'static str, value: String, detail: String) -> CsvError {
        CsvError::MalformedValue {
            kind,
            value,
            offset: self.position(),
            field: self.field_count(),
            line: self.line_count(),
            detail,
        }
    }

    /// Read a boolean; empty field or end of line gives `default`
    pub fn get_bool(&mut self, default: bool) -> Result<bool> {
        match self.next_text()? {
            Some(text) if !text.trim().is_empty() => match parse_bool(&text) {
                Ok(value) => Ok(value),
                Err(detail) => Err(self.malformed_value("boolean", text, detail)),
            },
            _ => Ok(default),
        }
    }

    /// Read a single character; empty gives `'\0'`
    pub fn get_char(&mut self) -> Result<char> {
        self.next_typed("char", |s| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err("expected a single character".to_string()),
            }
        })
    }

    /// Read a 16-bit integer
    pub fn get_i16(&mut self) -> Result<i16> {
        self.next_typed("short", parse_number::<i16>)
    }

    /// Read a 32-bit integer
    pub fn get_i32(&mut self) -> Result<i32> {
        self.next_typed("integer", parse_number::<i32>)
    }

    /// Read a 64-bit integer
    pub fn get_i64(&mut self) -> Result<i64> {
        self.next_typed("long integer", parse_number::<i64>)
    }

    /// Read a hexadecimal 32-bit integer (no `0x` prefix)
    pub fn get_hex_i32(&mut self) -> Result<i32> {
        self.next_typed("hex integer", |s| {
            i32::from_str_radix(s, 16).map_err(|e| e.to_string())
        })
    }

    /// Read a hexadecimal 64-bit integer (no `0x` prefix)
    pub fn get_hex_i64(&mut self) -> Result<i64> {
        self.next_typed("hex long integer", |s| {
            i64::from_str_radix(s, 16).map_err(|e| e.to_string())
        })
    }

    /// Read a 32-bit float
    pub fn get_f32(&mut self) -> Result<f32> {
        self.next_typed("float", parse_number::<f32>)
    }

    /// Read a 64-bit float
    pub fn get_f64(&mut self) -> Result<f64> {
        self.next_typed("double", parse_number::<f64>)
    }

    /// Read an ISO `yyyy-mm-dd` date, returned as validated text; empty gives `""`
    pub fn get_iso_date(&mut self) -> Result<String> {
        let Some(text) = self.next_text()? else {
            return Ok(String::new());
        };
        match parse_iso_date(&text) {
            Ok(_) => Ok(text),
            Err(detail) => Err(self.malformed_value("ISO yyyy-mm-dd date", text, detail)),
        }
    }

    /// Read an ISO `yyyy-mm-dd` date as a [`NaiveDate`]; empty gives `None`
    pub fn get_naive_date(&mut self) -> Result<Option<NaiveDate>> {
        self.next_typed("ISO yyyy-mm-dd date", |s| parse_iso_date(s).map(Some))
    }
}

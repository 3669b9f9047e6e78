//! CSV Field Reader Examples
//!
//! Demonstrates:
//! - Reading rows with a header
//! - Showing comments instead of hiding them
//! - Multi-line quoted fields
//! - Typed field access
//! - Error reporting for malformed input

use csvfields::{CsvConfig, CsvReader, Field, FieldReader};
use std::error::Error;

const INVENTORY: &str = "\
# warehouse export
## Section: fasteners
item,qty,checked,since
\"bolts, M4\",120,yes,2024-01-15
nuts,  80 ,no,2023-11-02  # recount pending
\"washers \"\"flat\"\"\",300,+,2024-02-29
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== CSV Field Reader Examples ===\n");

    // Example 1: Rows with header
    println!("1. Reading rows with header...");
    {
        let mut reader =
            CsvReader::from_source(INVENTORY.as_bytes(), CsvConfig::default())?.has_header(true);
        for row_result in reader.rows() {
            let row = row_result?;
            println!("   Row {}: {:?}", row.index, row.fields);
        }
        println!("   Headers: {:?}", reader.headers());
    }

    // Example 2: Comments shown
    println!("\n2. Reading with comments shown...");
    {
        let config = CsvConfig::new().hide_comments(false);
        let mut reader = CsvReader::from_source(INVENTORY.as_bytes(), config)?;
        while let Some(row) = reader.read_row()? {
            match row.comment() {
                Some(comment) if row.label_comment => println!("   Label: {}", comment),
                Some(comment) => println!("   {:?} // {}", row.values(), comment),
                None => println!("   {:?}", row.values()),
            }
        }
    }

    // Example 3: Multi-line fields
    println!("\n3. Multi-line quoted fields...");
    {
        let input = "id,address\n1,\"221B Baker Street\nLondon\"\n";
        let config = CsvConfig::new().allow_multiline_fields(true);
        let mut reader = CsvReader::from_source(input.as_bytes(), config)?;
        while let Some(row) = reader.read_row()? {
            println!("   {:?}", row.fields);
        }
    }

    // Example 4: Typed fields
    println!("\n4. Typed field access...");
    {
        let mut fields = FieldReader::new(INVENTORY.as_bytes(), CsvConfig::default())?;
        fields.skip(5)?; // header fields and end of line
        loop {
            let item = match fields.next_field() {
                Ok(Field::Value(item)) => item,
                Ok(_) => continue,
                Err(e) if e.is_end_of_stream() => break,
                Err(e) => return Err(e.into()),
            };
            let qty = fields.get_i32()?;
            let checked = fields.get_bool(false)?;
            let since = fields.get_naive_date()?;
            fields.skip_to_next_line()?;
            println!("   {:<16} qty={:<4} checked={:<5} since={:?}", item, qty, checked, since);
        }
    }

    // Example 5: Malformed input
    println!("\n5. Error handling example...");
    {
        let mut reader = CsvReader::from_source("a,\"b\"c\n".as_bytes(), CsvConfig::default())?;
        match reader.read_row() {
            Ok(row) => println!("   Unexpected row: {:?}", row),
            Err(e) => println!("   Expected error: {}", e),
        }
    }

    println!("\n=== All examples completed successfully! ===");

    Ok(())
}

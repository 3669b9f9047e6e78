//! Line-oriented input for the field reader

use std::io::{self, BufRead};

/// A source of physical lines.
///
/// Implementations strip the line terminator: a returned line never
/// contains `\n` and never ends in `\r`. `Ok(None)` means no more lines.
pub trait LineSource {
    /// Read the next line
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<R: BufRead> LineSource for R {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

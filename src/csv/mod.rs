//! Low-level CSV building blocks: character classes, automaton table, line input

mod category;
mod source;
mod state;

pub use category::{CharCategory, Classifier};
pub use source::LineSource;
pub use state::{transition, Action, Expected, ReadState};

/// Line terminator inserted into multi-line quoted fields
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Line terminator inserted into multi-line quoted fields
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

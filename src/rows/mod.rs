// src/rows/mod.rs
// =============================================================================
// This module reads the input list of pages.
//
// Submodules:
// - delimiter: Sniffs whether the file uses ',' or ';'
// - reader: Splits rows, validates them and yields InputRecords
// =============================================================================

mod delimiter;
mod reader;

pub use delimiter::detect_delimiter;
pub use reader::{InputRecord, ParsedRow, Rows};

// src/rows/delimiter.rs
// =============================================================================
// Guesses whether the input file separates fields with ',' or ';'.
//
// Spreadsheet programs in many locales export "CSV" files with semicolons,
// so we look at the start of the file and pick whichever character is more
// common. Ties (including "neither appears") go to the comma.
// =============================================================================

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

// How many bytes we look at before deciding
const SAMPLE_SIZE: u64 = 1024;

// Reads the first 1024 bytes of a file and sniffs its delimiter
//
// Returns: b';' or b',' (the csv crate wants the delimiter as a byte)
pub fn detect_delimiter(path: &Path) -> io::Result<u8> {
    let mut sample = Vec::with_capacity(SAMPLE_SIZE as usize);
    File::open(path)?.take(SAMPLE_SIZE).read_to_end(&mut sample)?;
    Ok(sniff_delimiter(&sample))
}

// Picks ';' only if it strictly outnumbers ',' in the sample
pub fn sniff_delimiter(sample: &[u8]) -> u8 {
    let semicolons = sample.iter().filter(|&&b| b == b';').count();
    let commas = sample.iter().filter(|&&b| b == b',').count();

    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

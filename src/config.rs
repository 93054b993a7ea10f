// src/config.rs
// =============================================================================
// This module holds the settings for one batch run.
//
// Every component (row reader, fetcher, document writer, pipeline) receives
// a reference to the same Config instead of reading global constants.
// main.rs builds it once from the command-line arguments.
//
// Rust concepts:
// - Default trait: Gives us a "sensible settings" constructor
// - Duration: Type-safe time spans (no more guessing seconds vs millis)
// =============================================================================

use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

// How to treat the first row of the input file
//
// #[derive(ValueEnum)] lets clap accept these as `--header auto|present|absent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HeaderMode {
    /// Drop the first row only if it is not a valid record
    #[default]
    Auto,
    /// The first row is always a header and is dropped
    Present,
    /// There is no header; every row is data
    Absent,
}

// Settings shared by every stage of the pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of fetch attempts per URL (at least 1)
    pub retry_limit: u32,
    /// Deadline for a single HTTP attempt
    pub timeout: Duration,
    /// Pause between two attempts for the same URL
    pub retry_delay: Duration,
    /// Directory that receives the generated documents
    pub output_folder: PathBuf,
    /// Value of the User-Agent header on every request
    pub user_agent: String,
    /// How many records may be in flight at once (1 = sequential)
    pub jobs: usize,
    /// First-row handling for the input file
    pub header: HeaderMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            retry_limit: 2,
            timeout: Duration::from_secs(10),
            retry_delay: Duration::from_secs(2),
            output_folder: PathBuf::from("scraped_docs"),
            user_agent: "Mozilla/5.0".to_string(),
            jobs: 1,
            header: HeaderMode::Auto,
        }
    }
}

// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Every flag ends up in a Config (see config.rs); the rest of the program
// never looks at the raw arguments.
// =============================================================================

use crate::config::{Config, HeaderMode};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "web2docx",
    version,
    about = "Convert a CSV list of web pages into Word documents",
    long_about = "web2docx reads rows of <url>,<identifier> from a CSV file (',' or ';' separated), \
                  downloads each page and writes its headings, paragraphs and video subtitle \
                  references to <output-dir>/<identifier>.docx."
)]
pub struct Cli {
    /// CSV file with one URL and one identifier per row
    ///
    /// This is a positional argument (optional, defaults to urls.csv)
    #[arg(default_value = "urls.csv")]
    pub input: PathBuf,

    /// Folder that receives the .docx files (created if missing)
    #[arg(long, short = 'o', default_value = "scraped_docs")]
    pub output_dir: PathBuf,

    /// Maximum number of download attempts per URL
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: u32,

    /// Timeout for a single download attempt, in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Pause between two attempts for the same URL, in seconds
    #[arg(long, default_value_t = 2)]
    pub retry_delay: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = "Mozilla/5.0")]
    pub user_agent: String,

    /// Number of pages processed at the same time (1 = one after another)
    #[arg(long, short = 'j', default_value_t = 1)]
    pub jobs: usize,

    /// How to treat the first row of the input file
    ///
    /// auto: skip it only if it is not a valid row (a typical header)
    /// present: always skip it
    /// absent: never skip it
    #[arg(long, value_enum, default_value_t = HeaderMode::Auto)]
    pub header: HeaderMode,

    /// Output the per-row report in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    // Builds the batch configuration from the parsed arguments
    pub fn config(&self) -> Config {
        Config {
            retry_limit: self.retries,
            timeout: Duration::from_secs(self.timeout),
            retry_delay: Duration::from_secs(self.retry_delay),
            output_folder: self.output_dir.clone(),
            user_agent: self.user_agent.clone(),
            jobs: self.jobs.max(1),
            header: self.header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["web2docx"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("urls.csv"));
        assert!(!cli.json);

        let config = cli.config();
        let defaults = Config::default();
        assert_eq!(config.retry_limit, defaults.retry_limit);
        assert_eq!(config.timeout, defaults.timeout);
        assert_eq!(config.retry_delay, defaults.retry_delay);
        assert_eq!(config.output_folder, defaults.output_folder);
        assert_eq!(config.user_agent, defaults.user_agent);
        assert_eq!(config.header, HeaderMode::Auto);
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "web2docx",
            "pages.csv",
            "--output-dir",
            "out",
            "--retries",
            "4",
            "--timeout",
            "3",
            "--retry-delay",
            "0",
            "--user-agent",
            "bot/1.0",
            "-j",
            "8",
            "--header",
            "absent",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("pages.csv"));
        assert!(cli.json);
        let config = cli.config();
        assert_eq!(config.retry_limit, 4);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.retry_delay, Duration::ZERO);
        assert_eq!(config.output_folder, PathBuf::from("out"));
        assert_eq!(config.user_agent, "bot/1.0");
        assert_eq!(config.jobs, 8);
        assert_eq!(config.header, HeaderMode::Absent);
    }

    #[test]
    fn test_zero_retries_rejected() {
        assert!(Cli::try_parse_from(["web2docx", "--retries", "0"]).is_err());
    }

    #[test]
    fn test_zero_jobs_means_sequential() {
        let cli = Cli::try_parse_from(["web2docx", "--jobs", "0"]).unwrap();
        assert_eq!(cli.config().jobs, 1);
    }
}

// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls verbosity, default "info")
// 2. Parse command-line arguments using clap
// 3. Open the input file and sniff its delimiter
// 4. Run every row through the pipeline and print the report
// 5. Exit with proper code (0 = all saved, 1 = some rows skipped, 2 = error)
//
// Rust concepts used:
// - async/await: Page downloads and retry pauses are asynchronous
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - batch settings
mod document;  // src/document/ - .docx generation
mod error;     // src/error.rs - error types
mod extract;   // src/extract/ - HTML content extraction
mod fetch;     // src/fetch/ - HTTP downloads with retries
mod pipeline;  // src/pipeline/ - runs the batch, reports results
mod rows;      // src/rows/ - reading the input CSV

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use tracing::info;
use tracing_subscriber::EnvFilter;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so that --json output on stdout stays clean
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = every row produced a document
//   Ok(1) = at least one row was skipped
//   Err = the batch could not start (e.g. unreadable input file)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.config();

    let delimiter = rows::detect_delimiter(&cli.input)
        .with_context(|| format!("Could not read input file {}", cli.input.display()))?;
    let rows = rows::Rows::open(&cli.input, delimiter, config.header)
        .with_context(|| format!("Could not open input file {}", cli.input.display()))?;

    if !cli.json {
        println!(
            "🔍 Reading {} (delimiter '{}')",
            cli.input.display(),
            delimiter as char
        );
    }

    let reports = pipeline::run_batch(rows, &config)
        .await
        .context("Could not create HTTP client")?;

    if reports.is_empty() && !cli.json {
        println!("⚠️  No rows found in {}", cli.input.display());
    } else {
        pipeline::print_results(&reports, cli.json)?;
    }

    if cli.json {
        info!(
            "Documents saved in {}",
            pipeline::absolute(&config.output_folder).display()
        );
    } else {
        println!("🎉 Batch completed!");
        pipeline::print_summary(&reports, &config.output_folder);
    }

    let (_, skipped) = pipeline::count(&reports);
    if skipped > 0 {
        Ok(1) // Exit code 1 = some rows were skipped
    } else {
        Ok(0) // Exit code 0 = all good
    }
}

// src/pipeline/batch.rs
// =============================================================================
// This module drives every row through the whole pipeline.
//
// For each row, in input order:
// 1. Invalid rows are reported and skipped (nothing is fetched)
// 2. The page is fetched (the Fetcher handles its own retries)
// 3. Headings/paragraphs and subtitle tracks are extracted
// 4. The document is built and saved as <identifier>.docx
//
// A failure in one record never affects another. Each record gets a report
// and the batch always runs to the end.
//
// Rust concepts:
// - Streams: stream::iter(...).buffered(n) runs up to n records at once
//   while still yielding reports in input order
// =============================================================================

use super::report::RecordReport;
use crate::config::Config;
use crate::document::{self, build_document};
use crate::error::{FetchError, RecordError};
use crate::extract::{extract_blocks, extract_transcripts};
use crate::fetch::Fetcher;
use crate::rows::{InputRecord, ParsedRow};
use futures::stream::{self, StreamExt};
use scraper::Html;
use std::path::PathBuf;
use tracing::{info, warn};

// Processes every row and returns one report per row, in input order
//
// Only fails if the HTTP client itself cannot be created.
pub async fn run_batch<I>(rows: I, config: &Config) -> Result<Vec<RecordReport>, FetchError>
where
    I: IntoIterator<Item = ParsedRow>,
{
    let fetcher = Fetcher::new(config)?;

    // jobs = 1 means strictly one record after another
    let reports: Vec<RecordReport> = stream::iter(rows)
        .map(|row| process_row(&fetcher, config, row))
        .buffered(config.jobs.max(1))
        .collect()
        .await;

    Ok(reports)
}

// Turns one parsed row into a report, logging the outcome
async fn process_row(fetcher: &Fetcher, config: &Config, row: ParsedRow) -> RecordReport {
    let ParsedRow { number, record } = row;

    let record = match record {
        Ok(record) => record,
        Err(e) => {
            warn!("Skipping row {}: {}", number, e);
            return RecordReport::skipped(number, None, &e);
        }
    };

    match process_record(fetcher, config, &record).await {
        Ok(path) => {
            info!("Saved: {}", path.display());
            RecordReport::saved(number, &record, path)
        }
        Err(e) => {
            warn!("Skipping {}: {}", record.url, e);
            RecordReport::skipped(number, Some(&record), &e)
        }
    }
}

// Fetch -> extract -> build -> save for a single record
pub async fn process_record(
    fetcher: &Fetcher,
    config: &Config,
    record: &InputRecord,
) -> Result<PathBuf, RecordError> {
    let html = fetcher
        .fetch(&record.url)
        .await
        .map_err(|source| RecordError::ContentAbsent {
            url: record.url.clone(),
            source,
        })?;

    let page = Html::parse_document(&html);
    let blocks =
        extract_blocks(&page).ok_or_else(|| RecordError::StructureMissing(record.url.clone()))?;
    let transcripts = extract_transcripts(&page);
    let document = build_document(&record.url, &blocks, &transcripts);

    let path = document::save(&document, &record.identifier, &config.output_folder)?;
    Ok(path)
}

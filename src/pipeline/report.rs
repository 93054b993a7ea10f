// src/pipeline/report.rs
// =============================================================================
// This module describes and prints what happened to each input row.
//
// Every row produces exactly one RecordReport, whether it was saved or
// skipped. Reports can be printed as a table for humans or as JSON for
// scripts (--json).
//
// Rust concepts:
// - serde: #[derive(Serialize)] turns our structs into JSON
// - #[serde(flatten)]: Merges the status fields into the report object
// =============================================================================

use crate::error::RecordError;
use crate::rows::InputRecord;
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

// Outcome of one row
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordStatus {
    /// Document written to `path`
    Saved { path: PathBuf },
    /// Row or record skipped; `reason` says why
    Skipped { reason: String },
}

// Report for a single input row
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    /// 1-based row number in the input file
    pub row: usize,
    /// Missing for rows that could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(flatten)]
    pub status: RecordStatus,
}

impl RecordReport {
    pub fn saved(row: usize, record: &InputRecord, path: PathBuf) -> Self {
        RecordReport {
            row,
            url: Some(record.url.clone()),
            identifier: Some(record.identifier.clone()),
            status: RecordStatus::Saved { path },
        }
    }

    pub fn skipped(row: usize, record: Option<&InputRecord>, error: &RecordError) -> Self {
        RecordReport {
            row,
            url: record.map(|r| r.url.clone()),
            identifier: record.map(|r| r.identifier.clone()),
            status: RecordStatus::Skipped {
                reason: error.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status, RecordStatus::Saved { .. })
    }
}

// Prints the reports either as a table or JSON
pub fn print_results(reports: &[RecordReport], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(reports)?;
        println!("{}", json_output);
    } else {
        print_table(reports);
    }
    Ok(())
}

fn print_table(reports: &[RecordReport]) {
    println!("{:<6} {:<50} {:<12} {:<30}", "ROW", "URL", "STATUS", "DETAIL");
    println!("{}", "=".repeat(100));

    for report in reports {
        let url = report.url.as_deref().unwrap_or("-");
        // Truncate on a char boundary so multi-byte URLs don't panic
        let url_display = if url.chars().count() > 47 {
            format!("{}...", url.chars().take(47).collect::<String>())
        } else {
            url.to_string()
        };

        let (status, detail) = match &report.status {
            RecordStatus::Saved { path } => ("✅ SAVED", path.display().to_string()),
            RecordStatus::Skipped { reason } => ("❌ SKIPPED", reason.clone()),
        };

        println!("{:<6} {:<50} {:<12} {:<30}", report.row, url_display, status, detail);
    }

    println!();
}

// Prints counts and where the documents ended up
pub fn print_summary(reports: &[RecordReport], output_folder: &Path) {
    for line in summary_lines(reports, output_folder) {
        println!("{}", line);
    }
}

// The summary always ends with the output location, even for an empty batch
fn summary_lines(reports: &[RecordReport], output_folder: &Path) -> Vec<String> {
    let (saved, skipped) = count(reports);

    vec![
        "📊 Summary:".to_string(),
        format!("   ✅ Saved: {}", saved),
        format!("   ❌ Skipped: {}", skipped),
        format!("   📋 Total: {}", reports.len()),
        String::new(),
        format!("📂 Word files saved in: {}", absolute(output_folder).display()),
    ]
}

// (saved, skipped)
pub fn count(reports: &[RecordReport]) -> (usize, usize) {
    let saved = reports.iter().filter(|r| r.is_ok()).count();
    (saved, reports.len() - saved)
}

// Falls back to the given path if the folder was never created
pub fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> InputRecord {
        InputRecord {
            url: "http://example.com/a".to_string(),
            identifier: "doc1".to_string(),
        }
    }

    #[test]
    fn test_saved_report_json() {
        let report = RecordReport::saved(2, &record(), PathBuf::from("out/doc1.docx"));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["row"], 2);
        assert_eq!(value["status"], "saved");
        assert_eq!(value["path"], "out/doc1.docx");
        assert_eq!(value["identifier"], "doc1");
    }

    #[test]
    fn test_invalid_row_report_has_no_url() {
        let error = RecordError::RowInvalid("expected a URL".to_string());
        let report = RecordReport::skipped(3, None, &error);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["status"], "skipped");
        assert!(value.get("url").is_none());
        assert!(value["reason"].as_str().unwrap().contains("invalid row"));
        assert!(!report.is_ok());
    }

    #[test]
    fn test_count() {
        let error = RecordError::StructureMissing("http://example.com/b".to_string());
        let reports = vec![
            RecordReport::saved(1, &record(), PathBuf::from("a.docx")),
            RecordReport::skipped(2, Some(&record()), &error),
            RecordReport::saved(3, &record(), PathBuf::from("b.docx")),
        ];
        assert_eq!(count(&reports), (2, 1));
    }

    #[test]
    fn test_summary_of_empty_batch_still_names_output_folder() {
        let lines = summary_lines(&[], Path::new("no_such_folder"));
        assert!(lines.contains(&"   📋 Total: 0".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "📂 Word files saved in: no_such_folder"
        );
    }
}

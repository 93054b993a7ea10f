// src/error.rs
// =============================================================================
// Error types for every stage of the pipeline.
//
// We use the `thiserror` crate, which generates the Display and Error impls
// from the #[error(...)] attributes. main.rs still uses anyhow for anything
// that should stop the whole program; the types below are the per-row and
// per-record failures that get reported and then skipped.
// =============================================================================

use thiserror::Error;

// Failures while downloading a page
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be parsed or is not http(s); no request was sent
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A single attempt failed (network, timeout or non-2xx status)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Every allowed attempt failed
    #[error("gave up after {attempts} attempt(s): {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

// Failures while writing a .docx file
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(String),

    /// The identifier would place the file outside the output folder
    #[error("identifier '{0}' is not a usable file name")]
    InvalidIdentifier(String),
}

// Why a single row or record was skipped
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("invalid row: {0}")]
    RowInvalid(String),

    #[error("no content for {url}: {source}")]
    ContentAbsent {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("no <main> or <body> found in {0}")]
    StructureMissing(String),

    #[error("could not save document: {0}")]
    Write(#[from] DocumentError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_absent_message_includes_cause() {
        let err = RecordError::ContentAbsent {
            url: "http://example.com/a".to_string(),
            source: FetchError::Exhausted {
                attempts: 2,
                last_error: "HTTP 500".to_string(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("http://example.com/a"));
        assert!(message.contains("2 attempt(s)"));
        assert!(message.contains("HTTP 500"));
    }

    #[test]
    fn test_document_error_converts_into_record_error() {
        let err: RecordError = DocumentError::InvalidIdentifier("../x".to_string()).into();
        assert!(matches!(err, RecordError::Write(_)));
    }
}

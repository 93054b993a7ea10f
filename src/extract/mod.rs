// src/extract/mod.rs
// =============================================================================
// This module turns downloaded HTML into document content.
//
// Submodules:
// - content: Headings and paragraphs of the main content region
// - transcripts: Subtitle track references of embedded videos
//
// Both work on an already-parsed scraper::Html so the page is parsed once.
// =============================================================================

mod content;
mod transcripts;

pub use content::{extract_blocks, ContentBlock, StyleLevel};
pub use transcripts::extract_transcripts;

// src/document/mod.rs
// =============================================================================
// This module produces the output files.
//
// Submodules:
// - builder: Lays out title, blocks and transcripts as document elements
// - docx: Serializes those elements into a .docx package and saves it
// =============================================================================

mod builder;
mod docx;

pub use builder::build_document;
pub use docx::save;

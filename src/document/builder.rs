// src/document/builder.rs
// =============================================================================
// Assembles the in-memory document for one page.
//
// Layout of every document:
// 1. A level-1 heading naming the source URL
// 2. One paragraph per extracted block, sized by its style level
// 3. If the page had videos with subtitles: a page break, a
//    "Video Transcripts" heading and one paragraph per track reference
//
// The result is plain data; docx.rs decides how it looks on disk.
// =============================================================================

use crate::extract::ContentBlock;

// A single element of the output document, in reading order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocElement {
    Heading { level: u8, text: String },
    Paragraph { text: String, size_pt: u32 },
    PageBreak,
}

// Everything needed to write one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    /// Also stored as the document's title property
    pub title: String,
    pub elements: Vec<DocElement>,
}

pub const TRANSCRIPTS_HEADING: &str = "Video Transcripts";

// Builds the document for a page from its blocks and transcript references
pub fn build_document(url: &str, blocks: &[ContentBlock], transcripts: &[String]) -> OutputDocument {
    let title = format!("Extracted Content from {}", url);
    let mut elements = Vec::with_capacity(blocks.len() + transcripts.len() + 3);

    elements.push(DocElement::Heading {
        level: 1,
        text: title.clone(),
    });

    elements.extend(blocks.iter().map(|block| DocElement::Paragraph {
        text: block.text.clone(),
        size_pt: block.style.font_size_pt(),
    }));

    if !transcripts.is_empty() {
        elements.push(DocElement::PageBreak);
        elements.push(DocElement::Heading {
            level: 2,
            text: TRANSCRIPTS_HEADING.to_string(),
        });
        elements.extend(transcripts.iter().map(|reference| DocElement::Paragraph {
            text: reference.clone(),
            size_pt: crate::extract::StyleLevel::Body.font_size_pt(),
        }));
    }

    OutputDocument { title, elements }
}

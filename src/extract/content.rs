// src/extract/content.rs
// =============================================================================
// This module pulls headings and paragraphs out of a web page.
//
// How it works:
// 1. Find the main content region: <main> if the page has one, else <body>
// 2. Visit every <h1>..<h6> and <p> inside it, in document order
// 3. Take each element's text, collapse whitespace, drop it if empty
// 4. Give each block a style level that decides its font size later
//
// The heading-to-size table is closed: tags we don't know are never matched,
// so there is nothing to configure at runtime.
//
// Rust concepts:
// - Enums with methods: BlockTag and StyleLevel replace string lookups
// - Option<T>: "no content region" is None, not an error type
// =============================================================================

use scraper::{ElementRef, Html, Selector};

// Every element we turn into a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
}

impl BlockTag {
    // Maps an HTML tag name to a BlockTag (None for anything else)
    pub fn from_name(name: &str) -> Option<BlockTag> {
        match name {
            "h1" => Some(BlockTag::H1),
            "h2" => Some(BlockTag::H2),
            "h3" => Some(BlockTag::H3),
            "h4" => Some(BlockTag::H4),
            "h5" => Some(BlockTag::H5),
            "h6" => Some(BlockTag::H6),
            "p" => Some(BlockTag::P),
            _ => None,
        }
    }

    // <h6> and <p> share the body text size
    pub fn style_level(self) -> StyleLevel {
        match self {
            BlockTag::H1 => StyleLevel::H1,
            BlockTag::H2 => StyleLevel::H2,
            BlockTag::H3 => StyleLevel::H3,
            BlockTag::H4 => StyleLevel::H4,
            BlockTag::H5 => StyleLevel::H5,
            BlockTag::H6 | BlockTag::P => StyleLevel::Body,
        }
    }
}

// Font-size tier of a block in the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    Body,
}

impl StyleLevel {
    /// Font size in points.
    pub fn font_size_pt(self) -> u32 {
        match self {
            StyleLevel::H1 => 24,
            StyleLevel::H2 => 20,
            StyleLevel::H3 => 18,
            StyleLevel::H4 => 16,
            StyleLevel::H5 => 14,
            StyleLevel::Body => 12,
        }
    }
}

// One piece of text taken from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Non-empty, whitespace-normalized text
    pub text: String,
    pub style: StyleLevel,
}

// Extracts the ordered text blocks of a parsed page
//
// Returns: None if the page has neither <main> nor <body>
//
// Example:
//   "<main><h1>Title</h1><p> </p><p>Hello</p></main>"
//   -> [("Title", H1), ("Hello", Body)]
pub fn extract_blocks(document: &Html) -> Option<Vec<ContentBlock>> {
    let region = content_region(document)?;

    // The selectors are constants, so parsing can't fail
    let selector =
        Selector::parse("h1, h2, h3, h4, h5, h6, p").expect("block selector is valid");

    let blocks = region
        .select(&selector)
        .filter_map(|element| {
            let tag = BlockTag::from_name(element.value().name())?;
            let text = visible_text(element);
            if text.is_empty() {
                return None;
            }
            Some(ContentBlock {
                text,
                style: tag.style_level(),
            })
        })
        .collect();

    Some(blocks)
}

// <main> wins over <body>
fn content_region(document: &Html) -> Option<ElementRef<'_>> {
    let main = Selector::parse("main").expect("main selector is valid");
    let body = Selector::parse("body").expect("body selector is valid");

    document
        .select(&main)
        .next()
        .or_else(|| document.select(&body).next())
}

// All text under an element with runs of whitespace collapsed to one space
fn visible_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

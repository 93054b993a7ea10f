// src/document/docx.rs
// =============================================================================
// This module writes an OutputDocument as a Word .docx file.
//
// DOCX files are ZIP archives containing XML files in Open XML format.
// We generate the smallest package Word opens without complaint:
// - [Content_Types].xml and _rels/.rels: package plumbing
// - word/document.xml: the paragraphs
// - word/styles.xml + word/_rels/document.xml.rels: heading styles
// - docProps/core.xml: the title property
//
// Saving is atomic: the archive is written to a temporary file inside the
// output folder and renamed over <identifier>.docx only once complete.
// =============================================================================

use super::builder::{DocElement, OutputDocument};
use crate::error::DocumentError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// File extension of generated documents.
pub const EXTENSION: &str = "docx";

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

// Sizes are in half-points (w:sz="32" is 16pt)
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="480" w:after="0"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="365F91"/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="0"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:color w:val="4F81BD"/><w:sz w:val="26"/><w:szCs w:val="26"/></w:rPr></w:style></w:styles>"#;

/// Writes `document` to `<output_folder>/<identifier>.docx`, creating the
/// folder if needed and replacing any existing file of that name.
pub fn save(
    document: &OutputDocument,
    identifier: &str,
    output_folder: &Path,
) -> Result<PathBuf, DocumentError> {
    check_identifier(identifier)?;
    fs::create_dir_all(output_folder)?;
    let path = output_folder.join(format!("{}.{}", identifier, EXTENSION));

    // Dropping `temp` on any error below deletes the partial file
    let mut temp = NamedTempFile::new_in(output_folder)?;
    write_package(document, temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(&path).map_err(|e| DocumentError::Io(e.error))?;

    Ok(path)
}

/// Writes the complete ZIP package to any seekable writer.
pub fn write_package<W: Write + Seek>(
    document: &OutputDocument,
    writer: W,
) -> Result<(), DocumentError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, Vec<u8>); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes().to_vec()),
        ("word/styles.xml", STYLES.as_bytes().to_vec()),
        ("word/document.xml", document_xml(document)?),
        ("docProps/core.xml", core_xml(&document.title)?),
    ];

    for (name, contents) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&contents)?;
    }

    zip.finish()?;
    Ok(())
}

fn check_identifier(identifier: &str) -> Result<(), DocumentError> {
    let escapes_folder = identifier.is_empty()
        || identifier == "."
        || identifier == ".."
        || identifier.contains(['/', '\\']);

    if escapes_folder {
        Err(DocumentError::InvalidIdentifier(identifier.to_string()))
    } else {
        Ok(())
    }
}

fn document_xml(document: &OutputDocument) -> Result<Vec<u8>, DocumentError> {
    let mut xml = XmlOut::new()?;
    xml.start("w:document", &[("xmlns:w", WORD_NS)])?;
    xml.start("w:body", &[])?;

    for element in &document.elements {
        match element {
            DocElement::Heading { level, text } => {
                let style = format!("Heading{}", level);
                xml.start("w:p", &[])?;
                xml.start("w:pPr", &[])?;
                xml.empty("w:pStyle", &[("w:val", style.as_str())])?;
                xml.end("w:pPr")?;
                xml.run(text, None)?;
                xml.end("w:p")?;
            }
            DocElement::Paragraph { text, size_pt } => {
                xml.start("w:p", &[])?;
                xml.run(text, Some(*size_pt))?;
                xml.end("w:p")?;
            }
            DocElement::PageBreak => {
                xml.start("w:p", &[])?;
                xml.start("w:r", &[])?;
                xml.empty("w:br", &[("w:type", "page")])?;
                xml.end("w:r")?;
                xml.end("w:p")?;
            }
        }
    }

    // US Letter with one-inch margins, in twentieths of a point
    xml.start("w:sectPr", &[])?;
    xml.empty("w:pgSz", &[("w:w", "12240"), ("w:h", "15840")])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", "1440"),
            ("w:right", "1440"),
            ("w:bottom", "1440"),
            ("w:left", "1440"),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.end("w:sectPr")?;

    xml.end("w:body")?;
    xml.end("w:document")?;
    Ok(xml.finish())
}

fn core_xml(title: &str) -> Result<Vec<u8>, DocumentError> {
    let mut xml = XmlOut::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
        ],
    )?;
    xml.start("dc:title", &[])?;
    xml.text(title)?;
    xml.end("dc:title")?;
    xml.start("dc:creator", &[])?;
    xml.text(env!("CARGO_PKG_NAME"))?;
    xml.end("dc:creator")?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

// Thin wrapper so every quick-xml error becomes a DocumentError in one place
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Result<Self, DocumentError> {
        let mut xml = XmlOut {
            writer: Writer::new(Vec::new()),
        };
        xml.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(xml)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), DocumentError> {
        self.writer
            .write_event(event)
            .map_err(|e| DocumentError::Xml(e.to_string()))
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), DocumentError> {
        let tag = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.write(Event::Start(tag))
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), DocumentError> {
        let tag = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.write(Event::Empty(tag))
    }

    fn end(&mut self, name: &str) -> Result<(), DocumentError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<(), DocumentError> {
        let text = xml_safe(text);
        self.write(Event::Text(BytesText::new(&text)))
    }

    // A run of text, optionally with an explicit font size
    fn run(&mut self, text: &str, size_pt: Option<u32>) -> Result<(), DocumentError> {
        self.start("w:r", &[])?;
        if let Some(size_pt) = size_pt {
            let half_points = (size_pt * 2).to_string();
            self.start("w:rPr", &[])?;
            self.empty("w:sz", &[("w:val", half_points.as_str())])?;
            self.empty("w:szCs", &[("w:val", half_points.as_str())])?;
            self.end("w:rPr")?;
        }
        self.start("w:t", &[("xml:space", "preserve")])?;
        self.text(text)?;
        self.end("w:t")?;
        self.end("w:r")
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

// XML 1.0 forbids most control characters, even escaped
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::build_document;
    use crate::extract::{ContentBlock, StyleLevel};
    use std::io::Read;

    fn sample_document() -> OutputDocument {
        let blocks = vec![
            ContentBlock {
                text: "Big title".to_string(),
                style: StyleLevel::H1,
            },
            ContentBlock {
                text: "Fish & Chips <tonight>".to_string(),
                style: StyleLevel::Body,
            },
        ];
        build_document("http://example.com/a", &blocks, &["cap.vtt".to_string()])
    }

    fn read_part(path: &Path, name: &str) -> String {
        let file = fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_save_creates_folder_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("nested").join("out");

        let path = save(&sample_document(), "doc1", &folder).unwrap();

        assert_eq!(path, folder.join("doc1.docx"));
        assert!(path.is_file());
    }

    #[test]
    fn test_package_contains_all_parts() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(&sample_document(), "doc1", dir.path()).unwrap();

        let file = fs::File::open(&path).unwrap();
        let archive = zip::ZipArchive::new(file).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "docProps/core.xml",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/styles.xml",
            ]
        );
    }

    #[test]
    fn test_document_xml_has_sizes_headings_and_escaped_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(&sample_document(), "doc1", dir.path()).unwrap();
        let xml = read_part(&path, "word/document.xml");

        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(xml.contains("Extracted Content from http://example.com/a"));
        assert!(xml.contains(r#"<w:sz w:val="48"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="24"/>"#));
        assert!(xml.contains("Fish &amp; Chips &lt;tonight&gt;"));
        assert!(xml.contains(r#"<w:br w:type="page"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading2"/>"#));
        assert!(xml.contains("Video Transcripts"));
        assert!(xml.contains(">cap.vtt<"));
    }

    #[test]
    fn test_core_properties_carry_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(&sample_document(), "doc1", dir.path()).unwrap();
        let xml = read_part(&path, "docProps/core.xml");
        assert!(xml.contains("<dc:title>Extracted Content from http://example.com/a</dc:title>"));
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("doc1.docx"), b"old contents").unwrap();

        let path = save(&sample_document(), "doc1", dir.path()).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"), "Expected a ZIP archive");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_identifier_cannot_escape_folder() {
        let dir = tempfile::tempdir().unwrap();
        for identifier in ["../evil", "a/b", r"a\b", "..", ".", ""] {
            let result = save(&sample_document(), identifier, dir.path());
            assert!(
                matches!(result, Err(DocumentError::InvalidIdentifier(_))),
                "{identifier:?} should be rejected"
            );
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_control_characters_are_dropped() {
        assert_eq!(xml_safe("a\u{0}b\u{b}c\td\n"), "abc\td\n");
    }
}

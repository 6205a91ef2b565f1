//! Text Extractor: turns an uploaded binary into plain text.
//!
//! Dispatch is on the filename extension. Recognized formats (pdf, doc, docx)
//! fail hard when their parser rejects the bytes; everything else falls back
//! to a lossy UTF-8 decode and never fails on content.

use std::panic::{self, AssertUnwindSafe};

use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use tracing::{debug, warn};

use crate::ingest::document::{ExtractedText, ExtractionMethod, FileKind, UploadedDocument};
use crate::ingest::error::IngestError;

/// Extracts raw text from an upload. Synchronous and CPU-bound; run it on a
/// blocking thread from async code.
pub fn extract(document: &UploadedDocument) -> Result<ExtractedText, IngestError> {
    let data = document.bytes.as_ref();

    if data.is_empty() {
        return Err(IngestError::extraction_failed(
            document.kind.as_str(),
            "file is empty",
        ));
    }

    let extracted = match &document.kind {
        FileKind::Pdf => ExtractedText {
            text: extract_pdf(data)?,
            method: ExtractionMethod::Pdf,
        },
        FileKind::Doc | FileKind::Docx => ExtractedText {
            text: extract_docx(data, document.kind.as_str())?,
            method: ExtractionMethod::Docx,
        },
        FileKind::Text => ExtractedText {
            text: decode_lossy(data),
            method: ExtractionMethod::Plain,
        },
        FileKind::Other(ext) => {
            debug!(extension = %ext, "Unrecognized extension, decoding as text");
            ExtractedText {
                text: decode_lossy(data),
                method: ExtractionMethod::Fallback,
            }
        }
    };

    debug!(
        bytes = data.len(),
        chars = extracted.char_count(),
        method = ?extracted.method,
        "Text extraction complete"
    );
    if extracted.is_blank() {
        warn!(filename = %document.filename, "No text extracted from upload");
    }

    Ok(extracted)
}

fn extract_pdf(data: &[u8]) -> Result<String, IngestError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }))
    .map_err(|_| IngestError::extraction_failed("pdf", "PDF parser aborted on malformed input"))?
    .map_err(|e| IngestError::extraction_failed("pdf", e))?;

    debug!(page_count = pages.len(), "PDF pages read");

    let text = pages
        .iter()
        .map(|page| scrub(page))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(text)
}

fn extract_docx(data: &[u8], format: &str) -> Result<String, IngestError> {
    let docx = docx_rs::read_docx(data).map_err(|e| IngestError::extraction_failed(format, e))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => lines.push(paragraph_text(p)),
            // Resume templates often lay the whole body out in tables.
            DocumentChild::Table(table) => push_table_lines(table, &mut lines),
            _ => {}
        }
    }

    debug!(line_count = lines.len(), "DOCX paragraphs read");
    Ok(lines.join("\n"))
}

/// One line per cell paragraph, rows in document order. Nested tables are
/// flattened in place.
fn push_table_lines(table: &Table, lines: &mut Vec<String>) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => lines.push(paragraph_text(p)),
                    TableCellContent::Table(nested) => push_table_lines(nested, lines),
                    _ => {}
                }
            }
        }
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_paragraph_children(&paragraph.children, &mut text);
    scrub(&text)
}

/// Hyperlinks (email, LinkedIn, GitHub) and tracked insertions wrap their
/// runs one level down.
fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let InsertChild::Run(run) = child {
                        push_run(run, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// UTF-8 decode that substitutes invalid sequences instead of failing.
fn decode_lossy(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);
    scrub(text.strip_prefix('\u{feff}').unwrap_or(&*text))
}

/// Drops control characters other than line breaks and tabs.
fn scrub(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Hyperlink, HyperlinkType, Paragraph, Run, Table, TableCell, TableRow};
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use std::io::Cursor;

    fn pack(docx: Docx) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for p in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*p)));
        }
        pack(docx)
    }

    /// Builds a one-page PDF. `line` of `None` produces a page with no text
    /// operators, the shape of a scanned, image-only resume.
    fn pdf_bytes(line: Option<&str>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let operations = match line {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
            None => vec![],
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_plain_text_is_returned_verbatim() {
        let doc = UploadedDocument::new(
            &b"Software Engineer at Acme Corp, Jan 2020 - Present"[..],
            "resume.txt",
        );
        let out = extract(&doc).unwrap();
        assert_eq!(out.method, ExtractionMethod::Plain);
        assert_eq!(out.text, "Software Engineer at Acme Corp, Jan 2020 - Present");
    }

    #[test]
    fn test_invalid_utf8_is_scrubbed_not_fatal() {
        let doc = UploadedDocument::new(vec![b'J', b'a', 0xff, b'n', b'e'], "resume.txt");
        let out = extract(&doc).unwrap();
        assert_eq!(out.text, "Ja\u{fffd}ne");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_decode() {
        let doc = UploadedDocument::new("Jane Doe\nRust developer".as_bytes().to_vec(), "cv.md");
        let out = extract(&doc).unwrap();
        assert_eq!(out.method, ExtractionMethod::Fallback);
        assert_eq!(out.text, "Jane Doe\nRust developer");
    }

    #[test]
    fn test_missing_extension_falls_back_to_decode() {
        let doc = UploadedDocument::new(&b"plain body"[..], "resume");
        let out = extract(&doc).unwrap();
        assert_eq!(out.method, ExtractionMethod::Fallback);
        assert_eq!(out.text, "plain body");
    }

    #[test]
    fn test_bom_and_nul_bytes_are_removed() {
        let doc = UploadedDocument::new("\u{feff}Jane\0 Doe".as_bytes().to_vec(), "a.txt");
        assert_eq!(extract(&doc).unwrap().text, "Jane Doe");
    }

    #[test]
    fn test_zero_byte_upload_is_extraction_failed() {
        for name in ["empty.txt", "empty.pdf", "empty.bin"] {
            let doc = UploadedDocument::new(Vec::new(), name);
            assert!(matches!(
                extract(&doc),
                Err(IngestError::ExtractionFailed { .. })
            ));
        }
    }

    #[test]
    fn test_docx_paragraphs_are_joined_with_newlines() {
        let doc = UploadedDocument::new(
            docx_bytes(&["Jane Doe", "Software Engineer at Acme Corp"]),
            "resume.docx",
        );
        let out = extract(&doc).unwrap();
        assert_eq!(out.method, ExtractionMethod::Docx);
        assert_eq!(out.text, "Jane Doe\nSoftware Engineer at Acme Corp");
    }

    #[test]
    fn test_docx_hyperlink_text_is_kept() {
        let link = Hyperlink::new("mailto:jane@example.com", HyperlinkType::External)
            .add_run(Run::new().add_text("jane@example.com"));
        let docx = Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Email: "))
                .add_hyperlink(link),
        );
        let doc = UploadedDocument::new(pack(docx), "resume.docx");
        assert_eq!(extract(&doc).unwrap().text, "Email: jane@example.com");
    }

    #[test]
    fn test_docx_table_only_layout_is_not_blank() {
        let cell = |text: &str| {
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
        };
        let table = Table::new(vec![
            TableRow::new(vec![cell("Jane Doe"), cell("jane@example.com")]),
            TableRow::new(vec![cell("Engineer at Acme Corp")]),
        ]);
        let doc = UploadedDocument::new(pack(Docx::new().add_table(table)), "resume.docx");

        let out = extract(&doc).unwrap();
        assert!(!out.is_blank());
        assert_eq!(out.text, "Jane Doe\njane@example.com\nEngineer at Acme Corp");
    }

    #[test]
    fn test_docx_mixes_paragraphs_and_tables_in_order() {
        let role = Paragraph::new().add_run(Run::new().add_text("Engineer at Acme Corp"));
        let table = Table::new(vec![TableRow::new(vec![TableCell::new().add_paragraph(role)])]);
        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Experience")))
            .add_table(table)
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Skills: Rust")));
        let doc = UploadedDocument::new(pack(docx), "resume.docx");
        assert_eq!(
            extract(&doc).unwrap().text,
            "Experience\nEngineer at Acme Corp\nSkills: Rust"
        );
    }

    #[test]
    fn test_corrupt_docx_names_format() {
        let doc = UploadedDocument::new(&b"definitely not a zip archive"[..], "resume.docx");
        match extract(&doc) {
            Err(IngestError::ExtractionFailed { format, .. }) => assert_eq!(format, "docx"),
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_doc_binary_is_extraction_failed() {
        let ole_header = vec![0xd0, 0xcf, 0x11, 0xe0, 0xa1, 0xb1, 0x1a, 0xe1];
        let doc = UploadedDocument::new(ole_header, "resume.doc");
        match extract(&doc) {
            Err(IngestError::ExtractionFailed { format, .. }) => assert_eq!(format, "doc"),
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_pdf_with_text_is_extracted() {
        let doc = UploadedDocument::new(pdf_bytes(Some("Acme Corp")), "resume.pdf");
        let out = extract(&doc).unwrap();
        assert_eq!(out.method, ExtractionMethod::Pdf);
        assert!(out.text.contains("Acme"), "got {:?}", out.text);
    }

    #[test]
    fn test_image_only_pdf_yields_empty_text() {
        let doc = UploadedDocument::new(pdf_bytes(None), "scan.pdf");
        let out = extract(&doc).unwrap();
        assert!(out.is_blank());
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_failed() {
        let doc = UploadedDocument::new(&b"%PDF-1.4 truncated garbage"[..], "resume.PDF");
        match extract(&doc) {
            Err(IngestError::ExtractionFailed { format, .. }) => assert_eq!(format, "pdf"),
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }
}

use bytes::Bytes;
use serde::Serialize;

/// Format of an upload, inferred from its filename extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Doc,
    Docx,
    Text,
    /// Anything else. Holds the lowercased extension, or "unknown" when there is none.
    Other(String),
}

impl FileKind {
    /// Case-insensitive dispatch on the text after the last dot.
    pub fn from_filename(filename: &str) -> Self {
        match extension(filename).as_deref() {
            Some("pdf") => FileKind::Pdf,
            Some("doc") => FileKind::Doc,
            Some("docx") => FileKind::Docx,
            Some("txt") => FileKind::Text,
            Some(ext) => FileKind::Other(ext.to_string()),
            None => FileKind::Other("unknown".to_string()),
        }
    }

    /// The `file_type` recorded on the final record.
    pub fn as_str(&self) -> &str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Doc => "doc",
            FileKind::Docx => "docx",
            FileKind::Text => "txt",
            FileKind::Other(ext) => ext,
        }
    }
}

fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// One uploaded file. Lives only until its text has been extracted.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub filename: String,
    pub kind: FileKind,
}

impl UploadedDocument {
    pub fn new(bytes: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let kind = FileKind::from_filename(&filename);
        Self {
            bytes: bytes.into(),
            filename,
            kind,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Pdf,
    Docx,
    Plain,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
}

impl ExtractedText {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

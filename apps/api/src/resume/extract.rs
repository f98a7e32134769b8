//! Plain-text extraction from uploaded resume documents.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use bytes::Bytes;
use regex::Regex;
use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_MIME: &str = "application/msword";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_MIME,
            DocumentKind::Docx => DOCX_MIME,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Legacy .doc files are not supported. Please upload PDF or DOCX")]
    LegacyDoc,

    #[error("Unsupported file format. Please upload PDF or DOCX")]
    Unsupported,

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),

    #[error("No text could be extracted from the document")]
    Empty,

    #[error("The document is malformed and could not be parsed")]
    Malformed,

    #[error("Extraction task failed: {0}")]
    Worker(String),
}

/// Decides the document kind from the declared content type, then the file
/// extension, then the leading magic bytes.
pub fn detect_kind(
    content_type: Option<&str>,
    file_name: &str,
    bytes: &[u8],
) -> Result<DocumentKind, ExtractError> {
    let mime = content_type
        .and_then(|c| c.split(';').next())
        .map(|c| c.trim().to_lowercase());
    match mime.as_deref() {
        Some(PDF_MIME) => return Ok(DocumentKind::Pdf),
        Some(DOCX_MIME) => return Ok(DocumentKind::Docx),
        Some(DOC_MIME) => return Err(ExtractError::LegacyDoc),
        _ => {}
    }

    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        Ok(DocumentKind::Pdf)
    } else if lower.ends_with(".docx") {
        Ok(DocumentKind::Docx)
    } else if lower.ends_with(".doc") {
        Err(ExtractError::LegacyDoc)
    } else if bytes.starts_with(b"%PDF-") {
        Ok(DocumentKind::Pdf)
    } else if bytes.starts_with(b"PK\x03\x04") {
        Ok(DocumentKind::Docx)
    } else {
        Err(ExtractError::Unsupported)
    }
}

pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?
        }
        DocumentKind::Docx => extract_docx_text(bytes)?,
    };
    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

/// Runs [`extract_text`] on the blocking pool. A parser panic on a malformed
/// file surfaces as [`ExtractError::Malformed`].
pub async fn extract_text_blocking(kind: DocumentKind, bytes: Bytes) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text(kind, &bytes))
        .await
        .map_err(|e| {
            if e.is_panic() {
                ExtractError::Malformed
            } else {
                ExtractError::Worker(e.to_string())
            }
        })?
}

fn tag_regex() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

/// Reads `word/document.xml` out of the DOCX archive and flattens it to text,
/// one line per paragraph.
fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    let xml = xml
        .replace("</w:p>", "\n")
        .replace("<w:tab/>", "\t")
        .replace("<w:br/>", "\n");
    let text = tag_regex().replace_all(&xml, "");
    Ok(unescape_xml(&text))
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

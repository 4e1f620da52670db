//! Text extraction — turns candidate document blobs into plain text.
//!
//! Behind a trait so the orchestrator and its tests never touch real parsers.
//! PDF goes through `pdf-extract`; DOC/DOCX read `word/document.xml` out of
//! the OOXML zip container. Legacy binary .doc files are admitted but fail
//! extraction, which the orchestrator converts into a per-document sentinel.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted candidate document formats, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
}

impl DocumentFormat {
    /// Maps a file name to a supported format, case-insensitively.
    /// Returns `None` for anything outside {pdf, doc, docx}.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "doc" => Some(DocumentFormat::Doc),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from DOC/DOCX: {0}")]
    Docx(String),
}

/// Text extraction capability. The production implementation parses real
/// document containers; tests substitute scripted extractors.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: &[u8], format: DocumentFormat) -> Result<String, ExtractError>;
}

/// Production extractor. Parsing is CPU-bound, so it runs on the blocking pool.
pub struct FileTextExtractor;

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract(&self, data: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
        let data = data.to_vec();
        let result = tokio::task::spawn_blocking(move || match format {
            DocumentFormat::Pdf => extract_pdf_text(&data),
            DocumentFormat::Doc | DocumentFormat::Docx => extract_docx_text(&data),
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(e) => Err(ExtractError::Pdf(format!("extraction task failed: {e}"))),
        }
    }
}

fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    let text =
        pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(text.trim().to_string())
}

fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| ExtractError::Docx(format!("not an OOXML container: {e}")))?;

    let mut document_xml = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(format!("missing word/document.xml: {e}")))?;

    let mut xml = String::new();
    document_xml
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(format!("failed to read document.xml: {e}")))?;

    let text = parse_docx_xml(&xml)?;
    Ok(text.trim().to_string())
}

/// Collects the text runs (`w:t`) of a WordprocessingML body, inserting a
/// newline at each paragraph (`w:p`) boundary.
fn parse_docx_xml(xml: &str) -> Result<String, ExtractError> {
    // No text trimming: spaces inside `w:t` runs are significant, and
    // whitespace between elements never lands inside a text element anyway.
    let mut reader = Reader::from_str(xml);

    let mut text = String::new();
    let mut in_text_element = false;
    let mut in_paragraph = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text_element = true,
                b"p" => in_paragraph = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text_element = false,
                b"p" => {
                    if in_paragraph {
                        text.push('\n');
                        in_paragraph = false;
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text_element {
                    let decoded = e.unescape().unwrap_or_default();
                    text.push_str(&decoded);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(format!("XML parsing error: {e}"))),
            _ => {}
        }
    }

    Ok(text)
}

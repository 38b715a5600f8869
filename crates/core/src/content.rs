use crate::error::ContentError;
use crate::extractor::{LopdfExtractor, PdfExtractor};
use crate::NormalizedContent;
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{error, warn};

const TEXT_EXTENSIONS: &[&str] = &["txt", "csv", "json", "xml", "html", "md", "js", "css", "py"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Pdf,
    Text,
    Binary,
}

/// Picks the pipeline for a file from its extension alone.
pub fn classify(filename: &str) -> ContentKind {
    let extension = match filename.rsplit_once('.') {
        Some((_, extension)) => extension.to_lowercase(),
        None => return ContentKind::Binary,
    };

    if extension == "pdf" {
        ContentKind::Pdf
    } else if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        ContentKind::Text
    } else {
        ContentKind::Binary
    }
}

pub struct ContentNormalizer<E = LopdfExtractor> {
    extractor: E,
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self::new(LopdfExtractor)
    }
}

impl<E: PdfExtractor> ContentNormalizer<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn normalize(&self, filename: &str, raw: &[u8]) -> NormalizedContent {
        let size = raw.len() as u64;

        match classify(filename) {
            ContentKind::Pdf => match self.extractor.extract_text(raw) {
                Ok(extracted) => NormalizedContent::Text {
                    content: extracted.text,
                    size,
                    original_type: Some("pdf".to_string()),
                    page_count: Some(extracted.page_count),
                },
                Err(extract_error) => {
                    error!(file = filename, error = %extract_error, "pdf text extraction failed");
                    NormalizedContent::Binary {
                        content_base64: STANDARD.encode(raw),
                        size,
                        original_type: Some("pdf".to_string()),
                        error: Some(format!("PDF processing error: {extract_error}")),
                    }
                }
            },
            ContentKind::Text => match decode_utf8(raw) {
                Ok(content) => NormalizedContent::Text {
                    content,
                    size,
                    original_type: None,
                    page_count: None,
                },
                Err(decode_error) => {
                    warn!(file = filename, error = %decode_error, "text file is not utf-8, returning binary");
                    binary(raw)
                }
            },
            ContentKind::Binary => binary(raw),
        }
    }
}

fn decode_utf8(raw: &[u8]) -> Result<String, ContentError> {
    Ok(String::from_utf8(raw.to_vec())?)
}

fn binary(raw: &[u8]) -> NormalizedContent {
    NormalizedContent::Binary {
        content_base64: STANDARD.encode(raw),
        size: raw.len() as u64,
        original_type: None,
        error: None,
    }
}

use crate::error::ContentError;
use lopdf::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfText {
    pub text: String,
    pub page_count: u32,
}

pub trait PdfExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<PdfText, ContentError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<PdfText, ContentError> {
        let document =
            Document::load_mem(bytes).map_err(|error| ContentError::PdfParse(error.to_string()))?;

        let pages = document.get_pages();
        let mut text = String::new();
        for page_no in pages.keys() {
            let page_text = document
                .extract_text(&[*page_no])
                .map_err(|error| ContentError::PdfParse(format!("page {page_no}: {error}")))?;
            text.push_str(&page_text);
            text.push('\n');
        }

        let page_count = u32::try_from(pages.len())
            .map_err(|_| ContentError::PdfParse("page count overflow".to_string()))?;

        Ok(PdfText {
            text: text.trim_end().to_string(),
            page_count,
        })
    }
}

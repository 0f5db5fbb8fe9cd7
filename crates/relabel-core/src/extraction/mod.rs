pub mod pdftotext;

use crate::error::RelabelError;
use serde::{Deserialize, Serialize};

/// Text layer of a single page, one entry per extracted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Zero-based position of the page in the source document.
    pub page_index: usize,
    pub lines: Vec<String>,
}

impl PageText {
    pub fn new(page_index: usize, lines: Vec<String>) -> Self {
        PageText { page_index, lines }
    }

    /// Build a page from raw text, splitting on line breaks.
    pub fn from_text(page_index: usize, text: &str) -> Self {
        PageText {
            page_index,
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract the text layer from PDF bytes, returning one PageText per page.
    ///
    /// Implementations must return every page, including blank ones, so that
    /// `page_index` lines up with the source document.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, RelabelError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

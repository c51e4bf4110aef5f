use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF parsing backends.
///
/// A backend turns the raw bytes of a PDF file into a [`PdfDocument`]
/// exposing its pages in order. Decoding details (object streams, fonts,
/// glyph mapping) stay inside the implementor; [`crate::extract`] only
/// ever sees pages and their text.
pub trait PdfBackend: Send + Sync {
    /// Parse an in-memory PDF.
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError>;
}

/// An opened PDF whose pages can be read one at a time.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Visible text of the page at `index` (0-based). May be empty.
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}

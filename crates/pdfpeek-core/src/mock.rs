//! In-memory PDF backend for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, PdfBackend, PdfDocument};

/// A hand-rolled backend implementing [`PdfBackend`] for tests.
///
/// Understands a trivial format instead of real PDF: the [`MockBackend::MAGIC`]
/// header line followed by pages, each terminated by a form feed (`\x0c`). Anything
/// without the header is rejected with [`BackendError::OpenError`], and a
/// page whose text is [`MockBackend::FAILING_PAGE`] fails on read.
#[derive(Default)]
pub struct MockBackend {
    open_count: AtomicUsize,
}

impl MockBackend {
    pub const MAGIC: &'static [u8] = b"%MOCK\n";
    pub const FAILING_PAGE: &'static str = "!fail";

    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `pages` into bytes this backend can open.
    pub fn encode(pages: &[&str]) -> Vec<u8> {
        let mut bytes = Self::MAGIC.to_vec();
        for page in pages {
            bytes.extend_from_slice(page.as_bytes());
            bytes.push(0x0c);
        }
        bytes
    }

    /// How many times `open()` has been called.
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockBackend {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError> {
        self.open_count.fetch_add(1, Ordering::SeqCst);

        let body = bytes
            .strip_prefix(Self::MAGIC)
            .ok_or_else(|| BackendError::OpenError("missing header".into()))?;
        let body = std::str::from_utf8(body)
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        let pages = body.split_terminator('\x0c').map(str::to_string).collect();
        Ok(Box::new(MockDocument { pages }))
    }
}

struct MockDocument {
    pages: Vec<String>,
}

impl PdfDocument for MockDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        match self.pages.get(index) {
            Some(page) if page == MockBackend::FAILING_PAGE => Err(
                BackendError::ExtractionError(format!("page {} is unreadable", index + 1)),
            ),
            Some(page) => Ok(page.clone()),
            None => Err(BackendError::ExtractionError(format!(
                "page {} out of range",
                index + 1
            ))),
        }
    }
}

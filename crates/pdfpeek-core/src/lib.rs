pub mod backend;
pub mod batch;
pub mod config_file;
pub mod extract;
pub mod mock;
pub mod preview;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use batch::{BatchConfig, BatchSummary, FileReport, Outcome, resolve_paths, run_batch};
pub use extract::{ERROR_PREFIX, ErrorKind, ExtractError, extract_text, extract_text_lossy};
pub use preview::{DEFAULT_PREVIEW_LIMIT, ELLIPSIS, preview};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::backend::{BackendError, PdfBackend};

/// Prefix carried by every extraction failure message.
pub const ERROR_PREFIX: &str = "Error reading PDF: ";

/// Coarse classification of an [`ExtractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Io,
    Parse,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Error reading PDF: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error reading PDF: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error reading PDF: {0}")]
    Backend(#[from] BackendError),
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::NotFound { .. } => ErrorKind::NotFound,
            ExtractError::Io { .. } => ErrorKind::Io,
            ExtractError::Backend(_) => ErrorKind::Parse,
        }
    }
}

/// Extract the text of every page of the PDF at `path`.
///
/// Each page's text is followed by a single `\n`, in the order the backend
/// reports pages. A document with no pages yields an empty string. The
/// first failing page fails the whole document.
pub fn extract_text(path: &Path, backend: &dyn PdfBackend) -> Result<String, ExtractError> {
    let bytes = read_file(path)?;

    let document = backend.open(&bytes)?;
    let page_count = document.page_count();
    tracing::debug!(path = %path.display(), pages = page_count, "opened PDF");

    let mut text = String::new();
    for index in 0..page_count {
        let page_text = document.page_text(index)?;
        text.push_str(&page_text);
        text.push('\n');
    }

    Ok(text)
}

/// Like [`extract_text`], but collapses failures into the
/// `"Error reading PDF: <message>"` string instead of returning an error.
pub fn extract_text_lossy(path: &Path, backend: &dyn PdfBackend) -> String {
    match extract_text(path, backend) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "extraction failed");
            e.to_string()
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ExtractError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ExtractError::NotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => ExtractError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(bytes)
}

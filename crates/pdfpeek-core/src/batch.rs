use std::borrow::Cow;
use std::path::PathBuf;

use crate::backend::PdfBackend;
use crate::config_file::ConfigFile;
use crate::extract::{ExtractError, extract_text};
use crate::preview::{DEFAULT_PREVIEW_LIMIT, preview};

/// Resolved settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub base_dir: PathBuf,
    /// File names relative to `base_dir`, processed in this order.
    pub files: Vec<String>,
    /// `None` prints documents in full.
    pub preview_limit: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            files: Vec::new(),
            preview_limit: Some(DEFAULT_PREVIEW_LIMIT),
        }
    }
}

impl BatchConfig {
    /// Fill unset fields of a loaded config file with defaults.
    pub fn from_config_file(file: &ConfigFile) -> Self {
        let defaults = Self::default();
        let batch = file.batch.clone().unwrap_or_default();
        let limit = file.display.as_ref().and_then(|d| d.preview_limit);

        Self {
            base_dir: batch.base_dir.map(PathBuf::from).unwrap_or(defaults.base_dir),
            files: batch.files.unwrap_or(defaults.files),
            preview_limit: match limit {
                Some(0) => None,
                Some(n) => Some(n),
                None => defaults.preview_limit,
            },
        }
    }

    /// Apply the configured preview limit to `text`.
    pub fn preview<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.preview_limit {
            Some(limit) => preview(text, limit),
            None => Cow::Borrowed(text),
        }
    }
}

/// What happened to one input file.
#[derive(Debug)]
pub enum Outcome {
    /// The joined path does not exist; the extractor was not invoked.
    Missing,
    Extracted { text: String },
    Failed { error: ExtractError },
}

/// Per-file result delivered by [`run_batch`].
#[derive(Debug)]
pub struct FileReport {
    pub file_name: String,
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl FileReport {
    /// The text to show for a processed file: the document text, or the
    /// error message for a failed one. `None` for missing files.
    pub fn display_text(&self) -> Option<Cow<'_, str>> {
        match &self.outcome {
            Outcome::Missing => None,
            Outcome::Extracted { text } => Some(Cow::Borrowed(text)),
            Outcome::Failed { error } => Some(Cow::Owned(error.to_string())),
        }
    }
}

/// Counts of outcomes across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub extracted: usize,
    pub missing: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.extracted + self.missing + self.failed
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Missing => self.missing += 1,
            Outcome::Extracted { .. } => self.extracted += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Join each configured file name onto the base directory, keeping order.
pub fn resolve_paths(config: &BatchConfig) -> Vec<(String, PathBuf)> {
    config
        .files
        .iter()
        .map(|name| (name.clone(), config.base_dir.join(name)))
        .collect()
}

/// Extract every configured file in order, handing each report to
/// `on_report` as soon as that file is done.
///
/// Missing and unparseable files are reported and skipped; nothing stops
/// the batch early and nothing is retried.
pub fn run_batch(
    config: &BatchConfig,
    backend: &dyn PdfBackend,
    mut on_report: impl FnMut(&FileReport),
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for (file_name, path) in resolve_paths(config) {
        let outcome = if !path.exists() {
            tracing::debug!(path = %path.display(), "file not found");
            Outcome::Missing
        } else {
            match extract_text(&path, backend) {
                Ok(text) => Outcome::Extracted { text },
                Err(error) => {
                    tracing::warn!(path = %path.display(), error = %error, "extraction failed");
                    Outcome::Failed { error }
                }
            }
        };

        summary.record(&outcome);
        on_report(&FileReport {
            file_name,
            path,
            outcome,
        });
    }

    tracing::info!(
        extracted = summary.extracted,
        missing = summary.missing,
        failed = summary.failed,
        "batch complete"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file::{BatchSection, DisplaySection};

    #[test]
    fn resolve_joins_in_order() {
        let config = BatchConfig {
            base_dir: PathBuf::from("/docs"),
            files: vec!["b.pdf".into(), "a.pdf".into()],
            ..Default::default()
        };
        let resolved = resolve_paths(&config);
        assert_eq!(
            resolved,
            vec![
                ("b.pdf".to_string(), PathBuf::from("/docs/b.pdf")),
                ("a.pdf".to_string(), PathBuf::from("/docs/a.pdf")),
            ]
        );
    }

    #[test]
    fn from_config_file_defaults() {
        let config = BatchConfig::from_config_file(&ConfigFile::default());
        assert_eq!(config, BatchConfig::default());
        assert_eq!(config.preview_limit, Some(DEFAULT_PREVIEW_LIMIT));
    }

    #[test]
    fn zero_limit_means_unlimited() {
        let file = ConfigFile {
            batch: Some(BatchSection {
                base_dir: Some("/in".into()),
                files: Some(vec!["x.pdf".into()]),
            }),
            display: Some(DisplaySection {
                preview_limit: Some(0),
                color: None,
            }),
        };
        let config = BatchConfig::from_config_file(&file);
        assert_eq!(config.base_dir, PathBuf::from("/in"));
        assert_eq!(config.preview_limit, None);

        let long = "z".repeat(DEFAULT_PREVIEW_LIMIT * 2);
        assert_eq!(config.preview(&long), long);
    }

    #[test]
    fn summary_total() {
        let summary = BatchSummary {
            extracted: 3,
            missing: 1,
            failed: 2,
        };
        assert_eq!(summary.total(), 6);
    }
}

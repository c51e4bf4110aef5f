use std::path::PathBuf;

use pdfpeek_core::BatchConfig;
use pdfpeek_core::config_file::ConfigFile;

/// Values that can override the config file, from flags or environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_dir: Option<PathBuf>,
    pub files: Vec<String>,
    pub preview_limit: Option<usize>,
}

impl Overrides {
    /// Fill gaps in `self` (CLI flags) from `PDFPEEK_*` environment variables.
    pub fn with_env(mut self) -> Self {
        self.base_dir = self
            .base_dir
            .or_else(|| std::env::var("PDFPEEK_BASE_DIR").ok().map(PathBuf::from));
        self.preview_limit = self.preview_limit.or_else(|| {
            std::env::var("PDFPEEK_PREVIEW_LIMIT")
                .ok()
                .and_then(|v| parse_limit(&v))
        });
        self
    }
}

/// Parse a preview limit from the environment, warning on garbage.
fn parse_limit(raw: &str) -> Option<usize> {
    match raw.trim().parse() {
        Ok(limit) => Some(limit),
        Err(e) => {
            tracing::warn!(value = raw, error = %e, "ignoring invalid PDFPEEK_PREVIEW_LIMIT");
            None
        }
    }
}

/// Resolve configuration: overrides > config file > defaults.
pub fn resolve(overrides: Overrides, file: &ConfigFile) -> BatchConfig {
    let mut config = BatchConfig::from_config_file(file);
    if let Some(base_dir) = overrides.base_dir {
        config.base_dir = base_dir;
    }
    if !overrides.files.is_empty() {
        config.files = overrides.files;
    }
    if let Some(limit) = overrides.preview_limit {
        config.preview_limit = (limit > 0).then_some(limit);
    }
    config
}

/// Color is on unless disabled by flag, `NO_COLOR`, or the config file.
pub fn use_color(no_color_flag: bool, file: &ConfigFile) -> bool {
    let from_file = file.display.as_ref().and_then(|d| d.color).unwrap_or(true);
    !no_color_flag && std::env::var_os("NO_COLOR").is_none() && from_file
}

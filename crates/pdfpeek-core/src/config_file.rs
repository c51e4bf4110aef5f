use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub batch: Option<BatchSection>,
    pub display: Option<DisplaySection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSection {
    pub base_dir: Option<String>,
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Characters shown per document; `0` disables truncation.
    pub preview_limit: Option<usize>,
    pub color: Option<bool>,
}

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_NAME: &str = ".pdfpeek.toml";

/// Platform config directory path: `<config_dir>/pdfpeek/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdfpeek").join("config.toml"))
}

/// Load config by cascading CWD `.pdfpeek.toml` over platform config.
/// CWD values override platform values. Unreadable or invalid files are
/// skipped with a warning.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(LOCAL_CONFIG_NAME));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match load_strict(path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config file");
            None
        }
    }
}

/// Load a config the user asked for explicitly; every failure is an error.
pub fn load_strict(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        batch: Some(BatchSection {
            base_dir: overlay
                .batch
                .as_ref()
                .and_then(|b| b.base_dir.clone())
                .or_else(|| base.batch.as_ref().and_then(|b| b.base_dir.clone())),
            files: overlay
                .batch
                .as_ref()
                .and_then(|b| b.files.clone())
                .or_else(|| base.batch.as_ref().and_then(|b| b.files.clone())),
        }),
        display: Some(DisplaySection {
            preview_limit: overlay
                .display
                .as_ref()
                .and_then(|d| d.preview_limit)
                .or_else(|| base.display.as_ref().and_then(|d| d.preview_limit)),
            color: overlay
                .display
                .as_ref()
                .and_then(|d| d.color)
                .or_else(|| base.display.as_ref().and_then(|d| d.color)),
        }),
    }
}

/// Write `config` to `path`, creating parent directories as needed.
pub fn save_config(config: &ConfigFile, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// A filled-in config suitable as a starting point for users.
pub fn template() -> ConfigFile {
    ConfigFile {
        batch: Some(BatchSection {
            base_dir: Some("documents".to_string()),
            files: Some(vec!["example.pdf".to_string()]),
        }),
        display: Some(DisplaySection {
            preview_limit: Some(crate::preview::DEFAULT_PREVIEW_LIMIT),
            color: Some(true),
        }),
    }
}

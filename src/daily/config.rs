//! # Configuration
//!
//! Daily configuration is loaded with [`confique`], layered in priority order:
//!
//! 1. **Command-line flags**: `--backend`, `--data-dir` (applied by the CLI).
//! 2. **Environment variables**: `DAILY_BACKEND`, `DAILY_DATA_DIR`, `DAILY_PAGE_SIZE`.
//! 3. **Config file**: `daily.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `file` | `file` (JSON files) or `document` (SQLite documents) |
//! | `data_dir` | OS data directory | Where entries and the database live |
//! | `page_size` | `10` | Records per page for `daily list` |

use crate::error::{DailyError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILENAME: &str = "daily.toml";
pub const ENTRIES_DIR: &str = "entries";
pub const DATABASE_FILENAME: &str = "daily.db";

/// Which [`RecordStore`](crate::store::RecordStore) implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Document,
}

impl Backend {
    pub fn other(self) -> Self {
        match self {
            Backend::File => Backend::Document,
            Backend::Document => Backend::File,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::File => write!(f, "file"),
            Backend::Document => write!(f, "document"),
        }
    }
}

impl FromStr for Backend {
    type Err = DailyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "document" => Ok(Backend::Document),
            other => Err(DailyError::Config(format!(
                "unknown backend '{}' (expected 'file' or 'document')",
                other
            ))),
        }
    }
}

fn parse_backend(s: &str) -> Result<Backend> {
    s.parse()
}

/// Configuration for daily, stored in `daily.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DailyConfig {
    /// Storage backend. Falls back to `file` when unset.
    #[config(env = "DAILY_BACKEND", parse_env = parse_backend)]
    pub backend: Option<Backend>,

    /// Data directory. Falls back to the OS data directory when unset.
    #[config(env = "DAILY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Records per page when listing.
    #[config(env = "DAILY_PAGE_SIZE", default = 10)]
    pub page_size: usize,
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            backend: None,
            data_dir: None,
            page_size: 10,
        }
    }
}

impl DailyConfig {
    /// Load from the environment and `path` (if given and present), over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder
            .load()
            .map_err(|e| DailyError::Config(e.to_string()))?;

        if config.page_size == 0 {
            return Err(DailyError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn backend(&self) -> Backend {
        self.backend.unwrap_or_default()
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "daily", "daily")
        .ok_or_else(|| DailyError::Config("could not determine home directory".to_string()))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILENAME))
}

/// Directory holding the `entry-{uuid}.json` files.
pub fn entries_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(ENTRIES_DIR)
}

pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILENAME)
}

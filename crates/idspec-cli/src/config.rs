//! # Configuration
//!
//! Where the schema lives and which documents to check. Values come from,
//! in increasing precedence: built-in defaults, a YAML config file
//! (`--config`, or `idspec.yaml` at the repository root), and the
//! `--schema` / `--pattern` flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use idspec_schema::{DEFAULT_DOCUMENT_PATTERN, DEFAULT_SCHEMA_PATH};

/// Config file picked up from the repository root when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "idspec.yaml";

/// Validator settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Schema file, relative to the repository root unless absolute.
    pub schema: PathBuf,
    /// Glob selecting documents, relative to the repository root unless absolute.
    pub pattern: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            schema: PathBuf::from(DEFAULT_SCHEMA_PATH),
            pattern: DEFAULT_DOCUMENT_PATTERN.to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Parse a YAML config file. An empty file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Load the explicit config file if given, else `idspec.yaml` under
    /// `repo_root` if present, else the defaults.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>, repo_root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let default_file = repo_root.join(CONFIG_FILE_NAME);
        if default_file.is_file() {
            tracing::debug!(config = %default_file.display(), "using repository config file");
            Self::from_file(&default_file)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, schema: Option<PathBuf>, pattern: Option<String>) -> Self {
        if let Some(schema) = schema {
            self.schema = schema;
        }
        if let Some(pattern) = pattern {
            self.pattern = pattern;
        }
        self
    }

    /// Absolute schema path for a run rooted at `repo_root`.
    pub fn schema_path(&self, repo_root: &Path) -> PathBuf {
        if self.schema.is_absolute() {
            self.schema.clone()
        } else {
            repo_root.join(&self.schema)
        }
    }
}

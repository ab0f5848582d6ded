//! # Schema Loading
//!
//! Reads the identity-spec schema, parses it as JSON and compiles it into a
//! [`jsonschema::Validator`] exactly once per run. The JSON Schema draft is
//! detected from `$schema` and defaults to Draft 2020-12.
//!
//! ## Reference Resolution
//!
//! Relative `$ref`s (e.g. `"common.json#/$defs/name"`) are resolved against
//! files sitting next to the schema. Nothing is ever fetched over the
//! network: a reference that does not name a readable sibling file is a
//! compile error.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;

use crate::error::SchemaLoadError;

/// Resolves `$ref` URIs to JSON files in the schema's own directory.
struct SiblingFileRetriever {
    base_dir: PathBuf,
}

impl Retrieve for SiblingFileRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let filename = uri_str
            .split(['#', '?'])
            .next()
            .and_then(|s| s.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| format!("cannot resolve reference: {uri_str}"))?;

        let candidate = self.base_dir.join(filename);
        if !candidate.is_file() {
            return Err(format!(
                "referenced schema {uri_str} not found at {}",
                candidate.display()
            )
            .into());
        }

        let content = std::fs::read_to_string(&candidate)?;
        let value = serde_json::from_str(&content)?;
        tracing::debug!(uri = uri_str, path = %candidate.display(), "resolved schema reference");
        Ok(value)
    }
}

/// A loaded and compiled identity-spec schema.
///
/// Immutable once built; the run validates every document against the same
/// compiled instance.
pub struct SpecSchema {
    path: PathBuf,
    raw: Value,
    validator: Validator,
}

impl fmt::Debug for SpecSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecSchema")
            .field("path", &self.path)
            .field("id", &self.id())
            .finish()
    }
}

impl SpecSchema {
    /// Read, parse and compile the schema at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Read`] if the file cannot be read,
    /// [`SchemaLoadError::Parse`] if it is not JSON and
    /// [`SchemaLoadError::Compile`] if it is not a valid JSON Schema.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        let path = path.as_ref().to_path_buf();

        let content =
            std::fs::read_to_string(&path).map_err(|source| SchemaLoadError::Read {
                path: path.clone(),
                source,
            })?;

        let raw: Value =
            serde_json::from_str(&content).map_err(|source| SchemaLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::compile(path, raw, base_dir)
    }

    /// Compile an already-parsed schema value.
    ///
    /// `path` is used for diagnostics only; relative references resolve
    /// against `base_dir`.
    pub fn from_value(
        path: impl Into<PathBuf>,
        raw: Value,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self, SchemaLoadError> {
        Self::compile(path.into(), raw, base_dir.into())
    }

    fn compile(path: PathBuf, raw: Value, base_dir: PathBuf) -> Result<Self, SchemaLoadError> {
        let validator = jsonschema::options()
            .with_retriever(SiblingFileRetriever { base_dir })
            .build(&raw)
            .map_err(|e| SchemaLoadError::Compile {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(schema = %path.display(), "compiled identity-spec schema");

        Ok(Self {
            path,
            raw,
            validator,
        })
    }

    /// Path the schema was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The schema's `$id`, if it declares one.
    pub fn id(&self) -> Option<&str> {
        self.raw.get("$id").and_then(Value::as_str)
    }

    /// The parsed schema document.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub(crate) fn validator(&self) -> &Validator {
        &self.validator
    }
}

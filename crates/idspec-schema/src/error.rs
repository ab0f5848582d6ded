//! # Error Types
//!
//! Startup errors are fatal and returned as `Err`. Their `Display` names
//! the failing input only; the cause is reachable through `source()` so
//! that `{:#}` chains print it once. Document errors are caught at the
//! document boundary and folded into
//! [`ValidationResult::ParseFailure`](crate::ValidationResult::ParseFailure).

use std::path::PathBuf;

use thiserror::Error;

/// The schema could not be turned into a usable validator.
///
/// Every variant aborts the run before any document is processed.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The schema file could not be read.
    #[error("failed to read schema {}", path.display())]
    Read {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid JSON.
    #[error("failed to parse schema {}", path.display())]
    Parse {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The schema is valid JSON but not a compilable JSON Schema.
    #[error("failed to compile schema {}: {reason}", path.display())]
    Compile {
        /// Path of the schema file.
        path: PathBuf,
        /// Compiler diagnostic.
        reason: String,
    },
}

/// Candidate documents could not be enumerated.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The glob pattern is malformed.
    #[error("invalid glob pattern '{pattern}'")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying pattern error.
        #[source]
        source: glob::PatternError,
    },
}

/// A candidate document could not be read or parsed.
///
/// The `Display` output of each variant is the underlying message verbatim,
/// since it is surfaced to the user as-is.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read as UTF-8 text.
    #[error("{0}")]
    Read(#[from] std::io::Error),

    /// The text is not well-formed YAML.
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The YAML tree has no JSON equivalent (e.g. a non-finite float).
    #[error("{0}")]
    Conversion(String),
}

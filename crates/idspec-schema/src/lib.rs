//! # idspec-schema: Identity Spec Validation
//!
//! Validates YAML identity-spec documents against the identity-spec JSON
//! Schema and reports the outcome in a form suitable for CI gating.
//!
//! ## Pipeline
//!
//! 1. [`SpecSchema::load`]: read, parse and compile the schema once.
//!    Failure here is fatal for the run.
//! 2. [`discover()`]: expand a glob pattern into a sorted list of candidate
//!    documents.
//! 3. [`validate_one`]: parse one document and collect every schema
//!    violation into a [`ValidationResult`].
//! 4. [`Reporter`]: print one block per document and the final banner,
//!    accumulating a [`RunSummary`] that decides the exit code.
//!
//! [`run`] drives all four steps over a list of paths.
//!
//! ## Crate Policy
//!
//! - No process exits and no logging subscriber here; the binary owns both.
//! - Per-document failures never escape as `Err`: they are values of
//!   [`ValidationResult`]. Only schema loading and discovery return errors.
//! - Validation always collects all violations, never just the first.

pub mod discover;
pub mod document;
pub mod error;
pub mod report;
pub mod schema;
pub mod validate;

pub use discover::{discover, discover_in};
pub use document::{yaml_to_json_value, CandidateDocument};
pub use error::{DiscoveryError, DocumentError, SchemaLoadError};
pub use report::{run, Outcome, Reporter, RunSummary};
pub use schema::SpecSchema;
pub use validate::{validate_one, ValidationResult, Violation};

/// Default location of the identity-spec schema, relative to the repository root.
pub const DEFAULT_SCHEMA_PATH: &str = "schema/identity-spec.json";

/// Default glob selecting example documents, relative to the repository root.
pub const DEFAULT_DOCUMENT_PATTERN: &str = "specs/**/*.yaml";

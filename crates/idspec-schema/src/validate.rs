//! # Document Validation
//!
//! Checks one candidate document against the compiled schema. Every
//! constraint violation is collected in a single pass; validation never
//! stops at the first error.

use std::fmt;
use std::path::Path;

use jsonschema::error::ValidationErrorKind;
use serde_json::Value;

use crate::document::CandidateDocument;
use crate::schema::SpecSchema;

/// A single schema constraint failure within a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending node. Empty for the document root.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Human-readable description of the failure.
    pub message: String,
    /// Permitted values, present only for `enum` violations.
    pub allowed_values: Option<Vec<String>>,
}

impl Violation {
    /// The instance path, or `(root)` for the document root.
    pub fn location(&self) -> &str {
        if self.instance_path.is_empty() {
            "(root)"
        } else {
            &self.instance_path
        }
    }

    fn from_error(err: &jsonschema::ValidationError<'_>) -> Self {
        let allowed_values = match &err.kind {
            ValidationErrorKind::Enum { options } => Some(render_allowed_values(options)),
            _ => None,
        };
        Self {
            instance_path: err.instance_path.to_string(),
            schema_path: err.schema_path.to_string(),
            message: err.to_string(),
            allowed_values,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.location(), self.message)
    }
}

/// Strings are shown bare; every other value as compact JSON.
fn render_allowed_values(options: &Value) -> Vec<String> {
    let render = |v: &Value| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match options {
        Value::Array(items) => items.iter().map(render).collect(),
        other => vec![render(other)],
    }
}

/// Outcome of validating one candidate document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The document satisfies every schema constraint.
    Valid,
    /// The document parsed but violates the schema. Never empty.
    Invalid(Vec<Violation>),
    /// The document could not be read or parsed; the message is the
    /// underlying error text.
    ParseFailure(String),
}

impl ValidationResult {
    /// True only for [`ValidationResult::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl SpecSchema {
    /// Collect every violation of this schema by `instance`.
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        self.validator()
            .iter_errors(instance)
            .map(|err| Violation::from_error(&err))
            .collect()
    }

    /// Classify an already-parsed document tree.
    pub fn check(&self, instance: &Value) -> ValidationResult {
        let violations = self.violations(instance);
        if violations.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(violations)
        }
    }
}

/// Read, parse and validate the document at `path`.
///
/// Read and parse errors are returned as
/// [`ValidationResult::ParseFailure`]; this function never fails.
pub fn validate_one(schema: &SpecSchema, path: &Path) -> ValidationResult {
    let document = match CandidateDocument::read(path) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "document failed to parse");
            return ValidationResult::ParseFailure(e.to_string());
        }
    };

    let result = schema.check(&document.content);
    if let ValidationResult::Invalid(violations) = &result {
        tracing::debug!(
            path = %path.display(),
            violations = violations.len(),
            "document violates schema"
        );
    }
    result
}

//! # Reporting
//!
//! Prints the per-document report and the final banner, and keeps the
//! [`RunSummary`] that decides the exit code.
//!
//! Success lines go to the `out` stream and failure lines to the `err`
//! stream. For a real run these are stdout and stderr; tests pass byte
//! buffers instead.
//!
//! ```text
//! 🔍 Validating 2 specification(s)...
//!
//! ✅ specs/users/alice.yaml: VALID
//! ❌ specs/users/root.yaml: INVALID
//!    - /kind "admin" is not one of ["user","service"]
//!      Allowed values: user, service
//!
//! 🛑 Validation failed.
//! ```

use std::io::{self, Stderr, Stdout, Write};
use std::path::{Path, PathBuf};

use crate::schema::SpecSchema;
use crate::validate::{validate_one, ValidationResult};

/// Aggregate counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents reported.
    pub total: usize,
    /// Documents that passed.
    pub valid: usize,
    /// Documents that parsed but violated the schema.
    pub invalid: usize,
    /// Documents that could not be read or parsed.
    pub unparsable: usize,
}

impl RunSummary {
    /// Fold one result into the counts.
    pub fn record(&mut self, result: &ValidationResult) {
        self.total += 1;
        match result {
            ValidationResult::Valid => self.valid += 1,
            ValidationResult::Invalid(_) => self.invalid += 1,
            ValidationResult::ParseFailure(_) => self.unparsable += 1,
        }
    }

    /// True if any document was invalid or unparsable.
    pub fn has_errors(&self) -> bool {
        self.invalid > 0 || self.unparsable > 0
    }

    /// The run outcome implied by these counts.
    pub fn outcome(&self) -> Outcome {
        if self.has_errors() {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }
}

/// Final result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every document was valid.
    Success,
    /// At least one document was invalid or unparsable.
    Failure,
}

impl Outcome {
    /// Process exit code: `0` for success, `1` for failure.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

/// Writes the validation report and tracks the [`RunSummary`].
#[derive(Debug)]
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    base_dir: Option<PathBuf>,
    summary: RunSummary,
}

impl Reporter<Stdout, Stderr> {
    /// Reporter on the process streams, showing paths relative to the
    /// current directory.
    pub fn stdio() -> Self {
        let reporter = Self::new(io::stdout(), io::stderr());
        match std::env::current_dir() {
            Ok(cwd) => reporter.with_base_dir(cwd),
            Err(_) => reporter,
        }
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    /// Reporter over arbitrary writers. Paths are shown as given.
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            base_dir: None,
            summary: RunSummary::default(),
        }
    }

    /// Show document paths relative to `base_dir` when they lie beneath it.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Counts accumulated so far.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Recover the underlying writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn display_path(&self, path: &Path) -> String {
        self.base_dir
            .as_deref()
            .and_then(|base| path.strip_prefix(base).ok())
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// Print the opening line announcing how many documents will be checked.
    pub fn header(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "🔍 Validating {count} specification(s)...")?;
        writeln!(self.out)
    }

    /// Print the block for one document and record its result.
    pub fn report(&mut self, path: &Path, result: &ValidationResult) -> io::Result<()> {
        let shown = self.display_path(path);
        match result {
            ValidationResult::Valid => {
                writeln!(self.out, "✅ {shown}: VALID")?;
            }
            ValidationResult::Invalid(violations) => {
                writeln!(self.err, "❌ {shown}: INVALID")?;
                for violation in violations {
                    writeln!(self.err, "   - {violation}")?;
                    if let Some(allowed) = &violation.allowed_values {
                        writeln!(self.err, "     Allowed values: {}", allowed.join(", "))?;
                    }
                }
            }
            ValidationResult::ParseFailure(message) => {
                writeln!(self.err, "💥 {shown}: FAILED TO PARSE")?;
                writeln!(self.err, "   {message}")?;
            }
        }
        self.summary.record(result);
        Ok(())
    }

    /// Print the closing banner and return the run outcome.
    pub fn finish(&mut self) -> io::Result<Outcome> {
        let outcome = self.summary.outcome();
        match outcome {
            Outcome::Success => {
                writeln!(self.out)?;
                writeln!(self.out, "✨ All specifications are valid.")?;
            }
            Outcome::Failure => {
                writeln!(self.err)?;
                writeln!(self.err, "🛑 Validation failed.")?;
            }
        }
        self.out.flush()?;
        self.err.flush()?;
        Ok(outcome)
    }
}

/// Validate every path in order and report each result.
///
/// Documents are processed strictly one at a time. Per-document failures
/// are reported and counted; only write errors on the report streams are
/// returned as `Err`.
pub fn run<O: Write, E: Write>(
    schema: &SpecSchema,
    paths: &[PathBuf],
    reporter: &mut Reporter<O, E>,
) -> io::Result<Outcome> {
    reporter.header(paths.len())?;
    for path in paths {
        let result = validate_one(schema, path);
        reporter.report(path, &result)?;
    }
    let outcome = reporter.finish()?;
    let summary = reporter.summary();
    tracing::info!(
        total = summary.total,
        valid = summary.valid,
        invalid = summary.invalid,
        unparsable = summary.unparsable,
        "validation run complete"
    );
    Ok(outcome)
}

//! # idspec-cli: Identity Spec Validator CLI
//!
//! Provides the `idspec` command-line interface. The binary is a CI gate:
//! its exit code is the machine-readable result of the run.
//!
//! ```bash
//! idspec validate
//! idspec validate --schema schema/identity-spec.json --pattern 'specs/**/*.yaml'
//! idspec validate specs/users/alice.yaml
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: every document is valid (including when none were found).
//! - `1`: at least one document is invalid or unparsable.
//! - `2`: fatal startup error: configuration, schema load or glob pattern.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation logic lives in `idspec-schema`.
//! - The report format on stdout/stderr is a CI contract and must not drift.

pub mod config;
pub mod validate;

use std::path::{Path, PathBuf};

/// Exit code for errors that abort the run before any document is checked.
pub const EXIT_FATAL: u8 = 2;

/// Resolve a path that may be relative to the repository root.
///
/// Absolute paths are returned as-is. A relative path that exists under
/// `repo_root` resolves there; otherwise it is left relative to the current
/// directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Walk up from `start` to the first directory containing `schema/`.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("schema").is_dir())
        .map(Path::to_path_buf)
}

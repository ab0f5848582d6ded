//! # Document Discovery
//!
//! Expands a glob pattern (typically `specs/**/*.yaml`) into the list of
//! candidate documents. Results are sorted lexicographically so that
//! output is reproducible for a given directory snapshot.

use std::path::{Path, PathBuf};

use crate::error::DiscoveryError;

/// Expand `pattern` into a sorted, de-duplicated list of matching files.
///
/// No matches is an empty list, not an error. Entries that cannot be read
/// while walking are skipped with a warning. Directories whose names match
/// the pattern are ignored.
///
/// # Errors
///
/// Returns [`DiscoveryError::Pattern`] if the pattern is malformed.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let entries = glob::glob(pattern).map_err(|source| DiscoveryError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    path = %e.path().display(),
                    error = %e.error(),
                    "skipping unreadable path during discovery"
                );
            }
        }
    }

    paths.sort();
    paths.dedup();
    tracing::info!(pattern, count = paths.len(), "discovered candidate documents");
    Ok(paths)
}

/// Expand a pattern relative to `root`.
///
/// Absolute patterns are used unchanged. Glob metacharacters in `root`
/// itself are escaped so only `pattern` is interpreted.
pub fn discover_in(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if Path::new(pattern).is_absolute() {
        return discover(pattern);
    }
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let joined = Path::new(&escaped_root).join(pattern);
    discover(&joined.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "kind: user\n").unwrap();
    }

    #[test]
    fn no_matches_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let found = discover_in(tmp.path(), "**/*.yaml").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn recursive_matches_are_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("services/zeta.yaml"));
        touch(&tmp.path().join("users/alice.yaml"));
        touch(&tmp.path().join("beta.yaml"));
        touch(&tmp.path().join("users/notes.txt"));

        let found = discover_in(tmp.path(), "**/*.yaml").unwrap();
        let rel: Vec<PathBuf> = found
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("beta.yaml"),
                PathBuf::from("services/zeta.yaml"),
                PathBuf::from("users/alice.yaml"),
            ]
        );
    }

    #[test]
    fn yml_extension_not_matched() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("alice.yml"));
        assert!(discover_in(tmp.path(), "**/*.yaml").unwrap().is_empty());
    }

    #[test]
    fn directories_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("odd.yaml")).unwrap();
        touch(&tmp.path().join("real.yaml"));
        let found = discover_in(tmp.path(), "*.yaml").unwrap();
        assert_eq!(found, vec![tmp.path().join("real.yaml")]);
    }

    #[test]
    fn invalid_pattern_is_error() {
        let err = discover("specs/***.yaml").unwrap_err();
        assert!(matches!(err, DiscoveryError::Pattern { .. }));
    }

    #[test]
    fn absolute_pattern_ignores_root() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("a.yaml"));
        let pattern = tmp.path().join("*.yaml");
        let found = discover_in(Path::new("/nonexistent"), &pattern.to_string_lossy()).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn discovery_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["c.yaml", "a.yaml", "b/b.yaml"] {
            touch(&tmp.path().join(name));
        }
        let first = discover_in(tmp.path(), "**/*.yaml").unwrap();
        let second = discover_in(tmp.path(), "**/*.yaml").unwrap();
        assert_eq!(first, second);
    }
}

//! # Validate Subcommand
//!
//! Loads the identity-spec schema, discovers the example documents and
//! reports each one. Returns the exit code; fatal errors are returned as
//! `Err` and mapped to [`EXIT_FATAL`](crate::EXIT_FATAL) by the caller.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use idspec_schema::{discover_in, run, Reporter, SpecSchema};

use crate::config::ValidatorConfig;

/// Arguments for the `idspec validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file to validate against (overrides the config file).
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Glob selecting documents, relative to the repository root (overrides the config file).
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Validate these documents instead of the ones matched by the pattern.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns `0` when every document is valid and `1` otherwise.
pub fn run_validate(args: &ValidateArgs, config: ValidatorConfig, repo_root: &Path) -> Result<u8> {
    let config = config.with_overrides(args.schema.clone(), args.pattern.clone());

    let schema_path = config.schema_path(repo_root);
    let schema = SpecSchema::load(&schema_path).context("failed to load identity-spec schema")?;

    let paths = select_documents(args, &config, repo_root)?;

    tracing::debug!(
        schema = %schema_path.display(),
        documents = paths.len(),
        "starting validation"
    );

    let mut reporter = Reporter::stdio();
    let outcome = run(&schema, &paths, &mut reporter).context("failed to write report")?;
    Ok(outcome.exit_code())
}

/// The documents to check: explicit `PATH` arguments when given, else the
/// configured pattern. Either way the list is sorted and de-duplicated so
/// the report order does not depend on how the documents were named.
pub fn select_documents(
    args: &ValidateArgs,
    config: &ValidatorConfig,
    repo_root: &Path,
) -> Result<Vec<PathBuf>> {
    if args.paths.is_empty() {
        return discover_in(repo_root, &config.pattern).context("failed to discover documents");
    }
    let mut paths: Vec<PathBuf> = args
        .paths
        .iter()
        .map(|p| crate::resolve_path(p, repo_root))
        .collect();
    paths.sort();
    paths.dedup();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{"type": "object", "properties": {"kind": {"enum": ["user", "service"]}}}"#;

    fn repo() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("schema")).unwrap();
        std::fs::create_dir_all(tmp.path().join("specs")).unwrap();
        std::fs::write(tmp.path().join("schema/identity-spec.json"), SCHEMA).unwrap();
        tmp
    }

    fn args() -> ValidateArgs {
        ValidateArgs {
            schema: None,
            pattern: None,
            paths: Vec::new(),
        }
    }

    #[test]
    fn empty_repository_exits_zero() {
        let tmp = repo();
        let code = run_validate(&args(), ValidatorConfig::default(), tmp.path()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn invalid_document_exits_one() {
        let tmp = repo();
        std::fs::write(tmp.path().join("specs/root.yaml"), "kind: admin\n").unwrap();
        std::fs::write(tmp.path().join("specs/alice.yaml"), "kind: user\n").unwrap();
        let code = run_validate(&args(), ValidatorConfig::default(), tmp.path()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn explicit_paths_skip_discovery() {
        let tmp = repo();
        std::fs::write(tmp.path().join("specs/root.yaml"), "kind: admin\n").unwrap();
        std::fs::write(tmp.path().join("specs/alice.yaml"), "kind: user\n").unwrap();
        let mut a = args();
        a.paths = vec![PathBuf::from("specs/alice.yaml")];
        let code = run_validate(&a, ValidatorConfig::default(), tmp.path()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn pattern_override_changes_selection() {
        let tmp = repo();
        std::fs::create_dir_all(tmp.path().join("other")).unwrap();
        std::fs::write(tmp.path().join("specs/root.yaml"), "kind: admin\n").unwrap();
        std::fs::write(tmp.path().join("other/ok.yaml"), "kind: service\n").unwrap();
        let mut a = args();
        a.pattern = Some("other/*.yaml".to_string());
        let code = run_validate(&a, ValidatorConfig::default(), tmp.path()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn missing_schema_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run_validate(&args(), ValidatorConfig::default(), tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load identity-spec schema"));
    }

    #[test]
    fn explicit_paths_are_sorted_and_deduplicated() {
        let tmp = repo();
        for name in ["a.yaml", "b.yaml"] {
            std::fs::write(tmp.path().join("specs").join(name), "kind: user\n").unwrap();
        }
        let mut a = args();
        a.paths = ["specs/b.yaml", "specs/a.yaml", "specs/a.yaml"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        let paths = select_documents(&a, &ValidatorConfig::default(), tmp.path()).unwrap();
        assert_eq!(
            paths,
            vec![tmp.path().join("specs/a.yaml"), tmp.path().join("specs/b.yaml")]
        );
    }

    #[test]
    fn fatal_error_chain_prints_cause_once() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("schema/identity-spec.json");
        let cause = std::fs::read_to_string(&missing).unwrap_err().to_string();
        let err = run_validate(&args(), ValidatorConfig::default(), tmp.path()).unwrap_err();
        let rendered = format!("{err:#}");
        assert_eq!(rendered.matches(&cause).count(), 1, "{rendered}");
        assert!(rendered.contains("failed to read schema"));
    }

    #[test]
    fn malformed_pattern_is_fatal() {
        let tmp = repo();
        let mut a = args();
        a.pattern = Some("specs/***.yaml".to_string());
        let err = run_validate(&a, ValidatorConfig::default(), tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to discover documents"));
    }
}

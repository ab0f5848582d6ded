//! # Candidate Documents
//!
//! Reads one YAML file and turns it into the JSON value tree the schema
//! validator operates on. Documents are parsed one at a time and dropped
//! after validation.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::DocumentError;

/// A YAML document read from disk and converted to JSON.
#[derive(Debug, Clone)]
pub struct CandidateDocument {
    /// Where the document was read from.
    pub path: PathBuf,
    /// The parsed document tree.
    pub content: Value,
}

impl CandidateDocument {
    /// Read and parse the document at `path`.
    ///
    /// # Errors
    ///
    /// [`DocumentError::Read`] if the file cannot be read as text,
    /// [`DocumentError::Yaml`] if the text is not a single well-formed YAML
    /// document, and [`DocumentError::Conversion`] if the tree has no JSON
    /// representation.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let content = parse_yaml(&text)?;
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }
}

/// Parse YAML text into a JSON value tree.
///
/// Merge keys (`<<`) are expanded before conversion so that anchors shared
/// between identity entries validate the same way they read.
pub fn parse_yaml(text: &str) -> Result<Value, DocumentError> {
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    yaml.apply_merge()?;
    yaml_to_json_value(&yaml).map_err(DocumentError::Conversion)
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped and the tagged value converted in place. Scalar mapping
/// keys are stringified; sequence or mapping keys are rejected.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_identity_document() {
        let value = parse_yaml(
            r#"
kind: service
name: billing-worker
version: 2
enabled: true
scopes:
  - read
  - write
"#,
        )
        .unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "service",
                "name": "billing-worker",
                "version": 2,
                "enabled": true,
                "scopes": ["read", "write"]
            })
        );
    }

    #[test]
    fn empty_text_is_null() {
        assert_eq!(parse_yaml("").unwrap(), Value::Null);
    }

    #[test]
    fn tab_indentation_is_yaml_error() {
        let err = parse_yaml("kind: user\nmetadata:\n\tteam: core\n").unwrap_err();
        assert!(matches!(err, DocumentError::Yaml(_)), "got: {err:?}");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn multiple_documents_rejected() {
        let err = parse_yaml("kind: user\n---\nkind: service\n").unwrap_err();
        assert!(matches!(err, DocumentError::Yaml(_)));
    }

    #[test]
    fn merge_keys_are_applied() {
        let value = parse_yaml(
            r#"
defaults: &defaults
  kind: user
  active: true
account:
  <<: *defaults
  name: alice
"#,
        )
        .unwrap();
        assert_eq!(value["account"]["kind"], "user");
        assert_eq!(value["account"]["name"], "alice");
        assert!(value["account"].get("<<").is_none());
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let value = parse_yaml("1: one\ntrue: yes\n").unwrap();
        assert_eq!(value["1"], "one");
        assert_eq!(value["true"], "yes");
    }

    #[test]
    fn tags_are_ignored() {
        let value = parse_yaml("kind: !role user\n").unwrap();
        assert_eq!(value["kind"], "user");
    }

    #[test]
    fn non_finite_float_is_conversion_error() {
        let err = parse_yaml("ttl: .nan\n").unwrap_err();
        assert!(matches!(err, DocumentError::Conversion(_)), "got: {err:?}");
    }

    #[test]
    fn read_missing_file_is_read_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = CandidateDocument::read(tmp.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, DocumentError::Read(_)));
    }

    #[test]
    fn read_document_keeps_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("alice.yaml");
        std::fs::write(&path, "kind: user\n").unwrap();
        let doc = CandidateDocument::read(&path).unwrap();
        assert_eq!(doc.path, path);
        assert_eq!(doc.content, json!({"kind": "user"}));
    }
}

use super::{FunctionDefinition, FUNCTIONS_KEY};
use crate::error::{PruneError, PruneResult};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Read the configuration file at `path` and extract its function definitions.
///
/// Fails with [`PruneError::ConfigNotFound`] if the file cannot be read and with
/// [`PruneError::ConfigParse`] if it is not valid YAML. Entries without a usable
/// `name` are skipped with a warning.
pub async fn load_functions(path: &Path) -> PruneResult<Vec<FunctionDefinition>> {
    debug!("Loading function configuration from {}", path.display());

    let content = fs::read(path)
        .await
        .map_err(|source| PruneError::ConfigNotFound {
            path: path.to_path_buf(),
            source,
        })?;

    parse_functions(&content, path)
}

/// The part of a function entry this tool reads
#[derive(Debug, Deserialize)]
struct FunctionEntry {
    name: Option<String>,
}

/// Parse function definitions from a YAML document. `path` is only used in errors.
///
/// Bytes that are not valid UTF-8 are a parse error, like any other malformed YAML.
pub fn parse_functions(content: &[u8], path: &Path) -> PruneResult<Vec<FunctionDefinition>> {
    if content.iter().all(u8::is_ascii_whitespace) {
        warn!("Configuration {} is empty, nothing to prune", path.display());
        return Ok(Vec::new());
    }

    let document: Value =
        serde_yaml::from_slice(content).map_err(|source| PruneError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(entries) = document.get(FUNCTIONS_KEY).and_then(Value::as_mapping) else {
        warn!(
            "No '{}' mapping found in {}, nothing to prune",
            FUNCTIONS_KEY,
            path.display()
        );
        return Ok(Vec::new());
    };

    let definitions = collect_definitions(entries);
    debug!(
        "Loaded {} function definition(s) from {}",
        definitions.len(),
        path.display()
    );
    Ok(definitions)
}

fn collect_definitions(entries: &Mapping) -> Vec<FunctionDefinition> {
    let mut definitions = Vec::with_capacity(entries.len());

    for (key, entry) in entries {
        let Some(key) = key_to_string(key) else {
            warn!("Skipping function entry with unsupported key {:?}", key);
            continue;
        };

        match serde_yaml::from_value::<FunctionEntry>(entry.clone()) {
            Ok(FunctionEntry { name: Some(name) }) => {
                definitions.push(FunctionDefinition::new(key, name))
            }
            Ok(FunctionEntry { name: None }) => {
                let err = PruneError::MissingFunctionName { key };
                warn!("{}, skipping", err);
            }
            Err(e) => {
                let err = PruneError::MissingFunctionName { key };
                warn!("{} ({}), skipping", err, e);
            }
        }
    }

    definitions
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> PruneResult<Vec<FunctionDefinition>> {
        parse_functions(content.as_bytes(), Path::new("serverless.yml"))
    }

    #[test]
    fn test_parse_serverless_document() {
        let yaml = r#"
service: billing
provider:
  name: aws
  runtime: python3.12
functions:
  api:
    name: billing-prod-api
    handler: handler.api
    events:
      - http: GET /
  worker:
    name: billing-prod-worker
    memorySize: 512
"#;
        let defs = parse(yaml).unwrap();
        assert_eq!(
            defs,
            vec![
                FunctionDefinition::new("api", "billing-prod-api"),
                FunctionDefinition::new("worker", "billing-prod-worker"),
            ]
        );
    }

    #[test]
    fn test_entries_without_name_are_skipped() {
        let yaml = r#"
functions:
  api:
    handler: handler.api
  worker:
    name: billing-prod-worker
  cron:
  numeric:
    name: 42
"#;
        let defs = parse(yaml).unwrap();
        assert_eq!(
            defs,
            vec![FunctionDefinition::new("worker", "billing-prod-worker")]
        );
    }

    #[test]
    fn test_missing_functions_section_yields_nothing() {
        assert!(parse("service: billing\n").unwrap().is_empty());
        assert!(parse("").unwrap().is_empty());
        assert!(parse("functions: not-a-mapping\n").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = parse("functions:\n  api: [unclosed\n").unwrap_err();
        assert!(matches!(err, PruneError::ConfigParse { .. }));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_functions(&dir.path().join("missing.yml"))
            .await
            .unwrap_err();
        assert!(matches!(err, PruneError::ConfigNotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_non_utf8_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"functions:\n  api:\n    name: \xff\xfe\n").unwrap();

        let err = load_functions(file.path()).await.unwrap_err();
        assert!(matches!(err, PruneError::ConfigParse { .. }));
        assert!(err.user_message().contains("not valid YAML"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "functions:\n  api:\n    name: svc-api").unwrap();

        let defs = load_functions(file.path()).await.unwrap();
        assert_eq!(defs, vec![FunctionDefinition::new("api", "svc-api")]);
    }
}

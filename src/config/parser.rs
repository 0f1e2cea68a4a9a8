use std::path::Path;

use tracing::warn;

use super::schema::CONFIG_SCHEMA;
use super::types::WardenConfig;
use crate::errors::WardenError;

/// Load the config file if one was given, defaults otherwise.
pub async fn load_config(path: Option<&str>) -> Result<WardenConfig, WardenError> {
    match path {
        Some(path) => parse_config(Path::new(path)).await,
        None => Ok(WardenConfig::default()),
    }
}

pub async fn parse_config(path: &Path) -> Result<WardenConfig, WardenError> {
    if !path.exists() {
        return Err(WardenError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(WardenError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: WardenConfig = serde_yaml::from_value(yaml)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), WardenError> {
    // Convert YAML value to JSON for schema validation
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| WardenError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| WardenError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| WardenError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        // Warn but don't fail — schema validation is advisory for now
        for msg in &messages {
            warn!(validation_error = %msg, "Config schema warning");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_parse_valid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "queue:\n  batch_size: 3\nengine:\n  provider: offline\nreview:\n  default_region: eu-west-1\n"
        )
        .unwrap();

        let config = parse_config(file.path()).await.unwrap();
        assert_eq!(config.batch_size(), 3);
        assert_eq!(config.engine_provider(), "offline");
        assert_eq!(config.default_region(), "eu-west-1");
        // Unset sections fall back to defaults.
        assert_eq!(config.queue_visibility_secs(), 60);
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let result = parse_config(Path::new("/nonexistent/warden.yaml")).await;
        assert!(matches!(result, Err(WardenError::Config(_))));
    }

    #[tokio::test]
    async fn test_invalid_yaml_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "queue: [not: valid: yaml").unwrap();
        assert!(parse_config(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_load_without_path_uses_defaults() {
        let config = load_config(None).await.unwrap();
        assert_eq!(config.engine_provider(), "offline");
    }
}

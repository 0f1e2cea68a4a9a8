use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::snapshot::{ResourceSnapshot, ServiceInventory};
use super::ResourceInspector;
use crate::errors::WardenError;

/// Inspector that loads a [`ServiceInventory`] from a JSON file on disk.
/// Used by the one-shot `review` command and by tests.
pub struct FixtureInspector {
    path: PathBuf,
}

impl FixtureInspector {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

#[async_trait]
impl ResourceInspector for FixtureInspector {
    async fn snapshot(
        &self,
        account_id: &str,
        region: &str,
    ) -> Result<ResourceSnapshot, WardenError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            WardenError::Inspection(format!(
                "Could not read inventory fixture {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let services: ServiceInventory = serde_json::from_str(&content).map_err(|e| {
            WardenError::Inspection(format!(
                "Inventory fixture {} is not valid: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!(
            fixture = %self.path.display(),
            resources = services.total_resources(),
            "Loaded inventory fixture"
        );
        Ok(ResourceSnapshot::new(account_id, region, services))
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fixture_snapshot_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "storage": {{ "items": [ {{ "name": "logs", "encryption": null }} ] }},
                "database": {{ "items": [], "error": "access denied" }}
            }}"#
        )
        .unwrap();

        let inspector = FixtureInspector::new(file.path());
        let snapshot = inspector.snapshot("123456789012", "us-east-1").await.unwrap();
        assert_eq!(snapshot.account_id, "123456789012");
        assert_eq!(snapshot.services.storage.count(), 1);
        assert!(snapshot.services.storage.items[0].encryption.is_none());
        // Partial fixtures default the unlisted categories to empty reports.
        assert_eq!(snapshot.services.compute.count(), 0);
        let errors = snapshot.services.category_errors();
        assert_eq!(errors, vec![("database", "access denied")]);
    }

    #[tokio::test]
    async fn test_fixture_missing_file_is_an_error() {
        let inspector = FixtureInspector::new("/nonexistent/inventory.json");
        let result = inspector.snapshot("123456789012", "us-east-1").await;
        assert!(matches!(result, Err(WardenError::Inspection(_))));
    }
}

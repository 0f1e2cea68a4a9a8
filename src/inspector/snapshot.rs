use serde::{Deserialize, Serialize};

use crate::utils::time::now_ts;

/// Structured inventory of inspected resources for one review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub account_id: String,
    pub region: String,
    pub timestamp: String,
    pub services: ServiceInventory,
}

impl ResourceSnapshot {
    pub fn new(account_id: &str, region: &str, services: ServiceInventory) -> Self {
        Self {
            account_id: account_id.to_string(),
            region: region.to_string(),
            timestamp: now_ts(),
            services,
        }
    }
}

/// Per-category resource listings. Categories load independently; a failed
/// category keeps its error inline instead of aborting the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInventory {
    pub compute: CategoryReport<ComputeInstance>,
    pub storage: CategoryReport<StorageBucket>,
    pub database: CategoryReport<DatabaseInstance>,
    pub serverless: CategoryReport<ServerlessFunction>,
    pub identity: CategoryReport<IdentityRole>,
    pub stacks: CategoryReport<IacStack>,
}

impl ServiceInventory {
    /// The categories whose inspection failed, with their recorded errors.
    pub fn category_errors(&self) -> Vec<(&'static str, &str)> {
        let mut errors = Vec::new();
        if let Some(e) = &self.compute.error {
            errors.push(("compute", e.as_str()));
        }
        if let Some(e) = &self.storage.error {
            errors.push(("storage", e.as_str()));
        }
        if let Some(e) = &self.database.error {
            errors.push(("database", e.as_str()));
        }
        if let Some(e) = &self.serverless.error {
            errors.push(("serverless", e.as_str()));
        }
        if let Some(e) = &self.identity.error {
            errors.push(("identity", e.as_str()));
        }
        if let Some(e) = &self.stacks.error {
            errors.push(("stacks", e.as_str()));
        }
        errors
    }

    pub fn total_resources(&self) -> usize {
        self.compute.items.len()
            + self.storage.items.len()
            + self.database.items.len()
            + self.serverless.items.len()
            + self.identity.items.len()
            + self.stacks.items.len()
    }
}

/// One category's listing plus its inline inspection error, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryReport<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Default for CategoryReport<T> {
    fn default() -> Self {
        Self { items: Vec::new(), error: None }
    }
}

impl<T> CategoryReport<T> {
    pub fn loaded(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { items: Vec::new(), error: Some(error.into()) }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeInstance {
    pub instance_id: String,
    pub instance_type: String,
    pub state: String,
    #[serde(default)]
    pub security_groups: Vec<String>,
    #[serde(default)]
    pub subnet_id: Option<String>,
    #[serde(default)]
    pub vpc_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageBucket {
    pub name: String,
    /// Server-side encryption algorithm, None when encryption is disabled.
    #[serde(default)]
    pub encryption: Option<String>,
    #[serde(default)]
    pub versioning_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseInstance {
    pub identifier: String,
    pub instance_class: String,
    pub engine: String,
    #[serde(default)]
    pub storage_encrypted: bool,
    #[serde(default)]
    pub multi_az: bool,
    #[serde(default)]
    pub backup_retention_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerlessFunction {
    pub name: String,
    pub runtime: String,
    #[serde(default)]
    pub memory_mb: u32,
    #[serde(default)]
    pub timeout_secs: u32,
    #[serde(default)]
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRole {
    pub name: String,
    #[serde(default)]
    pub arn: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IacStack {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub drift_detected: Option<bool>,
}

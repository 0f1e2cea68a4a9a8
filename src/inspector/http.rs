use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::snapshot::{
    CategoryReport, ComputeInstance, DatabaseInstance, IacStack, IdentityRole, ResourceSnapshot,
    ServerlessFunction, ServiceInventory, StorageBucket,
};
use super::ResourceInspector;
use crate::errors::WardenError;

/// Inspector backed by a remote resource-inventory service.
///
/// Each category is fetched from its own endpoint so one failing category
/// degrades to an inline error instead of losing the whole snapshot.
pub struct HttpInspector {
    client: Client,
    base_url: String,
}

impl HttpInspector {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        account_id: &str,
        region: &str,
        category: &str,
    ) -> Result<Vec<T>, WardenError> {
        let url = format!(
            "{}/accounts/{}/regions/{}/{}",
            self.base_url, account_id, region, category
        );
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WardenError::Network(format!("{} inventory request failed: {}", category, e)))?;

        if !resp.status().is_success() {
            return Err(WardenError::Inspection(format!(
                "{} inventory returned {}",
                category,
                resp.status()
            )));
        }

        resp.json::<Vec<T>>()
            .await
            .map_err(|e| WardenError::Inspection(format!("{} inventory unreadable: {}", category, e)))
    }
}

fn report<T>(category: &str, result: Result<Vec<T>, WardenError>) -> CategoryReport<T> {
    match result {
        Ok(items) => {
            debug!(category, count = items.len(), "Inventory category loaded");
            CategoryReport::loaded(items)
        }
        Err(e) => {
            warn!(category, error = %e, "Inventory category failed");
            CategoryReport::failed(e.to_string())
        }
    }
}

#[async_trait]
impl ResourceInspector for HttpInspector {
    async fn snapshot(
        &self,
        account_id: &str,
        region: &str,
    ) -> Result<ResourceSnapshot, WardenError> {
        let (compute, storage, database, serverless, identity, stacks) = tokio::join!(
            self.fetch::<ComputeInstance>(account_id, region, "compute"),
            self.fetch::<StorageBucket>(account_id, region, "storage"),
            self.fetch::<DatabaseInstance>(account_id, region, "database"),
            self.fetch::<ServerlessFunction>(account_id, region, "serverless"),
            self.fetch::<IdentityRole>(account_id, region, "identity"),
            self.fetch::<IacStack>(account_id, region, "stacks"),
        );

        let services = ServiceInventory {
            compute: report("compute", compute),
            storage: report("storage", storage),
            database: report("database", database),
            serverless: report("serverless", serverless),
            identity: report("identity", identity),
            stacks: report("stacks", stacks),
        };

        Ok(ResourceSnapshot::new(account_id, region, services))
    }

    fn name(&self) -> &str {
        "http"
    }
}

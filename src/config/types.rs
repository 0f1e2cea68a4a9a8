use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WardenConfig {
    pub store: Option<StoreConfig>,
    pub queue: Option<QueueSettings>,
    pub engine: Option<EngineConfig>,
    pub inspector: Option<InspectorConfig>,
    pub review: Option<ReviewDefaults>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StoreConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct QueueSettings {
    pub visibility_timeout_secs: Option<i64>,
    pub poll_interval_secs: Option<u64>,
    pub batch_size: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EngineConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InspectorConfig {
    pub mode: Option<InspectorMode>,
    pub base_url: Option<String>,
    pub fixture_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InspectorMode {
    Http,
    #[default]
    Fixture,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReviewDefaults {
    pub default_region: Option<String>,
}

impl WardenConfig {
    pub fn store_path(&self) -> String {
        self.store
            .as_ref()
            .and_then(|s| s.path.clone())
            .unwrap_or_else(|| "./data/warden.db".to_string())
    }

    pub fn queue_visibility_secs(&self) -> i64 {
        self.queue
            .as_ref()
            .and_then(|q| q.visibility_timeout_secs)
            .unwrap_or(60)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(
            self.queue
                .as_ref()
                .and_then(|q| q.poll_interval_secs)
                .unwrap_or(5),
        )
    }

    pub fn batch_size(&self) -> usize {
        self.queue.as_ref().and_then(|q| q.batch_size).unwrap_or(10)
    }

    pub fn default_region(&self) -> String {
        self.review
            .as_ref()
            .and_then(|r| r.default_region.clone())
            .unwrap_or_else(|| "us-east-1".to_string())
    }

    pub fn engine_provider(&self) -> String {
        self.engine
            .as_ref()
            .and_then(|e| e.provider.clone())
            .unwrap_or_else(|| "offline".to_string())
    }

    pub fn engine_model(&self) -> Option<String> {
        self.engine.as_ref().and_then(|e| e.model.clone())
    }

    pub fn engine_base_url(&self) -> Option<String> {
        self.engine.as_ref().and_then(|e| e.base_url.clone())
    }

    /// Config value first, then the conventional environment variable.
    pub fn engine_api_key(&self) -> String {
        self.engine
            .as_ref()
            .and_then(|e| e.api_key.clone())
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .unwrap_or_default()
    }

    pub fn inspector_mode(&self) -> InspectorMode {
        self.inspector
            .as_ref()
            .and_then(|i| i.mode)
            .unwrap_or_default()
    }

    pub fn inspector_base_url(&self) -> Option<String> {
        self.inspector.as_ref().and_then(|i| i.base_url.clone())
    }

    pub fn inspector_fixture_path(&self) -> String {
        self.inspector
            .as_ref()
            .and_then(|i| i.fixture_path.clone())
            .unwrap_or_else(|| "./fixtures/inventory.json".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WardenConfig::default();
        assert_eq!(config.queue_visibility_secs(), 60);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.batch_size(), 10);
        assert_eq!(config.default_region(), "us-east-1");
        assert_eq!(config.engine_provider(), "offline");
        assert_eq!(config.inspector_mode(), InspectorMode::Fixture);
    }
}

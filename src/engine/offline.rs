use async_trait::async_trait;
use tracing::debug;

use super::provider::RecommendationEngine;
use crate::errors::WardenError;

/// Stand-in engine for setups without a reasoning backend. Returns an empty
/// assessment, which the parser degrades to rule-only results with the
/// neutral default score.
pub struct OfflineEngine;

#[async_trait]
impl RecommendationEngine for OfflineEngine {
    async fn assess(&self, _prompt: &str, _system: Option<&str>) -> Result<String, WardenError> {
        debug!("Offline engine consulted, returning empty assessment");
        Ok(String::new())
    }

    fn provider_name(&self) -> &str {
        "offline"
    }

    fn model_name(&self) -> &str {
        "none"
    }
}

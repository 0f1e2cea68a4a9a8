pub mod anthropic;
pub mod local;
pub mod offline;
pub mod parser;
pub mod provider;

pub use parser::{parse_assessment, AnalysisPayload, EngineOutput, DEFAULT_SCORE};
pub use provider::RecommendationEngine;

use std::sync::Arc;

use crate::errors::WardenError;

/// Build a recommendation engine from configuration.
pub fn create_engine(
    provider: &str,
    api_key: &str,
    model: Option<&str>,
    base_url: Option<&str>,
) -> Result<Arc<dyn RecommendationEngine>, WardenError> {
    match provider {
        "anthropic" => {
            let mut engine = anthropic::AnthropicEngine::new(api_key, model);
            if let Some(url) = base_url {
                engine = engine.with_base_url(url);
            }
            Ok(Arc::new(engine))
        }
        "local" => Ok(Arc::new(local::LocalEngine::new(base_url, model, api_key))),
        "offline" => Ok(Arc::new(offline::OfflineEngine)),
        other => Err(WardenError::Config(format!(
            "Unknown engine provider: {}",
            other
        ))),
    }
}

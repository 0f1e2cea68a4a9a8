use async_trait::async_trait;

use crate::errors::WardenError;

/// The reasoning step of the analysis pipeline.
///
/// Returns free-form text; callers parse it defensively with
/// [`super::parse_assessment`] and must tolerate any shape.
#[async_trait]
pub trait RecommendationEngine: Send + Sync {
    async fn assess(&self, prompt: &str, system: Option<&str>) -> Result<String, WardenError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}

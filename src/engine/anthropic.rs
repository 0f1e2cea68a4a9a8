use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::provider::RecommendationEngine;
use crate::errors::WardenError;

pub struct AnthropicEngine {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicEngine {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("claude-sonnet-4-5-20250929").to_string(),
            base_url: "https://api.anthropic.com".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl RecommendationEngine for AnthropicEngine {
    async fn assess(&self, prompt: &str, system: Option<&str>) -> Result<String, WardenError> {
        let mut body = json!({
            "model": self.model,
            "max_tokens": 4096,
            "messages": [{"role": "user", "content": prompt}]
        });

        if let Some(sys) = system {
            body["system"] = json!(sys);
        }

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| WardenError::Network(format!("Anthropic API request failed: {}", e)))?;

        let status = resp.status();
        if status == 429 {
            return Err(WardenError::RateLimit("Anthropic rate limit exceeded".into()));
        }
        if status == 401 {
            return Err(WardenError::Authentication("Invalid Anthropic API key".into()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| WardenError::EngineApi(format!("Failed to parse Anthropic response: {}", e)))?;

        if let Some(error) = data.get("error") {
            let msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(WardenError::EngineApi(msg.to_string()));
        }

        let content = data["content"][0]["text"]
            .as_str()
            .ok_or_else(|| WardenError::EngineApi("No content in Anthropic response".into()))?
            .to_string();

        debug!(
            model = %self.model,
            input_tokens = data["usage"]["input_tokens"].as_u64(),
            output_tokens = data["usage"]["output_tokens"].as_u64(),
            "Engine completion"
        );

        Ok(content)
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::RecommendationEngine;
use crate::errors::WardenError;

/// OpenAI-compatible endpoint (Ollama, vLLM, ...) for air-gapped setups.
pub struct LocalEngine {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl LocalEngine {
    pub fn new(base_url: Option<&str>, model: Option<&str>, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.unwrap_or("http://localhost:11434/v1").to_string(),
            model: model.unwrap_or("qwen2.5-coder:1.5b").to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl RecommendationEngine for LocalEngine {
    async fn assess(&self, prompt: &str, system: Option<&str>) -> Result<String, WardenError> {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(json!({"role": "system", "content": sys}));
        }
        messages.push(json!({"role": "user", "content": prompt}));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": 4096,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| WardenError::Network(format!("Local engine request failed: {}", e)))?;

        let data: Value = resp
            .json()
            .await
            .map_err(|e| WardenError::EngineApi(format!("Parse error: {}", e)))?;

        let content = data["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();

        Ok(content)
    }

    fn provider_name(&self) -> &str {
        "local"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// file: src/llm/client.rs
// description: chat completions client for OpenAI and Azure OpenAI deployments
// reference: https://learn.microsoft.com/azure/ai-services/openai/reference

use crate::config::{ModelConfig, ModelProvider};
use crate::error::{AgentError, Result};
use crate::llm::types::{ChatMessage, ChatRequest, ChatResponse, ToolSpec};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    provider: ModelProvider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    temperature: Option<f32>,
}

impl ChatClient {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let base = config.base_url.trim_end_matches('/');
        let endpoint = match config.provider {
            ModelProvider::OpenAi => format!("{}/chat/completions", base),
            ModelProvider::Azure => format!(
                "{}/chat/completions?api-version={}",
                base,
                config.azure_api_version.as_deref().unwrap_or_default()
            ),
        };

        Ok(Self {
            client,
            provider: config.provider,
            model: config.name.clone(),
            endpoint,
            api_key: config.resolved_api_key(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one completion round and returns the assistant message of the first choice.
    pub async fn complete(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ChatMessage> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            tools,
            temperature: self.temperature,
        };

        debug!(
            "Requesting completion from {} ({} messages, {} tools)",
            self.model,
            messages.len(),
            tools.len()
        );

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request);

        if let Some(api_key) = &self.api_key {
            builder = match self.provider {
                ModelProvider::OpenAi => builder.header("Authorization", format!("Bearer {}", api_key)),
                ModelProvider::Azure => builder.header("api-key", api_key),
            };
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AgentError::Model(format!("Failed to send completion request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Model(format!(
                "Completion request failed with status {}: {}",
                status, error_text
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Model(format!("Failed to parse completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| AgentError::Model("No choices returned from model".to_string()))
    }
}

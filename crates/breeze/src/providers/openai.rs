use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};

use super::base::{Provider, Usage};
use super::configs::OpenAiProviderConfig;
use super::utils::{
    check_openai_context_length_error, messages_to_openai_spec, openai_response_to_message,
    tools_to_openai_spec, ChatCompletionResponse,
};
use crate::models::message::Message;
use crate::models::tool::Tool;

/// Lets the model decide on its own whether to request a tool call
const TOOL_CHOICE_AUTO: &str = "auto";

/// Client for any endpoint that implements the openai chat completions API,
/// such as OpenAI itself or OpenRouter.
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self { client, config })
    }

    fn build_payload(&self, messages: &[Message], tools: &[Tool]) -> Result<Value> {
        let tools_spec = tools_to_openai_spec(tools)?;

        let mut payload = Map::new();
        payload.insert("model".to_string(), json!(self.config.model));
        payload.insert(
            "messages".to_string(),
            json!(messages_to_openai_spec(messages)),
        );

        // Add optional parameters
        if !tools_spec.is_empty() {
            payload.insert("tools".to_string(), json!(tools_spec));
            payload.insert("tool_choice".to_string(), json!(TOOL_CHOICE_AUTO));
        }
        if let Some(temp) = self.config.temperature {
            payload.insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = self.config.max_tokens {
            payload.insert("max_tokens".to_string(), json!(tokens));
        }

        Ok(Value::Object(payload))
    }

    async fn post(&self, payload: Value) -> Result<ChatCompletionResponse> {
        let url = format!(
            "{}/chat/completions",
            self.config.host.trim_end_matches('/')
        );
        tracing::debug!(%url, model = %self.config.model, "requesting completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() => {
                Err(anyhow!("Server error: {}", status))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(anyhow!("Request failed: {}\nBody: {}", status, body))
            }
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> Result<(Message, Usage)> {
        let payload = self.build_payload(messages, tools)?;

        let response = self.post(payload).await?;

        // Some compatible endpoints report failures inside a 200 response
        if let Some(error) = &response.error {
            if let Some(err) = check_openai_context_length_error(error) {
                return Err(err.into());
            }
            return Err(anyhow!("Completion API error: {}", error));
        }

        let message = openai_response_to_message(&response)?;
        let usage = response.usage.as_ref().map(Usage::from).unwrap_or_default();
        tracing::debug!(?usage, "completion finished");

        Ok((message, usage))
    }
}

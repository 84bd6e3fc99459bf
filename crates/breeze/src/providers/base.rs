use anyhow::Result;
use async_trait::async_trait;

use crate::models::message::Message;
use crate::models::tool::Tool;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for completion providers
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate the next message for the conversation, offering the given tools.
    /// An empty tool list means the model must answer in text.
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> Result<(Message, Usage)>;
}

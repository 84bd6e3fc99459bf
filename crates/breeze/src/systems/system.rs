use async_trait::async_trait;

use crate::errors::{AgentError, AgentResult};
use crate::models::tool::{Tool, ToolCall};

/// Core trait that defines a set of local tools the agent can offer to a model
#[async_trait]
pub trait System: Send + Sync {
    /// Get the name of the system, used when logging dispatched calls
    fn name(&self) -> &str;

    /// Get available tools
    fn tools(&self) -> &[Tool];

    /// Call a tool with the given arguments. Implementations can assume the
    /// call was checked with `validate` first.
    async fn call(&self, tool_call: ToolCall) -> AgentResult<String>;

    /// Check that the call names one of our tools and carries every required argument.
    /// Nothing beyond the presence of required keys is checked.
    fn validate(&self, tool_call: &ToolCall) -> AgentResult<()> {
        let tool = self
            .tools()
            .iter()
            .find(|tool| tool.name == tool_call.name)
            .ok_or_else(|| AgentError::ToolNotFound(tool_call.name.clone()))?;

        let missing = tool.missing_arguments(&tool_call.arguments);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AgentError::InvalidParameters(format!(
                "{} is missing required arguments: {}",
                tool.name,
                missing.join(", ")
            )))
        }
    }
}

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::errors::{AgentError, AgentResult};
use crate::models::message::{Message, MessageContent};
use crate::models::tool::{Tool, ToolCall};
use crate::providers::base::Provider;
use crate::responder::{Reply, Responder};
use crate::systems::System;

/// Agent integrates a completion provider with the systems whose tools it may call.
///
/// A reply takes at most two completions: the question with the tools on offer, then,
/// if the model asked for a tool, the tool result without tools on offer.
pub struct Agent {
    systems: Vec<Box<dyn System>>,
    provider: Box<dyn Provider>,
}

impl Agent {
    /// Create a new Agent with the specified provider
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            systems: Vec::new(),
            provider,
        }
    }

    /// Add a system to the agent
    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.systems.push(system);
    }

    /// Get all tools from all systems
    fn tools(&self) -> Vec<Tool> {
        self.systems
            .iter()
            .flat_map(|system| system.tools().iter().cloned())
            .collect()
    }

    /// Find the system that offers the named tool
    fn get_system_for_tool(&self, name: &str) -> Option<&dyn System> {
        self.systems
            .iter()
            .find(|system| system.tools().iter().any(|tool| tool.name == name))
            .map(|system| &**system)
    }

    /// Dispatch a single tool call to the appropriate system
    async fn dispatch_tool_call(&self, tool_call: AgentResult<ToolCall>) -> AgentResult<String> {
        let call = tool_call?;
        let system = self
            .get_system_for_tool(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;

        system.validate(&call)?;
        tracing::info!(
            system = system.name(),
            tool = %call.name,
            arguments = %call.arguments,
            "dispatching tool call"
        );
        system.call(call).await
    }

    /// Answer one question, returning the reply text and the messages produced on the way
    pub async fn reply(&self, question: &str) -> Result<Reply> {
        let user_message = Message::user().with_text(question);
        let tools = self.tools();

        let (response, _) = self
            .provider
            .complete(std::slice::from_ref(&user_message), &tools)
            .await?;

        let requested = response.tool_requests().len();
        let Some(request) = response.tool_requests().first().map(|&request| request.clone())
        else {
            let text = response
                .text()
                .ok_or_else(|| anyhow!("Completion contained neither text nor a tool call"))?;
            return Ok(Reply::new(text, vec![response]));
        };

        if requested > 1 {
            tracing::warn!(
                dropped = requested - 1,
                "model requested several tool calls, only the first is used"
            );
        }

        let output = self.dispatch_tool_call(request.tool_call.clone()).await?;

        // Only the honored request goes back, every tool call in the history needs a result
        let mut tool_use = Message::assistant();
        if let Some(text) = response.text().filter(|text| !text.is_empty()) {
            tool_use = tool_use.with_text(text);
        }
        let tool_use = tool_use.with_content(MessageContent::ToolRequest(request.clone()));
        let tool_result = Message::user().with_tool_response(request.id, Ok(output));

        let messages = vec![user_message, tool_use.clone(), tool_result.clone()];
        let (final_response, _) = self.provider.complete(&messages, &[]).await?;

        if !final_response.tool_requests().is_empty() {
            return Err(anyhow!(
                "Model requested another tool call after receiving a tool result, only one round of tool use is supported"
            ));
        }

        let text = final_response
            .text()
            .ok_or_else(|| anyhow!("Completion after the tool result contained no text"))?;

        Ok(Reply::new(text, vec![tool_use, tool_result, final_response]))
    }
}

#[async_trait]
impl Responder for Agent {
    async fn respond(&self, question: &str) -> Result<Reply> {
        self.reply(question).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;
    use crate::providers::mock::MockProvider;
    use crate::providers::utils::messages_to_openai_spec;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Offers a `get_weather` tool and records every call it receives
    #[derive(Clone)]
    struct RecordingSystem {
        tools: Vec<Tool>,
        calls: Arc<Mutex<Vec<ToolCall>>>,
        output: String,
    }

    impl RecordingSystem {
        fn new(output: &str) -> Self {
            Self {
                tools: vec![Tool::new(
                    "get_weather",
                    "Get current weather of a city",
                    json!({
                        "type": "object",
                        "properties": {"city": {"type": "string"}},
                        "required": ["city"]
                    }),
                )],
                calls: Arc::new(Mutex::new(Vec::new())),
                output: output.to_string(),
            }
        }

        fn calls(&self) -> Vec<ToolCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl System for RecordingSystem {
        fn name(&self) -> &str {
            "recording"
        }

        fn tools(&self) -> &[Tool] {
            &self.tools
        }

        async fn call(&self, tool_call: ToolCall) -> AgentResult<String> {
            self.calls.lock().unwrap().push(tool_call);
            Ok(self.output.clone())
        }
    }

    fn weather_request(id: &str, city: &str) -> MessageContent {
        MessageContent::tool_request(id, Ok(ToolCall::new("get_weather", json!({"city": city}))))
    }

    fn setup(responses: Vec<Message>) -> (Agent, MockProvider, RecordingSystem) {
        let provider = MockProvider::new(responses);
        let system = RecordingSystem::new("31.5°C, clear sky");
        let mut agent = Agent::new(Box::new(provider.clone()));
        agent.add_system(Box::new(system.clone()));
        (agent, provider, system)
    }

    #[tokio::test]
    async fn test_reply_without_tool_call_passes_content_through() -> Result<()> {
        let (agent, provider, system) =
            setup(vec![Message::assistant().with_text("Hello! Ask me about the weather.")]);

        let reply = agent.reply("hi").await?;

        assert_eq!(reply.text, "Hello! Ask me about the weather.");
        assert_eq!(reply.exchange.len(), 1);
        assert!(system.calls().is_empty());

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages.len(), 1);
        assert_eq!(calls[0].messages[0].text(), Some("hi".to_string()));
        assert_eq!(calls[0].tools.len(), 1);
        assert_eq!(calls[0].tools[0].name, "get_weather");
        Ok(())
    }

    #[tokio::test]
    async fn test_reply_with_weather_tool_call() -> Result<()> {
        let (agent, provider, system) = setup(vec![
            Message::assistant().with_content(weather_request("call_abc", "Surat")),
            Message::assistant().with_text("It is 31.5°C with clear sky in Surat."),
        ]);

        let reply = agent.reply("What is weather in Surat?").await?;

        assert_eq!(reply.text, "It is 31.5°C with clear sky in Surat.");
        assert_eq!(
            system.calls(),
            vec![ToolCall::new("get_weather", json!({"city": "Surat"}))]
        );

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);

        let follow_up = &calls[1];
        assert!(follow_up.tools.is_empty());
        assert_eq!(follow_up.messages.len(), 3);
        assert_eq!(follow_up.messages[0].role, Role::User);
        assert_eq!(follow_up.messages[1].role, Role::Assistant);

        assert_eq!(
            follow_up.messages[2].content,
            vec![MessageContent::tool_response(
                "call_abc",
                Ok("31.5°C, clear sky".to_string())
            )]
        );

        let spec = messages_to_openai_spec(&follow_up.messages);
        assert_eq!(spec[2]["role"], "tool");
        assert_eq!(spec[2]["tool_call_id"], "call_abc");
        assert_eq!(spec[1]["tool_calls"][0]["id"], "call_abc");

        assert_eq!(reply.exchange.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_reply_only_dispatches_first_tool_call() -> Result<()> {
        let (agent, provider, system) = setup(vec![
            Message::assistant()
                .with_content(weather_request("call_1", "Surat"))
                .with_content(weather_request("call_2", "Pune")),
            Message::assistant().with_text("Surat is sunny."),
        ]);

        let reply = agent.reply("Weather in Surat and Pune?").await?;

        assert_eq!(reply.text, "Surat is sunny.");
        assert_eq!(
            system.calls(),
            vec![ToolCall::new("get_weather", json!({"city": "Surat"}))]
        );

        let follow_up = &provider.calls()[1];
        let requests = follow_up.messages[1].tool_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id, "call_1");
        Ok(())
    }

    #[tokio::test]
    async fn test_reply_keeps_assistant_text_with_tool_call() -> Result<()> {
        let (agent, provider, _) = setup(vec![
            Message::assistant()
                .with_text("Let me check.")
                .with_content(weather_request("call_1", "Surat")),
            Message::assistant().with_text("Sunny."),
        ]);

        agent.reply("Weather in Surat?").await?;

        let follow_up = &provider.calls()[1];
        assert_eq!(
            follow_up.messages[1].text(),
            Some("Let me check.".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_reply_rejects_second_round_of_tools() {
        let (agent, provider, system) = setup(vec![
            Message::assistant().with_content(weather_request("call_1", "Surat")),
            Message::assistant().with_content(weather_request("call_2", "Pune")),
        ]);

        let err = agent.reply("Weather in Surat?").await.unwrap_err();

        assert!(err.to_string().contains("only one round of tool use"));
        assert_eq!(system.calls().len(), 1);
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_reply_unknown_tool() {
        let (agent, provider, _) = setup(vec![Message::assistant().with_tool_request(
            "call_1",
            Ok(ToolCall::new("get_time", json!({}))),
        )]);

        let err = agent.reply("What time is it?").await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<AgentError>(),
            Some(&AgentError::ToolNotFound("get_time".to_string()))
        );
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_reply_missing_required_argument() {
        let (agent, _, system) = setup(vec![Message::assistant().with_tool_request(
            "call_1",
            Ok(ToolCall::new("get_weather", json!({"town": "Surat"}))),
        )]);

        let err = agent.reply("Weather?").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AgentError>(),
            Some(AgentError::InvalidParameters(_))
        ));
        assert!(system.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reply_errored_tool_request() {
        let (agent, _, system) = setup(vec![Message::assistant().with_tool_request(
            "call_1",
            Err(AgentError::InvalidParameters("bad json".to_string())),
        )]);

        assert!(agent.reply("Weather in Surat?").await.is_err());
        assert!(system.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reply_without_text_or_tool_call() {
        let (agent, _, _) = setup(vec![Message::assistant()]);

        assert!(agent.reply("hello").await.is_err());
    }

    #[tokio::test]
    async fn test_respond_uses_reply() -> Result<()> {
        let (agent, _, _) = setup(vec![Message::assistant().with_text("Hi there")]);
        let responder: Box<dyn Responder> = Box::new(agent);

        assert_eq!(responder.respond("hello").await?.text, "Hi there");
        Ok(())
    }
}

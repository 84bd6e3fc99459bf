use async_trait::async_trait;
use serde_json::json;

use super::System;
use crate::errors::{AgentError, AgentResult};
use crate::models::tool::{Tool, ToolCall};
use crate::weather::WeatherClient;

pub const GET_WEATHER: &str = "get_weather";

/// Tool result handed back to the model when the provider does not know the city
pub const CITY_NOT_FOUND: &str = "City not found";

/// Offers the `get_weather` tool backed by a [`WeatherClient`]
pub struct WeatherSystem {
    tools: Vec<Tool>,
    client: WeatherClient,
}

impl WeatherSystem {
    pub fn new(client: WeatherClient) -> Self {
        let get_weather = Tool::new(
            GET_WEATHER,
            "Get current weather of a city",
            json!({
                "type": "object",
                "properties": {
                    "city": {"type": "string"}
                },
                "required": ["city"]
            }),
        );

        Self {
            tools: vec![get_weather],
            client,
        }
    }

    async fn get_weather(&self, arguments: serde_json::Value) -> AgentResult<String> {
        let city = arguments
            .get("city")
            .and_then(|value| value.as_str())
            .ok_or_else(|| AgentError::InvalidParameters("city must be a string".to_string()))?;

        let weather = self
            .client
            .current(city)
            .await
            .map_err(|e| AgentError::ExecutionError(e.to_string()))?;

        Ok(weather.unwrap_or_else(|| CITY_NOT_FOUND.to_string()))
    }
}

#[async_trait]
impl System for WeatherSystem {
    fn name(&self) -> &str {
        "weather"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> AgentResult<String> {
        match tool_call.name.as_str() {
            GET_WEATHER => self.get_weather(tool_call.arguments).await,
            _ => Err(AgentError::ToolNotFound(tool_call.name)),
        }
    }
}

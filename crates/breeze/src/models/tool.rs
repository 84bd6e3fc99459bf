use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool that can be used by a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// A JSON Schema object describing the arguments the tool accepts
    pub input_schema: Value,
}

impl Tool {
    /// Create a new tool with the given name and description
    pub fn new<N, D>(name: N, description: D, input_schema: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Names listed under `required` in the input schema
    pub fn required_arguments(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|required| required.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Required arguments that are absent from `arguments`
    pub fn missing_arguments(&self, arguments: &Value) -> Vec<String> {
        self.required_arguments()
            .into_iter()
            .filter(|name| arguments.get(name).is_none())
            .map(String::from)
            .collect()
    }
}

/// A tool call request that a system can execute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// The name of the tool to execute
    pub name: String,
    /// The arguments for the execution
    pub arguments: Value,
}

impl ToolCall {
    /// Create a new ToolCall with the given name and arguments
    pub fn new<S: Into<String>>(name: S, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_tool() -> Tool {
        Tool::new(
            "get_weather",
            "Get current weather of a city",
            json!({
                "type": "object",
                "properties": {"city": {"type": "string"}},
                "required": ["city"]
            }),
        )
    }

    #[test]
    fn test_required_arguments() {
        assert_eq!(weather_tool().required_arguments(), vec!["city"]);

        let no_required = Tool::new("noop", "Does nothing", json!({"type": "object"}));
        assert!(no_required.required_arguments().is_empty());
    }

    #[test]
    fn test_missing_arguments() {
        let tool = weather_tool();
        assert!(tool.missing_arguments(&json!({"city": "Surat"})).is_empty());
        assert_eq!(tool.missing_arguments(&json!({"town": "Surat"})), vec!["city"]);
        assert_eq!(tool.missing_arguments(&json!(null)), vec!["city"]);
    }
}

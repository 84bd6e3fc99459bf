pub const OPENAI_COMPATIBLE_HOST: &str = "https://openrouter.ai/api/v1";
pub const OPENAI_COMPATIBLE_MODEL: &str = "openai/gpt-4o-mini";

/// Settings for any endpoint that speaks the openai chat completions protocol.
/// `host` includes the version prefix, e.g. `https://api.openai.com/v1`.
#[derive(Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl OpenAiProviderConfig {
    pub fn new<K: Into<String>>(api_key: K) -> Self {
        Self {
            host: OPENAI_COMPATIBLE_HOST.to_string(),
            api_key: api_key.into(),
            model: OPENAI_COMPATIBLE_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

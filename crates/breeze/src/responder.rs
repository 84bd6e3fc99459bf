use anyhow::Result;
use async_trait::async_trait;

use crate::agent::Agent;
use crate::configuration::{AgentSettings, Strategy};
use crate::keyword::KeywordDispatcher;
use crate::models::message::Message;
use crate::providers::openai::OpenAiProvider;
use crate::systems::WeatherSystem;
use crate::weather::WeatherClient;

/// The answer to one question
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Text to show the user
    pub text: String,
    /// Messages produced while answering, ending with the final assistant message.
    /// Front ends use them to show tool activity.
    pub exchange: Vec<Message>,
}

impl Reply {
    pub fn new<S: Into<String>>(text: S, exchange: Vec<Message>) -> Self {
        Self {
            text: text.into(),
            exchange,
        }
    }
}

/// Turns a single question into a reply. Shared by every front end.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, question: &str) -> Result<Reply>;
}

/// Build the responder for the configured strategy
pub fn get_responder(settings: AgentSettings) -> Result<Box<dyn Responder>> {
    let weather = WeatherClient::new(settings.weather.into_config()?)?;

    match settings.strategy {
        Strategy::Model => {
            let provider = OpenAiProvider::new(settings.provider.into_config()?)?;
            let mut agent = Agent::new(Box::new(provider));
            agent.add_system(Box::new(WeatherSystem::new(weather)));
            Ok(Box::new(agent))
        }
        Strategy::Keyword => Ok(Box::new(KeywordDispatcher::new(weather))),
    }
}

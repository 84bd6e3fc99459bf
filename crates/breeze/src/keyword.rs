//! Answers weather questions without a language model.
//!
//! A question qualifies when it mentions "weather"; the city is whatever follows the
//! last "in". Anything else gets a canned refusal. Prefer the model backed [`Agent`]
//! which understands far more phrasings; this exists for setups without a completion key.
//!
//! [`Agent`]: crate::agent::Agent

use anyhow::Result;
use async_trait::async_trait;

use crate::models::message::Message;
use crate::responder::{Reply, Responder};
use crate::weather::WeatherClient;

pub const CANNOT_HANDLE: &str = "Sorry, I cannot handle this request.";
pub const CITY_NOT_FOUND: &str = "City not found.";

pub struct KeywordDispatcher {
    weather: WeatherClient,
}

impl KeywordDispatcher {
    pub fn new(weather: WeatherClient) -> Self {
        Self { weather }
    }

    pub async fn reply(&self, question: &str) -> Result<String> {
        let Some(city) = extract_city(question) else {
            return Ok(CANNOT_HANDLE.to_string());
        };

        tracing::debug!(%city, "keyword match");
        let reply = match self.weather.current(&city).await? {
            Some(weather) => format!("The weather in {} is {}.", title_case(&city), weather),
            None => CITY_NOT_FOUND.to_string(),
        };

        Ok(reply)
    }
}

#[async_trait]
impl Responder for KeywordDispatcher {
    async fn respond(&self, question: &str) -> Result<Reply> {
        let text = self.reply(question).await?;
        let message = Message::assistant().with_text(text.clone());
        Ok(Reply::new(text, vec![message]))
    }
}

/// The lowercased city for a weather question, or None when the question is not about weather.
///
/// "in" is matched as a substring, so a city containing it ("berlin") loses its head.
pub fn extract_city(question: &str) -> Option<String> {
    let question = question.to_lowercase();
    if !question.contains("weather") {
        return None;
    }

    let tail = question.rsplit("in").next().unwrap_or_default();
    Some(tail.replace('?', "").trim().to_string())
}

/// Uppercase the first letter of every run of letters, lowercase the rest
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }

    result
}

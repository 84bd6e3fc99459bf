//! Current conditions from an OpenWeatherMap compatible endpoint.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Number, Value};

pub const OPENWEATHER_HOST: &str = "https://api.openweathermap.org/data/2.5";

/// The provider's `cod` value for a successful lookup
const COD_OK: f64 = 200.0;

#[derive(Clone)]
pub struct WeatherConfig {
    /// Base url including the api version, e.g. `https://api.openweathermap.org/data/2.5`
    pub host: String,
    pub api_key: String,
}

impl WeatherConfig {
    pub fn new<K: Into<String>>(api_key: K) -> Self {
        Self {
            host: OPENWEATHER_HOST.to_string(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    // Kept as a Number so it prints exactly as the provider sent it
    temp: Number,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

pub struct WeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self { client, config })
    }

    /// Look up the current weather for `city` in metric units.
    ///
    /// Returns `Some("<temp>°C, <description>")`, or `None` when the provider does not
    /// report success for the city. Transport failures and malformed bodies are errors.
    pub async fn current(&self, city: &str) -> Result<Option<String>> {
        let url = format!("{}/weather", self.config.host.trim_end_matches('/'));
        tracing::debug!(%url, city, "looking up weather");

        // The status code is not checked, the body's `cod` decides the outcome
        let body: Value = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?
            .json()
            .await?;

        if body.get("cod").and_then(Value::as_f64) != Some(COD_OK) {
            tracing::debug!(city, cod = ?body.get("cod"), "city not found");
            return Ok(None);
        }

        let current: CurrentWeather = serde_json::from_value(body)?;
        let condition = current
            .weather
            .first()
            .ok_or_else(|| anyhow::anyhow!("Weather response had no conditions"))?;

        Ok(Some(format!(
            "{}°C, {}",
            current.main.temp, condition.description
        )))
    }
}

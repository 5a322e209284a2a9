use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{config::WeatherConfig, error::LookupError, model::WeatherReport};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, config: &WeatherConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            http,
        })
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReport, LookupError> {
        let request_failed = |e: reqwest::Error| LookupError::Request {
            city: city.to_string(),
            // The URL carries the API key.
            reason: e.without_url().to_string(),
        };

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(request_failed)?;

        let status = res.status();
        let body = res.text().await.map_err(request_failed)?;

        if !status.is_success() {
            warn!(
                %status,
                body = %truncate_body(&body),
                "OpenWeather current request failed"
            );
            return Err(LookupError::Status {
                city: city.to_string(),
                status,
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse OpenWeather current JSON");
            if e.is_syntax() || e.is_eof() {
                // Not JSON at all: the request itself went wrong.
                LookupError::Request {
                    city: city.to_string(),
                    reason: format!("invalid JSON body: {e}"),
                }
            } else {
                LookupError::Data(e.to_string())
            }
        })?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| {
                warn!("OpenWeather response contained no weather conditions");
                LookupError::Data("empty `weather` list".to_string())
            })?;

        Ok(WeatherReport {
            city_name: parsed.name,
            description,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, LookupError> {
        let result = self.fetch_current(city).await;

        match &result {
            Ok(report) => debug!(city = %report.city_name, "Fetched current weather"),
            Err(e) => warn!(error = %e, "Weather lookup failed"),
        }

        result
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

//! Turns a recognised intent into the text the agent speaks back.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    config::{DetailsMode, WebhookConfig},
    intent::{Intent, ParameterNames},
    model::WeatherReport,
    provider::WeatherProvider,
    webhook::{WebhookRequest, WebhookResponse},
};

pub const ASK_CITY: &str = "Which city are you asking about?";
pub const ASK_CITY_AND_DETAILS: &str = "Could you please specify both the city and the weather details you are interested in (like humidity or wind)?";
pub const NO_MATCHING_DETAILS: &str = "Sorry, I couldn't retrieve the requested weather details.";
pub const DETAILS_UNAVAILABLE: &str = "Sorry, detailed weather information isn't available yet.";
pub const NOT_UNDERSTOOD: &str = "Sorry, I didn't understand what you meant. Could you rephrase?";

/// Dispatches intents to the weather provider and formats the reply.
#[derive(Debug, Clone)]
pub struct FulfillmentService {
    provider: Arc<dyn WeatherProvider>,
    names: ParameterNames,
    details_mode: DetailsMode,
}

impl FulfillmentService {
    pub fn new(provider: Arc<dyn WeatherProvider>, config: &WebhookConfig) -> Self {
        Self {
            provider,
            names: ParameterNames::from(config),
            details_mode: config.details_mode,
        }
    }

    /// Parse the envelope's intent and fulfill it.
    pub async fn handle(&self, request: &WebhookRequest) -> WebhookResponse {
        let intent = Intent::from_query(&request.query_result, &self.names);
        WebhookResponse::new(self.fulfill(intent).await)
    }

    pub async fn fulfill(&self, intent: Intent) -> String {
        info!(intent = intent.name(), "Fulfilling intent");

        match intent {
            Intent::GetWeather { city: None } => ASK_CITY.to_string(),
            Intent::GetWeather { city: Some(city) } => match self.lookup(&city).await {
                Ok(report) => weather_summary(&report),
                Err(message) => message,
            },
            Intent::GetDetails { .. } if self.details_mode == DetailsMode::Stub => {
                DETAILS_UNAVAILABLE.to_string()
            }
            Intent::GetDetails {
                city: Some(city),
                request: Some(request),
            } => match self.lookup(&city).await {
                Ok(report) => weather_details(&report, &request)
                    .unwrap_or_else(|| NO_MATCHING_DETAILS.to_string()),
                Err(message) => message,
            },
            Intent::GetDetails { .. } => ASK_CITY_AND_DETAILS.to_string(),
            Intent::Unknown(name) => {
                debug!(intent = %name, "Unrecognised intent");
                NOT_UNDERSTOOD.to_string()
            }
        }
    }

    /// Look up `city`, mapping a failure to its user-facing message.
    async fn lookup(&self, city: &str) -> Result<WeatherReport, String> {
        debug!(%city, "Looking up weather");
        self.provider
            .current_weather(city)
            .await
            .map_err(|e| e.user_message())
    }
}

/// Full `GetWeather` reply.
pub fn weather_summary(report: &WeatherReport) -> String {
    format!(
        "The weather in {} is: {}. Temperature: {} ({}). Humidity: {}. Wind speed: {}.",
        report.city_name,
        report.description,
        report.temperature_celsius(),
        report.temperature_fahrenheit(),
        report.humidity(),
        report.wind_speed(),
    )
}

/// Clauses answering a free-text details request, or `None` if nothing was asked for.
///
/// Keywords are matched case-sensitively.
pub fn weather_details(report: &WeatherReport, request: &str) -> Option<String> {
    let mut details = Vec::new();

    if request.contains("humidity") {
        details.push(format!("Humidity is {}", report.humidity()));
    }
    if request.contains("wind") {
        details.push(format!("Wind speed is {}", report.wind_speed()));
    }

    (!details.is_empty()).then(|| details.join(", "))
}

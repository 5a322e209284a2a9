use std::sync::Arc;

use fulfillment_core::{Config, FulfillmentService, WeatherProvider, provider::provider_from_config};

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub fulfillment: Arc<FulfillmentService>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>, config: &Config) -> Self {
        Self {
            fulfillment: Arc::new(FulfillmentService::new(provider, &config.webhook)),
        }
    }

    /// Build state backed by the OpenWeatherMap provider.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = provider_from_config(config)?;
        Ok(Self::new(provider, config))
    }
}

//! Core library for the weather fulfillment webhook.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the weather source, with an OpenWeatherMap provider
//! - The typed webhook envelope and the closed set of recognised intents
//! - Dispatch of intents to fulfillment text
//!
//! It is used by `fulfillment-webhook`, but carries no HTTP server code so
//! other front ends can reuse it.

pub mod config;
pub mod error;
pub mod fulfillment;
pub mod intent;
pub mod model;
pub mod provider;
pub mod webhook;

pub use config::{Config, DetailsMode, ServerConfig, WeatherConfig, WebhookConfig};
pub use error::{EnvelopeError, LookupError};
pub use fulfillment::FulfillmentService;
pub use intent::{Intent, ParameterNames};
pub use model::WeatherReport;
pub use provider::WeatherProvider;
pub use webhook::{QueryResult, WebhookRequest, WebhookResponse};

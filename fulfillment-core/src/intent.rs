use crate::{config::WebhookConfig, webhook::QueryResult};

/// Parameter keys read from the agent's query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterNames {
    pub city: String,
    pub request: String,
}

impl Default for ParameterNames {
    fn default() -> Self {
        Self::from(&WebhookConfig::default())
    }
}

impl From<&WebhookConfig> for ParameterNames {
    fn from(cfg: &WebhookConfig) -> Self {
        Self {
            city: cfg.city_parameter.clone(),
            request: cfg.request_parameter.clone(),
        }
    }
}

/// Intents this webhook knows how to fulfill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    GetWeather {
        city: Option<String>,
    },
    GetDetails {
        city: Option<String>,
        request: Option<String>,
    },
    /// Any other display name, kept for logging.
    Unknown(String),
}

impl Intent {
    pub const GET_WEATHER: &'static str = "GetWeather";
    pub const GET_DETAILS: &'static str = "GetDetails";

    /// Classify a query result by its intent display name (exact match).
    pub fn from_query(query: &QueryResult, names: &ParameterNames) -> Self {
        match query.intent_name() {
            Self::GET_WEATHER => Self::GetWeather {
                city: query.text_parameter(&names.city),
            },
            Self::GET_DETAILS => Self::GetDetails {
                city: query.text_parameter(&names.city),
                request: query.text_parameter(&names.request),
            },
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::GetWeather { .. } => Self::GET_WEATHER,
            Self::GetDetails { .. } => Self::GET_DETAILS,
            Self::Unknown(name) => name,
        }
    }
}

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single weather lookup.
///
/// Every variant maps to a sentence that can be handed back to the end user
/// through [`LookupError::user_message`]; the `Display` output is meant for logs.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("request for {city} failed: {reason}")]
    Request { city: String, reason: String },

    /// The upstream answered with a non-success status.
    #[error("request for {city} failed with status {status}")]
    Status { city: String, status: StatusCode },

    /// The body did not carry the fields a report is built from.
    #[error("unexpected weather data: {0}")]
    Data(String),
}

impl LookupError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Request { city, .. } | Self::Status { city, .. } => format!(
                "Sorry, I couldn't get weather for {city} right now. Please try again later."
            ),
            Self::Data(_) => {
                "Oops, something went wrong with the weather data. Please try again.".to_string()
            }
        }
    }
}

/// The inbound webhook body could not be read as an envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("request body is not a valid webhook envelope: {0}")]
    Malformed(#[from] serde_json::Error),
}

//! HTTP front end for the weather fulfillment webhook.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving `POST /webhook` for the conversational agent
//! - Logging setup and graceful shutdown

pub mod cli;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

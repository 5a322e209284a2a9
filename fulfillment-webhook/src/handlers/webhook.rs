//! Fulfillment webhook handler

use axum::{Json, body::Bytes, extract::State};
use fulfillment_core::{WebhookRequest, WebhookResponse};
use tracing::{info, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Answer one agent request.
///
/// The body is parsed regardless of its content type, since agent platforms
/// are not consistent about sending one.
#[instrument(skip_all)]
pub async fn fulfill(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    let request = WebhookRequest::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Rejected webhook request");
        ApiError::from(e)
    })?;

    let response = state.fulfillment.handle(&request).await;
    info!(
        intent = request.query_result.intent_name(),
        reply_len = response.fulfillment_text.len(),
        "Webhook fulfilled"
    );

    Ok(Json(response))
}

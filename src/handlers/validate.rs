use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ValidateError;
use crate::metrics::{
    RATE_LIMITED, REQUEST_LATENCY, REQUEST_TOTAL, TRACKED_CLIENTS, UPSTREAM_FAILURES,
};
use crate::models::{ValidationRequest, ValidationResponse};
use crate::rate_limit::ClientKey;
use crate::state::AppState;

fn rejected(key: &ClientKey, err: ValidateError) -> ValidateError {
    RATE_LIMITED.inc();
    tracing::warn!(client = %key, "rate limited");
    err
}

pub async fn validate_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ValidationResponse>, ValidateError> {
    REQUEST_TOTAL.inc();

    let key = ClientKey::from_headers(&headers);

    // over the ceiling wins over a bad body
    state
        .limiter
        .ensure_available(&key)
        .await
        .map_err(|e| rejected(&key, e))?;

    // JSON whatever the content type says
    let payload: ValidationRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(client = %key, "bad request body: {}", e);
        ValidateError::InvalidBody(e.to_string())
    })?;
    let idea = payload.idea().ok_or(ValidateError::MissingInput)?;

    // counted only once the input is usable
    let count = state
        .limiter
        .acquire(&key)
        .await
        .map_err(|e| rejected(&key, e))?;
    TRACKED_CLIENTS.set(state.limiter.store().tracked().await as f64);
    tracing::info!(client = %key, count, max = state.limiter.max(), "validating idea");

    let start_time = Instant::now();
    let result = state.validator.validate(idea).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    match result {
        Ok(report) => Ok(Json(ValidationResponse {
            result: report.into_inner(),
        })),
        Err(ValidateError::Upstream(cause)) => {
            UPSTREAM_FAILURES.inc();
            tracing::error!(client = %key, "validation API error: {}", cause);
            Err(ValidateError::Upstream(cause))
        }
        Err(ValidateError::EmptyResult) => {
            UPSTREAM_FAILURES.inc();
            tracing::error!(client = %key, "generation returned no text");
            Err(ValidateError::EmptyResult)
        }
        Err(e) => Err(e),
    }
}

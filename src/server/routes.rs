use crate::errors::{RiskError, RiskResult};
use crate::models::black_scholes::OptionPricer;
use crate::risk::var::VarCalculator;
use crate::state::{ApiCounters, AppState, CountersSnapshot};
use crate::validation::number_array_field;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use portable_atomic::AtomicU64;
use serde_json::Value;
use std::sync::Arc;

/// POST /api/option -- quote one contract
pub async fn post_option(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = json_body(payload)
        .and_then(|body| OptionPricer::from_json(&body))
        .map(|pricer| pricer.quote());
    respond(&state, &state.counters.option_quotes, result)
}

/// POST /api/option/scenarios -- quote one contract under several spots.
/// Falls back to the configured scenario spots when `spots` is absent.
pub async fn post_option_scenarios(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = json_body(payload).and_then(|body| scenario_quotes(&state, &body));
    respond(&state, &state.counters.scenario_quotes, result)
}

fn scenario_quotes(state: &AppState, body: &Value) -> RiskResult<Value> {
    let pricer = OptionPricer::from_json(body)?;
    let spots = match body.get("spots") {
        Some(_) => number_array_field(body, "spots", "spots")?,
        None => state.config.scenario_spots.clone(),
    };
    let quotes = pricer.scenario_quotes(&spots)?;
    Ok(serde_json::json!({ "quotes": quotes }))
}

/// POST /api/var -- one-day VaR for a two-currency holding
pub async fn post_var(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = json_body(payload)
        .and_then(|body| VarCalculator::from_json(&body))
        .and_then(|calc| calc.report());
    respond(&state, &state.counters.var_reports, result)
}

/// GET /api/counters -- request counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<CountersSnapshot> {
    Json(state.counters.snapshot())
}

/// Malformed or non-JSON bodies are input errors like any other.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> RiskResult<Value> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| RiskError::InvalidInput(rejection.body_text()))
}

fn respond<T: serde::Serialize>(
    state: &AppState,
    success: &AtomicU64,
    result: RiskResult<T>,
) -> Response {
    match result {
        Ok(value) => {
            ApiCounters::bump(success);
            Json(value).into_response()
        }
        Err(e) => {
            if e.is_input_error() {
                ApiCounters::bump(&state.counters.rejected_inputs);
                tracing::warn!(error = %e, "request rejected");
            } else {
                ApiCounters::bump(&state.counters.internal_errors);
                tracing::error!(error = %e, "request failed");
            }
            e.into_response()
        }
    }
}

impl IntoResponse for RiskError {
    fn into_response(self) -> Response {
        let status = if self.is_input_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

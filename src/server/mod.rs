pub mod routes;

use crate::errors::{RiskError, RiskResult};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/option", post(routes::post_option))
        .route("/api/option/scenarios", post(routes::post_option_scenarios))
        .route("/api/var", post(routes::post_var))
        .route("/api/counters", get(routes::get_counters))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>) -> RiskResult<()> {
    let addr = format!("0.0.0.0:{}", state.config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RiskError::Server(format!("bind {addr}: {e}")))?;

    tracing::info!("server listening on {addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| RiskError::Server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (Router, Arc<AppState>) {
        let cfg = AppConfig::from_lookup(|_| None).unwrap();
        let state = AppState::new(cfg);
        (router(state.clone()), state)
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(app, method, uri, body.map(|b| b.to_string())).await
    }

    async fn send(app: Router, method: &str, uri: &str, raw: Option<String>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match raw {
            Some(text) => builder
                .header("content-type", "application/json")
                .body(Body::from(text))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn option_body() -> Value {
        json!({
            "trade_date": "2022-11-23",
            "expiry_date": "2023-05-10",
            "spot_price": 19,
            "strike_price": 17,
            "risk_free_rate": 0.005,
            "volatility": 0.3,
        })
    }

    #[tokio::test]
    async fn test_option_quote() {
        let (app, state) = app();
        let (status, body) = call(app, "POST", "/api/option", Some(option_body())).await;
        assert_eq!(status, StatusCode::OK);
        let call_price = body["call_price"].as_f64().unwrap();
        assert!((call_price - 2.69688).abs() / 2.69688 < 1e-3, "call={call_price}");
        assert_eq!(body["trade_date"], "2022-11-23");
        assert_eq!(state.counters.snapshot().option_quotes, 1);
    }

    #[tokio::test]
    async fn test_option_bad_date_is_422() {
        let (app, state) = app();
        let mut body = option_body();
        body["expiry_date"] = json!("10/05/2023");
        let (status, body) = call(app, "POST", "/api/option", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("expiry_date"));
        assert_eq!(state.counters.snapshot().rejected_inputs, 1);
    }

    #[tokio::test]
    async fn test_malformed_json_is_422_with_error_body() {
        let (app, state) = app();
        for uri in ["/api/option", "/api/option/scenarios", "/api/var"] {
            let (status, body) = send(app.clone(), "POST", uri, Some("{not json".into())).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(body["error"].is_string(), "{uri}: {body}");
        }
        let counters = state.counters.snapshot();
        assert_eq!(counters.rejected_inputs, 3);
        assert_eq!(counters.internal_errors, 0);
    }

    #[tokio::test]
    async fn test_bad_spots_message_names_spots() {
        let (app, _) = app();
        let mut body = option_body();
        body["spots"] = json!([19, "17"]);
        let (status, resp) = call(app, "POST", "/api/option/scenarios", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let msg = resp["error"].as_str().unwrap();
        assert!(msg.contains("spots should be an array of numbers"), "{msg}");
        assert!(!msg.contains("market rates"), "{msg}");
    }

    #[tokio::test]
    async fn test_scenarios_explicit_and_default() {
        let (app, _) = app();
        let mut body = option_body();
        body["spots"] = json!([19, 17, 15]);
        let (status, resp) = call(app.clone(), "POST", "/api/option/scenarios", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let quotes = resp["quotes"].as_array().unwrap();
        assert_eq!(quotes.len(), 3);
        let put_15 = quotes[2]["put_price"].as_f64().unwrap();
        assert!((put_15 - 2.50381).abs() / 2.50381 < 1e-3, "put={put_15}");

        let (status, resp) = call(app, "POST", "/api/option/scenarios", Some(option_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["quotes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_var_report_and_errors() {
        let (app, state) = app();
        let body = json!({
            "rate_series_1": [1.10, 1.00, 1.25, 1.00, 0.80],
            "rate_series_2": [1.0, 1.0, 1.0, 1.0, 1.0],
            "holding_value_1": 100,
            "holding_value_2": 50,
        });
        let (status, resp) = call(app.clone(), "POST", "/api/var", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let var = resp["one_day_var"].as_f64().unwrap();
        assert!((var - 19.0).abs() < 1e-9, "var={var}");
        assert_eq!(resp["observations"], 4);

        let short = json!({
            "rate_series_1": [1.0, 1.1],
            "rate_series_2": [1.0, 1.1],
            "holding_value_1": 1,
            "holding_value_2": 1,
        });
        let (status, resp) = call(app.clone(), "POST", "/api/var", Some(short)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(resp["error"].as_str().unwrap().contains("insufficient observations"));

        let (status, counters) = call(app, "GET", "/api/counters", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(counters["var_reports"], 1);
        assert_eq!(counters["rejected_inputs"], 1);
        assert_eq!(state.counters.snapshot().internal_errors, 0);
    }
}

//! Request routing and endpoint handlers

use adapter_service::AdapterError;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Method, Request, Response, StatusCode};
use serde::Serialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, error, warn};
use types::Symbol;

use crate::state::{AppState, SERVICE_NAME};

const DATA_PATHS: [&str; 2] = ["/crypto-data", "/.netlify/functions/crypto-data"];
const ALERT_PATHS: [&str; 2] = ["/check-alerts", "/.netlify/functions/check-alerts"];
const HEALTH_PATH: &str = "/health";

const FETCH_FAILED: &str = "Failed to fetch crypto data";

/// Route a request to its endpoint
pub async fn handle_request(
    req: Request<Body>,
    state: Arc<AppState>,
) -> Result<Response<Body>, Infallible> {
    let path = req.uri().path();
    let method = req.method();

    debug!("Request: {} {}", method, path);

    let response = if DATA_PATHS.contains(&path) {
        match *method {
            Method::OPTIONS => preflight(&state),
            Method::GET => handle_crypto_data(req.uri().query(), &state).await,
            _ => method_not_allowed(),
        }
    } else if ALERT_PATHS.contains(&path) {
        match *method {
            Method::GET | Method::POST => handle_check_alerts(&state).await,
            _ => method_not_allowed(),
        }
    } else if path == HEALTH_PATH {
        match *method {
            Method::GET => handle_health(&state),
            _ => method_not_allowed(),
        }
    } else {
        json_response(StatusCode::NOT_FOUND, &json!({ "error": "Not found" }))
    };

    Ok(response)
}

/// `GET /crypto-data?symbol=SYM`: cached candles with exchange fallback
async fn handle_crypto_data(query: Option<&str>, state: &AppState) -> Response<Body> {
    let symbol = match requested_symbol(query, &state.default_symbol) {
        Ok(symbol) => symbol,
        Err(message) => {
            return with_cors(
                json_response(
                    StatusCode::BAD_REQUEST,
                    &json!({ "error": "Invalid symbol", "message": message }),
                ),
                state,
            );
        }
    };

    let response = match state.cache.get_or_fetch(&symbol, state.source.as_ref()).await {
        Ok(candles) => json_response(StatusCode::OK, &candles),
        Err(e) => {
            error!("Error fetching crypto data for {}: {}", symbol, e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({ "error": FETCH_FAILED, "message": public_message(&e) }),
            )
        }
    };

    with_cors(response, state)
}

/// `GET|POST /check-alerts`: run one alert check over all symbols
async fn handle_check_alerts(state: &Arc<AppState>) -> Response<Body> {
    let checker = Arc::clone(&state.checker);

    match tokio::spawn(async move { checker.check_all().await }).await {
        Ok(report) => json_response(StatusCode::OK, &report),
        Err(e) => {
            error!("Error in check-alerts: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({ "error": e.to_string() }),
            )
        }
    }
}

fn handle_health(state: &AppState) -> Response<Body> {
    json_response(
        StatusCode::OK,
        &json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "uptime_seconds": state.uptime_seconds(),
            "cache": state.cache.stats(),
        }),
    )
}

fn preflight(state: &AppState) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    with_cors(response, state)
}

fn method_not_allowed() -> Response<Body> {
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &json!({ "error": "Method not allowed" }),
    )
}

/// Symbol from the query string; absent or empty falls back to the default
fn requested_symbol(query: Option<&str>, default: &Symbol) -> Result<Symbol, String> {
    let raw = query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "symbol")
            .map(|(_, value)| value.into_owned())
    });

    match raw {
        Some(value) if !value.trim().is_empty() => Symbol::parse(&value).map_err(|e| e.to_string()),
        _ => Ok(default.clone()),
    }
}

/// Error text safe to return to clients
fn public_message(error: &AdapterError) -> String {
    match error {
        AdapterError::AllSourcesFailed { .. } => "All APIs failed".to_string(),
        other => other.to_string(),
    }
}

fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Body> {
    let (status, body) = match serde_json::to_vec(body) {
        Ok(bytes) => (status, bytes),
        Err(e) => {
            warn!("Failed to serialize response body: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"error":"serialization failed"}"#.to_vec(),
            )
        }
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

fn with_cors(mut response: Response<Body>, state: &AppState) -> Response<Body> {
    if state.enable_cors {
        let headers = response.headers_mut();
        headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
        headers.insert(
            "access-control-allow-headers",
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert(
            "access-control-allow-methods",
            HeaderValue::from_static("GET, OPTIONS"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_symbol_defaults_and_validates() {
        let btc = Symbol::parse("BTC").unwrap();

        assert_eq!(requested_symbol(None, &btc).unwrap(), btc);
        assert_eq!(requested_symbol(Some("symbol="), &btc).unwrap(), btc);
        assert_eq!(requested_symbol(Some("foo=bar"), &btc).unwrap(), btc);
        assert_eq!(
            requested_symbol(Some("symbol=eth"), &btc).unwrap(),
            Symbol::parse("ETH").unwrap()
        );
        assert!(requested_symbol(Some("symbol=BTC%26limit%3D1"), &btc).is_err());
    }
}

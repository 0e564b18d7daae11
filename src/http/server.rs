//! HTTP server setup and the proxy handler.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy, preflight and liveness handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Split the inbound query into dataset id and pass-through params
//! - Translate the upstream outcome into the response contract
//! - Graceful shutdown on Ctrl+C

use std::time::{Duration, Instant};

use axum::{
    extract::{RawQuery, State},
    http::{HeaderName, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::response;
use crate::observability::metrics;
use crate::upstream::{UpstreamClient, UpstreamOutcome};

/// Name of the one required query parameter.
const DATASET_ID_PARAM: &str = "datasetId";

/// Application state injected into handlers.
///
/// Cheap to clone per request: the upstream client shares its connection
/// pool internally and everything else is read-only configuration. No
/// mutable state crosses invocations.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub allow_origin: String,
}

/// HTTP server for the CWA proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let state = AppState {
            upstream: UpstreamClient::new(&config.upstream)?,
            allow_origin: config.cors.allow_origin.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(proxy_handler).options(preflight_handler))
            .route("/healthz", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                X_REQUEST_ID,
            )))
            .layer(SetRequestIdLayer::new(
                HeaderName::from_static(X_REQUEST_ID),
                MakeRequestUuid,
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
///
/// Validates `datasetId`, performs the single upstream call, and maps the
/// classified outcome onto the response contract. Two decision points, no
/// loops, no retries; every branch returns a JSON body with CORS attached.
async fn proxy_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let start = Instant::now();
    let origin = &state.allow_origin;

    let (dataset_id, params) = split_query(query.as_deref().unwrap_or(""));

    let dataset_id = match dataset_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            tracing::warn!("Request rejected: missing datasetId");
            metrics::record_request(400, "rejected", start);
            return response::error_envelope(
                StatusCode::BAD_REQUEST,
                origin,
                &ProxyError::MissingDatasetId.to_string(),
            );
        }
    };

    tracing::debug!(dataset_id = %dataset_id, params = params.len(), "Proxying request");

    match state.upstream.fetch(&dataset_id, &params).await {
        Ok(outcome) => {
            let label = outcome.metrics_label();
            let response = match outcome {
                UpstreamOutcome::Payload(body) => {
                    response::proxy_json(StatusCode::OK, origin, body)
                }
                UpstreamOutcome::ApiError { status, body } => {
                    let message = UpstreamOutcome::api_error_message(&body);
                    tracing::warn!(
                        dataset_id = %dataset_id,
                        status = %status,
                        upstream_message = message,
                        "CWA API returned an error"
                    );
                    response::proxy_json(
                        status,
                        origin,
                        json!({
                            "error": format!("CWA API error ({}): {}", status.as_u16(), message),
                            "cwa_response": body,
                        }),
                    )
                }
                UpstreamOutcome::Malformed { message, snippet } => {
                    tracing::error!(dataset_id = %dataset_id, "CWA response was not JSON");
                    response::proxy_json(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        origin,
                        json!({
                            "error": message,
                            "raw_cwa_response_snippet": snippet,
                            "datasetId": dataset_id,
                        }),
                    )
                }
            };
            metrics::record_request(response.status().as_u16(), label, start);
            response
        }
        Err(e) => {
            tracing::error!(dataset_id = %dataset_id, error = %e, "Upstream call failed");
            metrics::record_request(500, "internal_error", start);
            response::error_envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                origin,
                &format!("Serverless Function Internal Error: {e}"),
            )
        }
    }
}

/// CORS preflight for the proxy route.
async fn preflight_handler(State(state): State<AppState>) -> Response {
    response::preflight(&state.allow_origin)
}

/// Liveness probe for the hosting platform.
async fn health_handler(State(state): State<AppState>) -> Response {
    response::proxy_json(StatusCode::OK, &state.allow_origin, json!({"status": "ok"}))
}

/// Split the raw query string into the dataset id and the pass-through
/// parameters, preserving order and duplicate keys. The first `datasetId`
/// wins; none of its occurrences are forwarded.
fn split_query(raw: &str) -> (Option<String>, Vec<(String, String)>) {
    let mut dataset_id = None;
    let mut params = Vec::new();

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        if key == DATASET_ID_PARAM {
            if dataset_id.is_none() {
                dataset_id = Some(value.into_owned());
            }
        } else {
            params.push((key.into_owned(), value.into_owned()));
        }
    }

    (dataset_id, params)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_extracts_dataset_id() {
        let (id, params) = split_query("datasetId=F-C0032-001&locationName=%E8%87%BA%E5%8C%97");
        assert_eq!(id.as_deref(), Some("F-C0032-001"));
        assert_eq!(
            params,
            vec![("locationName".to_string(), "臺北".to_string())]
        );
    }

    #[test]
    fn split_preserves_duplicate_pass_through_keys() {
        let (id, params) = split_query("locationName=a&datasetId=X&locationName=b");
        assert_eq!(id.as_deref(), Some("X"));
        assert_eq!(
            params,
            vec![
                ("locationName".to_string(), "a".to_string()),
                ("locationName".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn first_dataset_id_wins_and_none_forwarded() {
        let (id, params) = split_query("datasetId=first&datasetId=second");
        assert_eq!(id.as_deref(), Some("first"));
        assert!(params.is_empty());
    }

    #[test]
    fn empty_query_has_no_dataset_id() {
        let (id, params) = split_query("");
        assert_eq!(id, None);
        assert!(params.is_empty());
    }

    #[test]
    fn empty_dataset_id_value_is_kept_as_empty() {
        let (id, _) = split_query("datasetId=");
        assert_eq!(id.as_deref(), Some(""));
    }
}

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use thiserror::Error;

/// Call counters for the collector, backed by an owned registry rather than
/// the process-wide default. Handed to the orchestrator by reference.
pub struct Metrics {
    registry: Registry,
    pub stackoverflow_api_calls: IntCounter,
    pub github_api_calls: IntCounter,
    pub data_collected_bytes: IntCounter,
}

#[derive(Debug, Error)]
pub enum MetricsInitError {
    #[error("RegisterCounter: {source}")]
    RegisterCounter {
        #[from]
        source: prometheus::Error,
    },
}

#[derive(Debug, Error)]
pub enum RenderMetricsError {
    #[error("EncodeMetrics: {source}")]
    EncodeMetrics {
        source: prometheus::Error,
    },

    #[error("MetricsNotUtf8: {source}")]
    MetricsNotUtf8 {
        source: std::string::FromUtf8Error,
    },
}

impl Metrics {
    pub fn new() -> Result<Self, MetricsInitError> {
        let registry = Registry::new();

        let stackoverflow_api_calls = IntCounter::new(
            "collector_stackoverflow_api_calls_total",
            "Total number of API calls to Stack Overflow",
        )?;
        let github_api_calls = IntCounter::new(
            "collector_github_api_calls_total",
            "Total number of API calls to GitHub",
        )?;
        let data_collected_bytes = IntCounter::new(
            "collector_data_collected_bytes_total",
            "Total amount of data collected in bytes",
        )?;

        registry.register(Box::new(stackoverflow_api_calls.clone()))?;
        registry.register(Box::new(github_api_calls.clone()))?;
        registry.register(Box::new(data_collected_bytes.clone()))?;

        Ok(Self {
            registry,
            stackoverflow_api_calls,
            github_api_calls,
            data_collected_bytes,
        })
    }

    pub fn render(&self) -> Result<String, RenderMetricsError> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|source| RenderMetricsError::EncodeMetrics { source })?;

        String::from_utf8(buffer).map_err(|source| RenderMetricsError::MetricsNotUtf8 { source })
    }
}

/// Router for the dedicated metrics listener.
pub fn router(metrics: Arc<Metrics>) -> Router {
    Router::new()
        .route("/metrics", get(handler))
        .layer(Extension(metrics))
}

async fn handler(Extension(metrics): Extension<Arc<Metrics>>) -> impl IntoResponse {
    match metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

use std::sync::Arc;

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use uuid::Uuid;

use crate::collector::{jobs::JobRegistry, spawn_collection};
use crate::config::Config;
use crate::db::PgPool;
use crate::metrics::Metrics;

#[derive(Serialize)]
pub struct TriggerResponseBody {
    pub message: &'static str,
    pub job_id: Uuid,
}

/// Axum handler: GET /fetch-data
///
/// Kicks off a background collection run and replies before it finishes.
/// The returned job id can be polled at /fetch-data/jobs/{id}.
pub async fn handler(
    Extension(pool): Extension<PgPool>,
    Extension(metrics): Extension<Arc<Metrics>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(jobs): Extension<Arc<JobRegistry>>,
) -> impl IntoResponse {
    let job_id = spawn_collection(pool, metrics, config, jobs);

    (
        StatusCode::OK,
        Json(TriggerResponseBody {
            message: "Data fetching initiated",
            job_id,
        }),
    )
}
